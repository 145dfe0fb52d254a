use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use super::{parse_target, Analyzer, ScanInput};
use crate::config::RuleSet;
use crate::report::types::{Finding, Section, Severity};

const INVALID_URL_PENALTY: u32 = 5;
const INSECURE_SCHEME_PENALTY: u32 = 2;
const IP_HOST_PENALTY: u32 = 3;
const SHORTENER_PENALTY: u32 = 2;
const SUSPICIOUS_TLD_PENALTY: u32 = 2;
const SENSITIVE_MISMATCH_PENALTY: u32 = 1;

// Shape only: 999.999.999.999 matches too.
static IPV4_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("IPv4 shape pattern is valid"));

/// URL Analyzer
///
/// Looks at the structure of the scanned link:
/// - insecure (non-HTTPS) scheme
/// - literal IPv4 host instead of a domain name
/// - known link shorteners hiding the destination
/// - suspicious top-level domains
/// - credential-page keywords on a host unrelated to the claimed sender
pub struct LinkAnalyzer<'a> {
    rules: &'a RuleSet,
}

impl<'a> LinkAnalyzer<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    fn check_scheme(&self, url: &Url) -> Finding {
        if url.scheme() == "https" {
            Finding::new(Severity::Safe, Section::Url, "Uses a secure connection (HTTPS).", 0)
        } else {
            Finding::new(
                Severity::Danger,
                Section::Url,
                "Connection is not secure (HTTP).",
                INSECURE_SCHEME_PENALTY,
            )
        }
    }

    fn check_ip_host(&self, hostname: &str) -> Option<Finding> {
        IPV4_SHAPE.is_match(hostname).then(|| {
            Finding::new(
                Severity::Danger,
                Section::Url,
                "URL is a direct IP address, not a domain name.",
                IP_HOST_PENALTY,
            )
        })
    }

    fn check_shortener(&self, hostname: &str) -> Option<Finding> {
        let shortener = self
            .rules
            .shortener_domains
            .iter()
            .find(|s| hostname.contains(s.as_str()))?;
        debug!(%shortener, "matched shortener");
        Some(Finding::new(
            Severity::Warning,
            Section::Url,
            "Uses a known URL shortener which can hide the final destination.",
            SHORTENER_PENALTY,
        ))
    }

    fn check_suspicious_tld(&self, hostname: &str) -> Option<Finding> {
        let tld = self
            .rules
            .suspicious_tlds
            .iter()
            .find(|t| hostname.ends_with(t.as_str()))?;
        debug!(%tld, "matched suspicious suffix");
        // The message reports the host's own last label, not the table entry.
        let suffix = match hostname.rfind('.') {
            Some(pos) => &hostname[pos..],
            None => hostname,
        };
        Some(Finding::new(
            Severity::Danger,
            Section::Url,
            format!("Uses a suspicious Top-Level Domain (TLD): {}", suffix),
            SUSPICIOUS_TLD_PENALTY,
        ))
    }

    fn check_sensitive_mismatch(&self, raw_url: &str, hostname: &str, sender: &str) -> Option<Finding> {
        if sender.is_empty() {
            return None;
        }
        let lower_url = raw_url.to_lowercase();
        let has_sensitive = self
            .rules
            .sensitive_keywords
            .iter()
            .any(|k| lower_url.contains(&k.to_lowercase()));
        if !has_sensitive || hostname.to_lowercase().contains(&sender.to_lowercase()) {
            return None;
        }
        Some(Finding::new(
            Severity::Warning,
            Section::Url,
            "URL contains sensitive keywords like \"login\" but does not match the sender.",
            SENSITIVE_MISMATCH_PENALTY,
        ))
    }
}

impl Analyzer for LinkAnalyzer<'_> {
    fn name(&self) -> &str {
        "URL Analysis"
    }

    fn section(&self) -> Section {
        Section::Url
    }

    fn analyze(&self, input: &ScanInput<'_>) -> Vec<Finding> {
        let url = match parse_target(input.url) {
            Ok(url) => url,
            Err(err) => {
                debug!(error = %err, "URL did not parse");
                return vec![Finding::new(
                    Severity::Danger,
                    Section::Url,
                    "The entered URL is invalid.",
                    INVALID_URL_PENALTY,
                )];
            }
        };
        let hostname = url.host_str().unwrap_or("");

        let mut findings = vec![self.check_scheme(&url)];
        findings.extend(self.check_ip_host(hostname));
        findings.extend(self.check_shortener(hostname));
        findings.extend(self.check_suspicious_tld(hostname));
        findings.extend(self.check_sensitive_mismatch(input.url, hostname, input.sender));
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::test_input;

    fn run(url: &str, sender: &str) -> Vec<Finding> {
        let rules = RuleSet::default();
        LinkAnalyzer::new(&rules).analyze(&test_input(url, "", sender))
    }

    fn total(findings: &[Finding]) -> u32 {
        findings.iter().map(|f| f.penalty).sum()
    }

    #[test]
    fn test_https_domain_is_safe() {
        let findings = run("https://example.com/", "");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Safe);
        assert_eq!(total(&findings), 0);
    }

    #[test]
    fn test_invalid_url_single_finding() {
        let findings = run("not a url", "PayPal");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Danger);
        assert_eq!(findings[0].message, "The entered URL is invalid.");
        assert_eq!(findings[0].penalty, 5);
    }

    #[test]
    fn test_insecure_scheme() {
        let findings = run("http://example.com", "");
        assert_eq!(findings[0].severity, Severity::Danger);
        assert!(findings[0].message.contains("not secure"));
        assert_eq!(total(&findings), 2);
    }

    #[test]
    fn test_non_http_scheme_is_insecure() {
        let findings = run("ftp://example.com/file", "");
        assert_eq!(findings[0].severity, Severity::Danger);
    }

    #[test]
    fn test_ip_literal_host() {
        let findings = run("https://10.0.0.1/", "");
        assert!(findings.iter().any(|f| f.message.contains("direct IP address")));
        assert_eq!(total(&findings), 3);
    }

    #[test]
    fn test_ip_shape_is_lenient() {
        assert!(IPV4_SHAPE.is_match("999.999.999.999"));
        assert!(!IPV4_SHAPE.is_match("1.2.3"));
        assert!(!IPV4_SHAPE.is_match("1.2.3.4.5"));
        assert!(!IPV4_SHAPE.is_match("1234.1.1.1"));
    }

    #[test]
    fn test_shortener() {
        let findings = run("https://bit.ly/xyz", "");
        let warning = findings.iter().find(|f| f.severity == Severity::Warning).unwrap();
        assert!(warning.message.contains("shortener"));
        assert_eq!(total(&findings), 2);
    }

    #[test]
    fn test_shortener_is_substring_match() {
        let findings = run("https://go.tinyurl.com/abc", "");
        assert!(findings.iter().any(|f| f.message.contains("shortener")));
    }

    #[test]
    fn test_suspicious_tld_reports_host_suffix() {
        let findings = run("https://prize-claim.xyz/", "");
        let danger = findings.iter().find(|f| f.severity == Severity::Danger).unwrap();
        assert_eq!(danger.message, "Uses a suspicious Top-Level Domain (TLD): .xyz");
        assert_eq!(total(&findings), 2);
    }

    #[test]
    fn test_bare_suffix_entry_matches_without_dot() {
        // "live" matches any hostname ending in those letters
        let findings = run("https://deliverlive/", "");
        let danger = findings.iter().find(|f| f.severity == Severity::Danger).unwrap();
        assert_eq!(danger.message, "Uses a suspicious Top-Level Domain (TLD): deliverlive");

        let findings = run("https://mail.olive", "");
        assert!(findings.iter().any(|f| f.message.ends_with(": .olive")));
    }

    #[test]
    fn test_sensitive_keyword_mismatch() {
        let findings = run("https://account-check.example.net/login", "PayPal");
        assert!(findings.iter().any(|f| f.severity == Severity::Warning && f.message.contains("sensitive")));
        assert_eq!(total(&findings), 1);
    }

    #[test]
    fn test_sensitive_keyword_is_case_insensitive() {
        let findings = run("https://example.net/LOGIN", "PayPal");
        assert_eq!(total(&findings), 1);
    }

    #[test]
    fn test_sensitive_keyword_matching_sender() {
        let findings = run("https://secure.mybank.com/login", "MyBank");
        assert!(!findings.iter().any(|f| f.message.contains("sensitive")));
        assert_eq!(total(&findings), 0);
    }

    #[test]
    fn test_sensitive_keyword_without_sender() {
        let findings = run("https://example.net/login", "");
        assert_eq!(total(&findings), 0);
    }

    #[test]
    fn test_checks_accumulate() {
        // insecure + IP + sensitive mismatch
        let findings = run("http://192.168.1.1/login", "Bank");
        assert_eq!(findings.len(), 3);
        assert_eq!(total(&findings), 6);
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleSet {
            shortener_domains: vec!["goo.gl".to_string()],
            ..RuleSet::default()
        };
        let findings = LinkAnalyzer::new(&rules).analyze(&test_input("https://goo.gl/x", "", ""));
        assert!(findings.iter().any(|f| f.message.contains("shortener")));
        let findings = LinkAnalyzer::new(&rules).analyze(&test_input("https://bit.ly/x", "", ""));
        assert!(!findings.iter().any(|f| f.message.contains("shortener")));
    }
}
