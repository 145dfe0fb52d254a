//! Rule-based phishing heuristics for a URL, optional message text, and an
//! optional claimed sender. Advisory only: nothing is fetched or resolved,
//! every check works on the syntax of the three strings.

pub mod analysis;
pub mod config;
pub mod report;

pub use analysis::{Analyzer, ScanInput};
pub use config::{Config, RuleSet};
pub use report::{AnalysisReport, Finding, RiskTier, Section, Severity, Summary};

use tracing::{info_span, instrument};

/// Score one URL/content/sender combination with the built-in rule tables.
///
/// Empty `content` or `sender` means "not supplied". Never fails: an
/// unparseable URL becomes a danger finding.
pub fn analyze(url: &str, content: &str, sender: &str) -> AnalysisReport {
    analyze_with(RuleSet::builtin(), url, content, sender)
}

/// Same as [`analyze`], with caller-supplied rule tables.
#[instrument(skip(rules, content), fields(content_len = content.len()))]
pub fn analyze_with(rules: &RuleSet, url: &str, content: &str, sender: &str) -> AnalysisReport {
    let input = ScanInput {
        url,
        content,
        sender,
    };
    let findings = analysis::run_all(&input, rules);
    let _span = info_span!("aggregate", findings = findings.len()).entered();
    report::build(findings)
}
