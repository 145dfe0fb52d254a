use tracing::debug;

use super::{parse_target, Analyzer, ScanInput};
use crate::report::types::{Finding, Section, Severity};

const SENDER_MISMATCH_PENALTY: u32 = 3;

/// Sender Analyzer
///
/// Checks that the claimed sender name appears in the link's domain.
/// An unparseable URL is already reported by the URL analyzer, so it is skipped here.
pub struct SenderAnalyzer;

impl SenderAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SenderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-case the sender and drop spaces, so "My Bank" compares as "mybank".
fn normalize_sender(sender: &str) -> String {
    sender.to_lowercase().replace(' ', "")
}

impl Analyzer for SenderAnalyzer {
    fn name(&self) -> &str {
        "Sender Analysis"
    }

    fn section(&self) -> Section {
        Section::Sender
    }

    fn analyze(&self, input: &ScanInput<'_>) -> Vec<Finding> {
        let sender = input.sender;
        if sender.is_empty() {
            return vec![Finding::new(
                Severity::Info,
                Section::Sender,
                "No sender provided for comparison.",
                0,
            )];
        }

        let Ok(url) = parse_target(input.url) else {
            debug!("skipping sender check for unparseable URL");
            return Vec::new();
        };
        let hostname = url.host_str().unwrap_or("");
        let domain = hostname.strip_prefix("www.").unwrap_or(hostname);

        if domain.to_lowercase().contains(&normalize_sender(sender)) {
            vec![Finding::new(
                Severity::Safe,
                Section::Sender,
                format!("Sender \"{}\" appears to match the URL's domain.", sender),
                0,
            )]
        } else {
            vec![Finding::new(
                Severity::Danger,
                Section::Sender,
                format!("Sender \"{}\" does not match the URL's domain ({}).", sender, domain),
                SENDER_MISMATCH_PENALTY,
            )]
        }
    }
}
