pub mod content;
pub mod link;
pub mod sender;

use thiserror::Error;
use tracing::{debug, info_span};
use url::Url;

use crate::config::RuleSet;
use crate::report::types::{Finding, Section};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Malformed URL {input:?}: {source}")]
    MalformedUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// The three strings one scan looks at. Empty content or sender means "not supplied".
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanInput<'a> {
    pub url: &'a str,
    pub content: &'a str,
    pub sender: &'a str,
}

/// Core trait that all analyzers implement.
/// Analyzers hold no mutable state, so one instance can serve concurrent scans.
pub trait Analyzer: Send + Sync {
    /// Human-readable name of this analyzer (e.g., "URL Analysis")
    fn name(&self) -> &str;

    /// Section every finding of this analyzer is tagged with.
    fn section(&self) -> Section;

    /// Inspect the input and return findings in emission order.
    /// Never fails; unusable input becomes a finding or is skipped.
    fn analyze(&self, input: &ScanInput<'_>) -> Vec<Finding>;
}

/// Parse the scanned URL as an absolute URL.
pub fn parse_target(raw: &str) -> Result<Url, AnalysisError> {
    Url::parse(raw).map_err(|source| AnalysisError::MalformedUrl {
        input: raw.to_string(),
        source,
    })
}

/// Run the URL, content and sender analyzers in that order and concatenate their findings.
pub fn run_all(input: &ScanInput<'_>, rules: &RuleSet) -> Vec<Finding> {
    let link = link::LinkAnalyzer::new(rules);
    let content = content::ContentAnalyzer::new(rules);
    let sender = sender::SenderAnalyzer::new();
    let analyzers: [&dyn Analyzer; 3] = [&link, &content, &sender];

    let mut findings = Vec::new();
    for analyzer in analyzers {
        let _span = info_span!("analyze", analyzer = analyzer.name()).entered();
        let produced = analyzer.analyze(input);
        let penalty: u32 = produced.iter().map(|f| f.penalty).sum();
        debug!(section = %analyzer.section(), findings = produced.len(), penalty, "analyzer result");
        findings.extend(produced);
    }
    findings
}
