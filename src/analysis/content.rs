use tracing::debug;

use super::{Analyzer, ScanInput};
use crate::config::RuleSet;
use crate::report::types::{Finding, Section, Severity};

/// Content Analyzer
///
/// Scans message text for phrases that push the reader to act without
/// thinking. Each distinct matched phrase adds one point.
pub struct ContentAnalyzer<'a> {
    rules: &'a RuleSet,
}

impl<'a> ContentAnalyzer<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Urgency phrases found in the content, in table order, without repeats.
    fn matched_keywords(&self, content: &str) -> Vec<&'a str> {
        let lower = content.to_lowercase();
        let mut matched: Vec<&'a str> = Vec::new();
        for keyword in &self.rules.urgency_keywords {
            if lower.contains(&keyword.to_lowercase()) && !matched.contains(&keyword.as_str()) {
                matched.push(keyword.as_str());
            }
        }
        matched
    }
}

impl Analyzer for ContentAnalyzer<'_> {
    fn name(&self) -> &str {
        "Content Analysis"
    }

    fn section(&self) -> Section {
        Section::Content
    }

    fn analyze(&self, input: &ScanInput<'_>) -> Vec<Finding> {
        if input.content.is_empty() {
            return vec![Finding::new(
                Severity::Info,
                Section::Content,
                "No message content provided to analyze.",
                0,
            )];
        }

        let matched = self.matched_keywords(input.content);
        debug!(matched = matched.len(), "urgency keywords");
        if matched.is_empty() {
            return vec![Finding::new(
                Severity::Safe,
                Section::Content,
                "No high-urgency keywords found in the message.",
                0,
            )];
        }

        vec![Finding::new(
            Severity::Warning,
            Section::Content,
            format!(
                "Message contains keywords that create urgency: \"{}\".",
                matched.join(", ")
            ),
            matched.len() as u32,
        )]
    }
}
