pub mod types;

pub use types::{AnalysisReport, Finding, RiskTier, Section, Severity, Summary};

use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build a report from the ordered findings of one scan.
/// The score is the sum of the finding penalties; the tier follows from it.
pub fn build(findings: Vec<Finding>) -> AnalysisReport {
    let score = findings.iter().map(|f| f.penalty).sum();
    let tier = RiskTier::from_score(score);
    AnalysisReport {
        findings,
        score,
        summary: Summary::from(tier),
    }
}

/// Output the report.
///
/// - no path: coloured terminal output, or JSON on stdout when `json` is set
/// - path: markdown file, or a JSON file when `json` is set
#[instrument(skip(report), fields(score = report.score, tier = %report.tier()))]
pub fn output(report: &AnalysisReport, json: bool, output_path: Option<&Path>) -> Result<(), ReportError> {
    match (output_path, json) {
        (None, false) => {
            debug!("writing report to terminal");
            print_terminal_report(report);
            Ok(())
        }
        (None, true) => {
            debug!("writing JSON report to stdout");
            println!("{}", render_json(report)?);
            Ok(())
        }
        (Some(path), false) => {
            debug!(path = %path.display(), "writing markdown report to file");
            std::fs::write(path, render_markdown(report))?;
            Ok(())
        }
        (Some(path), true) => {
            debug!(path = %path.display(), "writing JSON report to file");
            std::fs::write(path, render_json(report)?)?;
            Ok(())
        }
    }
}

/// Format and print the report to the terminal with colors.
///
/// ═══ URL Analysis ═══
///   ❌ Connection is not secure (HTTP).
/// ...
///
/// Risk Score: 5
/// ═══ Medium Risk: Proceed with extreme caution. ... ═══
fn print_terminal_report(report: &AnalysisReport) {
    println!();
    for section in Section::ALL {
        println!("═══ {} ═══", section.title());
        let mut empty = true;
        for finding in report.findings_in(section) {
            empty = false;
            println!("  {} {}", finding.severity.icon(), colorize(finding.severity, &finding.message));
        }
        if empty {
            println!("  No findings.");
        }
        println!();
    }

    println!("Risk Score: {}", report.score);
    println!(
        "═══ {} ═══",
        colorize(report.summary.class, &report.summary.message).bold()
    );
    println!();
}

/// Render the report as markdown, grouped by section.
fn render_markdown(report: &AnalysisReport) -> String {
    let mut md = String::from("# Phishing Risk Report\n\n");

    for section in Section::ALL {
        md.push_str(&format!("## {}\n\n", section.title()));
        let mut empty = true;
        for finding in report.findings_in(section) {
            empty = false;
            md.push_str(&format!(
                "- {} **[{}]** {}\n",
                finding.severity.icon(),
                finding.severity,
                finding.message
            ));
        }
        if empty {
            md.push_str("No findings.\n");
        }
        md.push('\n');
    }

    md.push_str(&format!("## Summary\n\n**Risk Score:** {}\n\n", report.score));
    md.push_str(&format!(
        "**Risk Level: {}**: {}\n",
        report.tier(),
        report.summary.message
    ));
    md
}

fn render_json(report: &AnalysisReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Helper to colorize text by severity for terminal output.
fn colorize(severity: Severity, text: &str) -> colored::ColoredString {
    match severity {
        Severity::Danger => text.red(),
        Severity::Warning => text.yellow(),
        Severity::Safe => text.green(),
        Severity::Info => text.blue(),
    }
}
