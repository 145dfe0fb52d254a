use serde::Serialize;

/// Severity of a single finding. Also used as the display class of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Safe,
    Warning,
    Danger,
    Info,
}

impl Severity {
    /// Icon shown next to a finding in the terminal and markdown output.
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Safe => "✅",
            Severity::Warning => "⚠️",
            Severity::Danger => "❌",
            Severity::Info => "ℹ️",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Safe => write!(f, "safe"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Which analyzer produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Url,
    Content,
    Sender,
}

impl Section {
    /// All sections in the order their analyzers run.
    pub const ALL: [Section; 3] = [Section::Url, Section::Content, Section::Sender];

    pub fn title(self) -> &'static str {
        match self {
            Section::Url => "URL Analysis",
            Section::Content => "Content Analysis",
            Section::Sender => "Sender Analysis",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Url => write!(f, "url"),
            Section::Content => write!(f, "content"),
            Section::Sender => write!(f, "sender"),
        }
    }
}

/// A single observation from an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub section: Section,
    /// Human-readable description of the finding
    pub message: String,
    /// Amount this finding added to the risk score
    pub penalty: u32,
}

impl Finding {
    pub fn new(severity: Severity, section: Section, message: impl Into<String>, penalty: u32) -> Self {
        Self {
            severity,
            section,
            message: message.into(),
            penalty,
        }
    }
}

/// Risk bucket derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    None,
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// 0 is none, 1..=3 low, 4..=8 medium, anything above 8 high.
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => RiskTier::None,
            1..=3 => RiskTier::Low,
            4..=8 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RiskTier::None => "No obvious risks detected, but always remain vigilant.",
            RiskTier::Low => "Low Risk: Some elements are worth noting. Be cautious.",
            RiskTier::Medium => {
                "Medium Risk: Proceed with extreme caution. Several red flags were detected."
            }
            RiskTier::High => "High Risk: This has multiple indicators of a phishing attempt.",
        }
    }

    pub fn class(self) -> Severity {
        match self {
            RiskTier::None => Severity::Safe,
            RiskTier::Low | RiskTier::Medium => Severity::Warning,
            RiskTier::High => Severity::Danger,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::None => write!(f, "NONE"),
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Medium => write!(f, "MEDIUM"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}

/// The one summary-level line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub tier: RiskTier,
    pub message: String,
    pub class: Severity,
}

impl From<RiskTier> for Summary {
    fn from(tier: RiskTier) -> Self {
        Self {
            tier,
            message: tier.message().to_string(),
            class: tier.class(),
        }
    }
}

/// Output of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Findings in analyzer order, then emission order
    pub findings: Vec<Finding>,
    /// Sum of all finding penalties
    pub score: u32,
    pub summary: Summary,
}

impl AnalysisReport {
    pub fn tier(&self) -> RiskTier {
        self.summary.tier
    }

    /// Findings of one section, in emission order.
    pub fn findings_in(&self, section: Section) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.section == section)
    }
}
