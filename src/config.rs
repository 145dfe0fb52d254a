use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Config file looked up in the current directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".phish-scan.toml";

const SHORTENER_DOMAINS: &[&str] = &["bit.ly", "t.co", "tinyurl.com", "is.gd", "soo.gd", "rb.gy"];

// "live" has no leading dot; matching is plain suffix containment.
const SUSPICIOUS_TLDS: &[&str] = &[
    ".vip", ".xyz", ".top", ".club", "live", ".info", ".biz", ".ws", ".cc",
];

const URGENCY_KEYWORDS: &[&str] = &[
    "final notice",
    "enforcement penalties",
    "suspend",
    "suspension",
    "action required",
    "urgent",
    "immediate",
    "verify",
    "validate",
    "confirm",
    "account will be locked",
    "eligible for a refund",
    "outstanding traffic ticket",
    "pay immediately",
    "legal disputes",
];

const SENSITIVE_KEYWORDS: &[&str] = &["login", "secure", "account", "update", "password", "signin"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .phish-scan.toml.
///
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RuleSet,
}

/// The four lookup tables the analyzers match against.
///
/// Each table is ordered; order decides how matches are listed in messages.
/// A table present in the config file replaces the built-in one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Hostname substrings of known link shorteners
    pub shortener_domains: Vec<String>,
    /// Hostname suffixes associated with abuse
    pub suspicious_tlds: Vec<String>,
    /// Lower-case phrases that pressure the reader to act
    pub urgency_keywords: Vec<String>,
    /// Lower-case words that make a URL look like a credential page
    pub sensitive_keywords: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            shortener_domains: owned(SHORTENER_DOMAINS),
            suspicious_tlds: owned(SUSPICIOUS_TLDS),
            urgency_keywords: owned(URGENCY_KEYWORDS),
            sensitive_keywords: owned(SENSITIVE_KEYWORDS),
        }
    }
}

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}

static BUILTIN_RULES: LazyLock<RuleSet> = LazyLock::new(RuleSet::default);

impl RuleSet {
    /// Shared read-only copy of the built-in tables.
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN_RULES
    }

    /// Trim entries and drop blank ones; an empty pattern would match every input.
    fn sanitize(&mut self) {
        for table in [
            &mut self.shortener_domains,
            &mut self.suspicious_tlds,
            &mut self.urgency_keywords,
            &mut self.sensitive_keywords,
        ] {
            table.retain(|entry| !entry.trim().is_empty());
            for entry in table.iter_mut() {
                *entry = entry.trim().to_string();
            }
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from .phish-scan.toml in
    /// the current directory. A missing default file yields the built-in config;
    /// a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.rules.sanitize();
        Ok(config)
    }
}
