use clap::Parser;
use phish_scan::{config, report};
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// phish-scan — score a link, the message it came with, and the claimed
/// sender for common phishing indicators. Advisory only.
#[derive(Parser, Debug)]
#[command(name = "phish-scan", version, about)]
struct Cli {
    /// URL to scan (e.g., https://secure.mybank.com/login)
    url: String,

    /// Message text that accompanied the link
    #[arg(short, long, conflicts_with = "content_file")]
    content: Option<String>,

    /// Read the message text from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    content_file: Option<PathBuf>,

    /// Claimed sender name (e.g., "PayPal")
    #[arg(short, long)]
    sender: Option<String>,

    /// Config file with custom rule tables (default: ./.phish-scan.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Optional output file path for the report (markdown, or JSON with --json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let url = cli.url.trim();
    if url.is_empty() {
        return Err("Please enter a URL to scan.".into());
    }

    let _main_span = info_span!("phish_scan", url = %url).entered();

    let content = match (&cli.content, &cli.content_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => {
            debug!("reading message content from stdin");
            std::io::read_to_string(std::io::stdin())?
        }
        (None, Some(path)) => {
            debug!(path = %path.display(), "reading message content from file");
            std::fs::read_to_string(path)?
        }
        (None, None) => String::new(),
    };
    let content = content.trim();
    let sender = cli.sender.as_deref().map(str::trim).unwrap_or("");

    info!("loading configuration");
    let config = config::Config::load(cli.config.as_deref())?;

    info!("running analysis");
    let built_report = phish_scan::analyze_with(&config.rules, url, content, sender);
    info!(findings = built_report.findings.len(), score = built_report.score, "analysis complete");

    report::output(&built_report, cli.json, cli.output.as_deref())?;
    info!(tier = %built_report.tier(), "done");

    Ok(())
}
