//! Analyze command: rule-based sentiment scoring of a file or stdin.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use sentiscope_core::{Sentiment, engine};
use tracing::{debug, instrument};

use super::read_input;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze, or "-" for stdin.
    pub file: Utf8PathBuf,
}

/// Score the sentiment of a text and report category, confidence, and
/// detected language.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(args: AnalyzeArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing analyze command");

    let content = read_input(&args.file)?;
    let report = engine::analyze(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let label = match report.sentiment {
        Sentiment::Positive => report.sentiment.as_str().green().to_string(),
        Sentiment::Negative => report.sentiment.as_str().red().to_string(),
        Sentiment::Neutral => report.sentiment.as_str().to_string(),
    };
    println!("{label} ({:.2}) [{}]", report.score, report.language);
    println!("{}", report.explanation);

    Ok(())
}
