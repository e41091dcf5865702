//! Punctuation command: list missing commas before conjunctions.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use pravka_core::punctuation;

use super::read_input_file;

/// Arguments for the `punctuation` subcommand.
#[derive(Args, Debug)]
pub struct PunctuationArgs {
    /// File to scan.
    pub file: Utf8PathBuf,
}

/// Scan a file for missing commas.
#[instrument(name = "cmd_punctuation", skip_all, fields(file = %args.file))]
pub fn cmd_punctuation(
    args: PunctuationArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing punctuation command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let findings = punctuation::scan(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
        return Ok(());
    }

    if findings.is_empty() {
        println!("{}: {}", args.file, "no missing commas".green());
        return Ok(());
    }
    println!("{}: {} missing comma(s)", args.file, findings.len());
    for finding in &findings {
        println!(
            "  {} [{}] {} {} {}",
            finding.offset,
            finding.rule_id.yellow(),
            finding.message,
            "->".dimmed(),
            finding.suggestion.green()
        );
    }
    Ok(())
}
