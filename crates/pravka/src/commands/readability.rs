//! Readability command: composite score with an optional minimum.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use pravka_core::readability;

use super::read_input_file;

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Minimum acceptable composite score (0.0 to 1.0).
    #[arg(long)]
    pub min_score: Option<f64>,
}

/// Score readability of a file.
#[instrument(name = "cmd_readability", skip_all, fields(file = %args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    config_min_score: Option<f64>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, min_score = ?args.min_score, "executing readability command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let min_score = args.min_score.or(config_min_score);
    let report = readability::check_readability(&content, min_score);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.below_min {
        let min = report.min_score.unwrap_or(0.0);
        bail!(
            "{} scores {:.2} (min: {:.2}). Shorten sentences or use simpler words.",
            args.file,
            report.metrics.score,
            min,
        );
    } else if let Some(min) = report.min_score {
        println!(
            "{} {} scores {:.2} (min: {:.2})",
            "PASS:".green(),
            args.file,
            report.metrics.score,
            min,
        );
    } else {
        let m = &report.metrics;
        println!("{:.2}", m.score);
        if m.word_count == 0 {
            return Ok(());
        }
        println!(
            "  {} {:.1}  {} {:.1}",
            "flesch-kincaid:".dimmed(),
            m.flesch_kincaid,
            "coleman-liau:".dimmed(),
            m.coleman_liau
        );
        println!(
            "  {} {}  {} {}  {} {:.1}%",
            "sentences:".dimmed(),
            m.sentence_count,
            "words:".dimmed(),
            m.word_count,
            "complex:".dimmed(),
            m.complex_words_percentage
        );
    }

    Ok(())
}
