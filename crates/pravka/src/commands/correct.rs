//! Correct command: print the corrected text.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use pravka_core::config::Config;
use pravka_core::corrector::{AppliedFix, SkippedFix};
use pravka_core::{CheckInput, CheckOptions, check_text};

use super::InputArgs;

/// Arguments for the `correct` subcommand.
#[derive(Args, Debug)]
pub struct CorrectArgs {
    /// Text and collaborator reports.
    #[command(flatten)]
    pub input: InputArgs,

    /// Also list each applied correction on stderr.
    #[arg(long)]
    pub explain: bool,
}

#[derive(Serialize)]
struct CorrectOutput<'a> {
    text: &'a str,
    applied: &'a [AppliedFix],
    skipped: &'a [SkippedFix],
}

/// Correct a file and print the result.
#[instrument(name = "cmd_correct", skip_all, fields(file = %args.input.file))]
pub fn cmd_correct(
    args: CorrectArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(explain = args.explain, "executing correct command");

    let loaded = args.input.load(config, max_input_bytes)?;
    let input = CheckInput::new(&loaded.text, &loaded.dictionary)
        .with_speller_errors(&loaded.speller_errors)
        .with_grammar_matches(&loaded.grammar_matches);
    let report = check_text(&input, &CheckOptions::from(config));

    if global_json {
        let output = CorrectOutput {
            text: &report.corrected_text,
            applied: &report.applied,
            skipped: &report.skipped,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if args.explain {
        for fix in report.applied.iter().rev() {
            eprintln!(
                "{} {}: {} {} {}",
                "fixed".green(),
                fix.offset,
                format!("{:?}", fix.original).dimmed(),
                "->".dimmed(),
                format!("{:?}", fix.replacement).green()
            );
        }
        for skipped in &report.skipped {
            eprintln!(
                "{} {}: {} ({:?})",
                "skipped".yellow(),
                skipped.offset,
                skipped.rule_id,
                skipped.reason
            );
        }
    }

    // The text is the whole output; keep its own trailing newline, if any.
    if report.corrected_text.ends_with('\n') {
        print!("{}", report.corrected_text);
    } else {
        println!("{}", report.corrected_text);
    }
    Ok(())
}
