//! Check command: categorized errors, corrected text and readability.

use anyhow::bail;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use pravka_core::config::Config;
use pravka_core::{CheckInput, CheckOptions, CheckReport, ErrorCategory, check_text};

use super::InputArgs;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Text and collaborator reports.
    #[command(flatten)]
    pub input: InputArgs,

    /// Show only errors of these categories (repeatable).
    #[arg(long, value_enum, value_name = "CATEGORY")]
    pub only: Vec<ErrorCategory>,

    /// Exit with an error when any error remains.
    #[arg(long)]
    pub strict: bool,
}

/// Run the full check pipeline over a file.
#[instrument(name = "cmd_check", skip_all, fields(file = %args.input.file))]
pub fn cmd_check(
    args: CheckArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(only = ?args.only, strict = args.strict, "executing check command");

    let loaded = args.input.load(config, max_input_bytes)?;
    let input = CheckInput::new(&loaded.text, &loaded.dictionary)
        .with_speller_errors(&loaded.speller_errors)
        .with_grammar_matches(&loaded.grammar_matches);
    let mut report = check_text(&input, &CheckOptions::from(config));
    retain_categories(&mut report, &args.only);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.input.file, &report);
    }

    if args.strict && !report.errors.is_empty() {
        bail!(
            "{} has {} error(s). Run `pravka correct` or fix them by hand.",
            args.input.file,
            report.errors.len()
        );
    }
    Ok(())
}

/// Keep only the requested categories. An empty filter keeps everything.
fn retain_categories(report: &mut CheckReport, only: &[ErrorCategory]) {
    if only.is_empty() {
        return;
    }
    report.errors.retain(|e| only.contains(&e.category));
}

fn category_label(category: ErrorCategory) -> String {
    match category {
        ErrorCategory::Spelling => category.as_str().red().to_string(),
        ErrorCategory::Punctuation => category.as_str().yellow().to_string(),
        ErrorCategory::Semantic => category.as_str().magenta().to_string(),
        ErrorCategory::Other => category.as_str().dimmed().to_string(),
    }
}

fn print_report(file: &camino::Utf8Path, report: &CheckReport) {
    println!("{}", file.bold());

    if report.errors.is_empty() {
        println!("  {}", "no errors".green());
    }
    for error in &report.errors {
        println!(
            "  {}:{} [{}] {}",
            error.offset,
            error.length,
            category_label(error.category),
            error.message
        );
        if !error.suggestions.is_empty() {
            println!(
                "      {} {}",
                "suggest:".dimmed(),
                error.suggestions.join(", ").green()
            );
        }
        if !error.context.is_empty() {
            println!("      {} {}", "context:".dimmed(), error.context);
        }
    }

    let counts = &report.counts;
    println!();
    println!(
        "  {} spelling {}, punctuation {}, semantic {}, other {}",
        "counts:".cyan(),
        counts.spelling,
        counts.punctuation,
        counts.semantic,
        counts.other
    );
    if !report.suppressed.is_empty() {
        println!(
            "  {} {} word(s) in your dictionary",
            "suppressed:".cyan(),
            report.suppressed.len()
        );
    }
    println!(
        "  {} {:.2} ({} sentences, {} words)",
        "readability:".cyan(),
        report.readability.score,
        report.readability.sentence_count,
        report.readability.word_count
    );

    if !report.applied.is_empty() {
        println!();
        println!("{}", "Corrected text".bold().underline());
        println!("{}", report.corrected_text);
    }
}
