//! Argument parsing and subcommands for the `pravka` binary.
//!
//! Exposed as a library so tests and doc tooling can reach [`Cli`] and
//! [`command()`] without spawning the binary. `main.rs` owns startup:
//! config loading, logging and dispatch.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Color even when piped.
    Always,
    /// Plain text.
    Never,
}

impl ColorChoice {
    /// Set the process-wide override for `owo-colors`. `Auto` leaves its
    /// own terminal detection in place.
    pub fn apply(self) {
        let forced = match self {
            Self::Auto => return,
            Self::Always => true,
            Self::Never => false,
        };
        owo_colors::set_override(forced);
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                   Log filter (e.g., debug, pravka_core=trace)
    PRAVKA_LOG_PATH            Explicit log file path
    PRAVKA_LOG_DIR             Log directory
    PRAVKA_DICTIONARY          Personal dictionary file
    PRAVKA_MAX_EDIT_DISTANCE   Near-match threshold for dictionary words
    PRAVKA_CONTEXT_WIDTH       Characters of context around each error
";

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "pravka")]
#[command(about = "Proofreading for Russian text: spelling triage, commas, corrections and readability", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Extra config file, applied over discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before doing anything else
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check a file: categorized errors, corrected text and readability
    Check(commands::check::CheckArgs),

    /// Print the corrected text of a file
    Correct(commands::correct::CorrectArgs),

    /// Score readability (composite of Flesch-Kincaid and Coleman-Liau)
    Readability(commands::readability::ReadabilityArgs),

    /// Find missing commas before conjunctions
    Punctuation(commands::punctuation::PunctuationArgs),

    /// Show version and effective configuration
    Info(commands::info::InfoArgs),

    /// Serve the checker as MCP tools on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}
