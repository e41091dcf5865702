//! Info command: package version and the effective configuration.

use clap::Args;
use owo_colors::OwoColorize;
use pravka_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // Output format follows the global --json flag.
}

#[derive(Serialize)]
struct Info {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    license: &'static str,
    config: EffectiveConfig,
}

/// Settings after defaults and overrides are applied.
#[derive(Serialize)]
struct EffectiveConfig {
    /// Every file that was merged, lowest precedence first.
    files: Vec<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dictionary: Option<String>,
    inline_words: usize,
    max_edit_distance: usize,
    context_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl EffectiveConfig {
    fn new(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            files: sources.files().map(ToString::to_string).collect(),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            dictionary: config
                .dictionary
                .as_ref()
                .map(|p| p.relative().display().to_string()),
            inline_words: config.words.as_ref().map_or(0, Vec::len),
            max_edit_distance: config.max_edit_distance(),
            context_width: config.context_width(),
            min_score: config.min_score,
            max_input_bytes: config.input_limit(),
        }
    }

    /// Label/value pairs for the text report.
    fn rows(&self) -> Vec<(&'static str, String)> {
        let unset = || "(not set)".dimmed().to_string();
        vec![
            (
                "Config files",
                if self.files.is_empty() {
                    "none loaded".yellow().to_string()
                } else {
                    self.files.join(", ").cyan().to_string()
                },
            ),
            ("Log level", self.log_level.to_string()),
            ("Log directory", self.log_dir.clone().unwrap_or_else(unset)),
            (
                "Dictionary",
                self.dictionary
                    .as_ref()
                    .map_or_else(unset, |p| p.cyan().to_string()),
            ),
            ("Inline words", self.inline_words.to_string()),
            ("Max edit distance", self.max_edit_distance.to_string()),
            ("Context width", self.context_width.to_string()),
            (
                "Min readability score",
                self.min_score.map_or_else(unset, |s| format!("{s:.2}")),
            ),
            (
                "Input limit",
                self.max_input_bytes.map_or_else(
                    || "disabled".yellow().to_string(),
                    |b| format!("{b} bytes"),
                ),
            ),
        ]
    }
}

/// Print the package version and effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json = global_json, files = sources.files().count(), "executing info command");

    let info = Info {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        license: env!("CARGO_PKG_LICENSE"),
        config: EffectiveConfig::new(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", info.name.bold(), info.version.green());
    println!("{}", info.description);
    println!("{}: {}", "License".dimmed(), info.license);
    println!();
    println!("{}", "Configuration".bold().underline());
    for (label, value) in info.config.rows() {
        println!("{}: {value}", label.dimmed());
    }
    Ok(())
}
