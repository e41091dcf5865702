//! pravka CLI
#![deny(unsafe_code)]

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use pravka::{Cli, Commands, commands};
use pravka_core::config::{Config, ConfigLoader, ConfigSources};
use std::path::PathBuf;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // arg_required_else_help guarantees a subcommand from here on
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }
    let (config, sources) = load_config(cli.config.as_ref())?;

    let log_dir = config.log_dir.as_ref().map(|d| d.as_std_path().to_path_buf());
    let observability = observability::ObservabilityConfig::from_env_with_overrides(log_dir);
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&observability, filter)
        .context("failed to initialize logging")?;
    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        config_files = sources.files().count(),
        "CLI initialized"
    );

    let result = run(command, cli.json, config, sources);
    if let Err(ref err) = result {
        tracing::error!(error = %err, "command failed");
    }
    result
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

/// Discover config from the working directory, plus `--config` if given.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "current directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path.clone(), "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn run(command: Commands, json: bool, config: Config, sources: ConfigSources) -> anyhow::Result<()> {
    let limit = config.input_limit();
    match command {
        Commands::Check(args) => commands::check::cmd_check(args, json, &config, limit),
        Commands::Correct(args) => {
            commands::correct::cmd_correct(args, json, &config, limit)
        }
        Commands::Readability(args) => {
            commands::readability::cmd_readability(args, json, config.min_score, limit)
        }
        Commands::Punctuation(args) => commands::punctuation::cmd_punctuation(args, json, limit),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, &sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to create async runtime for MCP server")?
            .block_on(commands::serve::cmd_serve(args, limit, config)),
    }
}
