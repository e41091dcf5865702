//! Logging setup for the CLI.
//!
//! Human-readable events go to stderr (stdout belongs to command output and
//! the MCP transport). When a log location is known, events are also written
//! as JSON lines to a daily-rotated file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Explicit log file path.
pub const LOG_PATH_ENV: &str = "PRAVKA_LOG_PATH";
/// Log directory.
pub const LOG_DIR_ENV: &str = "PRAVKA_LOG_DIR";

const DEFAULT_LOG_FILE: &str = "pravka.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Explicit log file. Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for the default log file.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `PRAVKA_LOG_PATH` and `PRAVKA_LOG_DIR`, falling back to the
    /// configured directory for the latter.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path.filter(|p| !p.as_os_str().is_empty()),
            log_dir: env_dir.filter(|p| !p.as_os_str().is_empty()).or(config_dir),
        }
    }

    /// Directory and file name of the log sink.
    fn target(&self) -> Option<(PathBuf, String)> {
        if let Some(ref path) = self.log_path {
            let file = path.file_name()?.to_string_lossy().into_owned();
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            return Some((dir, file));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), DEFAULT_LOG_FILE.to_string()))
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, each `-v`
/// raises the level one step, and the configured level is the baseline.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole program.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let Some((dir, file)) = config.target() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    };

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(&dir, &file);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_ansi(false)
        .with_current_span(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    tracing::debug!(dir = %dir.display(), file = %file, "file logging enabled");
    Ok(Some(guard))
}
