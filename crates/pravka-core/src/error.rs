//! Error types for pravka-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// The configured dictionary file could not be read.
    #[error("failed to read dictionary {}: {source}", path.display())]
    DictionaryFile {
        /// The resolved dictionary path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised at the boundary with the external spell-checking service.
///
/// The correction engine itself never fails; these errors describe a
/// collaborator response that cannot be turned into a complete error list.
#[derive(Error, Debug)]
pub enum SpellerError {
    /// The response body is not a valid error list.
    #[error("malformed speller response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service answered with a non-success HTTP status.
    #[error("speller request failed with HTTP status {status}")]
    Status {
        /// The HTTP status code returned by the service.
        status: u16,
    },
}

/// Result type alias using [`SpellerError`].
pub type SpellerResult<T> = Result<T, SpellerError>;
