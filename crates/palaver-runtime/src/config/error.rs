//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or reading configuration.
///
/// All of these are fatal at startup: the runtime cannot proceed without
/// valid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration could not be parsed or extracted.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A dotted-path lookup found no value and no default was supplied.
    #[error("missing configuration key: {0}")]
    MissingKey(String),

    /// I/O error while reading configuration.
    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
