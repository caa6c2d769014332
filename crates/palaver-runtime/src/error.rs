//! Runtime error types.
//!
//! Everything here is fatal: startup aborts with a clear log entry before
//! exit. Recoverable failures (per-plugin loads, per-handler bus errors)
//! never surface as `RuntimeError`; they are logged where they occur.

use thiserror::Error;

use palaver_core::error::{AuthError, ConnectionError};
use palaver_core::mention::PatternError;

use crate::config::ConfigError;

/// Errors that can abort the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is missing required keys.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Authentication was rejected; mention matching needs a resolved
    /// identity, so the runtime cannot proceed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The mention pattern derived from the bot's username is invalid.
    #[error(transparent)]
    Mention(#[from] PatternError),

    /// The transport could not establish its connection at startup.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Listening was requested before the bot identity was resolved.
    #[error("cannot listen before authentication resolves the bot identity")]
    NotAuthenticated,

    /// Process replacement failed after the transport already disconnected.
    #[error("process replacement failed: {0}")]
    Restart(#[source] std::io::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
