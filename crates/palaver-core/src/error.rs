//! Error types for core contracts.
//!
//! Fatal orchestration errors (configuration, plugin load, runtime) are
//! defined in `palaver-runtime`; this module covers the errors surfaced by
//! the collaborator contracts and the bus.

use thiserror::Error;

/// Type-erased error returned by bus handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while establishing or tearing down a connection.
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    /// Connection could not be established.
    #[error("connection failed: {reason}")]
    Failed {
        /// Reason for failure.
        reason: String,
    },

    /// A connection is already active for this runtime instance.
    #[error("a connection is already active")]
    AlreadyConnected,

    /// Connection closed unexpectedly.
    #[error("connection closed: {reason}")]
    Closed {
        /// Reason for closure.
        reason: String,
    },
}

impl ConnectionError {
    /// Creates a connection-failed error.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during authentication against the control API.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The service rejected the configured credential.
    #[error("authentication rejected: {reason}")]
    Rejected {
        /// Reason reported by the service.
        reason: String,
    },

    /// The authentication request could not be completed.
    #[error("authentication request failed: {0}")]
    Request(String),
}

impl AuthError {
    /// Creates a rejected-credential error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when sending an outbound message.
///
/// Surfaced directly to the caller of `say`; the runtime does not retry.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// The transport is not connected.
    #[error("not connected")]
    NotConnected,

    /// The transport failed to deliver the message.
    #[error("failed to send message: {0}")]
    Transport(String),
}
