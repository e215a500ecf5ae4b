//! Error types for auth session operations.

use thiserror::Error;

/// Result type for auth session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Auth session errors.
///
/// `StorageNotReady` is the only error the [`AuthSession`](crate::AuthSession)
/// operations produce. A missing record or a missing field is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The underlying session storage has not been started.
    ///
    /// This is an initialization-order bug in the surrounding
    /// infrastructure, not a condition to recover from.
    #[error("Unable to use session for auth info: session not started (namespace '{namespace}')")]
    StorageNotReady { namespace: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Precondition failure for `namespace`. Storage implementations return
    /// this from reads and writes attempted while inactive.
    pub fn not_ready(namespace: &str) -> Self {
        Self::StorageNotReady {
            namespace: namespace.to_string(),
        }
    }

    /// Whether this is the "session not started" precondition failure.
    pub fn is_storage_not_ready(&self) -> bool {
        matches!(self, Self::StorageNotReady { .. })
    }
}
