//! Error types for rexm-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from rexm-core
    #[error(transparent)]
    Core(#[from] rexm_core::Error),

    /// Error from rexm-fs
    #[error(transparent)]
    Fs(#[from] rexm_fs::Error),

    /// JSON output could not be produced
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
