//! Error types for rexm-core

use std::path::PathBuf;

/// Result type for rexm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rexm-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured root path does not exist. The only fatal error.
    #[error("Required {role} not found at {path}")]
    RootNotFound { role: &'static str, path: PathBuf },

    /// Configuration could not be assembled
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Example name prefix is not one of the known categories
    #[error("Unknown category for example '{name}'")]
    UnknownCategory { name: String },

    /// Example name is not usable as a file stem
    #[error("Invalid example name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Collection already holds an example with this name
    #[error("Example '{name}' already exists in the collection")]
    DuplicateExample { name: String },

    /// Collection holds no example with this name
    #[error("Example '{name}' not found in the collection")]
    ExampleNotFound { name: String },

    /// IDE solution file lacks a section the edit needs
    #[error("Solution file is missing {section}")]
    SolutionFormat { section: String },

    /// External web build command failed
    #[error("Build command `{command}` failed with code {code:?}: {stderr}")]
    BuildFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Filesystem error from rexm-fs
    #[error(transparent)]
    Fs(#[from] rexm_fs::Error),

    /// Generated region error from rexm-blocks
    #[error(transparent)]
    Blocks(#[from] rexm_blocks::Error),
}

impl Error {
    pub fn root_not_found(role: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound {
            role,
            path: path.into(),
        }
    }
}
