use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for relm operations
#[derive(Error, Debug)]
pub enum RelmError {
    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Invalid version transition: cannot apply '{kind}' to {from}")]
    InvalidTransition { from: String, kind: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Project '{name}' not found in {}", root.display())]
    ProjectNotFound { name: String, root: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Convenience type alias for Results in relm
pub type Result<T> = std::result::Result<T, RelmError>;

impl RelmError {
    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        RelmError::Parse(msg.into())
    }

    /// Create an invalid transition error
    pub fn transition(from: impl Into<String>, kind: impl Into<String>) -> Self {
        RelmError::InvalidTransition {
            from: from.into(),
            kind: kind.into(),
        }
    }

    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RelmError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RelmError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        RelmError::Manifest(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        RelmError::Prompt(msg.into())
    }
}
