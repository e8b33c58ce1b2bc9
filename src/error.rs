//! Error types for pylight

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pylight operations
pub type Result<T> = std::result::Result<T, PylightError>;

/// Host-level error types
///
/// The highlighting pipeline itself never fails; these cover loading
/// configuration and reading input files.
#[derive(Error, Debug)]
pub enum PylightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown color: {0}")]
    InvalidColor(String),

    #[error("Unknown style category: {0}")]
    UnknownCategory(String),

    #[error("{0}")]
    Message(String),
}
