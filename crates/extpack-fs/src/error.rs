//! Error types for extpack-fs

use std::path::PathBuf;

/// Result type for extpack-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in extpack-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document at {path}: {message}")]
    DocumentParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} document at {path}: {message}")]
    DocumentSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported document format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid relative path '{path}': {reason}")]
    InvalidRelativePath { path: String, reason: String },

    #[error("Failed to walk directory {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
