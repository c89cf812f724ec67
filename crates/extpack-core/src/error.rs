//! Error types for extpack-core

use std::path::PathBuf;

use crate::workflow::Stage;

/// Result type for extpack-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in extpack-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file the workflow cannot run without is absent
    #[error("Required file not found: {path}")]
    MissingRequiredFile { path: PathBuf },

    /// Several prerequisite files are absent
    #[error("Required files not found: {}", display_paths(paths))]
    MissingRequiredFiles { paths: Vec<PathBuf> },

    /// The raw script carries no `const SCRIPT_VERSION = "x.y"` declaration
    #[error(
        "Script version not found in {path}. Add 'const SCRIPT_VERSION = \"x.y\";' at the top of the script"
    )]
    VersionNotFound { path: PathBuf },

    /// A personal config exists and was left untouched
    #[error("Configuration already exists at {path}")]
    ConfigAlreadyExists { path: PathBuf },

    /// The distributable archive could not be written
    #[error("Failed to write archive {path}: {message}")]
    ArchiveWrite { path: PathBuf, message: String },

    /// An existing archive could not be read back
    #[error("Failed to read archive {path}: {message}")]
    ArchiveRead { path: PathBuf, message: String },

    /// Source and destination of a sync overlap
    #[error("Refusing to sync {from} into {to}: the trees overlap")]
    OverlappingRoots { from: PathBuf, to: PathBuf },

    /// The extension manifest is not a JSON object
    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// A workflow stage failed
    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from extpack-fs
    #[error(transparent)]
    Fs(#[from] extpack_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an error with the workflow stage it happened in.
    pub fn at_stage(self, stage: Stage) -> Self {
        match self {
            // Keep the innermost stage
            Self::StageFailed { .. } => self,
            other => Self::StageFailed {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage a workflow error was raised in, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error, with stage wrappers peeled off.
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
