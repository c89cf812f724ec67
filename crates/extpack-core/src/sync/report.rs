//! Report from a sync run

use std::fmt;

/// A single change made during a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// A file was copied (overwriting any destination copy)
    CopiedFile { path: String },
    /// A directory subtree was deleted and copied fresh
    ReplacedDirectory { path: String, files: usize },
    /// A personal config was written back from its backup
    RestoredConfig { path: String },
    /// A project config carried by a synced directory was removed
    RemovedProjectConfig { path: String },
    /// A missing personal config was created from a template
    CreatedConfig { path: String },
    /// The distributable script was regenerated from the raw script
    GeneratedScript { path: String },
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CopiedFile { path } => write!(f, "copied {path}"),
            Self::ReplacedDirectory { path, files } => {
                write!(f, "replaced {path}/ ({files} files)")
            }
            Self::RestoredConfig { path } => write!(f, "restored personal {path}"),
            Self::RemovedProjectConfig { path } => write!(f, "removed project copy of {path}"),
            Self::CreatedConfig { path } => write!(f, "created {path} from template"),
            Self::GeneratedScript { path } => write!(f, "generated {path}"),
        }
    }
}

/// Report from a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Actions taken, in order
    pub actions: Vec<SyncAction>,
    /// Listed entries that were absent at the source
    pub skipped: Vec<String>,
    /// Non-fatal conditions the user should know about
    pub warnings: Vec<String>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: SyncAction) {
        tracing::debug!(%action, "sync action");
        self.actions.push(action);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: SyncReport) {
        self.actions.extend(other.actions);
        self.skipped.extend(other.skipped);
        self.warnings.extend(other.warnings);
    }

    /// Paths of every copied file.
    pub fn copied_files(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                SyncAction::CopiedFile { path } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Paths of every replaced directory.
    pub fn replaced_directories(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                SyncAction::ReplacedDirectory { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }
}
