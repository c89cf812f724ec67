//! User-facing workflows as explicit stage machines
//!
//! Each workflow runs its stages in a fixed order and stops at the first
//! failing stage, returning [`Error::StageFailed`](crate::Error::StageFailed)
//! naming it. Nothing here terminates the process or prints; the CLI decides
//! the exit status from the returned value.

mod build;
mod personal_sync;
mod setup;
mod smart_sync;

use std::fmt;

pub use build::{BuildReport, LocalBuild};
pub use personal_sync::{PersonalSync, PersonalSyncOptions, PersonalSyncReport};
pub use setup::{ConfigOutcome, Setup, SetupOptions, SetupReport};
pub use smart_sync::{SmartSync, SmartSyncReport};

use crate::Result;

/// A workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    // Local build
    CheckConfig,
    CopyConfig,
    NormalizeScript,
    ExtractVersion,
    UpdateManifest,
    Package,
    // Sync
    LoadPeerConfig,
    BackupPersonalConfigs,
    SyncFiles,
    SyncDirectories,
    RestorePersonalConfigs,
    MaterializeMissingConfigs,
    // Setup
    CheckRequirements,
    SetupConfig,
    Build,
    // Smart sync
    LoadSettings,
    SetupFolders,
    SyncPersonal,
    Publish,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckConfig => "CHECK_CONFIG",
            Self::CopyConfig => "COPY_CONFIG",
            Self::NormalizeScript => "NORMALIZE_SCRIPT",
            Self::ExtractVersion => "EXTRACT_VERSION",
            Self::UpdateManifest => "UPDATE_MANIFEST",
            Self::Package => "PACKAGE",
            Self::LoadPeerConfig => "LOAD_PEER_CONFIG",
            Self::BackupPersonalConfigs => "BACKUP_PERSONAL_CONFIGS",
            Self::SyncFiles => "SYNC_FILES",
            Self::SyncDirectories => "SYNC_DIRECTORIES",
            Self::RestorePersonalConfigs => "RESTORE_PERSONAL_CONFIGS",
            Self::MaterializeMissingConfigs => "MATERIALIZE_MISSING_CONFIGS",
            Self::CheckRequirements => "CHECK_REQUIREMENTS",
            Self::SetupConfig => "SETUP_CONFIG",
            Self::Build => "BUILD",
            Self::LoadSettings => "LOAD_SETTINGS",
            Self::SetupFolders => "SETUP_FOLDERS",
            Self::SyncPersonal => "SYNC_PERSONAL",
            Self::Publish => "PUBLISH",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records completed stages and non-fatal warnings while a workflow runs.
#[derive(Debug, Default)]
pub(crate) struct StageLog {
    pub completed: Vec<Stage>,
    pub warnings: Vec<String>,
}

impl StageLog {
    /// Run one stage, tagging any error with it.
    pub fn run<T>(&mut self, stage: Stage, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        tracing::info!(%stage, "entering stage");
        let out = f(self).map_err(|e| {
            tracing::error!(%stage, error = %e, "stage failed");
            e.at_stage(stage)
        })?;
        self.completed.push(stage);
        Ok(out)
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn finish(&mut self) {
        self.completed.push(Stage::Done);
    }
}
