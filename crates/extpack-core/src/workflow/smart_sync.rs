//! Settings-driven sync: personal folder plus public addon folder
//!
//! Reads `PERSONAL_FOLDER`, `ADDON_SYNC_FOLDER` and `AUTO_CREATE_FOLDERS`
//! from the project's config. The personal folder gets a full
//! [`PersonalSync`]; the addon folder gets the publish set and a freshly
//! generated script. The personal config is never published.

use std::path::Path;

use extpack_fs::{NormalizedPath, io};

use super::personal_sync::{PersonalSync, PersonalSyncReport};
use super::{Stage, StageLog};
use crate::layout::ProjectLayout;
use crate::personal::{ConfigStore, PersonalSettings};
use crate::script::RawScript;
use crate::sync::{SyncAction, SyncReport, TreeSync};
use crate::{Error, Result};

/// Result of a successful smart sync.
#[derive(Debug, Clone)]
pub struct SmartSyncReport {
    /// The personal folder synced, or `None` when personal sync was skipped
    pub personal_folder: Option<NormalizedPath>,
    pub personal: Option<PersonalSyncReport>,
    pub addon_folder: NormalizedPath,
    pub publish: SyncReport,
    pub stages: Vec<Stage>,
    pub warnings: Vec<String>,
}

/// The smart sync workflow.
#[derive(Debug, Clone)]
pub struct SmartSync {
    root: NormalizedPath,
    layout: ProjectLayout,
    store: ConfigStore,
}

struct Folders {
    personal: Option<NormalizedPath>,
    addon: NormalizedPath,
}

impl SmartSync {
    pub const STAGES: &'static [Stage] = &[
        Stage::LoadSettings,
        Stage::SetupFolders,
        Stage::SyncPersonal,
        Stage::Publish,
        Stage::Done,
    ];

    pub fn new(root: NormalizedPath) -> Result<Self> {
        let layout = ProjectLayout::load(&root)?;
        Ok(Self::with_layout(root, layout))
    }

    pub fn with_layout(root: NormalizedPath, layout: ProjectLayout) -> Self {
        Self {
            root,
            layout,
            store: ConfigStore::new(),
        }
    }

    pub fn run(&self) -> Result<SmartSyncReport> {
        tracing::info!(root = %self.root, "starting smart sync");
        let mut log = StageLog::default();

        let settings = log.run(Stage::LoadSettings, |_| {
            self.store.load_settings(&self.layout.root_config(&self.root))
        })?;
        let folders = log.run(Stage::SetupFolders, |log| self.setup_folders(&settings, log))?;

        let personal = log.run(Stage::SyncPersonal, |_| {
            folders
                .personal
                .as_ref()
                .map(|folder| {
                    PersonalSync::new(self.root.clone(), folder.clone())
                        .with_layout(self.layout.clone())
                        .run()
                })
                .transpose()
        })?;

        let publish = log.run(Stage::Publish, |_| self.publish(&folders.addon))?;
        log.finish();

        let mut warnings = log.warnings;
        if let Some(report) = &personal {
            warnings.extend(report.warnings().iter().cloned());
        }
        warnings.extend(publish.warnings.iter().cloned());

        tracing::info!(addon = %folders.addon, "smart sync complete");
        Ok(SmartSyncReport {
            personal_folder: folders.personal,
            personal,
            addon_folder: folders.addon,
            publish,
            stages: log.completed,
            warnings,
        })
    }

    fn setup_folders(&self, settings: &PersonalSettings, log: &mut StageLog) -> Result<Folders> {
        let auto_create = settings.auto_create_folders();

        let personal = match settings.personal_folder.as_deref().map(str::trim) {
            None | Some(".") => {
                tracing::info!("no personal folder configured, personal sync skipped");
                None
            }
            Some(value) => {
                let folder = self.resolve_folder(value);
                if folder.is_dir() {
                    Some(folder)
                } else if auto_create {
                    std::fs::create_dir_all(folder.to_native())
                        .map_err(|e| extpack_fs::Error::io(folder.to_native(), e))?;
                    tracing::info!(folder = %folder, "created personal folder");
                    Some(folder)
                } else {
                    log.warn(format!(
                        "personal folder {folder} does not exist and AUTO_CREATE_FOLDERS is off; personal sync skipped"
                    ));
                    None
                }
            }
        };

        let addon = settings
            .addon_folder
            .as_deref()
            .map(|value| self.resolve_folder(value.trim()))
            .unwrap_or_else(|| self.layout.addon_path(&self.root));
        if !addon.is_dir() {
            std::fs::create_dir_all(addon.to_native())
                .map_err(|e| extpack_fs::Error::io(addon.to_native(), e))?;
            tracing::info!(folder = %addon, "created addon folder");
        }

        Ok(Folders { personal, addon })
    }

    /// Relative settings are taken from the project root.
    fn resolve_folder(&self, value: &str) -> NormalizedPath {
        if Path::new(value).is_absolute() || has_drive_prefix(value) {
            NormalizedPath::new(value)
        } else {
            self.root.join(value)
        }
    }

    /// Copy the publish set into `target` and regenerate its script.
    ///
    /// When `target` is the extension directory itself the copy is skipped;
    /// only the script is regenerated.
    fn publish(&self, target: &NormalizedPath) -> Result<SyncReport> {
        let source = self.layout.addon_path(&self.root);
        let set = self.layout.publish_file_set()?;

        let mut report = if source.resolved() == target.resolved() {
            tracing::debug!(target = %target, "publishing in place, copy skipped");
            SyncReport::new()
        } else {
            TreeSync::new(source, target.clone()).run(&set)?
        };

        let script_path = self.layout.script_path(&self.root);
        match RawScript::read(&script_path) {
            Ok(raw) => {
                let generated = target.join(&self.layout.addon_script);
                io::write_text(&generated, &raw.normalized())?;
                report.push(SyncAction::GeneratedScript {
                    path: self.layout.addon_script.clone(),
                });
            }
            Err(Error::MissingRequiredFile { .. }) => {
                report.warn(format!(
                    "{} not found; {} was not regenerated",
                    self.layout.source_script, self.layout.addon_script
                ));
            }
            Err(e) => return Err(e),
        }

        Ok(report)
    }
}

fn has_drive_prefix(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && matches!(bytes[2], b'\\' | b'/')
}
