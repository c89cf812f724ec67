//! Project to personal folder sync
//!
//! The personal folder is a second working copy of the project owned by the
//! user. Project files are copied over and synced directories are replaced,
//! while the personal configs listed in
//! [`ProjectLayout::protected_paths`] are captured before any write and
//! reinstated afterwards, whether or not the copy succeeded.

use extpack_fs::NormalizedPath;

use super::build::{BuildReport, LocalBuild};
use super::{Stage, StageLog};
use crate::layout::ProjectLayout;
use crate::personal::{ConfigStore, Materialized};
use crate::preserve::PreservedFiles;
use crate::sync::{SyncAction, SyncReport, TreeSync};
use crate::{Error, Result};

/// Knobs for a personal sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalSyncOptions {
    /// Create personal configs that are still missing after the sync
    pub materialize_missing_configs: bool,
    /// Run a local build inside the personal folder afterwards
    pub rebuild: bool,
}

impl Default for PersonalSyncOptions {
    fn default() -> Self {
        Self {
            materialize_missing_configs: true,
            rebuild: false,
        }
    }
}

/// Result of a successful personal sync.
#[derive(Debug, Clone, Default)]
pub struct PersonalSyncReport {
    pub sync: SyncReport,
    /// The personal folder's build, when a rebuild was requested
    pub build: Option<BuildReport>,
    pub stages: Vec<Stage>,
}

impl PersonalSyncReport {
    pub fn warnings(&self) -> &[String] {
        &self.sync.warnings
    }
}

/// Syncs a project into a personal folder without touching personal configs.
#[derive(Debug, Clone)]
pub struct PersonalSync {
    project_root: NormalizedPath,
    personal_root: NormalizedPath,
    layout: Option<ProjectLayout>,
    options: PersonalSyncOptions,
}

impl PersonalSync {
    /// Stages in execution order. `MATERIALIZE_MISSING_CONFIGS` and `BUILD`
    /// only run when enabled.
    pub const STAGES: &'static [Stage] = &[
        Stage::LoadPeerConfig,
        Stage::BackupPersonalConfigs,
        Stage::SyncFiles,
        Stage::SyncDirectories,
        Stage::RestorePersonalConfigs,
        Stage::MaterializeMissingConfigs,
        Stage::Build,
        Stage::Done,
    ];

    pub fn new(project_root: NormalizedPath, personal_root: NormalizedPath) -> Self {
        Self {
            project_root,
            personal_root,
            layout: None,
            options: PersonalSyncOptions::default(),
        }
    }

    /// Use an already loaded layout instead of reading the project's.
    pub fn with_layout(mut self, layout: ProjectLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_options(mut self, options: PersonalSyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn personal_root(&self) -> &NormalizedPath {
        &self.personal_root
    }

    pub fn run(&self) -> Result<PersonalSyncReport> {
        tracing::info!(
            project = %self.project_root,
            personal = %self.personal_root,
            "starting personal sync"
        );
        let mut log = StageLog::default();
        let mut report = SyncReport::new();

        let (layout, tree) = log.run(Stage::LoadPeerConfig, |_| self.load_peer_config())?;
        let set = layout.sync_file_set()?;

        let preserved = log.run(Stage::BackupPersonalConfigs, |_| {
            PreservedFiles::capture(&self.personal_root, &layout.protected_paths())
        })?;
        tracing::debug!(captured = ?preserved.captured(), "personal configs captured");

        let synced = log
            .run(Stage::SyncFiles, |_| tree.sync_files(&set, &mut report))
            .and_then(|()| {
                log.run(Stage::SyncDirectories, |_| {
                    tree.sync_directories(&set, &mut report)
                })
            });

        // Runs whatever the copy stages returned
        let restored = log.run(Stage::RestorePersonalConfigs, |_| preserved.restore());
        synced?;
        let restored = restored?;

        for path in restored.restored {
            report.push(SyncAction::RestoredConfig { path });
        }
        for path in restored.removed {
            report.push(SyncAction::RemovedProjectConfig { path });
        }

        if self.options.materialize_missing_configs {
            log.run(Stage::MaterializeMissingConfigs, |log| {
                self.materialize_missing_configs(&layout, &mut report, log)
            })?;
        }

        let build = if self.options.rebuild {
            let build = log.run(Stage::Build, |_| {
                LocalBuild::new(self.personal_root.clone())?.run()
            })?;
            Some(build)
        } else {
            None
        };
        log.finish();

        report.warnings.extend(log.warnings);
        tracing::info!(
            personal = %self.personal_root,
            actions = report.actions.len(),
            "personal sync complete"
        );
        Ok(PersonalSyncReport {
            sync: report,
            build,
            stages: log.completed,
        })
    }

    fn load_peer_config(&self) -> Result<(ProjectLayout, TreeSync)> {
        if !self.project_root.is_dir() {
            return Err(Error::MissingRequiredFile {
                path: self.project_root.to_native(),
            });
        }
        if !self.personal_root.is_dir() {
            return Err(Error::MissingRequiredFile {
                path: self.personal_root.to_native(),
            });
        }

        let layout = match &self.layout {
            Some(layout) => layout.clone(),
            None => ProjectLayout::load(&self.project_root)?,
        };
        let tree = TreeSync::new(self.project_root.clone(), self.personal_root.clone());
        tree.check_roots(&layout.sync_file_set()?)?;
        Ok((layout, tree))
    }

    /// Create the top-level and nested personal configs when they are absent.
    ///
    /// Existing configs, including ones just restored, are never touched.
    fn materialize_missing_configs(
        &self,
        layout: &ProjectLayout,
        report: &mut SyncReport,
        log: &mut StageLog,
    ) -> Result<()> {
        let store = ConfigStore::new();

        let top_level = [
            layout.root_template(&self.personal_root),
            layout.master_template_path(&self.personal_root),
        ];
        let nested = [layout.addon_template(&self.personal_root)];

        for (target, relative, templates) in [
            (
                layout.root_config(&self.personal_root),
                layout.config_file.clone(),
                &top_level[..],
            ),
            (
                layout.addon_config(&self.personal_root),
                layout.nested_config(),
                &nested[..],
            ),
        ] {
            if store.exists(&target) {
                continue;
            }
            let Some(template) = templates.iter().find(|t| t.is_file()) else {
                log.warn(format!("{relative} is missing and no template is available"));
                continue;
            };
            if store.materialize_from_template(template, &target)? == Materialized::Created {
                report.push(SyncAction::CreatedConfig {
                    path: relative.clone(),
                });
                log.warn(format!("{target} was created from a template; fill in your personal details"));
            }
        }
        Ok(())
    }
}
