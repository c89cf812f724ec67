//! First-time setup: requirement check, personal config creation and an
//! initial build

use extpack_fs::{NormalizedPath, io};

use super::build::{BuildReport, LocalBuild};
use super::{Stage, StageLog};
use crate::layout::ProjectLayout;
use crate::personal::{AppliedFields, ConfigStore, PersonalFields};
use crate::{Error, Result};

/// Answers and switches for a setup run.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub fields: PersonalFields,
    /// Replace an existing config with a fresh copy of the template
    pub overwrite: bool,
    /// Skip the build stage
    pub skip_build: bool,
}

/// What happened to the personal config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutcome {
    /// Written from the template, with these fields substituted
    Written(AppliedFields),
    /// An existing config was kept as it was
    Kept,
}

/// Result of a successful setup.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub config_path: NormalizedPath,
    pub config: ConfigOutcome,
    pub build: Option<BuildReport>,
    pub stages: Vec<Stage>,
    /// Non-fatal conditions, such as a kept config
    pub notices: Vec<String>,
    pub warnings: Vec<String>,
}

/// The setup workflow.
#[derive(Debug, Clone)]
pub struct Setup {
    root: NormalizedPath,
    layout: ProjectLayout,
    store: ConfigStore,
}

impl Setup {
    pub const STAGES: &'static [Stage] = &[
        Stage::CheckRequirements,
        Stage::SetupConfig,
        Stage::Build,
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

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// The config setup writes: the root config the build copies from.
    pub fn config_path(&self) -> NormalizedPath {
        self.layout.root_config(&self.root)
    }

    pub fn config_exists(&self) -> bool {
        self.store.exists(&self.config_path())
    }

    /// Report every missing prerequisite at once.
    pub fn check_requirements(&self) -> Result<()> {
        let missing: Vec<_> = self
            .layout
            .required_files()
            .iter()
            .map(|relative| self.root.join(relative))
            .filter(|path| !path.is_file())
            .map(|path| path.to_native())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRequiredFiles { paths: missing })
        }
    }

    pub fn run(&self, options: &SetupOptions) -> Result<SetupReport> {
        tracing::info!(root = %self.root, "starting setup");
        let mut log = StageLog::default();
        let mut notices = Vec::new();

        log.run(Stage::CheckRequirements, |_| self.check_requirements())?;
        let config = log.run(Stage::SetupConfig, |log| {
            self.setup_config(options, log, &mut notices)
        })?;

        let build = if options.skip_build {
            None
        } else {
            let report = log.run(Stage::Build, |_| {
                LocalBuild::with_layout(self.root.clone(), self.layout.clone()).run()
            })?;
            Some(report)
        };
        log.finish();

        tracing::info!(root = %self.root, ?config, "setup complete");
        Ok(SetupReport {
            config_path: self.config_path(),
            config,
            build,
            stages: log.completed,
            notices,
            warnings: log.warnings,
        })
    }

    fn setup_config(
        &self,
        options: &SetupOptions,
        log: &mut StageLog,
        notices: &mut Vec<String>,
    ) -> Result<ConfigOutcome> {
        let target = self.config_path();
        if self.store.exists(&target) && !options.overwrite {
            let notice = Error::ConfigAlreadyExists {
                path: target.to_native(),
            };
            tracing::info!("{}", notice);
            notices.push(notice.to_string());
            return Ok(ConfigOutcome::Kept);
        }

        // The root template carries the path settings; fall back to the
        // extension's when a project has none
        let root_template = self.layout.root_template(&self.root);
        let template = if root_template.is_file() {
            root_template
        } else {
            self.layout.addon_template(&self.root)
        };
        io::write_atomic(&target, &io::read_bytes(&template)?)?;
        tracing::info!(template = %template, target = %target, "wrote config from template");

        let applied = self.store.apply_personal_fields(&target, &options.fields)?;
        if !applied.is_complete() {
            log.warn(format!(
                "{target} is incomplete; edit it to fill in the remaining details"
            ));
        }
        Ok(ConfigOutcome::Written(applied))
    }
}
