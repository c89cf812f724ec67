//! Local build: config copy, script normalization, manifest version bump
//! and packaging

use extpack_fs::{NormalizedPath, io};

use super::{Stage, StageLog};
use crate::layout::ProjectLayout;
use crate::package::{PackageReport, Packager};
use crate::personal::{ConfigStore, Materialized};
use crate::script::{self, RawScript};
use crate::{Error, Result, manifest};

/// Result of a successful local build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Version extracted from the raw script
    pub version: String,
    /// Manifest version before the build, when the manifest had one
    pub previous_version: Option<String>,
    /// Whether the manifest was found and rewritten
    pub manifest_updated: bool,
    /// Path of the generated script inside the extension directory
    pub script_path: NormalizedPath,
    pub archive: PackageReport,
    pub stages: Vec<Stage>,
    pub warnings: Vec<String>,
}

/// The local build workflow.
#[derive(Debug, Clone)]
pub struct LocalBuild {
    root: NormalizedPath,
    layout: ProjectLayout,
    store: ConfigStore,
}

impl LocalBuild {
    /// Stages in execution order.
    pub const STAGES: &'static [Stage] = &[
        Stage::CheckConfig,
        Stage::CopyConfig,
        Stage::NormalizeScript,
        Stage::ExtractVersion,
        Stage::UpdateManifest,
        Stage::Package,
        Stage::Done,
    ];

    /// Build the project at `root` using its layout file or the defaults.
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

    /// Run every stage. The first failing stage aborts the build.
    pub fn run(&self) -> Result<BuildReport> {
        tracing::info!(root = %self.root, "starting local build");
        let mut log = StageLog::default();

        log.run(Stage::CheckConfig, |log| self.check_config(log))?;
        log.run(Stage::CopyConfig, |_| self.copy_config())?;
        let (raw, script_path) = log.run(Stage::NormalizeScript, |_| self.normalize_script())?;
        let version = log.run(Stage::ExtractVersion, |_| {
            script::extract_version(raw.text(), &self.layout.script_path(&self.root))
        })?;
        let previous_version = log.run(Stage::UpdateManifest, |log| {
            self.update_manifest(&version, log)
        })?;
        let archive = log.run(Stage::Package, |log| {
            let archive = self.package()?;
            let addon_config = self.layout.addon_config(&self.root);
            if self.store.has_placeholders(&addon_config)? {
                log.warn(format!(
                    "{} still contains template placeholders; run setup or edit it",
                    self.layout.config_file
                ));
            }
            Ok(archive)
        })?;
        log.finish();

        tracing::info!(version = %version, archive = %archive.archive_path, "local build complete");
        Ok(BuildReport {
            version,
            manifest_updated: previous_version.is_some(),
            previous_version: previous_version.flatten(),
            script_path,
            archive,
            stages: log.completed,
            warnings: log.warnings,
        })
    }

    /// Every input must be present before anything is written.
    ///
    /// A missing root config is created from the root template when there
    /// is one; without either the build stops.
    fn check_config(&self, log: &mut StageLog) -> Result<()> {
        let script = self.layout.script_path(&self.root);
        if !script.is_file() {
            return Err(Error::MissingRequiredFile {
                path: script.to_native(),
            });
        }

        let config = self.layout.root_config(&self.root);
        if config.is_file() {
            return Ok(());
        }

        let template = self.layout.root_template(&self.root);
        if !template.is_file() {
            return Err(Error::MissingRequiredFile {
                path: config.to_native(),
            });
        }
        if self.store.materialize_from_template(&template, &config)? == Materialized::Created {
            log.warn(format!(
                "{} was missing and has been created from {}",
                self.layout.config_file, self.layout.config_template
            ));
        }
        Ok(())
    }

    fn copy_config(&self) -> Result<()> {
        let from = self.layout.root_config(&self.root);
        let to = self.layout.addon_config(&self.root);
        io::copy_file(&from, &to)?;
        tracing::debug!(from = %from, to = %to, "copied config into extension");
        Ok(())
    }

    fn normalize_script(&self) -> Result<(RawScript, NormalizedPath)> {
        let raw = RawScript::read(&self.layout.script_path(&self.root))?;
        let target = self.layout.addon_script_path(&self.root);
        io::write_text(&target, &raw.normalized())?;
        tracing::debug!(
            target = %target,
            prologue = raw.has_prologue(),
            epilogue = raw.has_epilogue(),
            "wrote normalized script"
        );
        Ok((raw, target))
    }

    /// Outer `None` means there was no manifest to update.
    fn update_manifest(&self, version: &str, log: &mut StageLog) -> Result<Option<Option<String>>> {
        let path = self.layout.manifest_path(&self.root);
        if !path.is_file() {
            log.warn(format!("{path} not found; version not recorded"));
            return Ok(None);
        }
        Ok(Some(manifest::update_version(&path, version)?))
    }

    fn package(&self) -> Result<PackageReport> {
        Packager::new(
            self.layout.addon_path(&self.root),
            self.layout.archive_path(&self.root),
            self.layout.exclusions(),
        )
        .package()
    }
}
