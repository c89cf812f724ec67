//! Project layout: the names of the files and folders the pipeline works on
//!
//! Defaults match the LinkedIn Connect extension project. A project can
//! override any of them in an optional `extpack.toml` at its root; keys that
//! are not set keep their defaults.

use extpack_fs::{DocumentStore, NormalizedPath, validate_relative_path};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::package::ExclusionSet;
use crate::sync::SyncFileSet;

/// Name of the optional layout file at the project root.
pub const LAYOUT_FILE: &str = "extpack.toml";

fn default_source_script() -> String {
    "Adiciona Recrutadores Avançado.js".to_string()
}

fn default_addon_dir() -> String {
    "linkedin-addon".to_string()
}

/// `[sync]` section: project content copied into a personal folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSection {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            files: vec![
                default_source_script(),
                LAYOUT_FILE.to_string(),
                "README.md".to_string(),
                "setup.md".to_string(),
                "GUIA-RAPIDO.md".to_string(),
                "config.template.js".to_string(),
                "config.example.js".to_string(),
                "config-master.template.js".to_string(),
            ],
            directories: vec![default_addon_dir()],
        }
    }
}

/// `[publish]` section: extension entries (relative to the extension
/// directory) copied to the public addon folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishSection {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

impl Default for PublishSection {
    fn default() -> Self {
        Self {
            files: vec![
                "manifest.json".to_string(),
                "background.js".to_string(),
                "icon.png".to_string(),
                "config.template.js".to_string(),
            ],
            directories: vec!["firefox".to_string()],
        }
    }
}

/// `[package]` section: extra base names kept out of the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSection {
    pub exclude: Vec<String>,
}

/// File and folder names, relative to a project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// The raw bookmarklet script
    pub source_script: String,
    /// The extension directory (the distribution tree)
    pub addon_dir: String,
    /// Name of the generated script inside the extension directory
    pub addon_script: String,
    /// Name of the manifest inside the extension directory
    pub manifest_file: String,
    /// Name of the personal config, at the root and in the extension directory
    pub config_file: String,
    /// Name of the config template, at the root and in the extension directory
    pub config_template: String,
    /// Root-level template carrying the path settings
    pub master_template: String,
    /// Name of the archive, written inside the extension directory
    pub archive_name: String,
    pub sync: SyncSection,
    pub publish: PublishSection,
    pub package: PackageSection,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            source_script: default_source_script(),
            addon_dir: default_addon_dir(),
            addon_script: "script.js".to_string(),
            manifest_file: "manifest.json".to_string(),
            config_file: "config.js".to_string(),
            config_template: "config.template.js".to_string(),
            master_template: "config-master.template.js".to_string(),
            archive_name: "linkedin-addon-local.zip".to_string(),
            sync: SyncSection::default(),
            publish: PublishSection::default(),
            package: PackageSection::default(),
        }
    }
}

impl ProjectLayout {
    /// Load the layout for `root`, falling back to defaults when there is
    /// no layout file.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(LAYOUT_FILE);
        if !path.is_file() {
            tracing::debug!(root = %root, "no layout file, using defaults");
            return Ok(Self::default());
        }

        let layout: Self = DocumentStore::new().load(&path)?;
        layout.validate()?;
        tracing::debug!(path = %path, "loaded project layout");
        Ok(layout)
    }

    /// Reject entries that would escape the root they are joined onto.
    pub fn validate(&self) -> Result<()> {
        for entry in [
            &self.source_script,
            &self.addon_dir,
            &self.addon_script,
            &self.manifest_file,
            &self.config_file,
            &self.config_template,
            &self.master_template,
            &self.archive_name,
        ] {
            validate_relative_path(entry)?;
        }
        // File sets validate their own entries
        self.sync_file_set()?;
        self.publish_file_set()?;
        Ok(())
    }

    pub fn addon_path(&self, root: &NormalizedPath) -> NormalizedPath {
        root.join(&self.addon_dir)
    }

    pub fn script_path(&self, root: &NormalizedPath) -> NormalizedPath {
        root.join(&self.source_script)
    }

    pub fn addon_script_path(&self, root: &NormalizedPath) -> NormalizedPath {
        self.addon_path(root).join(&self.addon_script)
    }

    pub fn manifest_path(&self, root: &NormalizedPath) -> NormalizedPath {
        self.addon_path(root).join(&self.manifest_file)
    }

    pub fn root_config(&self, root: &NormalizedPath) -> NormalizedPath {
        root.join(&self.config_file)
    }

    pub fn addon_config(&self, root: &NormalizedPath) -> NormalizedPath {
        self.addon_path(root).join(&self.config_file)
    }

    pub fn root_template(&self, root: &NormalizedPath) -> NormalizedPath {
        root.join(&self.config_template)
    }

    pub fn master_template_path(&self, root: &NormalizedPath) -> NormalizedPath {
        root.join(&self.master_template)
    }

    pub fn addon_template(&self, root: &NormalizedPath) -> NormalizedPath {
        self.addon_path(root).join(&self.config_template)
    }

    pub fn archive_path(&self, root: &NormalizedPath) -> NormalizedPath {
        self.addon_path(root).join(&self.archive_name)
    }

    /// Relative path of the config nested in the extension directory.
    pub fn nested_config(&self) -> String {
        format!("{}/{}", self.addon_dir, self.config_file)
    }

    /// Personal files that must survive a sync, relative to the personal
    /// root. This list is exhaustive: anything else under a synced
    /// directory is replaced.
    pub fn protected_paths(&self) -> Vec<String> {
        vec![self.config_file.clone(), self.nested_config()]
    }

    /// Files whose absence stops `setup` before it changes anything.
    pub fn required_files(&self) -> Vec<String> {
        vec![
            self.source_script.clone(),
            format!("{}/{}", self.addon_dir, self.config_template),
            format!("{}/{}", self.addon_dir, self.manifest_file),
            format!("{}/background.js", self.addon_dir),
            format!("{}/icon.png", self.addon_dir),
        ]
    }

    pub fn sync_file_set(&self) -> Result<SyncFileSet> {
        SyncFileSet::new(self.sync.files.clone(), self.sync.directories.clone())
    }

    pub fn publish_file_set(&self) -> Result<SyncFileSet> {
        SyncFileSet::new(self.publish.files.clone(), self.publish.directories.clone())
    }

    /// Base names never packaged: the archive itself, the personal config,
    /// OS metadata files and any configured extras.
    pub fn exclusions(&self) -> ExclusionSet {
        let mut set = ExclusionSet::with_defaults(&self.config_file);
        set.insert(self.archive_name.clone());
        for name in &self.package.exclude {
            set.insert(name.clone());
        }
        set
    }
}
