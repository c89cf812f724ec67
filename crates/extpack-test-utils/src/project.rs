//! [`TestProject`] builder for extension project scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use extpack_test_utils::TestProject;
///
/// let project = TestProject::complete("1.4");
/// project.assert_file_exists("linkedin-addon/manifest.json");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A project with everything setup and build need, at script `version`,
    /// and no personal config yet.
    ///
    /// The manifest starts at `0.0` so tests can see the build rewrite it.
    pub fn complete(version: &str) -> Self {
        let project = Self::new();
        project
            .with_file(fixtures::SCRIPT_NAME, &fixtures::raw_script(version))
            .with_file("config.template.js", fixtures::CONFIG_TEMPLATE)
            .with_file("config-master.template.js", fixtures::MASTER_TEMPLATE)
            .with_file("README.md", "# LinkedIn Connect\n")
            .with_addon_file("config.template.js", fixtures::CONFIG_TEMPLATE)
            .with_addon_file("manifest.json", &fixtures::manifest("0.0"))
            .with_addon_file("background.js", "// background\n")
            .with_addon_file("icon.png", "PNG")
            .with_addon_file("firefox/manifest.json", &fixtures::manifest("0.0"));
        project
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative`.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn with_file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Write `content` under the extension directory.
    pub fn with_addon_file(&self, relative: &str, content: &str) -> &Self {
        self.with_file(&format!("{}/{relative}", fixtures::ADDON_DIR), content)
    }

    /// Write a filled-in personal config at the project root.
    pub fn with_personal_config(&self, name: &str, position: &str, expertise: &str) -> &Self {
        self.with_file("config.js", &fixtures::personal_config(name, position, expertise))
    }

    /// Create an empty directory at `relative`.
    pub fn with_dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path(relative)).unwrap();
        self
    }

    /// Delete the file at `relative`.
    pub fn remove(&self, relative: &str) -> &Self {
        fs::remove_file(self.path(relative)).unwrap();
        self
    }

    /// Read the file at `relative`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain {:?}.\nActual content:\n{}",
            path,
            content,
            file_content
        );
    }
}
