//! The set of project paths eligible for synchronization

use extpack_fs::validate_relative_path;

use crate::Result;

/// Relative file and directory paths considered project content.
///
/// Personal config files are kept out of sync runs by never appearing in
/// this list; there is no runtime filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncFileSet {
    files: Vec<String>,
    directories: Vec<String>,
}

impl SyncFileSet {
    /// Build a file set, rejecting absolute paths and `..` segments.
    pub fn new<F, D>(files: F, directories: D) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let files = Self::validated(files)?;
        let directories = Self::validated(directories)?;
        Ok(Self { files, directories })
    }

    fn validated<I>(entries: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.into().replace('\\', "/");
            validate_relative_path(&entry)?;
            let entry = entry.trim_start_matches("./").trim_end_matches('/').to_string();
            if !out.contains(&entry) {
                out.push(entry);
            }
        }
        Ok(out)
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Whether `relative` is one of the listed files.
    pub fn contains_file(&self, relative: &str) -> bool {
        self.files.iter().any(|f| f == relative)
    }
}
