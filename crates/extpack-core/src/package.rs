//! Distribution archive packaging
//!
//! The extension directory is zipped with every file whose base name is in
//! the [`ExclusionSet`] left out. Entries are written in sorted relative
//! path order with a fixed timestamp, so repackaging unchanged content
//! yields the same listing.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;

use extpack_fs::{NormalizedPath, checksum, io};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::{Error, Result};

/// File names of OS metadata files never shipped.
pub const OS_METADATA_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Base names excluded from the archive, matched case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The personal config file plus OS metadata files.
    pub fn with_defaults(config_file: &str) -> Self {
        let mut set = Self::new(OS_METADATA_FILES.iter().copied());
        set.insert(config_file);
        set
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Result of a packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub archive_path: NormalizedPath,
    /// Archive entry names, sorted
    pub entries: Vec<String>,
    /// Files present in the tree that were left out, sorted
    pub excluded: Vec<String>,
    /// `sha256:<hex>` of the written archive
    pub checksum: String,
}

/// Builds the distributable archive from a distribution tree.
#[derive(Debug, Clone)]
pub struct Packager {
    root: NormalizedPath,
    archive_path: NormalizedPath,
    exclusions: ExclusionSet,
}

impl Packager {
    /// The archive's own file name is always added to `exclusions`.
    pub fn new(root: NormalizedPath, archive_path: NormalizedPath, mut exclusions: ExclusionSet) -> Self {
        if let Some(name) = archive_path.file_name() {
            exclusions.insert(name);
        }
        Self {
            root,
            archive_path,
            exclusions,
        }
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Walk the tree and split it into (included, excluded) relative paths.
    pub fn collect(&self) -> Result<(Vec<String>, Vec<String>)> {
        let root_native = self.root.to_native();
        if !root_native.is_dir() {
            return Err(Error::MissingRequiredFile { path: root_native });
        }

        let mut included = Vec::new();
        let mut excluded = Vec::new();

        for entry in WalkDir::new(&root_native).min_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| extpack_fs::Error::Walk {
                path: root_native.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&root_native)
                .map_err(|e| extpack_fs::Error::Walk {
                    path: entry.path().to_path_buf(),
                    message: e.to_string(),
                })?
                .to_string_lossy()
                .replace('\\', "/");

            let name = entry.file_name().to_string_lossy();
            // Leftovers of an interrupted atomic write may hold a config
            if self.exclusions.contains(&name) || io::is_atomic_temp(&name) {
                excluded.push(relative);
            } else {
                included.push(relative);
            }
        }

        included.sort();
        excluded.sort();
        Ok((included, excluded))
    }

    /// Write the archive and report its contents.
    ///
    /// The archive is written to a temporary sibling and renamed into place,
    /// so a failed run leaves any previous archive intact.
    pub fn package(&self) -> Result<PackageReport> {
        let (entries, excluded) = self.collect()?;

        let archive_native = self.archive_path.to_native();
        let write_error = |message: String| Error::ArchiveWrite {
            path: archive_native.clone(),
            message,
        };

        if let Some(parent) = archive_native.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }

        let temp_path = archive_native.with_file_name(io::atomic_temp_name(
            self.archive_path.file_name().unwrap_or("archive"),
        ));

        let written = self.write_archive(&temp_path, &entries);
        if let Err(message) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(write_error(message));
        }
        fs::rename(&temp_path, &archive_native).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_error(e.to_string())
        })?;

        let checksum = checksum::compute_file_checksum(&self.archive_path)?;
        tracing::info!(
            archive = %self.archive_path,
            entries = entries.len(),
            excluded = excluded.len(),
            "archive written"
        );

        Ok(PackageReport {
            archive_path: self.archive_path.clone(),
            entries,
            excluded,
            checksum,
        })
    }

    fn write_archive(&self, temp_path: &std::path::Path, entries: &[String]) -> std::result::Result<(), String> {
        let file = File::create(temp_path).map_err(|e| e.to_string())?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        for name in entries {
            let content = io::read_bytes(&self.root.join(name)).map_err(|e| e.to_string())?;
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| e.to_string())?;
            writer.write_all(&content).map_err(|e| e.to_string())?;
        }

        let file = writer.finish().map_err(|e| e.to_string())?;
        file.sync_all().map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Read the entry names of an archive, sorted.
pub fn list_entries(archive_path: &NormalizedPath) -> Result<Vec<String>> {
    let native = archive_path.to_native();
    let read_error = |message: String| Error::ArchiveRead {
        path: native.clone(),
        message,
    };

    let file = File::open(&native).map_err(|e| read_error(e.to_string()))?;
    let archive = ZipArchive::new(file).map_err(|e| read_error(e.to_string()))?;
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    Ok(names)
}
