//! TreeSync implementation
//!
//! Files listed in a [`SyncFileSet`] are copied with unconditional
//! overwrite. Directories are replaced, not merged: an existing destination
//! subtree is deleted before the source subtree is copied. Anything the
//! user placed under a synced destination directory is lost unless the
//! caller protects it (see [`crate::preserve::PreservedFiles`]).
//!
//! Directory replacement is not transactional. If a copy fails midway the
//! destination subtree is left partially populated or absent; running the
//! sync again is the recovery path.

use extpack_fs::{NormalizedPath, io};

use super::file_set::SyncFileSet;
use super::report::{SyncAction, SyncReport};
use crate::{Error, Result};

/// Copies a [`SyncFileSet`] from one root to another.
#[derive(Debug, Clone)]
pub struct TreeSync {
    source_root: NormalizedPath,
    dest_root: NormalizedPath,
}

impl TreeSync {
    pub fn new(source_root: NormalizedPath, dest_root: NormalizedPath) -> Self {
        Self {
            source_root,
            dest_root,
        }
    }

    pub fn source_root(&self) -> &NormalizedPath {
        &self.source_root
    }

    pub fn dest_root(&self) -> &NormalizedPath {
        &self.dest_root
    }

    /// Refuse syncs that would copy a tree into itself or delete the source.
    ///
    /// Roots that resolve to the same directory are rejected, as are synced
    /// directories where either side lies inside the other.
    pub fn check_roots(&self, set: &SyncFileSet) -> Result<()> {
        let overlap = |from: &NormalizedPath, to: &NormalizedPath| Error::OverlappingRoots {
            from: from.to_native(),
            to: to.to_native(),
        };

        if self.source_root.resolved() == self.dest_root.resolved() {
            return Err(overlap(&self.source_root, &self.dest_root));
        }

        for dir in set.directories() {
            let source = self.source_root.join(dir);
            let dest = self.dest_root.join(dir);
            if dest.is_within(&source) || source.is_within(&dest) {
                return Err(overlap(&source, &dest));
            }
        }

        Ok(())
    }

    /// Copy every listed file present at the source.
    pub fn sync_files(&self, set: &SyncFileSet, report: &mut SyncReport) -> Result<()> {
        for relative in set.files() {
            let source = self.source_root.join(relative);
            if !source.is_file() {
                tracing::debug!(path = %relative, "not present at source, skipped");
                report.skipped.push(relative.clone());
                continue;
            }

            io::copy_file(&source, &self.dest_root.join(relative))?;
            report.push(SyncAction::CopiedFile {
                path: relative.clone(),
            });
        }
        Ok(())
    }

    /// Replace every listed directory present at the source.
    pub fn sync_directories(&self, set: &SyncFileSet, report: &mut SyncReport) -> Result<()> {
        for relative in set.directories() {
            let files = self.replace_directory(relative)?;
            match files {
                Some(files) => report.push(SyncAction::ReplacedDirectory {
                    path: relative.clone(),
                    files,
                }),
                None => report.skipped.push(relative.clone()),
            }
        }
        Ok(())
    }

    /// Delete the destination subtree at `relative` and copy the source one.
    ///
    /// Returns `None` (and touches nothing) when the source directory is
    /// absent.
    pub fn replace_directory(&self, relative: &str) -> Result<Option<usize>> {
        let source = self.source_root.join(relative);
        if !source.is_dir() {
            tracing::debug!(path = %relative, "directory not present at source, skipped");
            return Ok(None);
        }

        let dest = self.dest_root.join(relative);
        if dest.exists() {
            tracing::info!(path = %dest, "removing destination subtree before copy");
            io::remove_tree(&dest)?;
        }
        let files = io::copy_tree(&source, &dest)?;
        Ok(Some(files))
    }

    /// Sync files, then directories.
    pub fn run(&self, set: &SyncFileSet) -> Result<SyncReport> {
        self.check_roots(set)?;

        let mut report = SyncReport::new();
        self.sync_files(set, &mut report)?;
        self.sync_directories(set, &mut report)?;

        tracing::info!(
            from = %self.source_root,
            to = %self.dest_root,
            actions = report.actions.len(),
            "tree sync complete"
        );
        Ok(report)
    }
}
