//! Scoped preservation of protected files around destructive tree operations
//!
//! A directory replace deletes everything under the destination subtree.
//! [`PreservedFiles`] captures the protected paths first and reinstates
//! their captured state afterwards: captured content is written back, and a
//! path that was absent is removed again if the replace introduced it.
//! Reinstatement also runs on drop, so an early return or a failed replace
//! cannot skip it.

use extpack_fs::{NormalizedPath, io};

use crate::Result;
use crate::personal::{ConfigBlob, ConfigStore};

#[derive(Debug)]
struct PreservedEntry {
    relative: String,
    blob: Option<ConfigBlob>,
}

/// What reinstating the protected paths did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Paths whose captured content was written back
    pub restored: Vec<String>,
    /// Paths that were absent at capture time and have been removed again
    pub removed: Vec<String>,
}

/// Guard holding in-memory copies of protected files under a root.
#[derive(Debug)]
pub struct PreservedFiles {
    root: NormalizedPath,
    store: ConfigStore,
    entries: Vec<PreservedEntry>,
    released: bool,
}

impl PreservedFiles {
    /// Capture every path in `protected` (relative to `root`).
    ///
    /// Capture completes for all paths before this returns; nothing is
    /// modified.
    pub fn capture(root: &NormalizedPath, protected: &[String]) -> Result<Self> {
        let store = ConfigStore::new();
        let mut entries = Vec::with_capacity(protected.len());
        for relative in protected {
            let blob = store.backup(&root.join(relative))?;
            entries.push(PreservedEntry {
                relative: relative.clone(),
                blob,
            });
        }

        Ok(Self {
            root: root.clone(),
            store,
            entries,
            released: false,
        })
    }

    /// Protected paths that had content at capture time.
    pub fn captured(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.blob.is_some())
            .map(|e| e.relative.as_str())
            .collect()
    }

    /// The captured content of `relative`, if it existed.
    pub fn blob(&self, relative: &str) -> Option<&ConfigBlob> {
        self.entries
            .iter()
            .find(|e| e.relative == relative)
            .and_then(|e| e.blob.as_ref())
    }

    /// Reinstate the captured state and release the guard.
    pub fn restore(mut self) -> Result<RestoreOutcome> {
        self.released = true;
        self.reinstate()
    }

    fn reinstate(&self) -> Result<RestoreOutcome> {
        let mut outcome = RestoreOutcome::default();
        let mut first_error = None;

        // Every entry is attempted even if an earlier one fails
        for entry in &self.entries {
            let path = self.root.join(&entry.relative);
            let result = match &entry.blob {
                Some(blob) => self
                    .store
                    .restore(&path, Some(blob))
                    .map(|_| outcome.restored.push(entry.relative.clone())),
                None if path.exists() => io::remove_tree(&path)
                    .map(|_| outcome.removed.push(entry.relative.clone()))
                    .map_err(crate::Error::from),
                None => Ok(()),
            };
            if let Err(e) = result {
                tracing::error!(path = %path, error = %e, "failed to reinstate protected file");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(outcome),
        }
    }
}

impl Drop for PreservedFiles {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        tracing::warn!(root = %self.root, "reinstating protected files after an interrupted step");
        let _ = self.reinstate();
    }
}
