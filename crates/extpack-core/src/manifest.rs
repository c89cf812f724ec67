//! Extension manifest version substitution
//!
//! Only the `version` field is ever changed. Every other field round-trips
//! untouched, in its original key order.

use extpack_fs::{DocumentStore, NormalizedPath};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// The extension's `manifest.json`.
#[derive(Debug, Clone)]
pub struct BuildManifest {
    path: NormalizedPath,
    document: Map<String, Value>,
}

impl BuildManifest {
    /// Load the manifest at `path`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingRequiredFile {
                path: path.to_native(),
            });
        }

        let value: Value = DocumentStore::new().load(path)?;
        let Value::Object(document) = value else {
            return Err(Error::InvalidManifest {
                path: path.to_native(),
                message: "top-level value is not an object".to_string(),
            });
        };

        Ok(Self {
            path: path.clone(),
            document,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.document.get("version").and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: &str) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    pub fn save(&self) -> Result<()> {
        DocumentStore::new().save(&self.path, &self.document)?;
        Ok(())
    }
}

/// Set the manifest version and save it. Returns the previous version.
pub fn update_version(path: &NormalizedPath, version: &str) -> Result<Option<String>> {
    let mut manifest = BuildManifest::load(path)?;
    let previous = manifest.version().map(str::to_string);
    manifest.set_version(version);
    manifest.save()?;
    tracing::info!(path = %path, ?previous, version, "manifest version updated");
    Ok(previous)
}
