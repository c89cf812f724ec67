//! Normalized path handling for cross-platform compatibility

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Sync lists, archive entry names and report output all use the forward
/// slash form; conversion to a platform-native path happens only at I/O
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a (relative, forward-slash) segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches("./");
        let joined = if self.inner.is_empty() {
            segment.to_string()
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Express this path relative to `root`, using forward slashes.
    ///
    /// Returns `None` when the path does not live under `root`.
    pub fn relative_to(&self, root: &NormalizedPath) -> Option<String> {
        let relative = self.to_native();
        let relative = relative.strip_prefix(root.to_native()).ok()?;
        Some(relative.to_string_lossy().replace('\\', "/"))
    }

    /// Resolve symlinks and `..` segments for an existing path.
    ///
    /// A path that does not exist yet is resolved through its deepest
    /// existing ancestor, so that callers can compare roots that are about
    /// to be created.
    pub fn resolved(&self) -> Self {
        let native = self.to_native();
        if let Ok(path) = dunce::canonicalize(&native) {
            return Self::new(path);
        }

        let mut missing = Vec::new();
        let mut current = native.as_path();
        while let Some(parent) = current.parent() {
            if let Some(name) = current.file_name() {
                missing.push(name.to_os_string());
            }
            if let Ok(mut base) = dunce::canonicalize(parent) {
                for name in missing.iter().rev() {
                    base.push(name);
                }
                return Self::new(base);
            }
            current = parent;
        }
        self.clone()
    }

    /// Whether this path is `other` or lies somewhere below it.
    ///
    /// Both sides are resolved first.
    pub fn is_within(&self, other: &NormalizedPath) -> bool {
        let this = self.resolved();
        let other = other.resolved();
        let base = other.inner.trim_end_matches('/');
        this.inner == base || this.inner.starts_with(&format!("{base}/"))
    }
}

/// Validate an entry from a sync list or layout file.
///
/// Entries must be non-empty relative paths without `..` segments so that
/// joining them onto a root can never escape it.
pub fn validate_relative_path(entry: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidRelativePath {
        path: entry.to_string(),
        reason: reason.to_string(),
    };

    if entry.trim().is_empty() {
        return Err(invalid("path is empty"));
    }

    let normalized = entry.replace('\\', "/");
    if normalized.starts_with('/') || normalized.chars().nth(1) == Some(':') {
        return Err(invalid("path must be relative"));
    }

    for component in Path::new(&normalized).components() {
        match component {
            Component::ParentDir => return Err(invalid("'..' segments are not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("path must be relative"));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_strips_root() {
        let root = NormalizedPath::new("/tmp/addon");
        let file = root.join("firefox/background.js");
        assert_eq!(
            file.relative_to(&root).as_deref(),
            Some("firefox/background.js")
        );
    }

    #[test]
    fn relative_to_outside_root_is_none() {
        let root = NormalizedPath::new("/tmp/addon");
        let file = NormalizedPath::new("/tmp/other/file.js");
        assert_eq!(file.relative_to(&root), None);
    }

    #[test]
    fn join_drops_leading_dot_slash() {
        let root = NormalizedPath::new("/work");
        assert_eq!(root.join("./config.js").as_str(), "/work/config.js");
    }

    #[test]
    fn is_within_respects_component_boundaries() {
        let root = NormalizedPath::new("/nonexistent/addon");
        assert!(NormalizedPath::new("/nonexistent/addon/icons").is_within(&root));
        assert!(NormalizedPath::new("/nonexistent/addon").is_within(&root));
        assert!(!NormalizedPath::new("/nonexistent/addon-copy").is_within(&root));
    }
}
