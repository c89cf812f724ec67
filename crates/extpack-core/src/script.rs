//! Raw script handling: version extraction and wrapper stripping
//!
//! The source script is kept as a bookmarklet
//! (`javascript:(function () { ... })();`). The extension only needs the
//! body, and the manifest version is taken from the script's
//! `const SCRIPT_VERSION = "x.y"` declaration.

use std::sync::LazyLock;

use extpack_fs::{NormalizedPath, io};
use regex::Regex;

use crate::{Error, Result};

/// URL scheme prefix of a bookmarklet.
pub const SCHEME_PROLOGUE: &str = "javascript:";

/// Opening of the immediately-invoked function wrapper.
pub const IIFE_PROLOGUE: &str = "(function () {";

/// Closing of the immediately-invoked function wrapper.
pub const IIFE_EPILOGUE: &str = "})();";

pub static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"const\s+SCRIPT_VERSION\s*=\s*"([0-9.]+)""#).unwrap());

/// A raw script as read from disk, before normalization.
#[derive(Debug, Clone)]
pub struct RawScript {
    text: String,
    has_prologue: bool,
    has_epilogue: bool,
}

impl RawScript {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        let after_scheme = trimmed
            .strip_prefix(SCHEME_PROLOGUE)
            .map(str::trim_start)
            .unwrap_or(trimmed);
        let has_prologue =
            trimmed.starts_with(SCHEME_PROLOGUE) || after_scheme.starts_with(IIFE_PROLOGUE);
        let has_epilogue = trimmed.ends_with(IIFE_EPILOGUE);

        Self {
            text,
            has_prologue,
            has_epilogue,
        }
    }

    /// Read the raw script from `path`.
    pub fn read(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingRequiredFile {
                path: path.to_native(),
            });
        }
        Ok(Self::parse(io::read_text(path)?))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_prologue(&self) -> bool {
        self.has_prologue
    }

    pub fn has_epilogue(&self) -> bool {
        self.has_epilogue
    }

    /// The distributable payload.
    pub fn normalized(&self) -> String {
        normalize(&self.text)
    }

    /// The embedded version token, if declared.
    pub fn version(&self) -> Option<&str> {
        find_version(&self.text)
    }
}

/// Strip the bookmarklet wrapper from a script.
///
/// Each wrapper segment is removed only when present. Stripping repeats
/// until nothing changes, so `normalize(normalize(s)) == normalize(s)` holds
/// even for inputs with stacked wrappers. The result is whitespace-trimmed.
pub fn normalize(text: &str) -> String {
    let mut content = text.trim();
    loop {
        let stripped = strip_wrapper_once(content);
        if stripped.len() == content.len() {
            return content.to_string();
        }
        content = stripped;
    }
}

fn strip_wrapper_once(text: &str) -> &str {
    let mut content = text.trim();

    if let Some(rest) = content.strip_prefix(SCHEME_PROLOGUE) {
        content = rest.trim();
    }
    if let Some(rest) = content.strip_prefix(IIFE_PROLOGUE) {
        content = rest.trim();
    }
    if let Some(rest) = content.strip_suffix(IIFE_EPILOGUE) {
        content = rest.trim();
    }

    content
}

/// Find the first `const SCRIPT_VERSION = "..."` declaration.
pub fn find_version(text: &str) -> Option<&str> {
    VERSION_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the version token from a script read from `path`.
///
/// `path` is only used for the error message.
pub fn extract_version(text: &str, path: &NormalizedPath) -> Result<String> {
    find_version(text)
        .map(str::to_string)
        .ok_or_else(|| Error::VersionNotFound {
            path: path.to_native(),
        })
}
