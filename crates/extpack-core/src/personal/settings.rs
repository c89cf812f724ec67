//! Typed view of the personal configuration file

use std::sync::LazyLock;

use regex::Regex;

/// The three identity fields substituted into a fresh config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalFields {
    /// Full name as it should appear in messages
    pub name: String,
    /// Current position or job title
    pub position: String,
    /// Area of expertise or specialization
    pub expertise: String,
}

impl PersonalFields {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        expertise: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            expertise: expertise.into(),
        }
    }

    /// Whether every field carries a non-blank value.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.position, &self.expertise]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

/// Settings parsed out of a personal `config.js`.
///
/// Every field is optional: a missing or empty entry means "use the
/// default", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalSettings {
    pub name: Option<String>,
    pub position: Option<String>,
    pub expertise: Option<String>,
    /// Folder holding the user's personal working copy
    pub personal_folder: Option<String>,
    /// Folder the public extension files are published to
    pub addon_folder: Option<String>,
    /// Whether missing folders are created automatically
    pub auto_create: Option<bool>,
}

fn string_field(key: &str) -> Regex {
    Regex::new(&format!(
        r#"\b{key}\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#
    ))
    .unwrap()
}

static NAME: LazyLock<Regex> = LazyLock::new(|| string_field("MY_NAME"));
static POSITION: LazyLock<Regex> = LazyLock::new(|| string_field("MY_POSITION"));
static EXPERTISE: LazyLock<Regex> = LazyLock::new(|| string_field("POS_SEARCH"));
static PERSONAL_FOLDER: LazyLock<Regex> = LazyLock::new(|| string_field("PERSONAL_FOLDER"));
static ADDON_FOLDER: LazyLock<Regex> = LazyLock::new(|| string_field("ADDON_SYNC_FOLDER"));
static AUTO_CREATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAUTO_CREATE_FOLDERS\s*:\s*(true|false)\b").unwrap());

impl PersonalSettings {
    /// Parse settings from the text of a config file.
    pub fn parse(content: &str) -> Self {
        Self {
            name: capture_string(&NAME, content),
            position: capture_string(&POSITION, content),
            expertise: capture_string(&EXPERTISE, content),
            personal_folder: capture_string(&PERSONAL_FOLDER, content),
            addon_folder: capture_string(&ADDON_FOLDER, content),
            auto_create: AUTO_CREATE
                .captures(content)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str() == "true"),
        }
    }

    /// `AUTO_CREATE_FOLDERS`, defaulting to `true`.
    pub fn auto_create_folders(&self) -> bool {
        self.auto_create.unwrap_or(true)
    }
}

fn capture_string(pattern: &Regex, content: &str) -> Option<String> {
    let caps = pattern.captures(content)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let value = unescape_js(raw);
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Undo the escapes that matter for paths and names.
fn unescape_js(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Escape a value for a JS double-quoted string literal.
pub(crate) fn escape_js(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
