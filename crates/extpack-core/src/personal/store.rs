//! Personal config file operations
//!
//! `ConfigStore` is stateless apart from its placeholder set; every
//! operation takes the path it works on.

use extpack_fs::{NormalizedPath, io};

use super::settings::{PersonalFields, PersonalSettings, escape_js};
use crate::{Error, Result};

/// Sentinel strings shipped in the config templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    pub name: &'static str,
    pub position: &'static str,
    pub expertise: &'static str,
}

/// Sentinels used by `config.template.js`.
pub const PLACEHOLDERS: Placeholders = Placeholders {
    name: "Your Full Name Here",
    position: "Your Current Position or Job Title",
    expertise: "Your Area of Expertise or Specialization",
};

/// Sentinels used by `config-master.template.js`. Only detected, never
/// substituted.
const MASTER_PLACEHOLDERS: Placeholders = Placeholders {
    name: "Seu Nome Completo Aqui",
    position: "Seu Cargo ou Posição Atual",
    expertise: "Sua Área de Especialização",
};

impl Placeholders {
    fn all(&self) -> [&'static str; 3] {
        [self.name, self.position, self.expertise]
    }
}

/// In-memory, byte-exact copy of a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBlob(Vec<u8>);

impl ConfigBlob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of [`ConfigStore::materialize_from_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// The target was absent and has been created from the template
    Created,
    /// The target already existed and was left untouched
    AlreadyExists,
}

/// Which identity fields were substituted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedFields {
    pub name: bool,
    pub position: bool,
    pub expertise: bool,
}

impl AppliedFields {
    pub fn is_complete(&self) -> bool {
        self.name && self.position && self.expertise
    }

    pub fn any(&self) -> bool {
        self.name || self.position || self.expertise
    }
}

/// Manages personal configuration files.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    placeholders: Placeholders,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            placeholders: PLACEHOLDERS,
        }
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different set of substitutable sentinels.
    pub fn with_placeholders(placeholders: Placeholders) -> Self {
        Self { placeholders }
    }

    pub fn exists(&self, path: &NormalizedPath) -> bool {
        path.is_file()
    }

    /// Copy `template` to `target` unless `target` already exists.
    ///
    /// An existing target is never touched, whatever the template holds.
    pub fn materialize_from_template(
        &self,
        template: &NormalizedPath,
        target: &NormalizedPath,
    ) -> Result<Materialized> {
        if self.exists(target) {
            tracing::debug!(target = %target, "config exists, template not applied");
            return Ok(Materialized::AlreadyExists);
        }
        if !template.is_file() {
            return Err(Error::MissingRequiredFile {
                path: template.to_native(),
            });
        }

        let content = io::read_bytes(template)?;
        io::write_atomic(target, &content)?;
        tracing::info!(template = %template, target = %target, "created config from template");
        Ok(Materialized::Created)
    }

    /// Capture the full content of `path`, or `None` when it does not exist.
    pub fn backup(&self, path: &NormalizedPath) -> Result<Option<ConfigBlob>> {
        if !self.exists(path) {
            return Ok(None);
        }
        let blob = ConfigBlob::new(io::read_bytes(path)?);
        tracing::debug!(path = %path, bytes = blob.len(), "backed up config");
        Ok(Some(blob))
    }

    /// Write a captured blob back to `path`.
    ///
    /// `None` means there is nothing to restore: whatever exists at `path`
    /// is left alone. Returns whether a file was written.
    pub fn restore(&self, path: &NormalizedPath, blob: Option<&ConfigBlob>) -> Result<bool> {
        let Some(blob) = blob else {
            return Ok(false);
        };
        io::write_atomic(path, blob.as_bytes())?;
        tracing::debug!(path = %path, bytes = blob.len(), "restored config");
        Ok(true)
    }

    /// Substitute the identity fields for their placeholders.
    ///
    /// Blank fields leave their placeholder in place. The file is only
    /// rewritten when at least one substitution happened.
    pub fn apply_personal_fields(
        &self,
        path: &NormalizedPath,
        fields: &PersonalFields,
    ) -> Result<AppliedFields> {
        let content = io::read_text(path)?;
        let mut applied = AppliedFields::default();

        let substitutions = [
            (self.placeholders.name, fields.name.trim(), &mut applied.name),
            (self.placeholders.position, fields.position.trim(), &mut applied.position),
            (self.placeholders.expertise, fields.expertise.trim(), &mut applied.expertise),
        ];

        // Every sentinel is located in the original text, so a value that
        // happens to equal another sentinel is never substituted again.
        let mut matches = Vec::new();
        for (placeholder, value, flag) in substitutions {
            if value.is_empty() {
                continue;
            }
            let quoted = format!("\"{placeholder}\"");
            let replacement = format!("\"{}\"", escape_js(value));
            for (start, _) in content.match_indices(&quoted) {
                matches.push((start, quoted.len(), replacement.clone()));
                *flag = true;
            }
        }
        matches.sort_by_key(|(start, _, _)| *start);

        let mut rewritten = String::with_capacity(content.len());
        let mut cursor = 0;
        for (start, len, replacement) in matches {
            if start < cursor {
                continue;
            }
            rewritten.push_str(&content[cursor..start]);
            rewritten.push_str(&replacement);
            cursor = start + len;
        }
        rewritten.push_str(&content[cursor..]);

        if applied.any() {
            io::write_text(path, &rewritten)?;
        }
        tracing::info!(path = %path, ?applied, "applied personal fields");
        Ok(applied)
    }

    /// Whether any known template sentinel is still present.
    pub fn has_placeholders(&self, path: &NormalizedPath) -> Result<bool> {
        let content = io::read_text(path)?;
        Ok(self
            .placeholders
            .all()
            .iter()
            .chain(MASTER_PLACEHOLDERS.all().iter())
            .any(|sentinel| content.contains(sentinel)))
    }

    /// Parse the typed settings out of a config file.
    pub fn load_settings(&self, path: &NormalizedPath) -> Result<PersonalSettings> {
        if !self.exists(path) {
            return Err(Error::MissingRequiredFile {
                path: path.to_native(),
            });
        }
        Ok(PersonalSettings::parse(&io::read_text(path)?))
    }
}
