//! Format-agnostic structured document loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Document formats understood by [`DocumentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

/// Loads and saves structured documents (the extension manifest, the
/// project layout file).
///
/// The format is detected from the file extension. JSON is written with
/// two-space indentation.
#[derive(Debug, Default)]
pub struct DocumentStore;

impl DocumentStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = DocumentFormat::from_path(path)?;
        let content = io::read_text(path)?;
        Self::parse(path, format, &content)
    }

    /// Parse document content that was already read from `path`.
    pub fn parse<T: DeserializeOwned>(
        path: &NormalizedPath,
        format: DocumentFormat,
        content: &str,
    ) -> Result<T> {
        let parse_error = |message: String| Error::DocumentParse {
            path: path.to_native(),
            format: format.name().into(),
            message,
        };

        match format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        }
    }

    /// Save a document atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = DocumentFormat::from_path(path)?;
        let serialize_error = |message: String| Error::DocumentSerialize {
            path: path.to_native(),
            format: format.name().into(),
            message,
        };

        let content = match format {
            DocumentFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            DocumentFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
        };

        io::write_atomic(path, content.as_bytes())
    }
}
