//! Filesystem primitives for the extpack packaging pipeline
//!
//! Provides forward-slash normalized paths, atomic single-file writes,
//! recursive tree copy/removal and structured document loading.

pub mod checksum;
pub mod document;
pub mod error;
pub mod io;
pub mod path;

pub use document::DocumentStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_relative_path};
