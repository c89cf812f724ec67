//! SHA-256 checksum utilities
//!
//! Checksums use the canonical `sha256:<hex>` form in package reports.

use sha2::{Digest, Sha256};

use crate::{NormalizedPath, Result, io};

const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of in-memory bytes.
pub fn compute_bytes_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
pub fn compute_file_checksum(path: &NormalizedPath) -> Result<String> {
    let content = io::read_bytes(path)?;
    Ok(compute_bytes_checksum(&content))
}
