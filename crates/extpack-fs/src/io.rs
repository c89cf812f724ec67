//! Atomic I/O operations with file locking, plus recursive tree helpers

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;
use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// Name of the sibling temp file `write_atomic` uses for `file_name`.
pub fn atomic_temp_name(file_name: &str) -> String {
    format!(".{}.{}.tmp", file_name, std::process::id())
}

/// Whether `name` looks like a temp file left behind by an atomic write,
/// from this process or an interrupted earlier one.
pub fn is_atomic_temp(name: &str) -> bool {
    let Some(inner) = name
        .strip_prefix('.')
        .and_then(|rest| rest.strip_suffix(".tmp"))
    else {
        return false;
    };
    match inner.rsplit_once('.') {
        Some((base, pid)) => {
            !base.is_empty() && !pid.is_empty() && pid.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock on the temp file while it is written.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = atomic_temp_name(
        &native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|_| temp_file.sync_all());
    if let Err(e) = written {
        let _ = temp_file.unlock();
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })?;

    tracing::debug!(path = %path, bytes = content.len(), "wrote file atomically");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy a single file, creating the destination's parent directories.
///
/// An existing destination is overwritten.
pub fn copy_file(source: &NormalizedPath, dest: &NormalizedPath) -> Result<u64> {
    let dest_native = dest.to_native();
    if let Some(parent) = dest_native.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let bytes = fs::copy(source.to_native(), &dest_native).map_err(|e| Error::io(&dest_native, e))?;
    tracing::debug!(from = %source, to = %dest, bytes, "copied file");
    Ok(bytes)
}

/// Remove a directory and everything below it.
///
/// Removing a path that does not exist is not an error.
pub fn remove_tree(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    if !native_path.exists() {
        return Ok(());
    }

    if native_path.is_dir() {
        fs::remove_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))?;
    } else {
        fs::remove_file(&native_path).map_err(|e| Error::io(&native_path, e))?;
    }
    tracing::debug!(path = %path, "removed tree");
    Ok(())
}

/// Copy a directory tree verbatim into `dest`.
///
/// Symlinks are not followed. Returns the number of files copied.
pub fn copy_tree(source: &NormalizedPath, dest: &NormalizedPath) -> Result<usize> {
    let source_native = source.to_native();
    let dest_native = dest.to_native();
    fs::create_dir_all(&dest_native).map_err(|e| Error::io(&dest_native, e))?;

    let mut copied = 0;
    for entry in WalkDir::new(&source_native).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| Error::Walk {
            path: source_native.clone(),
            message: e.to_string(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(&source_native)
            .map_err(|e| Error::Walk {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            })?;
        let target = dest_native.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(|e| Error::io(&target, e))?;
            copied += 1;
        }
    }

    tracing::debug!(from = %source, to = %dest, files = copied, "copied tree");
    Ok(copied)
}
