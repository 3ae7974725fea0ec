//! Bounded reads and atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Largest file the tool will load into memory (2 MiB).
///
/// Sources, build files and the README all fit comfortably; anything
/// larger is rejected instead of truncated.
pub const MAX_BUFFER_SIZE: u64 = 2 * 1024 * 1024;

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
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

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Read raw bytes, refusing files larger than `limit`.
///
/// # Errors
///
/// Returns [`Error::BufferLimitExceeded`] when the file is larger than
/// `limit`, or [`Error::Io`] when it cannot be read.
pub fn read_bytes_limited(path: &NormalizedPath, limit: u64) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    let size = fs::metadata(&native_path)
        .map_err(|e| Error::io(&native_path, e))?
        .len();
    if size > limit {
        return Err(Error::BufferLimitExceeded {
            path: native_path,
            size,
            limit,
        });
    }
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read UTF-8 text, refusing files larger than `limit`.
pub fn read_text_limited(path: &NormalizedPath, limit: u64) -> Result<String> {
    let bytes = read_bytes_limited(path, limit)?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: path.to_native(),
    })
}

/// Read text content from a file, bounded by [`MAX_BUFFER_SIZE`].
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    read_text_limited(path, MAX_BUFFER_SIZE)
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
