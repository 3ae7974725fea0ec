//! The filesystem seam used by the examples engine
//!
//! The engine never touches `std::fs` directly. Everything goes through
//! [`FileSystem`], which keeps the engine testable against temp trees and
//! enforces the buffer limit in one place.

use std::fs;

use walkdir::WalkDir;

use crate::{Error, MAX_BUFFER_SIZE, NormalizedPath, Result, io};

/// Minimal filesystem capability required by the engine.
pub trait FileSystem {
    /// Read a UTF-8 text file, failing when it exceeds the buffer limit.
    fn read_text(&self, path: &NormalizedPath) -> Result<String>;

    /// Read a binary file, failing when it exceeds the buffer limit.
    fn read_bytes(&self, path: &NormalizedPath) -> Result<Vec<u8>>;

    /// Read a text file that may legitimately be absent.
    ///
    /// A missing file is `Ok(None)`. A file that exists but cannot be read
    /// (too large, not UTF-8, no permission) is still an error.
    fn read_text_if_exists(&self, path: &NormalizedPath) -> Result<Option<String>> {
        match self.read_text(path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Binary counterpart of [`FileSystem::read_text_if_exists`].
    fn read_bytes_if_exists(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        match self.read_bytes(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Replace the file content, creating parent directories as needed.
    fn write_text(&self, path: &NormalizedPath, content: &str) -> Result<()>;

    fn exists(&self, path: &NormalizedPath) -> bool;

    /// Recursively list files under `dir` whose extension matches `extension`.
    ///
    /// Results are sorted so callers see a deterministic order.
    fn list_files(&self, dir: &NormalizedPath, extension: &str) -> Result<Vec<NormalizedPath>>;

    fn copy(&self, from: &NormalizedPath, to: &NormalizedPath) -> Result<()>;

    fn rename(&self, from: &NormalizedPath, to: &NormalizedPath) -> Result<()>;

    /// Delete a file. Returns `false` when there was nothing to delete.
    fn remove(&self, path: &NormalizedPath) -> Result<bool>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy)]
pub struct LocalFs {
    max_buffer_size: u64,
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalFs {
    pub fn new() -> Self {
        Self {
            max_buffer_size: MAX_BUFFER_SIZE,
        }
    }

    /// Use a different buffer limit than [`MAX_BUFFER_SIZE`].
    pub fn with_buffer_limit(max_buffer_size: u64) -> Self {
        Self { max_buffer_size }
    }

    pub fn buffer_limit(&self) -> u64 {
        self.max_buffer_size
    }
}

fn ensure_parent(path: &NormalizedPath) -> Result<()> {
    if let Some(parent) = path.parent() {
        let native = parent.to_native();
        fs::create_dir_all(&native).map_err(|e| Error::io(native, e))?;
    }
    Ok(())
}

impl FileSystem for LocalFs {
    fn read_text(&self, path: &NormalizedPath) -> Result<String> {
        io::read_text_limited(path, self.max_buffer_size)
    }

    fn read_bytes(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        io::read_bytes_limited(path, self.max_buffer_size)
    }

    fn write_text(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        io::write_text(path, content)
    }

    fn exists(&self, path: &NormalizedPath) -> bool {
        path.exists()
    }

    fn list_files(&self, dir: &NormalizedPath, extension: &str) -> Result<Vec<NormalizedPath>> {
        let native = dir.to_native();
        if !native.is_dir() {
            return Err(Error::io(
                native,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }

        let mut files: Vec<NormalizedPath> = WalkDir::new(&native)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| NormalizedPath::new(entry.path()))
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .collect();
        files.sort();

        tracing::debug!(dir = %dir, extension, count = files.len(), "Listed files");
        Ok(files)
    }

    fn copy(&self, from: &NormalizedPath, to: &NormalizedPath) -> Result<()> {
        ensure_parent(to)?;
        fs::copy(from.to_native(), to.to_native()).map_err(|e| Error::io(from.to_native(), e))?;
        Ok(())
    }

    fn rename(&self, from: &NormalizedPath, to: &NormalizedPath) -> Result<()> {
        ensure_parent(to)?;
        fs::rename(from.to_native(), to.to_native()).map_err(|e| Error::io(from.to_native(), e))
    }

    fn remove(&self, path: &NormalizedPath) -> Result<bool> {
        match fs::remove_file(path.to_native()) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io(path.to_native(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remove_missing_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFs::new();
        let removed = fs
            .remove(&NormalizedPath::new(temp.path().join("ghost.png")))
            .unwrap();
        assert!(!removed);
    }

    #[test]
    fn buffer_limit_applies_to_reads() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("big.c"));
        std::fs::write(path.to_native(), "x".repeat(32)).unwrap();

        let fs = LocalFs::with_buffer_limit(8);
        assert!(matches!(
            fs.read_text(&path),
            Err(Error::BufferLimitExceeded { .. })
        ));
    }

    #[test]
    fn read_if_exists_separates_absent_from_unreadable() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFs::new();

        let missing = NormalizedPath::new(temp.path().join("ghost.c"));
        assert!(fs.read_text_if_exists(&missing).unwrap().is_none());
        assert!(fs.read_bytes_if_exists(&missing).unwrap().is_none());

        let latin1 = NormalizedPath::new(temp.path().join("latin1.c"));
        std::fs::write(latin1.to_native(), b"// \xA9 raysan5\n").unwrap();
        assert!(matches!(
            fs.read_text_if_exists(&latin1),
            Err(Error::InvalidUtf8 { .. })
        ));
        assert!(fs.read_bytes_if_exists(&latin1).unwrap().is_some());
    }
}
