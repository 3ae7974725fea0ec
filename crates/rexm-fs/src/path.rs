//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// The examples tree is shared between Windows (IDE solution) and Unix
/// (make) builds, so every path the engine renders into an artifact goes
/// through this type. Conversion to the platform-native form only happens
/// at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
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

    /// Resolve the path against the filesystem, without UNC prefixes on Windows.
    pub fn canonicalize(&self) -> Result<Self> {
        let native = self.to_native();
        dunce::canonicalize(&native)
            .map(Self::new)
            .map_err(|e| Error::io(native, e))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the file name without its extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Replace (or add) the extension of the final component.
    pub fn with_extension(&self, extension: &str) -> Self {
        let stem_end = match (self.file_stem(), self.file_name()) {
            (Some(stem), Some(name)) => self.inner.len() - name.len() + stem.len(),
            _ => self.inner.len(),
        };
        let mut inner = self.inner[..stem_end].to_string();
        if !extension.is_empty() {
            inner.push('.');
            inner.push_str(extension);
        }
        Self { inner }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
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

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslashes_are_normalized() {
        let path = NormalizedPath::new(r"projects\VS2022\examples\core_basic_window.vcxproj");
        assert_eq!(
            path.as_str(),
            "projects/VS2022/examples/core_basic_window.vcxproj"
        );
    }

    #[test]
    fn stem_and_extension() {
        let path = NormalizedPath::new("examples/core/core_basic_window.c");
        assert_eq!(path.file_name(), Some("core_basic_window.c"));
        assert_eq!(path.file_stem(), Some("core_basic_window"));
        assert_eq!(path.extension(), Some("c"));
    }

    #[test]
    fn with_extension_swaps_suffix() {
        let path = NormalizedPath::new("examples/core/core_basic_window.c");
        assert_eq!(
            path.with_extension("png").as_str(),
            "examples/core/core_basic_window.png"
        );
        let bare = NormalizedPath::new("web/core/core_input_keys");
        assert_eq!(bare.with_extension("html").as_str(), "web/core/core_input_keys.html");
    }

    #[test]
    fn join_and_parent() {
        let root = NormalizedPath::new("/raylib/examples/");
        let file = root.join("shapes").join("shapes_logo_raylib.c");
        assert_eq!(file.as_str(), "/raylib/examples/shapes/shapes_logo_raylib.c");
        assert_eq!(
            file.parent().map(|p| p.as_str().to_string()),
            Some("/raylib/examples/shapes".to_string())
        );
    }
}
