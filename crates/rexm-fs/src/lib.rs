//! Filesystem collaborator for rexm
//!
//! Provides normalized paths, bounded reads, atomic locked writes and the
//! [`FileSystem`] abstraction the examples engine talks to.

pub mod checksum;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use filesystem::{FileSystem, LocalFs};
pub use io::MAX_BUFFER_SIZE;
pub use path::NormalizedPath;
