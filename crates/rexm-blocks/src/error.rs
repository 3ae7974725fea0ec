//! Error types for rexm-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] rexm_fs::Error),

    #[error("Sentinel not found: {sentinel}")]
    SentinelNotFound { sentinel: String },

    #[error("End sentinel {end} appears before start sentinel {start}")]
    SentinelOrder { start: String, end: String },
}
