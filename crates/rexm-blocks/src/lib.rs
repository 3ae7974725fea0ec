//! Sentinel-delimited generated regions.
//!
//! A derived artifact (Makefile, README, web data file) carries exactly one
//! machine-generated region between a literal start sentinel and a literal
//! end sentinel:
//!
//! ```text
//! hand-written text
//! #EXAMPLES_LIST_START
//! generated body
//! #EXAMPLES_LIST_END
//! hand-written text
//! ```
//!
//! Everything up to and including the start sentinel, and everything from
//! the end sentinel onward, is preserved byte-for-byte. Only the body is
//! replaced.

pub mod error;
pub mod parser;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{MarkerPair, Region, find_region, has_region, region_body};
pub use writer::{replace_region, update_file};
