//! Example validation
//!
//! - **status**: the per-example flag set
//! - **validator**: computes the flags from the collection and the disk

mod status;
mod validator;

pub use status::ValidationStatus;
pub use validator::{Validation, Validator};
