//! Shared test fixtures for the rexm workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`builder`]: [`FakeBuilder`], a web builder that writes shell output instead of compiling
//! - [`collection`]: [`TestCollection`], a miniature raylib tree in a temp dir
//! - [`example`]: [`TestExample`], one example's store line and source

pub mod builder;
pub mod collection;
pub mod example;

pub use builder::FakeBuilder;
pub use collection::TestCollection;
pub use example::TestExample;
