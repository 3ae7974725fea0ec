//! Examples collection engine for rexm
//!
//! Maintains the canonical examples collection file and keeps every file
//! derived from it consistent:
//!
//! - **Collection store**: one record per example, loaded fresh and rewritten wholesale
//! - **Validation**: per-example status flags computed from the disk and the artifacts
//! - **Synchronizer**: regenerates the marker regions of Makefile, Makefile.Web, README and examples.js
//! - **Solution**: IDE project files and solution entries
//! - **Web**: compiled web output, page metadata and publishing
//! - **Testing**: build and run log analysis
//! - **Engine**: create, add, rename, remove, validate, update, build and testlog
//!
//! # Architecture
//!
//! ```text
//!                   rexm-cli
//!                      |
//!                  rexm-core
//!                      |
//!             +--------+--------+
//!             |                 |
//!          rexm-fs         rexm-blocks
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rexm_core::{Engine, EngineConfig};
//!
//! let config = EngineConfig::from_env()?;
//! let engine = Engine::new(config)?;
//! let report = engine.validate();
//! println!("{} examples with issues", report.issues().count());
//! ```

pub mod builder;
pub mod category;
pub mod collection;
pub mod config;
pub mod engine;
pub mod error;
pub mod header;
pub mod record;
pub mod report;
pub mod resources;
pub mod solution;
pub mod sync;
pub mod testing;
pub mod validation;
pub mod web;

pub use builder::{MakeWebBuilder, WebBuilder};
pub use category::Category;
pub use collection::{Collection, CollectionStore, LoadedCollection};
pub use config::{EngineConfig, WebSettings};
pub use engine::{BuildTarget, Engine};
pub use error::{Error, Result};
pub use header::HeaderInfo;
pub use record::{ExampleRecord, RecordParseError, Version};
pub use report::{Diagnostic, OperationReport, ReportFilter, Severity, render_report};
pub use sync::{Artifact, Synchronizer};
pub use testing::{TestResult, TestingStatus};
pub use validation::{Validation, ValidationStatus, Validator};
