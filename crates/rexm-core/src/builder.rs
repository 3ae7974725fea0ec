//! Compilation of examples
//!
//! The engine never compiles anything itself; it asks a [`WebBuilder`] to
//! produce the html/wasm/js output next to the example source, and to
//! check the example still compiles for the desktop.

use std::process::Command;

use rexm_fs::NormalizedPath;

use crate::record::ExampleRecord;
use crate::{Error, Result};

/// Capability to compile one example for the web and desktop platforms.
pub trait WebBuilder {
    /// Build `record` for the web, leaving the output under
    /// `examples_root/<category>/`.
    fn build(&self, examples_root: &NormalizedPath, record: &ExampleRecord) -> Result<()>;

    /// Build `record` for the desktop platform with the regular Makefile.
    fn build_desktop(&self, examples_root: &NormalizedPath, record: &ExampleRecord) -> Result<()>;
}

/// Runs `make [-f Makefile.Web] <category>/<name>` in the examples root.
#[derive(Debug, Clone)]
pub struct MakeWebBuilder {
    command: String,
}

impl MakeWebBuilder {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Arguments passed to the make command for a desktop build.
    pub fn desktop_args(examples_root: &NormalizedPath, record: &ExampleRecord) -> Vec<String> {
        vec![
            "-C".to_string(),
            examples_root.to_native().display().to_string(),
            record.relative_stem(),
            "PLATFORM=PLATFORM_DESKTOP".to_string(),
            "-B".to_string(),
        ]
    }

    /// Arguments passed to the make command for a web build.
    pub fn args(examples_root: &NormalizedPath, record: &ExampleRecord) -> Vec<String> {
        vec![
            "-C".to_string(),
            examples_root.to_native().display().to_string(),
            "-f".to_string(),
            "Makefile.Web".to_string(),
            record.relative_stem(),
            "PLATFORM=PLATFORM_WEB".to_string(),
            "-B".to_string(),
        ]
    }

    fn run(&self, args: &[String], record: &ExampleRecord, platform: &str) -> Result<()> {
        let command_line = format!("{} {}", self.command, args.join(" "));
        tracing::info!(name = %record.name, platform, command = %command_line, "Building example");

        let output = Command::new(&self.command)
            .args(args)
            .output()
            .map_err(|e| Error::BuildFailed {
                command: command_line.clone(),
                code: None,
                stderr: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::BuildFailed {
                command: command_line,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

impl Default for MakeWebBuilder {
    fn default() -> Self {
        Self::new("make")
    }
}

impl WebBuilder for MakeWebBuilder {
    fn build(&self, examples_root: &NormalizedPath, record: &ExampleRecord) -> Result<()> {
        self.run(&Self::args(examples_root, record), record, "web")
    }

    fn build_desktop(&self, examples_root: &NormalizedPath, record: &ExampleRecord) -> Result<()> {
        self.run(&Self::desktop_args(examples_root, record), record, "desktop")
    }
}
