//! Command implementations for rexm-cli

pub mod build;
pub mod example;
pub mod testlog;
pub mod validate;

use std::path::Path;

use colored::Colorize;
use rexm_core::{Engine, EngineConfig, OperationReport, Severity};

use crate::error::{CliError, Result};

pub use build::run_build;
pub use example::{run_add, run_create, run_remove, run_rename};
pub use testlog::run_testlog;
pub use validate::{run_update, run_validate};

/// Load the engine configuration from `config_path`, or from the
/// environment when no file is given.
pub fn load_config(config_path: Option<&Path>) -> Result<EngineConfig> {
    let config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::from_env()?,
    };
    Ok(config)
}

/// Create the engine, failing when a required root is missing.
pub fn open_engine(config_path: Option<&Path>) -> Result<Engine> {
    let config = load_config(config_path)?;
    Ok(Engine::new(config)?)
}

/// Print actions and diagnostics of `report`.
///
/// Returns an error when the report failed, so the process exits with 1.
pub fn print_report(report: &OperationReport, done: &str, failed: &str) -> Result<()> {
    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    for diagnostic in &report.diagnostics {
        match diagnostic.severity {
            Severity::Warning => println!("   {} {}", "!".yellow(), diagnostic),
            Severity::Error => println!("   {} {}", "x".red(), diagnostic),
        }
    }

    if report.success {
        println!("{} {}", "OK".green().bold(), done);
        Ok(())
    } else {
        println!("{} {}", "ERROR".red().bold(), failed);
        Err(CliError::user(failed))
    }
}

/// Print `report` as pretty JSON.
pub fn print_json(report: &OperationReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    if report.success {
        Ok(())
    } else {
        Err(CliError::user("operation failed"))
    }
}
