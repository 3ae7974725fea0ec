//! build

use std::path::Path;

use colored::Colorize;
use rexm_core::BuildTarget;

use super::{open_engine, print_report};
use crate::error::Result;

/// Run the build command
pub fn run_build(config: Option<&Path>, target: &str) -> Result<()> {
    println!("{} Building {}...", "=>".blue().bold(), target.cyan());
    let report = open_engine(config)?.build(&BuildTarget::from(target));
    print_report(&report, "Build complete", "Build failed")
}
