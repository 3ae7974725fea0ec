//! testlog

use std::path::Path;

use colored::Colorize;
use rexm_core::BuildTarget;
use rexm_core::testing::{host_platform, render_testing_report, testing_report_file};
use rexm_fs::{FileSystem, LocalFs};

use super::{open_engine, print_json, print_report};
use crate::error::Result;

/// Run the testlog command
pub fn run_testlog(config: Option<&Path>, target: &str, json: bool) -> Result<()> {
    if !json {
        println!("{} Checking test logs of {}...", "=>".blue().bold(), target.cyan());
    }
    let engine = open_engine(config)?;
    let report = engine.testlog(&BuildTarget::from(target));

    if report.success || !report.tests.is_empty() {
        let platform = host_platform();
        let path = engine.config().reports_dir().join(&testing_report_file(platform));
        LocalFs::new().write_text(&path, &render_testing_report(&report.tests, platform))?;
        tracing::info!(path = %path, "Wrote testing report");
    }

    if json {
        return print_json(&report);
    }
    let failing: Vec<_> = report.tests.iter().filter(|r| r.has_issues()).collect();
    println!(
        "{} {} of {} tested examples have issues",
        if failing.is_empty() { "OK".green().bold() } else { "ISSUES".yellow().bold() },
        failing.len(),
        report.tests.len()
    );
    for result in failing {
        println!("   {} {}", "-".yellow(), result);
    }
    print_report(&report, "Test logs checked", "Test log check failed")
}
