//! validate and update, both of which write the markdown reports

use std::path::Path;

use colored::Colorize;
use rexm_core::report::{ISSUES_REPORT_FILE, REPORT_FILE};
use rexm_core::{Engine, OperationReport, ReportFilter, render_report};
use rexm_fs::{FileSystem, LocalFs};

use super::{open_engine, print_json, print_report};
use crate::error::Result;

/// Run the validate command
pub fn run_validate(config: Option<&Path>, json: bool) -> Result<()> {
    if !json {
        println!("{} Validating examples collection...", "=>".blue().bold());
    }
    let engine = open_engine(config)?;
    let report = engine.validate();
    finish(&engine, &report, json, "Validation complete", "Validation failed")
}

/// Run the update command
pub fn run_update(config: Option<&Path>, json: bool) -> Result<()> {
    if !json {
        println!("{} Updating examples collection...", "=>".blue().bold());
    }
    let engine = open_engine(config)?;
    let report = engine.update();
    finish(&engine, &report, json, "Update complete", "Update failed")
}

fn finish(engine: &Engine, report: &OperationReport, json: bool, done: &str, failed: &str) -> Result<()> {
    write_reports(engine, report)?;
    if json {
        return print_json(report);
    }

    let issues = report.issues().count();
    if issues == 0 {
        println!("{} All {} examples are valid.", "OK".green().bold(), report.examples.len());
    } else {
        println!(
            "{} {} of {} examples have issues:",
            "ISSUES".yellow().bold(),
            issues,
            report.examples.len()
        );
        for record in report.issues() {
            println!("   {} {} ({})", "-".yellow(), record.name.cyan(), record.status);
        }
    }
    print_report(report, done, failed)
}

/// Write the full and issues-only reports into the reports directory.
fn write_reports(engine: &Engine, report: &OperationReport) -> Result<()> {
    if report.examples.is_empty() && !report.success {
        return Ok(());
    }
    let fs = LocalFs::new();
    let dir = engine.config().reports_dir();

    for (file, filter) in [
        (REPORT_FILE, ReportFilter::All),
        (ISSUES_REPORT_FILE, ReportFilter::IssuesOnly),
    ] {
        let path = dir.join(file);
        fs.write_text(&path, &render_report(&report.examples, filter))?;
        tracing::info!(path = %path, "Wrote report");
    }
    Ok(())
}
