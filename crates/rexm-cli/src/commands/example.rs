//! create, add, rename and remove

use std::path::Path;

use colored::Colorize;
use rexm_fs::NormalizedPath;

use super::{open_engine, print_report};
use crate::error::Result;

/// Run the create command
pub fn run_create(config: Option<&Path>, name: &str) -> Result<()> {
    println!("{} Creating {}...", "=>".blue().bold(), name.cyan());
    let report = open_engine(config)?.create(name);
    print_report(&report, &format!("Created {name}"), &format!("Could not create {name}"))
}

/// Run the add command
pub fn run_add(config: Option<&Path>, path: &Path) -> Result<()> {
    println!("{} Adding {}...", "=>".blue().bold(), path.display().to_string().cyan());
    let engine = open_engine(config)?;
    let source = NormalizedPath::new(path).canonicalize()?;
    let report = engine.add(&source);
    print_report(
        &report,
        &format!("Added {}", path.display()),
        &format!("Could not add {}", path.display()),
    )
}

/// Run the rename command
pub fn run_rename(config: Option<&Path>, old: &str, new: &str) -> Result<()> {
    println!("{} Renaming {} to {}...", "=>".blue().bold(), old.cyan(), new.cyan());
    let report = open_engine(config)?.rename(old, new);
    print_report(
        &report,
        &format!("Renamed {old} to {new}"),
        &format!("Could not rename {old}"),
    )
}

/// Run the remove command
pub fn run_remove(config: Option<&Path>, name: &str) -> Result<()> {
    println!("{} Removing {}...", "=>".blue().bold(), name.cyan());
    let report = open_engine(config)?.remove(name);
    print_report(&report, &format!("Removed {name}"), &format!("Could not remove {name}"))
}
