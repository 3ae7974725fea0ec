//! rexm
//!
//! Command-line interface for maintaining the raylib examples collection.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(command = ?cli.command, "Starting rexm");

    execute_command(cli.command, cli.config.as_deref())
}

fn execute_command(cmd: Commands, config: Option<&std::path::Path>) -> Result<()> {
    match cmd {
        Commands::Create { name } => commands::run_create(config, &name),
        Commands::Add { path } => commands::run_add(config, &path),
        Commands::Rename { old, new } => commands::run_rename(config, &old, &new),
        Commands::Remove { name } => commands::run_remove(config, &name),
        Commands::Validate { json } => commands::run_validate(config, json),
        Commands::Update { json } => commands::run_update(config, json),
        Commands::Build { target } => commands::run_build(config, &target),
        Commands::Testlog { target, json } => commands::run_testlog(config, &target, json),
    }
}
