//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rexm - Maintain the raylib examples collection
#[derive(Parser, Debug)]
#[command(name = "rexm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML or JSON). Without it, paths come from the
    /// REXM_EXAMPLES_* environment variables.
    #[arg(short, long, global = true, env = "REXM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new example from the template
    ///
    /// Examples:
    ///   rexm create core_input_gestures
    Create {
        /// Example name, prefixed with its category
        name: String,
    },

    /// Add an existing example source to the collection
    ///
    /// A screenshot next to the source and the assets it loads from
    /// resources/ are copied too.
    Add {
        /// Path to the example .c file
        path: PathBuf,
    },

    /// Rename an example, possibly into another category
    Rename {
        /// Current example name
        old: String,
        /// New example name
        new: String,
    },

    /// Remove an example and everything generated for it
    Remove {
        /// Example name
        name: String,
    },

    /// Validate every example and write the reports
    Validate {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Validate, fix what can be fixed and write the reports
    Update {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Compile for the desktop, then rebuild and publish web output
    ///
    /// Examples:
    ///   rexm build                     # every web-built example
    ///   rexm build shaders             # one category
    ///   rexm build core_basic_window   # one example
    Build {
        /// ALL, a category or an example name
        #[arg(default_value = "ALL")]
        target: String,
    },

    /// Analyze build and run logs and write the testing report
    ///
    /// Logs are read from <category>/logs/<name>.build.log and
    /// <category>/logs/<name>.log under the examples root.
    Testlog {
        /// ALL, a category or an example name
        #[arg(default_value = "ALL")]
        target: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
