//! CLI module for delve
//!
//! Provides command-line interface parsing and handling for the delve binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// delve - query-driven research assistant
///
/// Breaks a question into sub-questions, reads and summarizes web sources,
/// scores them, and remembers what it found for later recall.
#[derive(Parser, Debug)]
#[command(
    name = "delve",
    version,
    about = "delve - query-driven research assistant",
    after_help = "EXAMPLES:\n    \
                  delve init                           # Write a default delve.toml\n    \
                  delve research \"quantum computing\"   # Run a research pass\n    \
                  delve research rust --json           # Emit the run as JSON\n    \
                  delve recall \"who builds qubits?\"    # Search remembered findings"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "delve.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "DELVE_JSON_LOGS")]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a question end to end and print the report
    Research {
        /// The research question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the run as JSON instead of a formatted report
        #[arg(long)]
        json: bool,
    },

    /// Search memory for findings related to a follow-up question
    ///
    /// Needs `memory.snapshot_path` so that earlier runs are available.
    Recall {
        /// The follow-up question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Number of records to return (defaults to memory.top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Write a default delve.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing delve.toml
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
