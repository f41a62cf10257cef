//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

#[derive(Parser, Debug)]
#[command(name = "godhunter")]
#[command(about = "Flags god files, god classes, and god methods and proposes refactoring extractions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a file or directory tree for god files, god classes, and god methods
    Analyze {
        /// Path to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of worker threads (0 = use all available cores)
        #[arg(long, default_value = "0")]
        jobs: usize,

        /// Path to a config file (overrides `.godhunter.toml` discovery)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Suppress all output except the rendered report
        #[arg(short, long)]
        quiet: bool,

        /// Increase log verbosity (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}
