//! CLI argument parsing using clap

use crate::config::{ColorOption, DEFAULT_CONFIG_FILE, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Linty CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "linty")]
#[command(about = "Pluggable per-file static checker with engine integrity verification")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (optional; defaults apply when absent)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output coloring (overrides configuration)
    #[arg(long, global = true)]
    pub color: Option<ColorOption>,
}

/// Available linty subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a rule set against one file and print the report
    Check(CheckArgs),

    /// Regenerate the integrity manifest from the tracked engine files
    Manifest {
        /// Manifest path (overrides configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify the tracked engine files against the integrity manifest
    Verify {
        /// Manifest path (overrides configuration)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// List registered rule sets and their rules
    List {
        /// Only list this language's rule set
        #[arg(short, long)]
        lang: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Arguments of the check command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct CheckArgs {
    /// File to check
    pub file: PathBuf,

    /// Language (rule set) identifier; detected from the file name if omitted
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Rule set TOML file to use instead of a registered rule set
    #[arg(long, conflicts_with = "lang")]
    pub rules: Option<PathBuf>,

    /// Output format (overrides configuration)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Refuse to run unless the engine matches its integrity manifest
    #[arg(long)]
    pub secure: bool,
}
