//! Linty CLI entry point

use clap::Parser;
use linty::cli::{Cli, Command};
use linty::config::Config;
use std::process;
use tracing::debug;

fn main() {
    let cli = Cli::parse();

    // Load errors are reported by the command itself.
    let config_verbose = Config::load_or_default(&cli.config)
        .map(|config| config.linty.verbose)
        .unwrap_or(false);
    init_logging(cli.verbose || config_verbose);

    let exit_code = match &cli.command {
        Command::Check(args) => linty::cli::check::run_check(&cli.config, args, cli.color),
        Command::Manifest { output } => {
            linty::cli::verify::run_manifest(&cli.config, output.as_deref())
        }
        Command::Verify { manifest } => {
            linty::cli::verify::run_verify(&cli.config, manifest.as_deref())
        }
        Command::List { lang, format } => {
            linty::cli::list::run_list(&cli.config, lang.as_deref(), *format)
        }
    };

    process::exit(exit_code);
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}
