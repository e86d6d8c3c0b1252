//! Quorum CLI - Command-line interface for threshold secret sharing
//!
//! Splits decimal secrets or whole files (such as private keys) into share
//! files over GF(P), and recovers them again.

mod commands;
mod config;
mod error;
mod formats;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::Commands;
use config::Config;

#[derive(Parser)]
#[command(
    name = "quorum",
    version,
    about = "Quorum - threshold secret sharing over a prime field",
    long_about = "Splits a secret into n shares such that any t of them recover it, \
                  using Shamir's scheme over a Mersenne prime field. Share files use a \
                  plain \"<n>;<t>\" header followed by one share value per line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Using defaults: {:?}", config.defaults);

    match cli.command.execute(&config) {
        Ok(()) => Ok(()),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);

                if cli.verbose {
                    for cause in e.chain().skip(1) {
                        eprintln!("  Caused by: {}", cause);
                    }
                }
            }
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}
