//! Recover command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::CliError;
use crate::formats;

#[derive(Args)]
pub struct RecoverCommand {
    /// Share file to read
    #[arg(value_name = "SHARES")]
    pub input: PathBuf,

    /// Mersenne exponent of the field prime (127, 521 or 2281)
    #[arg(short, long, value_name = "EXPONENT")]
    pub prime: Option<u32>,

    /// Output file (use '-' for stdout)
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub output: String,

    /// Verify recovery by also solving from the last t shares
    #[arg(long)]
    pub verify: bool,
}

impl RecoverCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let prime = config.prime(self.prime)?;
        let set = formats::read_share_set(&self.input)?;

        let secret = set
            .recover(&prime)
            .context("Failed to recover secret from shares")?;

        if self.verify {
            log::info!("Verifying recovery...");
            let tail = set
                .recover_from_tail(&prime)
                .context("Failed to recover secret from the last shares")?;
            if tail != secret {
                return Err(CliError::VerificationFailed {
                    threshold: set.threshold(),
                }
                .into());
            }
            log::info!("Verification successful");
        }

        if self.output == "-" {
            println!("{}", secret);
        } else {
            fs::write(&self.output, format!("{}\n", secret))
                .with_context(|| format!("Failed to write to file: {}", self.output))?;
            log::info!(
                "Secret recovered from {} of {} shares, saved to {}",
                set.threshold().max(2),
                set.total(),
                self.output
            );
        }

        Ok(())
    }
}
