//! Split command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use quorum_shamir::{Shamir, ShareSet};
use std::path::PathBuf;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::formats::{self, OutputFormat};
use crate::utils;

#[derive(Args)]
pub struct SplitCommand {
    /// Secret to split, as a non-negative decimal integer
    #[arg(value_name = "SECRET")]
    pub secret: Option<String>,

    /// Minimum threshold of shares required for recovery
    #[arg(short = 'k', long, value_name = "THRESHOLD")]
    pub threshold: Option<usize>,

    /// Number of shares to generate
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub shares: Option<usize>,

    /// Mersenne exponent of the field prime (127, 521 or 2281)
    #[arg(short, long, value_name = "EXPONENT")]
    pub prime: Option<u32>,

    /// Write the share file here instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Read secret from environment variable
    #[arg(long, value_name = "VAR")]
    pub env_var: Option<String>,

    /// Prompt for secret interactively (hidden input)
    #[arg(long)]
    pub interactive: bool,

    /// Custom seed for deterministic share generation (hex encoded)
    #[arg(long, value_name = "HEX")]
    pub seed: Option<String>,

    /// Include metadata in JSON output
    #[arg(long)]
    pub include_metadata: bool,

    /// Recover the secret from the first and the last t shares as a sanity check
    #[arg(long)]
    pub show_check: bool,
}

impl SplitCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let (threshold, total) = config.sharing_params(self.threshold, self.shares)?;
        utils::validate_sharing_params(threshold, total)?;
        let prime = config.prime(self.prime)?;

        let input = self.read_secret()?;
        let secret = utils::parse_secret(&input)?;

        let shamir = Shamir::with_prime(threshold, prime.clone())
            .context("Failed to create Shamir instance")?;
        let shares = utils::split_secret(&shamir, &secret, total, self.seed.as_deref())
            .context("Failed to split secret")?;
        let set = ShareSet::from_shares(threshold, shares)?;

        if self.show_check {
            let head = set.recover(&prime)?;
            let tail = set.recover_from_tail(&prime)?;
            log::info!("Secret recovered from the first {} shares: {}", threshold, head);
            log::info!("Secret recovered from the last {} shares: {}", threshold, tail);
        }

        match &self.output {
            Some(path) => {
                formats::write_share_set(path, &set, self.format, &prime, self.include_metadata)?;
                log::info!(
                    "Generated {} shares with threshold {} ({}-bit prime), saved to {}",
                    total,
                    threshold,
                    prime.bits(),
                    path.display()
                );
            }
            None => {
                print!(
                    "{}",
                    formats::render(&set, self.format, &prime, self.include_metadata)?
                );
            }
        }

        Ok(())
    }

    fn read_secret(&self) -> Result<Zeroizing<String>> {
        let sources = [
            self.secret.is_some(),
            self.env_var.is_some(),
            self.interactive,
        ];
        match sources.iter().filter(|&&given| given).count() {
            0 => bail!("Provide the secret as an argument, with --env-var, or with --interactive"),
            1 => {}
            _ => bail!("Only one input method can be specified"),
        }

        let secret = if let Some(secret) = &self.secret {
            secret.clone()
        } else if let Some(env_var) = &self.env_var {
            std::env::var(env_var)
                .with_context(|| format!("Environment variable '{}' not found", env_var))?
        } else {
            rpassword::prompt_password("Enter secret: ")
                .context("Failed to read secret from the terminal")?
        };

        Ok(Zeroizing::new(secret))
    }
}
