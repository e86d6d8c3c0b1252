//! Shard command implementation
//!
//! Splits the raw bytes of a file, typically a PEM private key, by encoding
//! them as one field element first.

use anyhow::{Context, Result};
use clap::Args;
use quorum_shamir::{encode_bytes, Shamir, ShareSet};
use std::fs;
use std::path::PathBuf;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::error::CliError;
use crate::formats::{self, OutputFormat};
use crate::utils;

#[derive(Args)]
pub struct ShardCommand {
    /// File whose contents are split
    #[arg(value_name = "KEY_FILE")]
    pub input: PathBuf,

    /// Share file to write
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Minimum threshold of shares required for recovery
    #[arg(short = 'k', long, value_name = "THRESHOLD")]
    pub threshold: Option<usize>,

    /// Number of shares to generate
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub shares: Option<usize>,

    /// Mersenne exponent of the field prime (127, 521 or 2281)
    #[arg(short, long, value_name = "EXPONENT", default_value_t = 2281)]
    pub prime: u32,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Custom seed for deterministic share generation (hex encoded)
    #[arg(long, value_name = "HEX")]
    pub seed: Option<String>,
}

impl ShardCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let (threshold, total) = config.sharing_params(self.threshold, self.shares)?;
        utils::validate_sharing_params(threshold, total)?;
        let prime = config.prime(Some(self.prime))?;

        let payload = Zeroizing::new(
            fs::read(&self.input)
                .with_context(|| format!("Failed to read file: {}", self.input.display()))?,
        );
        if payload.is_empty() {
            return Err(CliError::EmptySecret.into());
        }
        if payload.first() == Some(&0) {
            log::warn!("Leading zero bytes cannot be represented and will be lost");
        }

        let max = prime.max_encodable_len();
        if payload.len() > max {
            return Err(CliError::PayloadTooLarge {
                len: payload.len(),
                max,
            }
            .into());
        }

        let secret = encode_bytes(&payload);
        log::debug!(
            "Encoded {} bytes into a {}-bit integer",
            payload.len(),
            secret.bits()
        );

        let shamir = Shamir::with_prime(threshold, prime.clone())
            .context("Failed to create Shamir instance")?;
        let shares = utils::split_secret(&shamir, &secret, total, self.seed.as_deref())
            .context("Failed to split file contents")?;
        let set = ShareSet::from_shares(threshold, shares)?;

        formats::write_share_set(&self.output, &set, self.format, &prime, false)?;
        log::info!(
            "Split {} into {} shares with threshold {}, saved to {}",
            self.input.display(),
            total,
            threshold,
            self.output.display()
        );

        Ok(())
    }
}
