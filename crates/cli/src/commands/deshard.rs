//! Deshard command implementation

use anyhow::{Context, Result};
use clap::Args;
use quorum_shamir::{decode_bytes, decode_text};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::formats;

#[derive(Args)]
pub struct DeshardCommand {
    /// Share file produced by `shard`
    #[arg(value_name = "SHARES")]
    pub input: PathBuf,

    /// Output file (use '-' for stdout)
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub output: String,

    /// Mersenne exponent of the field prime (127, 521 or 2281)
    #[arg(short, long, value_name = "EXPONENT", default_value_t = 2281)]
    pub prime: u32,

    /// Fail unless the recovered bytes are valid UTF-8 text
    #[arg(long)]
    pub text: bool,
}

impl DeshardCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let prime = config.prime(Some(self.prime))?;
        let set = formats::read_share_set(&self.input)?;

        let secret = set
            .recover(&prime)
            .context("Failed to recover secret from shares")?;
        let bytes = if self.text {
            Zeroizing::new(
                decode_text(&secret)
                    .context("Recovered secret is not encoded text")?
                    .into_bytes(),
            )
        } else {
            Zeroizing::new(
                decode_bytes(&secret).context("Recovered secret is not an encoded byte string")?,
            )
        };

        if self.output == "-" {
            io::stdout()
                .write_all(&bytes)
                .context("Failed to write to stdout")?;
        } else {
            fs::write(&self.output, bytes.as_slice())
                .with_context(|| format!("Failed to write to file: {}", self.output))?;
            log::info!("Recovered {} bytes, saved to {}", bytes.len(), self.output);
        }

        Ok(())
    }
}
