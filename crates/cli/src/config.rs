//! Configuration management

use anyhow::{Context, Result};
use quorum_shamir::Prime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Defaults {
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    #[serde(default = "default_shares")]
    pub shares: usize,

    /// Mersenne exponent of the field prime (127, 521 or 2281)
    #[serde(default = "default_prime")]
    pub prime: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            shares: default_shares(),
            prime: default_prime(),
        }
    }
}

fn default_threshold() -> usize {
    3
}
fn default_shares() -> usize {
    6
}
fn default_prime() -> u32 {
    127
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    fn load_default() -> Result<Self> {
        let config_paths = [
            dirs::config_dir().map(|d| d.join("quorum").join("config.toml")),
            Some(PathBuf::from("quorum.toml")),
            Some(PathBuf::from(".quorum.toml")),
        ];

        for config_path in config_paths.into_iter().flatten() {
            if config_path.exists() {
                log::debug!("Loading configuration from {}", config_path.display());
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolves the field prime, preferring an explicit command-line exponent.
    pub fn prime(&self, exponent: Option<u32>) -> Result<Prime> {
        let exponent = exponent.unwrap_or(self.defaults.prime);
        Prime::mersenne(exponent).with_context(|| format!("Invalid prime exponent: {}", exponent))
    }

    /// Resolves `(threshold, shares)`; both must be given together or not at all.
    pub fn sharing_params(
        &self,
        threshold: Option<usize>,
        shares: Option<usize>,
    ) -> Result<(usize, usize)> {
        match (threshold, shares) {
            (Some(threshold), Some(shares)) => Ok((threshold, shares)),
            (None, None) => Ok((self.defaults.threshold, self.defaults.shares)),
            _ => anyhow::bail!(
                "Must provide both --threshold and --shares, or neither to use the defaults"
            ),
        }
    }
}
