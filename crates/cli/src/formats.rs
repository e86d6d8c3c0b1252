//! Input/Output format handling

use anyhow::{Context, Result};
use clap::ValueEnum;
use quorum_shamir::{parse_decimal, Prime, Share, ShareSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CliError;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// "<n>;<t>" header followed by one share value per line
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Text,
    Json,
}

impl InputFormat {
    pub fn detect(content: &str) -> Self {
        let content = content.trim();

        if content.starts_with('{') && content.ends_with('}') {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShareData {
    /// X-coordinate of the share
    pub x: usize,

    /// Share value as a decimal string
    pub y: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShareSetData {
    pub total_shares: usize,

    pub threshold: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prime_bits: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    pub shares: Vec<ShareData>,
}

impl ShareSetData {
    pub fn new(set: &ShareSet, prime: &Prime, include_metadata: bool) -> Self {
        Self {
            total_shares: set.total(),
            threshold: set.threshold(),
            prime_bits: include_metadata.then(|| prime.bits()),
            created_at: include_metadata.then(|| chrono::Utc::now().to_rfc3339()),
            shares: set
                .shares()
                .iter()
                .map(|share| ShareData {
                    x: share.x(),
                    y: share.y().to_string(),
                })
                .collect(),
        }
    }

    pub fn into_share_set(self) -> Result<ShareSet> {
        if self.shares.len() != self.total_shares {
            return Err(CliError::InvalidFormat(format!(
                "total_shares is {} but {} shares are listed",
                self.total_shares,
                self.shares.len()
            ))
            .into());
        }

        let shares = self
            .shares
            .into_iter()
            .map(|data| {
                parse_decimal(&data.y)
                    .map(|y| Share::new(data.x, y))
                    .ok_or_else(|| {
                        CliError::InvalidFormat(format!(
                            "share {} is not a decimal integer",
                            data.x
                        ))
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        ShareSet::from_shares(self.threshold, shares).context("Inconsistent JSON share set")
    }
}

/// Render a share set for output.
pub fn render(set: &ShareSet, format: OutputFormat, prime: &Prime, metadata: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(set.to_string()),
        OutputFormat::Json => {
            let data = ShareSetData::new(set, prime, metadata);
            Ok(serde_json::to_string_pretty(&data)? + "\n")
        }
    }
}

/// Parse share set content, auto-detecting the format.
pub fn parse(content: &str) -> Result<ShareSet> {
    match InputFormat::detect(content) {
        InputFormat::Json => serde_json::from_str::<ShareSetData>(content)
            .context("Failed to parse JSON")?
            .into_share_set(),
        InputFormat::Text => content.parse::<ShareSet>().map_err(Into::into),
    }
}

/// Read a share set file.
pub fn read_share_set(path: &Path) -> Result<ShareSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read share file: {}", path.display()))?;

    let set = parse(&content)
        .with_context(|| format!("Failed to load shares from {}", path.display()))?;
    log::debug!(
        "Loaded {} shares (threshold {}) from {}",
        set.total(),
        set.threshold(),
        path.display()
    );
    Ok(set)
}

/// Write a share set file.
pub fn write_share_set(
    path: &Path,
    set: &ShareSet,
    format: OutputFormat,
    prime: &Prime,
    metadata: bool,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, render(set, format, prime, metadata)?)
        .with_context(|| format!("Failed to write share file: {}", path.display()))
}
