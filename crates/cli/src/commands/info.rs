//! Info command implementation

use anyhow::Result;
use clap::Args;
use quorum_shamir::{Prime, ShareSet};
use std::path::PathBuf;

use crate::config::Config;
use crate::formats;

#[derive(Args)]
pub struct InfoCommand {
    /// Share file to analyze
    #[arg(value_name = "SHARES")]
    pub input: PathBuf,

    /// Mersenne exponent of the field prime (127, 521 or 2281)
    #[arg(short, long, value_name = "EXPONENT")]
    pub prime: Option<u32>,

    /// Show detailed information
    #[arg(short, long)]
    pub detailed: bool,

    /// Output format for information
    #[arg(long, value_enum, default_value = "table")]
    pub output_format: InfoOutputFormat,
}

#[derive(clap::ValueEnum, Clone)]
pub enum InfoOutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, serde::Serialize)]
struct ShareInfo {
    x_coordinate: usize,
    digits: usize,
    in_field: bool,
}

#[derive(Debug, serde::Serialize)]
struct ShareSetInfo {
    file_path: PathBuf,
    total_shares: usize,
    threshold: usize,
    prime_bits: u64,
    max_payload_bytes: usize,
    shares: Vec<ShareInfo>,
    consistency_issues: Vec<String>,
}

impl InfoCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let prime = config.prime(self.prime)?;
        let set = formats::read_share_set(&self.input)?;

        let info = self.analyze_share_set(&set, &prime);
        self.output_info(&info)
    }

    fn analyze_share_set(&self, set: &ShareSet, prime: &Prime) -> ShareSetInfo {
        let shares: Vec<ShareInfo> = set
            .shares()
            .iter()
            .map(|share| ShareInfo {
                x_coordinate: share.x(),
                digits: share.y().to_str_radix(10).len(),
                in_field: prime.contains(share.y()),
            })
            .collect();

        let consistency_issues = shares
            .iter()
            .filter(|share| !share.in_field)
            .map(|share| {
                format!(
                    "Share {} is not below the {}-bit prime (wrong --prime?)",
                    share.x_coordinate,
                    prime.bits()
                )
            })
            .collect();

        ShareSetInfo {
            file_path: self.input.clone(),
            total_shares: set.total(),
            threshold: set.threshold(),
            prime_bits: prime.bits(),
            max_payload_bytes: prime.max_encodable_len(),
            shares,
            consistency_issues,
        }
    }

    fn output_info(&self, info: &ShareSetInfo) -> Result<()> {
        match self.output_format {
            InfoOutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(info)?);
            }
            InfoOutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(info)?);
            }
            InfoOutputFormat::Table => {
                self.output_table(info);
            }
        }
        Ok(())
    }

    fn output_table(&self, info: &ShareSetInfo) {
        println!("Share Set Information");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━");

        println!("File: {}", info.file_path.display());
        println!("Total shares: {}", info.total_shares);
        println!("Threshold: {}", info.threshold);
        println!("Prime: 2^{} - 1", info.prime_bits);
        println!("Max shardable payload: {} bytes", info.max_payload_bytes);

        if !info.consistency_issues.is_empty() {
            println!("\n⚠️  Consistency Issues:");
            for issue in &info.consistency_issues {
                println!("  • {}", issue);
            }
        }

        if self.detailed && !info.shares.is_empty() {
            println!("\nIndividual Shares:");
            println!("┌─────────────┬──────────┬──────────┐");
            println!("│ X-Coord     │ Digits   │ In field │");
            println!("├─────────────┼──────────┼──────────┤");

            for share in &info.shares {
                println!(
                    "│ {:<11} │ {:<8} │ {:<8} │",
                    share.x_coordinate,
                    share.digits,
                    if share.in_field { "yes" } else { "no" }
                );
            }
            println!("└─────────────┴──────────┴──────────┘");
        }

        println!("\nRecovery Status:");
        let required = info.threshold.max(2);
        if !info.consistency_issues.is_empty() {
            println!("❌ Shares do not belong to this field");
        } else if info.total_shares >= required {
            println!(
                "✅ Sufficient shares for recovery ({} >= {})",
                info.total_shares, required
            );
        } else {
            println!(
                "❌ Insufficient shares for recovery ({} < {})",
                info.total_shares, required
            );
        }
    }
}
