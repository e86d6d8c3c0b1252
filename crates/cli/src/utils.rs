//! Utility functions

use anyhow::{bail, Context, Result};
use num_bigint::BigUint;
use quorum_shamir::{parse_decimal, Shamir, Share};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::CliError;

/// Validate that a threshold and share count are reasonable
pub fn validate_sharing_params(threshold: usize, shares: usize) -> Result<()> {
    if threshold == 0 {
        bail!("Threshold must be at least 1");
    }
    if shares < 2 {
        bail!("At least two shares are required, since recovery needs two points");
    }
    if shares < threshold {
        bail!(
            "Number of shares ({}) must be at least the threshold ({})",
            shares,
            threshold
        );
    }
    Ok(())
}

/// Build a deterministic generator from a 32-byte hex seed
pub fn rng_from_seed(seed_hex: &str) -> Result<ChaCha8Rng> {
    let seed_bytes = hex::decode(seed_hex.trim()).context("Invalid hex seed")?;
    let seed: [u8; 32] = seed_bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("Seed must be exactly 32 bytes (64 hex characters)"))?;
    Ok(ChaCha8Rng::from_seed(seed))
}

/// Split a secret, deterministically when a hex seed is given
pub fn split_secret(
    shamir: &Shamir,
    secret: &BigUint,
    shares: usize,
    seed: Option<&str>,
) -> Result<Vec<Share>> {
    let shares = match seed {
        Some(seed_hex) => {
            log::warn!("Using a fixed seed: shares are reproducible by anyone who knows it");
            let mut rng = rng_from_seed(seed_hex)?;
            shamir.split_with_rng(secret, shares, &mut rng)?
        }
        None => shamir.split(secret, shares)?,
    };
    Ok(shares)
}

/// Parse a non-negative decimal secret
pub fn parse_secret(input: &str) -> Result<BigUint> {
    let input = input.trim();
    parse_decimal(input).ok_or_else(|| {
        CliError::InvalidFormat(format!(
            "secret must be a non-negative decimal integer, got {:?}",
            input
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sharing_params() {
        assert!(validate_sharing_params(0, 3).is_err());
        assert!(validate_sharing_params(4, 3).is_err());
        assert!(validate_sharing_params(3, 3).is_ok());
        assert!(validate_sharing_params(1, 1).is_err());
        assert!(validate_sharing_params(1, 2).is_ok());
    }

    #[test]
    fn test_seed_length() {
        assert!(rng_from_seed(&"ab".repeat(32)).is_ok());
        assert!(rng_from_seed(&"ab".repeat(16)).is_err());
        assert!(rng_from_seed("zz").is_err());
    }

    #[test]
    fn test_split_secret_seeded_is_reproducible() {
        let shamir = Shamir::new(2).unwrap();
        let secret = BigUint::from(99u32);
        let seed = "01".repeat(32);

        let first = split_secret(&shamir, &secret, 3, Some(&seed)).unwrap();
        let second = split_secret(&shamir, &secret, 3, Some(&seed)).unwrap();
        assert_eq!(first, second);
        assert_eq!(shamir.recover(&first).unwrap(), secret);
    }

    #[test]
    fn test_parse_secret() {
        assert_eq!(parse_secret(" 1234\n").unwrap(), BigUint::from(1234u32));
        assert!(parse_secret("-5").is_err());
        assert!(parse_secret("12a").is_err());
        assert!(parse_secret("").is_err());
        assert!(parse_secret("+1_0").is_err());
    }
}
