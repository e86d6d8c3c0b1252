//! Error handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Payload of {len} bytes does not fit below the field prime (max {max} bytes, try a larger --prime)")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("Verification failed: first and last {threshold} shares recover different secrets")]
    VerificationFailed { threshold: usize },

    #[error("Secret cannot be empty")]
    EmptySecret,
}
