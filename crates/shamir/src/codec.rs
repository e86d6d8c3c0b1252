//! Reversible byte-string ⇄ integer encoding.
//!
//! Every byte becomes a fixed-width group of three decimal digits (`7` →
//! `"007"`), and the concatenated digit string is read as one integer. The
//! fixed width keeps byte boundaries recoverable after the integer has been
//! shared and reconstructed.
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{Result, ShamirError};

const GROUP_WIDTH: usize = 3;

/// Encodes a byte string as a single integer.
///
/// Leading zero bytes encode to leading `"000"` groups and are therefore lost
/// when the digit string is read as an integer. The empty string encodes to 0.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use quorum_shamir::encode_bytes;
///
/// assert_eq!(encode_bytes(b"AB"), BigUint::from(65066u32));
/// ```
pub fn encode_bytes(bytes: &[u8]) -> BigUint {
    let digits: String = bytes.iter().map(|byte| format!("{:03}", byte)).collect();
    BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
}

/// Decodes an integer produced by [`encode_bytes`] back into bytes.
///
/// The decimal form is left-padded with `'0'` to a multiple of three digits
/// and every group is read back as one byte. Zero decodes to the empty string.
///
/// # Errors
/// Returns `ShamirError::Codec` if a group exceeds 255, which means the
/// integer was never an encoding (or the shares were corrupt).
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use quorum_shamir::decode_bytes;
///
/// assert_eq!(decode_bytes(&BigUint::from(65066u32)).unwrap(), b"AB");
/// assert!(decode_bytes(&BigUint::from(999u32)).is_err());
/// ```
pub fn decode_bytes(value: &BigUint) -> Result<Vec<u8>> {
    if value.is_zero() {
        return Ok(Vec::new());
    }

    let digits = value.to_str_radix(10);
    let padding = (GROUP_WIDTH - digits.len() % GROUP_WIDTH) % GROUP_WIDTH;
    let padded = format!("{}{}", "0".repeat(padding), digits);

    padded
        .as_bytes()
        .chunks(GROUP_WIDTH)
        .enumerate()
        .map(|(index, group)| {
            let number = group
                .iter()
                .fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0'));
            u8::try_from(number).map_err(|_| {
                ShamirError::Codec(format!(
                    "group {} decodes to {}, which is not a byte",
                    index + 1,
                    number
                ))
            })
        })
        .collect()
}

/// Decodes an integer into UTF-8 text.
///
/// # Errors
/// Returns `ShamirError::Codec` if a group exceeds 255 or the bytes are not
/// valid UTF-8.
pub fn decode_text(value: &BigUint) -> Result<String> {
    String::from_utf8(decode_bytes(value)?)
        .map_err(|e| ShamirError::Codec(format!("decoded bytes are not valid UTF-8: {}", e)))
}
