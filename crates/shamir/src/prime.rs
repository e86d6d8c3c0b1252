//! Prime moduli defining the field GF(P).
//!
//! The prime is never a hidden global: every split and recover call receives
//! it explicitly, so sessions at different security levels can run side by
//! side.
use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_traits::One;

use crate::{Result, ShamirError};

/// Mersenne exponents that [`Prime::mersenne`] accepts.
///
/// All of them yield primes: 2^127 - 1, 2^521 - 1 and 2^2281 - 1.
pub const MERSENNE_EXPONENTS: [u32; 3] = [127, 521, 2281];

/// A prime modulus P.
///
/// All share values live in `[0, P)`, and every secret must be strictly
/// smaller than P.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prime(BigUint);

impl Prime {
    /// Wraps a caller-chosen modulus.
    ///
    /// Primality is not checked; a composite modulus makes inverses fail
    /// during recovery.
    ///
    /// # Errors
    /// Returns `ShamirError::Configuration` if the modulus is 2 or smaller.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::from(2u8) {
            return Err(ShamirError::Configuration(
                "prime modulus must be greater than 2",
            ));
        }
        Ok(Self(modulus))
    }

    /// Builds the Mersenne prime 2^exponent - 1.
    ///
    /// # Errors
    /// Returns `ShamirError::Configuration` unless `exponent` is one of
    /// [`MERSENNE_EXPONENTS`].
    ///
    /// # Examples
    /// ```
    /// use quorum_shamir::Prime;
    ///
    /// let prime = Prime::mersenne(521).unwrap();
    /// assert_eq!(prime.bits(), 521);
    /// assert!(Prime::mersenne(64).is_err());
    /// ```
    pub fn mersenne(exponent: u32) -> Result<Self> {
        if !MERSENNE_EXPONENTS.contains(&exponent) {
            return Err(ShamirError::Configuration(
                "unsupported Mersenne exponent (expected 127, 521 or 2281)",
            ));
        }
        Ok(Self::mersenne_unchecked(exponent))
    }

    /// 2^127 - 1, large enough for 128-bit secrets.
    pub fn mersenne_127() -> Self {
        Self::mersenne_unchecked(127)
    }

    /// 2^521 - 1.
    pub fn mersenne_521() -> Self {
        Self::mersenne_unchecked(521)
    }

    /// 2^2281 - 1, large enough to hold an encoded PEM private key.
    pub fn mersenne_2281() -> Self {
        Self::mersenne_unchecked(2281)
    }

    fn mersenne_unchecked(exponent: u32) -> Self {
        Self((BigUint::one() << exponent) - 1u32)
    }

    /// Returns the modulus.
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Returns the modulus as a signed integer for exact Lagrange arithmetic.
    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.0.clone())
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Returns true if `value` is a valid field element, i.e. smaller than P.
    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.0
    }

    /// Longest byte string whose 3-digit encoding is always below P.
    ///
    /// An encoding of `len` bytes has at most `3 * len` decimal digits, so it
    /// is guaranteed to fit when it has fewer digits than P.
    ///
    /// # Examples
    /// ```
    /// use quorum_shamir::Prime;
    ///
    /// // 2^127 - 1 has 39 decimal digits.
    /// assert_eq!(Prime::mersenne_127().max_encodable_len(), 12);
    /// ```
    pub fn max_encodable_len(&self) -> usize {
        (self.0.to_str_radix(10).len() - 1) / 3
    }
}

impl Default for Prime {
    fn default() -> Self {
        Self::mersenne_127()
    }
}

impl fmt::Display for Prime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
