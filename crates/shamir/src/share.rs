//! Share representation and the line-oriented share file format.
use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;

use crate::{Prime, Result, ShamirError};

/// Smallest share count a set can hold and still be recovered.
const MIN_SHARES: usize = 2;

/// A single share: the point `(x, y)` on the secret polynomial.
///
/// `x` is the 1-based share index and is never 0, since the polynomial's value
/// at 0 is the secret itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Share {
    /// The x-coordinate (evaluation point) for this share
    pub x: usize,
    /// The polynomial's value at `x`, reduced modulo P
    pub y: BigUint,
}

impl Share {
    /// Creates a new share with the given x-coordinate and y-value.
    pub fn new(x: usize, y: BigUint) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of this share.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Returns the y-value of this share.
    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Share(x={}, y={})", self.x, self.y)
    }
}

/// A complete set of shares as persisted on disk.
///
/// The text form is a `"<n>;<t>"` header followed by one decimal y-value per
/// line. The x-coordinate is not stored: it is the 1-based position of the
/// line after the header.
///
/// # Examples
/// ```
/// use quorum_shamir::ShareSet;
///
/// let set: ShareSet = "3;2\n11\n21\n31\n".parse().unwrap();
/// assert_eq!(set.total(), 3);
/// assert_eq!(set.threshold(), 2);
/// assert_eq!(set.shares()[2].x(), 3);
/// assert_eq!(set.to_string(), "3;2\n11\n21\n31\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSet {
    threshold: usize,
    shares: Vec<Share>,
}

impl ShareSet {
    /// Bundles freshly generated shares with their threshold.
    ///
    /// # Errors
    /// Returns `ShamirError::Format` if the shares are not indexed `1..=n` in
    /// order (the file format cannot represent anything else), and
    /// `ShamirError::Configuration` if the threshold is 0 or exceeds `n`, or
    /// if `n < 2`, since recovery interpolates at least two points.
    pub fn from_shares(threshold: usize, shares: Vec<Share>) -> Result<Self> {
        if threshold == 0 {
            return Err(ShamirError::Configuration("threshold must be at least 1"));
        }
        if shares.len() < MIN_SHARES {
            return Err(ShamirError::Configuration(
                "at least two shares are required",
            ));
        }
        if threshold > shares.len() {
            return Err(ShamirError::Configuration(
                "threshold exceeds share count",
            ));
        }
        if let Some((position, share)) = shares
            .iter()
            .enumerate()
            .find(|(position, share)| share.x != position + 1)
        {
            return Err(ShamirError::Format(format!(
                "share at position {} has x-coordinate {}, expected {}",
                position + 1,
                share.x,
                position + 1
            )));
        }

        Ok(Self { threshold, shares })
    }

    /// Total number of shares, `n`.
    pub fn total(&self) -> usize {
        self.shares.len()
    }

    /// Minimum number of shares required for recovery, `t`.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// All shares, ordered by x-coordinate.
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// Recovers the secret from the first `t` shares of the set.
    ///
    /// # Errors
    /// Propagates the errors of [`crate::Shamir::recover`].
    pub fn recover(&self, prime: &Prime) -> Result<BigUint> {
        crate::Shamir::with_prime(self.threshold, prime.clone())?.recover(&self.shares)
    }

    /// Recovers the secret from the last `t` shares of the set.
    ///
    /// Comparing this against [`ShareSet::recover`] is a cheap consistency
    /// check on a share file.
    pub fn recover_from_tail(&self, prime: &Prime) -> Result<BigUint> {
        let shamir = crate::Shamir::with_prime(self.threshold, prime.clone())?;
        let start = self.shares.len().saturating_sub(shamir.required_shares());
        shamir.recover(&self.shares[start..])
    }
}

impl fmt::Display for ShareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{};{}", self.total(), self.threshold)?;
        for share in &self.shares {
            writeln!(f, "{}", share.y)?;
        }
        Ok(())
    }
}

impl FromStr for ShareSet {
    type Err = ShamirError;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines
            .next()
            .ok_or_else(|| ShamirError::Format("missing \"<n>;<t>\" header".to_string()))?;
        let (total, threshold) = parse_header(header)?;

        let values: Vec<&str> = lines.collect();
        if values.len() != total {
            return Err(ShamirError::Format(format!(
                "header announces {} shares but {} were found",
                total,
                values.len()
            )));
        }

        let shares = values
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                parse_decimal(line)
                    .map(|y| Share::new(index + 1, y))
                    .ok_or_else(|| {
                        ShamirError::Format(format!(
                            "share {} is not a decimal integer: {:?}",
                            index + 1,
                            line
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { threshold, shares })
    }
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let malformed = || ShamirError::Format(format!("malformed header: {:?}", header));

    let mut fields = header.split(';');
    let (Some(total), Some(threshold), None) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let total: usize = total.trim().parse().map_err(|_| malformed())?;
    let threshold: usize = threshold.trim().parse().map_err(|_| malformed())?;

    if threshold == 0 {
        return Err(ShamirError::Format("threshold must be at least 1".to_string()));
    }
    if total < MIN_SHARES {
        return Err(ShamirError::Format(format!(
            "at least two shares are required, header announces {}",
            total
        )));
    }
    if threshold > total {
        return Err(ShamirError::Format(format!(
            "threshold {} exceeds share count {}",
            threshold, total
        )));
    }

    Ok((total, threshold))
}

/// Parses a share value: ASCII digits only, no sign or separators.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use quorum_shamir::parse_decimal;
///
/// assert_eq!(parse_decimal("1234"), Some(BigUint::from(1234u32)));
/// assert_eq!(parse_decimal("+1_0"), None);
/// ```
pub fn parse_decimal(line: &str) -> Option<BigUint> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(line.as_bytes(), 10)
}
