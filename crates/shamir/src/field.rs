//! Modular arithmetic over GF(P) on arbitrary-precision signed integers.
//!
//! Lagrange reconstruction works on exact, possibly negative products before
//! reducing them, so these helpers take [`BigInt`] rather than [`BigUint`].
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::{Result, ShamirError};

/// Reduces `a` into `[0, p)` with flooring semantics.
///
/// `%` on `BigInt` truncates toward zero and returns a negative remainder for
/// a negative dividend, so the result is shifted back into range explicitly.
///
/// # Examples
/// ```
/// use num_bigint::BigInt;
/// use quorum_shamir::field::mod_reduce;
///
/// let p = BigInt::from(7);
/// assert_eq!(mod_reduce(&BigInt::from(-3), &p), BigInt::from(4));
/// assert_eq!(mod_reduce(&BigInt::from(10), &p), BigInt::from(3));
/// ```
pub fn mod_reduce(a: &BigInt, p: &BigInt) -> BigInt {
    ((a % p) + p) % p
}

/// Computes the multiplicative inverse of `den` modulo the prime `p`.
///
/// Uses the extended Euclidean algorithm on `(den mod p, p)`, so negative
/// denominators are handled as their field representative.
///
/// # Errors
/// Returns `ShamirError::NotInvertible` if `den ≡ 0 (mod p)`, or if `p` turns
/// out not to be prime and `den` shares a factor with it.
///
/// # Examples
/// ```
/// use num_bigint::BigInt;
/// use quorum_shamir::field::mod_inverse;
///
/// let p = BigInt::from(11);
/// assert_eq!(mod_inverse(&BigInt::from(3), &p).unwrap(), BigInt::from(4));
/// assert_eq!(mod_inverse(&BigInt::from(-2), &p).unwrap(), BigInt::from(5));
/// assert!(mod_inverse(&BigInt::from(22), &p).is_err());
/// ```
pub fn mod_inverse(den: &BigInt, p: &BigInt) -> Result<BigInt> {
    let den = mod_reduce(den, p);
    if den.is_zero() {
        return Err(ShamirError::NotInvertible);
    }

    let (gcd, x, _) = extended_gcd(&den, p);
    if !gcd.is_one() {
        return Err(ShamirError::NotInvertible);
    }

    Ok(mod_reduce(&x, p))
}

/// Computes `num / den` in GF(p) as `num * den^-1`.
///
/// The product is deliberately left unreduced; reconstruction reduces once at
/// the end.
pub fn mod_divide(num: &BigInt, den: &BigInt, p: &BigInt) -> Result<BigInt> {
    Ok(num * mod_inverse(den, p)?)
}

/// Iterative extended Euclid: returns `(g, x, y)` with `a*x + b*y = g`.
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = core::mem::replace(&mut r, next_r);

        let next_x = &old_x - &quotient * &x;
        old_x = core::mem::replace(&mut x, next_x);

        let next_y = &old_y - &quotient * &y;
        old_y = core::mem::replace(&mut y, next_y);
    }

    (old_r, old_x, old_y)
}
