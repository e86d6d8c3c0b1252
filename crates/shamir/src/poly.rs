//! Polynomial operations for Shamir's Secret Sharing over GF(P).
//!
//! This module provides functions for generating random polynomials,
//! evaluating them at the share indices, and performing Lagrange
//! interpolation at x = 0 to recover the original secret.

use hashbrown::HashSet;
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::{One, Zero};

use crate::field::{mod_divide, mod_reduce};
use crate::share::Share;
use crate::{Prime, Result, ShamirError};

/// Recovers the polynomial's value at x = 0 from a set of shares.
///
/// Both preconditions are checked before any arithmetic starts: at least two
/// shares, and pairwise distinct x-coordinates.
///
/// Nothing here knows the threshold. Given fewer shares than the polynomial
/// needs, interpolation still succeeds and returns an unrelated value.
///
/// # Errors
/// * `ShamirError::InsufficientShares` - Fewer than two shares
/// * `ShamirError::DuplicateShares` - Two shares with the same x-coordinate
/// * `ShamirError::NotInvertible` - A Lagrange denominator vanishes mod P
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use quorum_shamir::{Prime, Share};
/// use quorum_shamir::poly::interpolate;
///
/// // f(x) = 7 + 2x
/// let shares = vec![
///     Share::new(1, BigUint::from(9u32)),
///     Share::new(2, BigUint::from(11u32)),
/// ];
/// let secret = interpolate(&shares, &Prime::mersenne_127()).unwrap();
/// assert_eq!(secret, BigUint::from(7u32));
/// ```
pub fn interpolate(shares: &[Share], prime: &Prime) -> Result<BigUint> {
    validate_points(shares)?;
    lagrange_interpolate_at_zero(shares, prime)
}

fn validate_points(shares: &[Share]) -> Result<()> {
    if shares.len() < 2 {
        return Err(ShamirError::InsufficientShares {
            required: 2,
            provided: shares.len(),
        });
    }

    let mut unique_x_coords = HashSet::with_capacity(shares.len());
    for share in shares {
        if !unique_x_coords.insert(share.x) {
            return Err(ShamirError::DuplicateShares(share.x));
        }
    }

    Ok(())
}

/// Lagrange interpolation evaluated at x = 0.
///
/// f(0) = Σ_i y_i · num_i / den_i, with num_i = Π_{j≠i} (0 − x_j) and
/// den_i = Π_{j≠i} (x_i − x_j).
///
/// The numerators and denominators are exact signed integers. Every term is
/// first scaled by den = Π_i den_i, so the sum is divided by a single common
/// denominator at the end.
fn lagrange_interpolate_at_zero(shares: &[Share], prime: &Prime) -> Result<BigUint> {
    let p = prime.to_bigint();
    let xs: Vec<BigInt> = shares.iter().map(|share| BigInt::from(share.x)).collect();

    let (nums, dens): (Vec<BigInt>, Vec<BigInt>) = xs
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let others = || {
                xs.iter()
                    .enumerate()
                    .filter(move |&(j, _)| j != i)
                    .map(|(_, other)| other)
            };
            let num: BigInt = others().map(|other| -other).product();
            let den: BigInt = others().map(|other| current - other).product();
            (num, den)
        })
        .unzip();

    let den: BigInt = dens.iter().product();

    let mut sum = BigInt::zero();
    for ((num_i, den_i), share) in nums.iter().zip(&dens).zip(shares) {
        let y = BigInt::from(share.y.clone());
        let scaled = mod_reduce(&(num_i * &den * y), &p);
        sum += mod_divide(&scaled, den_i, &p)?;
    }

    let secret = mod_reduce(&(mod_divide(&sum, &den, &p)? + &p), &p);
    // mod_reduce leaves a non-negative value, so the magnitude is the value.
    let (_, magnitude) = secret.into_parts();
    Ok(magnitude)
}

/// Generates a random polynomial of degree `threshold - 1` with the given constant term.
///
/// The polynomial is represented as a vector of coefficients in descending order of degree:
/// [a_{k-1}, a_{k-2}, ..., a_1, a_0] where a_0 is the secret and a_i are random coefficients.
///
/// The random coefficients are drawn uniformly from [1, P - 1]; zero is
/// excluded so the polynomial keeps its full degree.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use quorum_shamir::Prime;
/// use quorum_shamir::poly::random_polynomial;
/// use rand_chacha::rand_core::SeedableRng;
///
/// let mut rng = rand_chacha::ChaCha8Rng::from_seed([0; 32]);
/// let secret = BigUint::from(42u32);
/// let poly = random_polynomial(&secret, 3, &Prime::mersenne_127(), &mut rng);
/// assert_eq!(poly.len(), 3);
/// assert_eq!(poly[2], secret);
/// ```
pub fn random_polynomial<R: rand::Rng + ?Sized>(
    secret: &BigUint,
    threshold: usize,
    prime: &Prime,
    rng: &mut R,
) -> Vec<BigUint> {
    let mut coefficients = Vec::with_capacity(threshold.max(1));
    let low = BigUint::one();

    for _ in 1..threshold {
        coefficients.push(rng.gen_biguint_range(&low, prime.value()));
    }

    coefficients.push(secret.clone());
    coefficients
}

/// Returns an iterator that evaluates a polynomial at x = 1, 2, 3, ...
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use quorum_shamir::Prime;
/// use quorum_shamir::poly::evaluator;
///
/// // 2x + 5
/// let poly = vec![BigUint::from(2u32), BigUint::from(5u32)];
/// let shares: Vec<_> = evaluator(poly, Prime::mersenne_127()).take(3).collect();
/// assert_eq!(shares[2].x(), 3);
/// assert_eq!(shares[2].y(), &BigUint::from(11u32));
/// ```
pub fn evaluator(coefficients: Vec<BigUint>, prime: Prime) -> impl Iterator<Item = Share> {
    (1usize..).map(move |x| {
        let y = evaluate_polynomial(&coefficients, &BigUint::from(x), &prime);
        Share::new(x, y)
    })
}

/// Evaluates a polynomial at `x` modulo P using Horner's method.
///
/// Coefficients are in descending order of degree. The accumulator starts at
/// zero and is reduced after every step:
/// acc = (acc · x + a_i) mod P.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use quorum_shamir::Prime;
/// use quorum_shamir::poly::evaluate_polynomial;
///
/// // 2x^2 + 3x + 5 at x = 2
/// let coeffs = vec![BigUint::from(2u32), BigUint::from(3u32), BigUint::from(5u32)];
/// let y = evaluate_polynomial(&coeffs, &BigUint::from(2u32), &Prime::mersenne_127());
/// assert_eq!(y, BigUint::from(19u32));
/// ```
pub fn evaluate_polynomial(coefficients: &[BigUint], x: &BigUint, prime: &Prime) -> BigUint {
    coefficients
        .iter()
        .fold(BigUint::zero(), |accumulator, coefficient| {
            (accumulator * x + coefficient) % prime.value()
        })
}
