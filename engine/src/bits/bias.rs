//! Biased-bit synthesis
//!
//! Produces words whose bits are independent Bernoulli trials with success
//! probability `n / 2^m`. The binary digits of `n` act as a small program:
//! scanning from the lowest set bit of `n` up to bit `m - 1`, a `1` digit
//! ORs the next uniform word into an accumulator and a `0` digit ANDs it in.
//!
//! Per bit, OR maps `p` to `(1 + p) / 2` and AND maps `p` to `p / 2`. Starting
//! from `p = 0`, running the digits of `n` from least to most significant
//! builds `n / 2^m` one binary digit at a time. Digits below the lowest set bit
//! would AND into a zero accumulator and are skipped, so one call costs
//! `m - n.trailing_zeros()` generator draws.

use rand_core::RngCore;

use crate::rng::{Lanes4, Pcg32x4, LANES};

/// Check the `(n, m)` contract shared by the biased samplers.
#[inline]
pub(crate) fn check_probability(n: u64, m: u32) {
    assert!(n != 0, "probability is 0");
    assert!((1..=64).contains(&m), "invalid base 2 exponent {}", m);
    assert!(
        m == 64 || n < (1u64 << m),
        "numerator {} is not below 2^{}",
        n,
        m
    );
}

/// 64 independent bits, each set with probability `n / 2^m`
///
/// Smaller `m` means fewer generator draws.
///
/// # Panics
/// Panics if `n == 0`, `m` is outside `1..=64`, or `n >= 2^m`
///
/// # Example
/// ```
/// use statrng_core_rs::{bits::biased_word, Pcg64};
///
/// let mut rng = Pcg64::new(12345);
/// // each bit set with probability 1/8
/// let word = biased_word(&mut rng, 1, 3);
/// # let _ = word;
/// ```
pub fn biased_word<R: RngCore + ?Sized>(rng: &mut R, n: u64, m: u32) -> u64 {
    check_probability(n, m);

    let mut accumulator = 0u64;
    for pc in n.trailing_zeros()..m {
        if (n >> pc) & 1 == 1 {
            accumulator |= rng.next_u64();
        } else {
            accumulator &= rng.next_u64();
        }
    }

    accumulator
}

/// 256 independent bits from the vector generator, each set with
/// probability `n / 2^m`
///
/// Same digit program as [`biased_word`], one 256-bit draw per digit.
///
/// # Panics
/// Panics if `n == 0`, `m` is outside `1..=64`, or `n >= 2^m`
pub fn biased_block(rng: &mut Pcg32x4, n: u64, m: u32) -> [u64; LANES] {
    check_probability(n, m);

    let mut accumulator = Lanes4::zero();
    for pc in n.trailing_zeros()..m {
        let draw = rng.next_lanes4();
        accumulator = if (n >> pc) & 1 == 1 {
            accumulator | draw
        } else {
            accumulator & draw
        };
    }

    accumulator.to_array()
}
