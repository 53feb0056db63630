//! Binomial sampling by bit counting
//!
//! Simulates 64 Bernoulli trials per biased word and counts successes with
//! `count_ones`.

use rand_core::RngCore;

use super::bias::{biased_word, check_probability};

/// Number of successes in `k` trials with success probability `n / 2^m`
///
/// # Panics
/// Panics if `k == 0`, `n == 0`, `m` is outside `1..=64`, or `n >= 2^m`
///
/// # Example
/// ```
/// use statrng_core_rs::{bits::binomial, Pcg64};
///
/// let mut rng = Pcg64::new(12345);
/// let heads = binomial(&mut rng, 100, 1, 1); // 100 fair coin flips
/// assert!(heads <= 100);
/// ```
pub fn binomial<R: RngCore + ?Sized>(rng: &mut R, k: u64, n: u64, m: u32) -> u64 {
    assert!(k != 0, "no trials");
    check_probability(n, m);

    let mut remaining = k;
    let mut successes = 0u64;

    while remaining > 64 {
        successes += u64::from(biased_word(rng, n, m).count_ones());
        remaining -= 64;
    }

    // 1..=64 trials left: keep only the top `remaining` bits
    successes + u64::from((biased_word(rng, n, m) >> (64 - remaining)).count_ones())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Pcg64;

    #[test]
    fn test_single_chunk_counts_top_bits() {
        let mut a = Pcg64::new(3);
        let mut b = Pcg64::new(3);
        let word = biased_word(&mut b, 1, 1);
        assert_eq!(binomial(&mut a, 10, 1, 1), u64::from((word >> 54).count_ones()));
    }

    #[test]
    fn test_full_chunks_use_every_bit() {
        let mut a = Pcg64::new(8);
        let mut b = Pcg64::new(8);
        let expected: u64 = (0..2)
            .map(|_| u64::from(biased_word(&mut b, 5, 4).count_ones()))
            .sum();
        assert_eq!(binomial(&mut a, 128, 5, 4), expected);
    }

    #[test]
    #[should_panic(expected = "no trials")]
    fn test_zero_trials_rejected() {
        binomial(&mut Pcg64::new(1), 0, 1, 1);
    }
}
