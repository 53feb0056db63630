//! PCG 64-bit generator (RXS M XS 64/64)
//!
//! A 64-bit linear congruential state update followed by a one-way output
//! permutation. Fast, non-cryptographic, suitable for simulation.
//!
//! # Algorithm
//!
//! `next` captures the current state `x`, advances the LCG
//! (`state = state * C + increment`, wrapping), then permutes `x`:
//! a random xorshift by `5 + (x >> 59)` bits, a multiply, and a fixed
//! xorshift by 43 bits. The returned value is the permuted old state, never
//! the new state.
//!
//! # Determinism
//!
//! Same nonzero seed → same sequence. Seed `0` draws both state words from
//! hardware entropy instead.

use rand_core::{impls, RngCore};
use serde::{Deserialize, Serialize};

use super::entropy::{EntropySource, HardwareEntropy, RETRY_LIMIT};
use super::mix::mix;
use super::RngError;

/// LCG multiplier.
const LCG_MULT: u64 = 0x5851_F42D_4C95_7F2D;

/// Output permutation multiplier.
const RXS_MULT: u64 = 0xAEF1_7502_108E_F2D9;

/// Scalar PCG generator producing 64 bits per call.
///
/// The all-zero state (`state == 0 && increment == 0`) is the failure
/// sentinel returned when entropy seeding fails; check [`Pcg64::is_failed`]
/// or use [`Pcg64::try_new`].
///
/// # Example
/// ```
/// use statrng_core_rs::Pcg64;
///
/// let mut rng = Pcg64::new(12345);
/// let value = rng.next();
/// let die = rng.uniform(1, 6); // [1, 6]
/// assert!((1..=6).contains(&die));
/// # let _ = value;
/// ```
///
/// Serde support is for in-memory hand-off (e.g. between workers); the field
/// layout is not a stable format. Deserializing runs the same checks as
/// [`Pcg64::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPcg64")]
pub struct Pcg64 {
    /// LCG state
    state: u64,
    /// Stream selector, always odd for a live generator
    increment: u64,
}

impl Pcg64 {
    /// Create a generator from a seed
    ///
    /// A nonzero seed is deterministic: `state = mix(seed)`,
    /// `increment = mix(mix(seed)) | 1`. Seed `0` seeds from hardware
    /// entropy and returns the zero sentinel if either draw fails.
    ///
    /// # Example
    /// ```
    /// use statrng_core_rs::Pcg64;
    ///
    /// let rng = Pcg64::new(42);
    /// assert!(!rng.is_failed());
    /// ```
    pub fn new(seed: u64) -> Self {
        if seed != 0 {
            let state = mix(seed);
            return Self {
                state,
                increment: mix(state) | 1,
            };
        }

        Self::from_entropy_source(&mut HardwareEntropy)
    }

    /// Create a generator, reporting entropy failure as an error
    ///
    /// # Errors
    ///
    /// [`RngError::EntropyUnavailable`] if `seed == 0` and the hardware
    /// source failed.
    pub fn try_new(seed: u64) -> Result<Self, RngError> {
        let rng = Self::new(seed);
        if rng.is_failed() {
            return Err(RngError::EntropyUnavailable {
                attempts: RETRY_LIMIT,
            });
        }
        Ok(rng)
    }

    /// Seed state and increment from two draws of `source`
    ///
    /// Returns the zero sentinel if either draw fails.
    pub fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Self {
        let drawn = source
            .try_random()
            .and_then(|state| source.try_random().map(|increment| (state, increment)));

        match drawn {
            Some((state, increment)) => Self {
                state,
                increment: increment | 1,
            },
            None => Self::failed(),
        }
    }

    /// Rebuild a generator from previously captured words
    ///
    /// # Panics
    /// Panics if `increment` is even
    pub fn from_parts(state: u64, increment: u64) -> Self {
        match Self::try_from_parts(state, increment) {
            Ok(rng) => rng,
            Err(e) => panic!("{}", e),
        }
    }

    /// Rebuild a generator from previously captured words
    ///
    /// # Errors
    ///
    /// [`RngError::InvalidState`] if `increment` is even
    pub fn try_from_parts(state: u64, increment: u64) -> Result<Self, RngError> {
        if increment & 1 == 0 {
            return Err(RngError::InvalidState(format!(
                "increment must be odd, got {:#x}",
                increment
            )));
        }
        Ok(Self { state, increment })
    }

    /// The zero sentinel
    pub(crate) fn failed() -> Self {
        Self {
            state: 0,
            increment: 0,
        }
    }

    /// True if this is the zero sentinel left by a failed entropy seeding
    pub fn is_failed(&self) -> bool {
        self.state == 0 && self.increment == 0
    }

    /// Generate the next 64-bit output
    ///
    /// Total over every state bit pattern; wrapping arithmetic is intended.
    ///
    /// # Example
    /// ```
    /// use statrng_core_rs::Pcg64;
    ///
    /// let mut rng = Pcg64::new(42);
    /// assert_eq!(rng.next(), 0xc2d8_5bb1_1df4_0d83);
    /// ```
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let x = self.state;
        self.state = self.state.wrapping_mul(LCG_MULT).wrapping_add(self.increment);

        let fx = ((x >> ((x >> 59) + 5)) ^ x).wrapping_mul(RXS_MULT);
        (fx >> 43) ^ fx
    }

    /// Generate an unbiased value in `[min, max]` (both inclusive)
    ///
    /// Masks each draw down to the bit width of `max - min` and rejects draws
    /// above the span, so at most two draws are expected.
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use statrng_core_rs::Pcg64;
    ///
    /// let mut rng = Pcg64::new(12345);
    /// let amount = rng.uniform(10_000, 100_000);
    /// assert!((10_000..=100_000).contains(&amount));
    /// ```
    pub fn uniform(&mut self, min: u64, max: u64) -> u64 {
        assert!(min < max, "min must be less than max");

        let span = max - min;
        let mask = u64::MAX >> span.leading_zeros();
        debug_assert_eq!(mask.count_ones(), 64 - span.leading_zeros(), "bad mask");

        loop {
            let sample = self.next() & mask;
            if sample <= span {
                return sample + min;
            }
        }
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Uses the upper 53 bits of one output.
    pub fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Current LCG state (for replay via [`Pcg64::from_parts`])
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Stream increment
    pub fn increment(&self) -> u64 {
        self.increment
    }
}

/// Unchecked serde shape of [`Pcg64`]
#[derive(Deserialize)]
struct RawPcg64 {
    state: u64,
    increment: u64,
}

impl TryFrom<RawPcg64> for Pcg64 {
    type Error = RngError;

    fn try_from(raw: RawPcg64) -> Result<Self, RngError> {
        Self::try_from_parts(raw.state, raw.increment)
    }
}

impl RngCore for Pcg64 {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::entropy::tests::ScriptedEntropy;

    #[test]
    fn test_known_sequence_for_seed_42() {
        let mut rng = Pcg64::new(42);
        assert_eq!(rng.next(), 0xc2d8_5bb1_1df4_0d83);
        assert_eq!(rng.next(), 0x2cec_8217_f0ad_5b0d);
        assert_eq!(rng.next(), 0xd265_8b16_977d_2337);
    }

    #[test]
    fn test_seeded_increment_is_odd() {
        for seed in 1..1000 {
            assert_eq!(Pcg64::new(seed).increment() & 1, 1);
        }
    }

    #[test]
    fn test_entropy_seeding_forces_odd_increment() {
        let mut source = ScriptedEntropy {
            words: vec![Some(0x1234), Some(0x10)],
        };
        let rng = Pcg64::from_entropy_source(&mut source);
        assert_eq!(rng.state(), 0x1234);
        assert_eq!(rng.increment(), 0x11);
    }

    #[test]
    fn test_entropy_failure_yields_sentinel() {
        let mut first_fails = ScriptedEntropy { words: vec![None] };
        assert!(Pcg64::from_entropy_source(&mut first_fails).is_failed());

        let mut second_fails = ScriptedEntropy {
            words: vec![Some(99), None],
        };
        assert!(Pcg64::from_entropy_source(&mut second_fails).is_failed());
    }

    #[test]
    fn test_zero_seed_uses_entropy_or_fails_cleanly() {
        match Pcg64::try_new(0) {
            Ok(rng) => assert_eq!(rng.increment() & 1, 1),
            Err(e) => assert_eq!(
                e,
                RngError::EntropyUnavailable {
                    attempts: RETRY_LIMIT
                }
            ),
        }
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_uniform_invalid_bounds() {
        let mut rng = Pcg64::new(12345);
        rng.uniform(100, 50);
    }

    #[test]
    #[should_panic(expected = "increment must be odd")]
    fn test_from_parts_rejects_even_increment() {
        Pcg64::from_parts(1, 2);
    }

    #[test]
    fn test_serde_keeps_sequence() {
        let mut rng = Pcg64::new(2718);
        rng.next();

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Pcg64 = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(restored.next(), rng.next());
        }
    }

    #[test]
    fn test_deserialize_rejects_even_increment() {
        let err = serde_json::from_str::<Pcg64>(r#"{"state":1,"increment":2}"#).unwrap_err();
        assert!(err.to_string().contains("increment must be odd"), "{}", err);

        // the zero sentinel is not a live generator either
        assert!(serde_json::from_str::<Pcg64>(r#"{"state":0,"increment":0}"#).is_err());
    }

    #[test]
    fn test_try_from_parts_reports_even_increment() {
        assert!(matches!(
            Pcg64::try_from_parts(1, 2),
            Err(RngError::InvalidState(_))
        ));
        assert_eq!(Pcg64::try_from_parts(1, 3).unwrap().increment(), 3);
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = Pcg64::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_rng_core_matches_inherent_next() {
        let mut a = Pcg64::new(7);
        let mut b = Pcg64::new(7);
        for _ in 0..100 {
            assert_eq!(RngCore::next_u64(&mut a), b.next());
        }
    }
}
