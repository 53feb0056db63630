//! Four-stream PCG 32-bit generator (RXS M XS 32/32) on 256-bit vectors
//!
//! Runs four independent PCG32 streams in lockstep, one per 64-bit lane of
//! a [`Lanes4`]. Only the low 32 bits of each lane carry state; the upper
//! halves are masked to zero after every arithmetic step so that 32-bit
//! sub-lane shifts and the 32x32→64 lane multiply never pick up stray bits.
//!
//! One call to [`Pcg32x4::next_block`] advances every stream twice and packs
//! both outputs into its lane: first output in the low half, second in the
//! high half. Each lane therefore reproduces a scalar PCG32 stream exactly.

use serde::{Deserialize, Serialize};

use super::entropy::{EntropySource, HardwareEntropy, RETRY_LIMIT};
use super::lanes::{Lanes4, LANES, LOW_32};
use super::mix::mix;
use super::RngError;

/// 32-bit LCG multiplier.
const LCG_MULT: u64 = 0x2C92_77B5;

/// 32-bit output permutation multiplier.
const RXS_MULT: u64 = 0x108E_F2D9;

/// Per-sub-lane base of the variable xorshift (`4 + (x >> 28)`).
const SHIFT_BASE: u64 = 0x0000_0004_0000_0004;

/// Vectorized PCG generator producing 256 bits per call.
///
/// An all-zero state and increment is the failure sentinel left by failed
/// entropy seeding; see [`Pcg32x4::is_failed`] and [`Pcg32x4::try_new`].
///
/// # Example
/// ```
/// use statrng_core_rs::Pcg32x4;
///
/// let mut rng = Pcg32x4::new(1, 2, 3, 4);
/// let block = rng.next_block();
/// assert_eq!(block[0], 0xec50_01d7_6ad7_7591);
/// ```
///
/// Serde support is for in-memory hand-off only; deserializing runs the
/// checks of [`Pcg32x4::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPcg32x4")]
pub struct Pcg32x4 {
    /// Per-lane LCG state, upper 32 bits zero
    state: [u64; LANES],
    /// Per-lane stream selector, upper 32 bits zero, low bit set
    increment: [u64; LANES],
}

impl Pcg32x4 {
    /// Create a generator from four seeds
    ///
    /// Lane `i` is seeded from `seeds[i]` with the same two rounds of
    /// [`mix`] as [`Pcg64::new`](super::Pcg64::new). If any seed is `0`,
    /// all eight words are drawn from hardware entropy instead, and any
    /// failed draw yields the all-zero sentinel.
    pub fn new(seed_1: u64, seed_2: u64, seed_3: u64, seed_4: u64) -> Self {
        let seeds = [seed_1, seed_2, seed_3, seed_4];

        if seeds.iter().all(|&seed| seed != 0) {
            let state = seeds.map(mix);
            return Self::from_words(state, state.map(mix));
        }

        Self::from_entropy_source(&mut HardwareEntropy)
    }

    /// Create a generator, reporting entropy failure as an error
    ///
    /// # Errors
    ///
    /// [`RngError::EntropyUnavailable`] if any seed is `0` and the
    /// hardware source failed.
    pub fn try_new(seed_1: u64, seed_2: u64, seed_3: u64, seed_4: u64) -> Result<Self, RngError> {
        let rng = Self::new(seed_1, seed_2, seed_3, seed_4);
        if rng.is_failed() {
            return Err(RngError::EntropyUnavailable {
                attempts: RETRY_LIMIT,
            });
        }
        Ok(rng)
    }

    /// Draw four state words, then four increment words, from `source`
    ///
    /// Returns the zero sentinel if any of the eight draws fails.
    pub fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Self {
        let mut draw4 = || -> Option<[u64; LANES]> {
            Some([
                source.try_random()?,
                source.try_random()?,
                source.try_random()?,
                source.try_random()?,
            ])
        };

        let drawn = draw4().and_then(|state| draw4().map(|increment| (state, increment)));

        match drawn {
            Some((state, increment)) => Self::from_words(state, increment),
            None => Self::failed(),
        }
    }

    /// Rebuild a generator from previously captured lane words
    ///
    /// # Panics
    /// Panics if any lane has upper bits set or an even increment
    pub fn from_parts(state: [u64; LANES], increment: [u64; LANES]) -> Self {
        match Self::try_from_parts(state, increment) {
            Ok(rng) => rng,
            Err(e) => panic!("{}", e),
        }
    }

    /// Rebuild a generator from previously captured lane words
    ///
    /// # Errors
    ///
    /// [`RngError::InvalidState`] if any lane has upper bits set or an even
    /// increment
    pub fn try_from_parts(
        state: [u64; LANES],
        increment: [u64; LANES],
    ) -> Result<Self, RngError> {
        for (lane, (&s, &inc)) in state.iter().zip(increment.iter()).enumerate() {
            if s > LOW_32 || inc > LOW_32 {
                return Err(RngError::InvalidState(format!(
                    "lane words must fit in 32 bits, lane {} has state {:#x} increment {:#x}",
                    lane, s, inc
                )));
            }
            if inc & 1 == 0 {
                return Err(RngError::InvalidState(format!(
                    "increment must be odd, lane {} has {:#x}",
                    lane, inc
                )));
            }
        }
        Ok(Self { state, increment })
    }

    /// Mask raw words into live lanes.
    fn from_words(state: [u64; LANES], increment: [u64; LANES]) -> Self {
        Self {
            state: state.map(|w| w & LOW_32),
            increment: increment.map(|w| (w & LOW_32) | 1),
        }
    }

    pub(crate) fn failed() -> Self {
        Self {
            state: [0; LANES],
            increment: [0; LANES],
        }
    }

    /// True if this is the zero sentinel left by a failed entropy seeding
    pub fn is_failed(&self) -> bool {
        self.state == [0; LANES] && self.increment == [0; LANES]
    }

    /// Generate 256 bits as four 64-bit words, one per stream
    ///
    /// Word `i` holds two consecutive outputs of stream `i`: the earlier one
    /// in bits 0..32, the later one in bits 32..64.
    #[inline]
    pub fn next_block(&mut self) -> [u64; LANES] {
        self.next_lanes4().to_array()
    }

    /// Generate 256 bits as eight 32-bit outputs in stream order
    ///
    /// `[s0, s0', s1, s1', s2, s2', s3, s3']` where `sN'` follows `sN` in
    /// stream `N`.
    pub fn next_lanes(&mut self) -> [u32; 2 * LANES] {
        let block = self.next_block();
        let mut out = [0u32; 2 * LANES];
        for (pair, word) in out.chunks_exact_mut(2).zip(block) {
            pair[0] = word as u32;
            pair[1] = (word >> 32) as u32;
        }
        out
    }

    /// Generate 256 bits without leaving vector registers.
    #[inline]
    pub(crate) fn next_lanes4(&mut self) -> Lanes4 {
        let mut state = Lanes4::from_array(self.state);
        let increment = Lanes4::from_array(self.increment);

        let lower = step(&mut state, increment);
        let upper = step(&mut state, increment);

        self.state = state.to_array();
        upper.shl64::<32>() | lower
    }

    /// Per-lane LCG state (for replay via [`Pcg32x4::from_parts`])
    pub fn state(&self) -> [u64; LANES] {
        self.state
    }

    /// Per-lane stream increments
    pub fn increment(&self) -> [u64; LANES] {
        self.increment
    }
}

/// Unchecked serde shape of [`Pcg32x4`]
#[derive(Deserialize)]
struct RawPcg32x4 {
    state: [u64; LANES],
    increment: [u64; LANES],
}

impl TryFrom<RawPcg32x4> for Pcg32x4 {
    type Error = RngError;

    fn try_from(raw: RawPcg32x4) -> Result<Self, RngError> {
        Self::try_from_parts(raw.state, raw.increment)
    }
}

/// Advance all four streams once, returning their 32-bit outputs in the
/// low half of each lane.
#[inline(always)]
fn step(state: &mut Lanes4, increment: Lanes4) -> Lanes4 {
    let x = *state;

    let shift = x.shr32::<28>().add32(Lanes4::splat(SHIFT_BASE));
    let mut fx = x.shr32_var(shift) ^ x;
    fx = fx.mul_lo32(Lanes4::splat(RXS_MULT)).low32();
    fx = fx.shr32::<22>() ^ fx;

    *state = x
        .mul_lo32(Lanes4::splat(LCG_MULT))
        .low32()
        .add64(increment)
        .low32();

    fx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::entropy::tests::ScriptedEntropy;

    #[test]
    fn test_known_block_for_seeds_1_to_4() {
        let mut rng = Pcg32x4::new(1, 2, 3, 4);
        assert_eq!(
            rng.next_block(),
            [
                0xec50_01d7_6ad7_7591,
                0x8777_22c5_ae27_9093,
                0xcca2_ea94_c0b9_d5ef,
                0x403b_d5e1_57ec_6f76
            ]
        );
    }

    #[test]
    fn test_lanes_stay_32_bit_and_odd() {
        let mut rng = Pcg32x4::new(u64::MAX, 1 << 40, 0xDEAD_BEEF, 3);
        for _ in 0..1000 {
            rng.next_block();
            assert!(rng.state().iter().all(|&w| w <= LOW_32));
        }
        assert!(rng.increment().iter().all(|&w| w <= LOW_32 && w & 1 == 1));
    }

    #[test]
    fn test_next_lanes_unpacks_block_order() {
        let mut a = Pcg32x4::new(5, 6, 7, 8);
        let mut b = a.clone();
        let block = a.next_block();
        let lanes = b.next_lanes();
        for i in 0..LANES {
            assert_eq!(lanes[2 * i] as u64, block[i] & LOW_32);
            assert_eq!(lanes[2 * i + 1] as u64, block[i] >> 32);
        }
    }

    #[test]
    fn test_entropy_seeding_masks_and_forces_odd() {
        let mut source = ScriptedEntropy {
            words: vec![
                Some(0xAAAA_0000_1111_1111),
                Some(2),
                Some(3),
                Some(4),
                Some(0xBBBB_0000_2222_2222),
                Some(6),
                Some(7),
                Some(8),
            ],
        };
        let rng = Pcg32x4::from_entropy_source(&mut source);
        assert_eq!(rng.state(), [0x1111_1111, 2, 3, 4]);
        assert_eq!(rng.increment(), [0x2222_2223, 7, 7, 9]);
    }

    #[test]
    fn test_any_failed_draw_yields_sentinel() {
        for fail_at in 0..8 {
            let mut words: Vec<Option<u64>> = (1..=8).map(Some).collect();
            words[fail_at] = None;
            let rng = Pcg32x4::from_entropy_source(&mut ScriptedEntropy { words });
            assert!(rng.is_failed(), "draw {} failing should poison the state", fail_at);
        }
    }

    #[test]
    fn test_zero_seed_uses_entropy_or_fails_cleanly() {
        match Pcg32x4::try_new(1, 2, 0, 4) {
            Ok(rng) => assert!(rng.increment().iter().all(|&w| w & 1 == 1)),
            Err(e) => assert_eq!(
                e,
                RngError::EntropyUnavailable {
                    attempts: RETRY_LIMIT
                }
            ),
        }
    }

    #[test]
    fn test_serde_keeps_sequence() {
        let mut rng = Pcg32x4::new(9, 8, 7, 6);
        rng.next_block();

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Pcg32x4 = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(restored.next_block(), rng.next_block());
        }
    }

    #[test]
    fn test_deserialize_rejects_wide_lanes_and_even_increments() {
        let wide = r#"{"state":[18446744073709551615,0,0,0],"increment":[1,1,1,1]}"#;
        let err = serde_json::from_str::<Pcg32x4>(wide).unwrap_err();
        assert!(err.to_string().contains("fit in 32 bits"), "{}", err);

        let even = r#"{"state":[1,2,3,4],"increment":[1,1,2,1]}"#;
        let err = serde_json::from_str::<Pcg32x4>(even).unwrap_err();
        assert!(err.to_string().contains("increment must be odd"), "{}", err);
    }

    #[test]
    #[should_panic(expected = "lane words must fit in 32 bits")]
    fn test_from_parts_rejects_wide_lanes() {
        Pcg32x4::from_parts([1 << 32, 0, 0, 0], [1; LANES]);
    }
}
