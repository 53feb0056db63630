//! Seed mixing
//!
//! SplitMix64 finalizer: a bijection on `u64` with full avalanche, used to
//! turn small or structured user seeds into well-spread generator state.

/// Hash a 64-bit value.
///
/// Pure and deterministic. `mix(0) == 0`, which is why seed `0` never goes
/// through this path.
///
/// # Example
/// ```
/// use statrng_core_rs::rng::mix;
///
/// assert_eq!(mix(42), 0xa759_ea27_d472_7622);
/// assert_eq!(mix(42), mix(42));
/// ```
#[inline]
pub fn mix(value: u64) -> u64 {
    let mut z = value;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
