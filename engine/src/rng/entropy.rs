//! Hardware entropy for non-deterministic seeding
//!
//! Seed value `0` asks a generator to seed itself from an [`EntropySource`].
//! The production source is the x86 `RDRAND` instruction, retried a fixed
//! number of times per draw. A failed draw is an ordinary outcome, reported
//! as `None`, and every caller must handle it.

/// Attempts per draw before [`HardwareEntropy`] gives up.
///
/// Intel recommends ten retries before treating `RDRAND` as failed.
pub const RETRY_LIMIT: u32 = 10;

/// A source of 64-bit entropy words that may fail.
pub trait EntropySource {
    /// Draw one word, or `None` if the source could not deliver.
    fn try_random(&mut self) -> Option<u64>;
}

/// `RDRAND`-backed entropy source.
///
/// On targets without the instruction every draw fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareEntropy;

impl EntropySource for HardwareEntropy {
    fn try_random(&mut self) -> Option<u64> {
        try_hardware_random()
    }
}

/// Draw one word from the hardware generator, retrying up to [`RETRY_LIMIT`] times.
///
/// # Example
/// ```
/// use statrng_core_rs::rng::try_hardware_random;
///
/// match try_hardware_random() {
///     Some(word) => println!("entropy: {word:#018x}"),
///     None => println!("no hardware entropy"),
/// }
/// ```
pub fn try_hardware_random() -> Option<u64> {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("rdrand") {
            // SAFETY: the rdrand feature was detected at runtime
            return unsafe { rdrand_retry() };
        }
    }

    None
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand_retry() -> Option<u64> {
    use core::arch::x86_64::_rdrand64_step;

    let mut word = 0u64;
    for _ in 0..RETRY_LIMIT {
        if _rdrand64_step(&mut word) == 1 {
            return Some(word);
        }
    }

    None
}
