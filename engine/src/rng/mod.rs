//! Deterministic random number generation
//!
//! Two PCG generators share one seeding scheme:
//! - [`Pcg64`]: scalar, 64 bits per call
//! - [`Pcg32x4`]: four PCG32 streams on 256-bit vectors, 256 bits per call
//!
//! Nonzero seeds are mixed with [`mix`] and give reproducible streams.
//! Seed `0` draws state from an [`EntropySource`] (hardware `RDRAND` by
//! default); failure leaves an all-zero sentinel state.

mod entropy;
mod lanes;
mod mix;
mod pcg32x4;
mod pcg64;

use thiserror::Error;

pub use entropy::{try_hardware_random, EntropySource, HardwareEntropy, RETRY_LIMIT};
pub use lanes::{Lanes4, LANES, LOW_32};
pub use mix::mix;
pub use pcg32x4::Pcg32x4;
pub use pcg64::Pcg64;

/// Errors that can occur while creating a generator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RngError {
    #[error("Hardware entropy unavailable after {attempts} attempts per draw")]
    EntropyUnavailable { attempts: u32 },

    #[error("Invalid generator state: {0}")]
    InvalidState(String),
}
