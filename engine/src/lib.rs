//! Statistical RNG Core - Rust Engine
//!
//! Non-cryptographic pseudorandom generation for statistics and simulation.
//!
//! # Architecture
//!
//! - **rng**: PCG generators (scalar 64-bit, 4-stream 256-bit), seeding, entropy
//! - **bits**: Biased bits, binomial sampling, debiasing, autocorrelation
//!
//! # Critical Invariants
//!
//! 1. Nonzero seeds are fully deterministic
//! 2. A live generator always has an odd increment
//! 3. Vector lanes carry state in their low 32 bits only
//! 4. Failed entropy seeding leaves an all-zero state, never a panic

// Module declarations
pub mod bits;
pub mod rng;

// Re-exports for convenience
pub use bits::{
    biased_block, biased_word, binomial, debias, lag_correlation, BitSlice, BitSliceMut,
    StreamProgress,
};
pub use rng::{EntropySource, HardwareEntropy, Pcg32x4, Pcg64, RngError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn statrng_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::generators::PyPcg64>()?;
    m.add_class::<ffi::generators::PyPcg32x4>()?;
    Ok(())
}
