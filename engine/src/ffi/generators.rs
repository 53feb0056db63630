//! PyO3 wrappers for the generators
//!
//! # Example (from Python)
//!
//! ```python
//! from statrng_core_rs import Pcg64, Pcg32x4
//!
//! rng = Pcg64(42)
//! roll = rng.uniform(1, 6)
//! heads = rng.binomial(1000, 1, 1)
//!
//! vec = Pcg32x4(1, 2, 3, 4)
//! eight_words = vec.next()
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::bits::{biased_word, binomial};
use crate::rng::{Pcg32x4 as RustPcg32x4, Pcg64 as RustPcg64};

/// Reject `(n, m)` pairs the biased samplers would panic on.
fn check_probability(n: u64, m: u32) -> PyResult<()> {
    if n == 0 {
        return Err(PyValueError::new_err("probability numerator must be nonzero"));
    }
    if !(1..=64).contains(&m) {
        return Err(PyValueError::new_err(format!(
            "base 2 exponent must be in 1..=64, got {}",
            m
        )));
    }
    if m < 64 && n >= (1u64 << m) {
        return Err(PyValueError::new_err(format!(
            "numerator {} must be below 2^{}",
            n, m
        )));
    }
    Ok(())
}

/// Python wrapper for the scalar generator
#[pyclass(name = "Pcg64")]
pub struct PyPcg64 {
    inner: RustPcg64,
}

#[pymethods]
impl PyPcg64 {
    /// Create a generator; seed 0 seeds from hardware entropy
    ///
    /// Raises RuntimeError if hardware entropy is unavailable.
    #[new]
    fn new(seed: u64) -> PyResult<Self> {
        let inner = RustPcg64::try_new(seed)
            .map_err(|e| PyRuntimeError::new_err(format!("Failed to seed generator: {}", e)))?;
        Ok(Self { inner })
    }

    /// Next 64-bit output
    fn next(&mut self) -> u64 {
        self.inner.next()
    }

    /// Uniform integer in [min, max]
    fn uniform(&mut self, min: u64, max: u64) -> PyResult<u64> {
        if min >= max {
            return Err(PyValueError::new_err("min must be less than max"));
        }
        Ok(self.inner.uniform(min, max))
    }

    /// Uniform float in [0.0, 1.0)
    fn next_f64(&mut self) -> f64 {
        self.inner.next_f64()
    }

    /// 64 bits each set with probability n / 2^m
    fn biased_word(&mut self, n: u64, m: u32) -> PyResult<u64> {
        check_probability(n, m)?;
        Ok(biased_word(&mut self.inner, n, m))
    }

    /// Successes in k trials with probability n / 2^m
    fn binomial(&mut self, k: u64, n: u64, m: u32) -> PyResult<u64> {
        if k == 0 {
            return Err(PyValueError::new_err("need at least one trial"));
        }
        check_probability(n, m)?;
        Ok(binomial(&mut self.inner, k, n, m))
    }

    /// (state, increment) pair
    fn state(&self) -> (u64, u64) {
        (self.inner.state(), self.inner.increment())
    }
}

/// Python wrapper for the four-stream vector generator
#[pyclass(name = "Pcg32x4")]
pub struct PyPcg32x4 {
    inner: RustPcg32x4,
}

#[pymethods]
impl PyPcg32x4 {
    /// Create a generator; any zero seed seeds all lanes from hardware entropy
    #[new]
    fn new(seed_1: u64, seed_2: u64, seed_3: u64, seed_4: u64) -> PyResult<Self> {
        let inner = RustPcg32x4::try_new(seed_1, seed_2, seed_3, seed_4)
            .map_err(|e| PyRuntimeError::new_err(format!("Failed to seed generator: {}", e)))?;
        Ok(Self { inner })
    }

    /// Eight 32-bit outputs, two consecutive per stream
    fn next(&mut self) -> Vec<u32> {
        self.inner.next_lanes().to_vec()
    }
}
