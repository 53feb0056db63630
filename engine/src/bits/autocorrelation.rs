//! Cyclic lag-k autocorrelation of a bit stream
//!
//! Knuth's serial correlation coefficient, simplified for 0/1 data: with
//! `x2` the number of set bits and `x1` the number of positions where bit `i`
//! and bit `(i + k) mod n` are both set,
//!
//! ```text
//! r = (n * x1 - x2^2) / (n * x2 - x2^2)
//! ```

use super::stream::BitSlice;

/// Lag-`k` cyclic autocorrelation of the first `n_bits` bits of `src`
///
/// # Returns
///
/// `Some(r)` with `r` in `[-1.0, 1.0]`, or `None` for a constant stream
/// (all zeros or all ones), which has no variance.
///
/// # Panics
/// Panics if `n_bits` is zero, `k >= n_bits`, or `src` is shorter than
/// `n_bits`. Also panics if the coefficient lands outside `[-1.0, 1.0]`.
///
/// # Example
/// ```
/// use statrng_core_rs::bits::lag_correlation;
///
/// let alternating = [0xAAAA_AAAA_AAAA_AAAAu64; 4];
/// assert_eq!(lag_correlation(&alternating, 256, 1), Some(-1.0));
/// assert_eq!(lag_correlation(&alternating, 256, 2), Some(1.0));
/// assert_eq!(lag_correlation(&[0u64; 4], 256, 1), None);
/// ```
pub fn lag_correlation(src: &[u64], n_bits: u64, k: u64) -> Option<f64> {
    assert!(n_bits != 0, "no data");
    assert!(k < n_bits, "lag {} exceeds length of data {}", k, n_bits);

    let bits = BitSlice::new(src, n_bits);

    let mut x1 = 0u64;
    let mut x2 = 0u64;
    let mut lagged = k;
    for i in 0..n_bits {
        if bits.test(i) {
            x2 += 1;
            if bits.test(lagged) {
                x1 += 1;
            }
        }
        lagged += 1;
        if lagged == n_bits {
            lagged = 0;
        }
    }

    if x2 == 0 || x2 == n_bits {
        return None;
    }

    let n = n_bits as f64;
    let (x1, x2) = (x1 as f64, x2 as f64);
    let r = (n * x1 - x2 * x2) / (n * x2 - x2 * x2);

    assert!(
        (-1.0..=1.0).contains(&r),
        "lag-{} correlation {} outside [-1, 1]",
        k,
        r
    );
    Some(r)
}
