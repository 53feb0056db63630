//! Von Neumann debiasing
//!
//! Reads the source as non-overlapping bit pairs. `01` emits a `1`, `10`
//! emits a `0`, and `00`/`11` emit nothing. For independent input bits with
//! any fixed bias the two emitting pairs are equally likely, so the output is
//! unbiased. Input bits must be free of autocorrelation for this to hold.

use serde::{Deserialize, Serialize};

use super::stream::{BitSlice, BitSliceMut};

/// Progress of one streaming pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamProgress {
    /// Bits consumed from the source
    pub used: u64,
    /// Bits written to the destination
    pub filled: u64,
}

/// Debias `src` (`n_bits` long) into `dest` (room for `m_bits`)
///
/// The destination words covering `m_bits` are zeroed first. Stops once
/// `m_bits` bits are written or the source runs out. A short fill is a
/// normal outcome; check [`StreamProgress::filled`].
///
/// # Panics
/// Panics if `n_bits` is zero or odd, `m_bits` is zero, or either buffer is
/// too small for its bit count
///
/// # Example
/// ```
/// use statrng_core_rs::bits::debias;
///
/// // pairs: 01, 10, 11, 00 -> emits 1, 0
/// let src = [0b00_11_10_01u64];
/// let mut dest = [0u64; 1];
/// let progress = debias(&src, &mut dest, 8, 64);
/// assert_eq!(progress.used, 8);
/// assert_eq!(progress.filled, 2);
/// assert_eq!(dest[0], 0b01);
/// ```
pub fn debias(src: &[u64], dest: &mut [u64], n_bits: u64, m_bits: u64) -> StreamProgress {
    assert!(n_bits != 0, "nothing to read");
    assert!(m_bits != 0, "nowhere to write");
    assert!(n_bits % 2 == 0, "cannot process odd-length bitstream");

    let src = BitSlice::new(src, n_bits);
    let mut dest = BitSliceMut::new(dest, m_bits);
    dest.clear();

    let mut read_pos = 0u64;
    let mut write_pos = 0u64;

    while read_pos < n_bits && write_pos < m_bits {
        match src.mask_at(read_pos, 0b11) {
            0b01 => {
                dest.set(write_pos);
                write_pos += 1;
            }
            0b10 => write_pos += 1,
            _ => {}
        }
        read_pos += 2;
    }

    StreamProgress {
        used: read_pos,
        filled: write_pos,
    }
}
