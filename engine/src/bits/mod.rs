//! Bit-stream statistics
//!
//! Samplers that turn generator output into biased bits and binomial counts,
//! and analyzers that work on caller-owned bit buffers:
//! - [`biased_word`] / [`biased_block`]: bits with probability `n / 2^m`
//! - [`binomial`]: success count of `k` trials
//! - [`debias`]: Von Neumann extractor
//! - [`lag_correlation`]: cyclic lag-k autocorrelation
//!
//! Buffers are `u64` words addressed least significant bit first.

mod autocorrelation;
mod bias;
mod binomial;
mod debias;
mod stream;

pub use autocorrelation::lag_correlation;
pub use bias::{biased_block, biased_word};
pub use binomial::binomial;
pub use debias::{debias, StreamProgress};
pub use stream::{words_for, BitSlice, BitSliceMut, WORD_BITS};
