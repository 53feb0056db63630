//! Bit-addressed views over caller-owned `u64` buffers
//!
//! Bit `i` lives in word `i / 64` at position `i % 64` (least significant
//! bit first). Views never allocate; the caller sizes the buffer and passes
//! the number of bits that are meaningful.

/// Bits per backing word.
pub const WORD_BITS: u64 = u64::BITS as u64;

/// Number of words needed to hold `bits` bits.
#[inline]
pub fn words_for(bits: u64) -> usize {
    bits.div_ceil(WORD_BITS) as usize
}

/// Read-only bit view
#[derive(Debug, Clone, Copy)]
pub struct BitSlice<'a> {
    words: &'a [u64],
    len: u64,
}

impl<'a> BitSlice<'a> {
    /// View the first `len` bits of `words`
    ///
    /// # Panics
    /// Panics if `words` holds fewer than `len` bits
    pub fn new(words: &'a [u64], len: u64) -> Self {
        assert!(
            words.len() >= words_for(len),
            "buffer of {} words cannot hold {} bits",
            words.len(),
            len
        );
        Self { words, len }
    }

    /// Number of addressable bits
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if bit `index` is set
    #[inline]
    pub fn test(&self, index: u64) -> bool {
        debug_assert!(index < self.len, "bit {} out of range {}", index, self.len);
        (self.words[(index / WORD_BITS) as usize] >> (index % WORD_BITS)) & 1 == 1
    }

    /// The bits at `index..` selected by `mask`, shifted down to bit 0
    ///
    /// `mask` must not reach past the end of the word holding `index`.
    #[inline]
    pub fn mask_at(&self, index: u64, mask: u64) -> u64 {
        debug_assert!(index < self.len, "bit {} out of range {}", index, self.len);
        (self.words[(index / WORD_BITS) as usize] >> (index % WORD_BITS)) & mask
    }

    /// Population count over the addressable bits
    pub fn count_ones(&self) -> u64 {
        let full = (self.len / WORD_BITS) as usize;
        let mut total: u64 = self.words[..full]
            .iter()
            .map(|w| u64::from(w.count_ones()))
            .sum();

        let tail = self.len % WORD_BITS;
        if tail != 0 {
            total += u64::from((self.words[full] & ((1u64 << tail) - 1)).count_ones());
        }
        total
    }
}

/// Writable bit view
#[derive(Debug)]
pub struct BitSliceMut<'a> {
    words: &'a mut [u64],
    len: u64,
}

impl<'a> BitSliceMut<'a> {
    /// View the first `len` bits of `words` for writing
    ///
    /// # Panics
    /// Panics if `words` holds fewer than `len` bits
    pub fn new(words: &'a mut [u64], len: u64) -> Self {
        assert!(
            words.len() >= words_for(len),
            "buffer of {} words cannot hold {} bits",
            words.len(),
            len
        );
        Self { words, len }
    }

    /// Number of addressable bits
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Zero every word that holds an addressable bit
    pub fn clear(&mut self) {
        let words = words_for(self.len);
        self.words[..words].fill(0);
    }

    /// Set bit `index`
    #[inline]
    pub fn set(&mut self, index: u64) {
        debug_assert!(index < self.len, "bit {} out of range {}", index, self.len);
        self.words[(index / WORD_BITS) as usize] |= 1u64 << (index % WORD_BITS);
    }
}
