//! Four-lane 64-bit vector type
//!
//! `Lanes4` models one 256-bit AVX2 register as four 64-bit lanes, each of
//! which also splits into two 32-bit halves. Operations follow the semantics
//! of the AVX2 instruction they are named after, including the 32-bit
//! sub-lane behaviour of the `*32` shifts and adds, so code written against
//! this type is bit-identical on every backend.
//!
//! Backend selection happens at compile time:
//! - `x86_64` with `target_feature = "avx2"`: `__m256i` and AVX2 intrinsics
//! - everything else: `[u64; 4]`, lane by lane
//!
//! Build with `RUSTFLAGS="-C target-cpu=native"` (or `-C target-feature=+avx2`)
//! to get the hardware backend.

use std::ops::{BitAnd, BitOr, BitXor};

/// Lane count.
pub const LANES: usize = 4;

/// Mask keeping the low 32 bits of a 64-bit lane.
pub const LOW_32: u64 = 0xFFFF_FFFF;

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
mod backend {
    use core::arch::x86_64::*;

    use super::LANES;

    #[derive(Clone, Copy)]
    pub struct Lanes4(pub(super) __m256i);

    impl Lanes4 {
        #[inline(always)]
        pub fn from_array(lanes: [u64; LANES]) -> Self {
            // SAFETY: avx2 is enabled at compile time; unaligned load from a 32-byte array
            Self(unsafe { _mm256_loadu_si256(lanes.as_ptr() as *const __m256i) })
        }

        #[inline(always)]
        pub fn to_array(self) -> [u64; LANES] {
            let mut out = [0u64; LANES];
            // SAFETY: out is exactly 32 bytes
            unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.0) };
            out
        }

        #[inline(always)]
        pub fn splat(value: u64) -> Self {
            Self(unsafe { _mm256_set1_epi64x(value as i64) })
        }

        #[inline(always)]
        pub fn and(self, other: Self) -> Self {
            Self(unsafe { _mm256_and_si256(self.0, other.0) })
        }

        #[inline(always)]
        pub fn or(self, other: Self) -> Self {
            Self(unsafe { _mm256_or_si256(self.0, other.0) })
        }

        #[inline(always)]
        pub fn xor(self, other: Self) -> Self {
            Self(unsafe { _mm256_xor_si256(self.0, other.0) })
        }

        #[inline(always)]
        pub fn add32(self, other: Self) -> Self {
            Self(unsafe { _mm256_add_epi32(self.0, other.0) })
        }

        #[inline(always)]
        pub fn add64(self, other: Self) -> Self {
            Self(unsafe { _mm256_add_epi64(self.0, other.0) })
        }

        #[inline(always)]
        pub fn mul_lo32(self, other: Self) -> Self {
            Self(unsafe { _mm256_mul_epu32(self.0, other.0) })
        }

        #[inline(always)]
        pub fn shr32<const IMM: i32>(self) -> Self {
            Self(unsafe { _mm256_srli_epi32::<IMM>(self.0) })
        }

        #[inline(always)]
        pub fn shr32_var(self, counts: Self) -> Self {
            Self(unsafe { _mm256_srlv_epi32(self.0, counts.0) })
        }

        #[inline(always)]
        pub fn shl64<const IMM: i32>(self) -> Self {
            Self(unsafe { _mm256_slli_epi64::<IMM>(self.0) })
        }
    }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
mod backend {
    use super::{LANES, LOW_32};

    #[derive(Clone, Copy)]
    pub struct Lanes4(pub(super) [u64; LANES]);

    /// Apply `f` to both 32-bit halves of every lane.
    #[inline(always)]
    fn halves(a: u64, b: u64, f: impl Fn(u32, u32) -> u32) -> u64 {
        let lo = f(a as u32, b as u32) as u64;
        let hi = f((a >> 32) as u32, (b >> 32) as u32) as u64;
        (hi << 32) | lo
    }

    impl Lanes4 {
        #[inline(always)]
        fn zip(self, other: Self, f: impl Fn(u64, u64) -> u64) -> Self {
            let (a, b) = (self.0, other.0);
            Self([f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])])
        }

        #[inline(always)]
        fn map(self, f: impl Fn(u64) -> u64) -> Self {
            let a = self.0;
            Self([f(a[0]), f(a[1]), f(a[2]), f(a[3])])
        }

        #[inline(always)]
        pub fn from_array(lanes: [u64; LANES]) -> Self {
            Self(lanes)
        }

        #[inline(always)]
        pub fn to_array(self) -> [u64; LANES] {
            self.0
        }

        #[inline(always)]
        pub fn splat(value: u64) -> Self {
            Self([value; LANES])
        }

        #[inline(always)]
        pub fn and(self, other: Self) -> Self {
            self.zip(other, |a, b| a & b)
        }

        #[inline(always)]
        pub fn or(self, other: Self) -> Self {
            self.zip(other, |a, b| a | b)
        }

        #[inline(always)]
        pub fn xor(self, other: Self) -> Self {
            self.zip(other, |a, b| a ^ b)
        }

        #[inline(always)]
        pub fn add32(self, other: Self) -> Self {
            self.zip(other, |a, b| halves(a, b, u32::wrapping_add))
        }

        #[inline(always)]
        pub fn add64(self, other: Self) -> Self {
            self.zip(other, u64::wrapping_add)
        }

        #[inline(always)]
        pub fn mul_lo32(self, other: Self) -> Self {
            self.zip(other, |a, b| (a & LOW_32) * (b & LOW_32))
        }

        #[inline(always)]
        pub fn shr32<const IMM: i32>(self) -> Self {
            self.map(|a| halves(a, 0, |x, _| x.checked_shr(IMM as u32).unwrap_or(0)))
        }

        #[inline(always)]
        pub fn shr32_var(self, counts: Self) -> Self {
            self.zip(counts, |a, c| halves(a, c, |x, n| x.checked_shr(n).unwrap_or(0)))
        }

        #[inline(always)]
        pub fn shl64<const IMM: i32>(self) -> Self {
            self.map(|a| a.checked_shl(IMM as u32).unwrap_or(0))
        }
    }
}

pub use backend::Lanes4;

impl Lanes4 {
    /// All lanes zero.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(0)
    }

    /// Keep only the low 32 bits of every lane.
    #[inline(always)]
    pub fn low32(self) -> Self {
        self.and(Self::splat(LOW_32))
    }
}

impl BitAnd for Lanes4 {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl BitOr for Lanes4 {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl BitXor for Lanes4 {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl PartialEq for Lanes4 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl Eq for Lanes4 {}

impl std::fmt::Debug for Lanes4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lanes = self.to_array();
        f.debug_list()
            .entries(lanes.iter().map(|lane| format!("{lane:#018x}")))
            .finish()
    }
}
