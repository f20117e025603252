//! 128-bit word of the SFMT state
//!
//! A word is four 32-bit lanes; lane 0 is the least significant one when the
//! word is read as a single little-endian 128-bit integer. The state and caller
//! buffers are stored as flat `u32` slices, and words are loaded from and
//! stored to them by word index.

use crate::domain::params::ParameterSet;

/// 128-bit word as four 32-bit lanes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct W128(pub [u32; 4]);

impl W128 {
    /// Load word `k` (lanes `4k..4k+4`) from a flat lane slice
    #[inline(always)]
    pub fn load(lanes: &[u32], k: usize) -> Self {
        let base = k * 4;
        Self([lanes[base], lanes[base + 1], lanes[base + 2], lanes[base + 3]])
    }

    /// Store this word as word `k` of a flat lane slice
    #[inline(always)]
    pub fn store(self, lanes: &mut [u32], k: usize) {
        lanes[k * 4..k * 4 + 4].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn to_u128(self) -> u128 {
        let [l0, l1, l2, l3] = self.0;
        (l0 as u128) | ((l1 as u128) << 32) | ((l2 as u128) << 64) | ((l3 as u128) << 96)
    }

    #[inline(always)]
    fn from_u128(v: u128) -> Self {
        Self([v as u32, (v >> 32) as u32, (v >> 64) as u32, (v >> 96) as u32])
    }

    /// 128-bit left shift by `bytes` bytes, carrying across lanes
    #[inline(always)]
    pub fn lshift128(self, bytes: u32) -> Self {
        Self::from_u128(self.to_u128() << (bytes * 8))
    }

    /// 128-bit right shift by `bytes` bytes, carrying across lanes
    #[inline(always)]
    pub fn rshift128(self, bytes: u32) -> Self {
        Self::from_u128(self.to_u128() >> (bytes * 8))
    }
}

/// SFMT recursion
///
/// Computes: a ^ (a <<< SL2) ^ ((b >> SR1) & MSK) ^ (c >>> SR2) ^ (d << SL1)
/// where <<< and >>> denote 128-bit byte shifts and the others are per-lane.
#[inline(always)]
pub fn do_recursion(p: &ParameterSet, a: W128, b: W128, c: W128, d: W128) -> W128 {
    let x = a.lshift128(p.sl2);
    let y = c.rshift128(p.sr2);

    W128(std::array::from_fn(|i| {
        a.0[i] ^ x.0[i] ^ ((b.0[i] >> p.sr1) & p.msk[i]) ^ y.0[i] ^ (d.0[i] << p.sl1)
    }))
}
