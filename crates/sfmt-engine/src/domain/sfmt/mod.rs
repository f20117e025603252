//! SFMT random number generator
//!
//! Implementation of SFMT (SIMD-oriented Fast Mersenne Twister) for every
//! precomputed parameter set. Output is bit-exact with the published reference
//! output, for both the single-value and the bulk path.
//!
//! ## Layout
//!
//! The state is N 128-bit words kept as a flat array of N32 `u32` lanes; word
//! `k` is lanes `4k..4k+4`. The recursion works on whole words (see [`w128`]),
//! seeding works on lanes (see `init`).

mod init;
mod recursion;
pub mod w128;

use crate::constants::DEFAULT_MEXP;
use crate::domain::error::SfmtError;
use crate::domain::params::{ParameterSet, SFMT_19937};

use tracing::{debug, trace};

// =============================================================================
// SFMT struct
// =============================================================================

/// SFMT random number generator
///
/// Created unseeded; every output method fails with
/// [`SfmtError::UninitializedState`] until `init_gen_rand` or `init_by_array`
/// has been called. Reseeding is allowed at any time and restarts the stream.
#[derive(Clone, Debug)]
pub struct Sfmt {
    /// Selected parameter set
    params: &'static ParameterSet,
    /// Internal state (N 128-bit words as N32 lanes)
    state: Vec<u32>,
    /// Current read index into the state (0..=N32, in 32-bit units)
    idx: usize,
    /// Whether a seed has been applied
    initialized: bool,
}

impl Default for Sfmt {
    fn default() -> Self {
        Self::new(ParameterSet::for_mexp(DEFAULT_MEXP).unwrap_or(&SFMT_19937))
    }
}

impl Sfmt {
    /// Create an unseeded generator for a parameter set
    pub fn new(params: &'static ParameterSet) -> Self {
        debug_assert!(params.is_well_formed(), "malformed parameter set {}", params);
        Self {
            params,
            state: vec![0u32; params.n32()],
            idx: params.n32(),
            initialized: false,
        }
    }

    /// Create an unseeded generator for a Mersenne exponent
    pub fn with_mexp(mexp: u32) -> Result<Self, SfmtError> {
        ParameterSet::for_mexp(mexp).map(Self::new)
    }

    /// Create a generator seeded with `init_gen_rand`
    pub fn from_seed(params: &'static ParameterSet, seed: u32) -> Self {
        let mut sfmt = Self::new(params);
        sfmt.init_gen_rand(seed);
        sfmt
    }

    /// Create a generator seeded with `init_by_array`
    pub fn from_key(params: &'static ParameterSet, key: &[u32]) -> Self {
        let mut sfmt = Self::new(params);
        sfmt.init_by_array(key);
        sfmt
    }

    /// Parameter set of this generator
    pub fn params(&self) -> &'static ParameterSet {
        self.params
    }

    /// Mersenne exponent of this generator
    pub fn mexp(&self) -> u32 {
        self.params.mexp
    }

    /// Identification string of the parameter set
    pub fn get_idstring(&self) -> &'static str {
        self.params.id_string()
    }

    /// Minimum array size (in 32-bit words) accepted by `fill_array32`
    pub fn get_min_array_size32(&self) -> usize {
        self.params.min_array_size32()
    }

    /// Whether the generator has been seeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initialize with a 32-bit seed
    pub fn init_gen_rand(&mut self, seed: u32) {
        init::init_gen_rand(self.params, &mut self.state, seed);
        self.idx = self.params.n32();
        self.initialized = true;
        debug!(mexp = self.params.mexp, seed, "init_gen_rand");
    }

    /// Initialize with a key of arbitrary length
    pub fn init_by_array(&mut self, key: &[u32]) {
        init::init_by_array(self.params, &mut self.state, key);
        self.idx = self.params.n32();
        self.initialized = true;
        debug!(mexp = self.params.mexp, key_len = key.len(), "init_by_array");
    }

    /// Generate a 32-bit random number
    #[inline]
    pub fn gen_rand_u32(&mut self) -> Result<u32, SfmtError> {
        self.ensure_initialized()?;

        if self.idx >= self.state.len() {
            recursion::gen_rand_all(self.params, &mut self.state);
            self.idx = 0;
        }

        let r = self.state[self.idx];
        self.idx += 1;
        Ok(r)
    }

    /// Generate a 64-bit random number from two consecutive 32-bit outputs
    ///
    /// The first output is the low word, so on an even read index this matches
    /// the reference 64-bit output.
    pub fn gen_rand_u64(&mut self) -> Result<u64, SfmtError> {
        let low = self.gen_rand_u32()? as u64;
        let high = self.gen_rand_u32()? as u64;
        Ok(low | (high << 32))
    }

    /// Random number on [0, 1) with 32-bit resolution
    pub fn gen_rand_real2(&mut self) -> Result<f64, SfmtError> {
        Ok(self.gen_rand_u32()? as f64 * (1.0 / 4294967296.0))
    }

    /// Random number on [0, 1) with 53-bit resolution
    pub fn gen_rand_res53(&mut self) -> Result<f64, SfmtError> {
        let a = (self.gen_rand_u32()? >> 5) as f64;
        let b = (self.gen_rand_u32()? >> 6) as f64;
        Ok((a * 67108864.0 + b) * (1.0 / 9007199254740992.0))
    }

    /// Fill `array` with 32-bit random numbers in one pass
    ///
    /// `array.len()` must be a multiple of 4 and at least N32. The call must
    /// start on a block boundary: right after seeding, after another
    /// `fill_array32`, or once every buffered single value has been read.
    /// Subsequent calls of either kind continue the same sequence.
    pub fn fill_array32(&mut self, array: &mut [u32]) -> Result<(), SfmtError> {
        self.ensure_initialized()?;

        let min = self.params.min_array_size32();
        if array.len() % 4 != 0 || array.len() < min {
            return Err(SfmtError::InvalidBufferSize {
                size: array.len(),
                min,
            });
        }

        if self.idx < self.state.len() {
            return Err(SfmtError::BufferNotDrained {
                remaining: self.state.len() - self.idx,
            });
        }

        recursion::gen_rand_array(self.params, &mut self.state, array);
        self.idx = self.state.len();
        trace!(size = array.len(), "fill_array32");
        Ok(())
    }

    /// Skip n random numbers (u32 units)
    ///
    /// This is more efficient than calling `gen_rand_u32()` n times
    /// because it directly updates the index and only regenerates
    /// blocks when necessary.
    pub fn skip(&mut self, n: usize) -> Result<(), SfmtError> {
        self.ensure_initialized()?;

        if n == 0 {
            return Ok(());
        }

        let block = self.state.len();
        let remaining_in_block = block - self.idx;

        if n <= remaining_in_block {
            // Case 1: Skip within current block
            self.idx += n;
        } else {
            // Case 2: Skip across blocks
            let n_after_current = n - remaining_in_block;
            let full_blocks = n_after_current / block;
            let final_idx = n_after_current % block;

            // Skip to end of current block and regenerate
            recursion::gen_rand_all(self.params, &mut self.state);

            // Regenerate additional full blocks
            for _ in 0..full_blocks {
                recursion::gen_rand_all(self.params, &mut self.state);
            }

            self.idx = final_idx;
        }

        Ok(())
    }

    #[inline(always)]
    fn ensure_initialized(&self) -> Result<(), SfmtError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SfmtError::UninitializedState)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{REFERENCE_KEY, REFERENCE_SEED};
    use crate::domain::params::{PARAMETER_SETS, SFMT_607, SFMT_216091};

    fn take(sfmt: &mut Sfmt, count: usize) -> Vec<u32> {
        (0..count).map(|_| sfmt.gen_rand_u32().unwrap()).collect()
    }

    #[test]
    fn test_sfmt_deterministic() {
        let mut sfmt1 = Sfmt::from_seed(&SFMT_19937, 12345);
        let mut sfmt2 = Sfmt::from_seed(&SFMT_19937, 12345);

        for _ in 0..1000 {
            assert_eq!(sfmt1.gen_rand_u32(), sfmt2.gen_rand_u32());
        }
    }

    #[test]
    fn test_sfmt_different_seeds() {
        let mut sfmt1 = Sfmt::from_seed(&SFMT_19937, 12345);
        let mut sfmt2 = Sfmt::from_seed(&SFMT_19937, 54321);

        // Different seeds should produce different sequences
        assert_ne!(take(&mut sfmt1, 4), take(&mut sfmt2, 4));
    }

    #[test]
    fn test_sfmt_first_values_19937() {
        let mut sfmt = Sfmt::from_seed(&SFMT_19937, REFERENCE_SEED);
        assert_eq!(
            take(&mut sfmt, 5),
            [3440181298, 1564997079, 1510669302, 2930277156, 1452439940]
        );

        let mut sfmt = Sfmt::from_key(&SFMT_19937, &REFERENCE_KEY);
        assert_eq!(
            take(&mut sfmt, 5),
            [2920711183, 3885745737, 3501893680, 856470934, 1421864068]
        );
    }

    #[test]
    fn test_sfmt_first_values_other_sets() {
        let mut sfmt = Sfmt::from_seed(&SFMT_607, REFERENCE_SEED);
        assert_eq!(take(&mut sfmt, 3), [1196421539, 2865311212, 3866479472]);

        let mut sfmt = Sfmt::from_seed(&SFMT_216091, REFERENCE_SEED);
        assert_eq!(take(&mut sfmt, 3), [1905350899, 752275649, 2172726721]);
    }

    #[test]
    fn test_uninitialized_state() {
        let mut sfmt = Sfmt::new(&SFMT_19937);
        assert!(!sfmt.is_initialized());
        assert_eq!(sfmt.gen_rand_u32(), Err(SfmtError::UninitializedState));
        assert_eq!(sfmt.gen_rand_u64(), Err(SfmtError::UninitializedState));
        assert_eq!(sfmt.skip(1), Err(SfmtError::UninitializedState));

        let mut buf = vec![0u32; 624];
        assert_eq!(sfmt.fill_array32(&mut buf), Err(SfmtError::UninitializedState));
    }

    #[test]
    fn test_with_mexp() {
        let sfmt = Sfmt::with_mexp(216091).unwrap();
        assert_eq!(sfmt.get_min_array_size32(), 6756);
        assert_eq!(
            Sfmt::with_mexp(1279).unwrap_err(),
            SfmtError::InvalidParameterSet(1279)
        );
    }

    #[test]
    fn test_default_is_unseeded_19937() {
        let sfmt = Sfmt::default();
        assert_eq!(sfmt.mexp(), 19937);
        assert_eq!(sfmt.get_idstring(), SFMT_19937.id);
        assert!(!sfmt.is_initialized());
    }

    #[test]
    fn test_fill_array32_invalid_sizes() {
        for params in PARAMETER_SETS {
            let mut sfmt = Sfmt::from_seed(params, 1);
            let min = params.min_array_size32();

            for size in [0, 4, min - 4, min + 1, min + 2, min + 3] {
                let mut buf = vec![0u32; size];
                assert_eq!(
                    sfmt.fill_array32(&mut buf),
                    Err(SfmtError::InvalidBufferSize { size, min }),
                    "{} size {}",
                    params,
                    size
                );
            }
        }
    }

    #[test]
    fn test_fill_array32_requires_drained_block() {
        let mut sfmt = Sfmt::from_seed(&SFMT_607, 5);
        sfmt.gen_rand_u32().unwrap();

        let mut buf = vec![0u32; 20];
        assert_eq!(
            sfmt.fill_array32(&mut buf),
            Err(SfmtError::BufferNotDrained { remaining: 19 })
        );

        // draining the block makes bulk generation legal again
        take(&mut sfmt, 19);
        assert!(sfmt.fill_array32(&mut buf).is_ok());
    }

    #[test]
    fn test_bulk_matches_single() {
        for params in [&SFMT_607, &SFMT_19937] {
            let min = params.min_array_size32();
            for size in [min, min + 4, 2 * min - 4, 2 * min, 3 * min + 8, 10_000] {
                let mut bulk = Sfmt::from_seed(params, 4357);
                let mut buf = vec![0u32; size];
                bulk.fill_array32(&mut buf).unwrap();

                let mut single = Sfmt::from_seed(params, 4357);
                assert_eq!(buf, take(&mut single, size), "{} size {}", params, size);
            }
        }
    }

    #[test]
    fn test_bulk_then_single_continues_stream() {
        let params = &SFMT_19937;
        let mut sfmt = Sfmt::from_key(params, &REFERENCE_KEY);
        let mut first = vec![0u32; 10_000];
        let mut second = vec![0u32; 10_000];
        sfmt.fill_array32(&mut first).unwrap();
        sfmt.fill_array32(&mut second).unwrap();
        let tail = take(&mut sfmt, 700);

        let mut single = Sfmt::from_key(params, &REFERENCE_KEY);
        assert_eq!(take(&mut single, 10_000), first);
        assert_eq!(take(&mut single, 10_000), second);
        assert_eq!(take(&mut single, 700), tail);
    }

    #[test]
    fn test_reseed_resets_stream() {
        let mut sfmt = Sfmt::from_seed(&SFMT_19937, 777);
        let first = take(&mut sfmt, 1500);

        sfmt.init_gen_rand(777);
        assert_eq!(take(&mut sfmt, 1500), first);

        // reseeding mid-block also makes bulk generation legal
        sfmt.init_gen_rand(777);
        let mut buf = vec![0u32; 624];
        sfmt.fill_array32(&mut buf).unwrap();
        assert_eq!(buf[..], first[..624]);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = Sfmt::from_seed(&SFMT_19937, 1);
        let mut b = Sfmt::from_seed(&SFMT_19937, 1);

        // interleaving draws from one instance does not disturb the other
        let mut from_a = Vec::new();
        for _ in 0..700 {
            from_a.push(a.gen_rand_u32().unwrap());
            let _ = Sfmt::from_seed(&SFMT_19937, 2).gen_rand_u32();
        }
        assert_eq!(from_a, take(&mut b, 700));
    }

    #[test]
    fn test_sfmt_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sfmt>();
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a = Sfmt::from_seed(&SFMT_607, 3);
        take(&mut a, 7);
        let mut b = a.clone();
        assert_eq!(take(&mut a, 100), take(&mut b, 100));
    }

    #[test]
    fn test_gen_rand_u64_reference() {
        let mut sfmt = Sfmt::from_seed(&SFMT_19937, 4321);
        assert_eq!(sfmt.gen_rand_u64().unwrap(), 16924766246869039260);
    }

    #[test]
    fn test_gen_rand_u64_composes_u32() {
        let mut a = Sfmt::from_seed(&SFMT_19937, 9);
        let mut b = Sfmt::from_seed(&SFMT_19937, 9);
        for _ in 0..400 {
            let lo = b.gen_rand_u32().unwrap() as u64;
            let hi = b.gen_rand_u32().unwrap() as u64;
            assert_eq!(a.gen_rand_u64().unwrap(), lo | (hi << 32));
        }
    }

    #[test]
    fn test_real_values_reference_seed() {
        // first outputs: 3440181298, 1564997079
        let mut sfmt = Sfmt::from_seed(&SFMT_19937, REFERENCE_SEED);
        assert_eq!(sfmt.gen_rand_real2().unwrap(), 0.8009796258993447);

        let mut sfmt = Sfmt::from_seed(&SFMT_19937, REFERENCE_SEED);
        assert_eq!(sfmt.gen_rand_res53().unwrap(), 0.8009796244232302);
        assert_eq!(sfmt.gen_rand_u32().unwrap(), 1510669302);
    }

    #[test]
    fn test_real_ranges() {
        let mut sfmt = Sfmt::from_seed(&SFMT_19937, 2024);
        for _ in 0..2000 {
            let x = sfmt.gen_rand_real2().unwrap();
            assert!((0.0..1.0).contains(&x));
            let y = sfmt.gen_rand_res53().unwrap();
            assert!((0.0..1.0).contains(&y));
        }
    }

    // =========================================================================
    // Skip tests
    // =========================================================================

    #[test]
    fn test_skip_zero() {
        let mut sfmt_skip = Sfmt::from_seed(&SFMT_19937, 0x12345678);
        sfmt_skip.skip(0).unwrap();

        let mut sfmt_seq = Sfmt::from_seed(&SFMT_19937, 0x12345678);

        // Should match first value
        assert_eq!(sfmt_skip.gen_rand_u32(), sfmt_seq.gen_rand_u32());
    }

    #[test]
    fn test_skip_matches_sequential() {
        for skip_count in [1, 100, 623, 624, 625, 1000, 1248, 1249, 5000] {
            let mut sfmt_skip = Sfmt::from_seed(&SFMT_19937, 0x12345678);
            sfmt_skip.skip(skip_count).unwrap();

            let mut sfmt_seq = Sfmt::from_seed(&SFMT_19937, 0x12345678);
            take(&mut sfmt_seq, skip_count);

            // Verify next 100 values match
            for i in 0..100 {
                assert_eq!(
                    sfmt_skip.gen_rand_u32(),
                    sfmt_seq.gen_rand_u32(),
                    "Mismatch at iteration {} after skipping {}",
                    i,
                    skip_count
                );
            }
        }
    }

    #[test]
    fn test_skip_after_partial_read() {
        let mut sfmt_skip = Sfmt::from_seed(&SFMT_607, 11);
        let mut sfmt_seq = Sfmt::from_seed(&SFMT_607, 11);
        take(&mut sfmt_skip, 13);
        take(&mut sfmt_seq, 13);

        sfmt_skip.skip(47).unwrap();
        take(&mut sfmt_seq, 47);

        assert_eq!(take(&mut sfmt_skip, 50), take(&mut sfmt_seq, 50));
    }
}
