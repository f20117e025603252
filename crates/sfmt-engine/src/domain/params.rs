//! SFMT parameter sets
//!
//! Each Mersenne exponent has its own published constant tuple. The constants
//! are data, not free parameters: changing any of them breaks the period
//! guarantee, so only the precomputed sets below can be selected.

use crate::constants::SUPPORTED_MEXPS;
use crate::domain::error::SfmtError;

/// One concrete SFMT instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    /// Mersenne exponent; the period is a multiple of 2^mexp - 1
    pub mexp: u32,
    /// Pick-up position of the recursion (in 128-bit words)
    pub pos1: usize,
    /// Left shift within each 32-bit lane
    pub sl1: u32,
    /// Left shift of the whole 128-bit word, in bytes
    pub sl2: u32,
    /// Right shift within each 32-bit lane
    pub sr1: u32,
    /// Right shift of the whole 128-bit word, in bytes
    pub sr2: u32,
    /// Per-lane masks applied after the `sr1` shift
    pub msk: [u32; 4],
    /// Period certification vector
    pub parity: [u32; 4],
    /// Identification string
    pub id: &'static str,
}

/// SFMT-607
pub const SFMT_607: ParameterSet = ParameterSet {
    mexp: 607,
    pos1: 2,
    sl1: 15,
    sl2: 3,
    sr1: 13,
    sr2: 3,
    msk: [0xfdff37ff, 0xef7f3f7d, 0xff777b7d, 0x7ff7fb2f],
    parity: [0x00000001, 0x00000000, 0x00000000, 0x5986f054],
    id: "SFMT-607:2-15-3-13-3:fdff37ff-ef7f3f7d-ff777b7d-7ff7fb2f",
};

/// SFMT-19937
pub const SFMT_19937: ParameterSet = ParameterSet {
    mexp: 19937,
    pos1: 122,
    sl1: 18,
    sl2: 1,
    sr1: 11,
    sr2: 1,
    msk: [0xdfffffef, 0xddfecb7f, 0xbffaffff, 0xbffffff6],
    parity: [0x00000001, 0x00000000, 0x00000000, 0x13c9e684],
    id: "SFMT-19937:122-18-1-11-1:dfffffef-ddfecb7f-bffaffff-bffffff6",
};

/// SFMT-216091
pub const SFMT_216091: ParameterSet = ParameterSet {
    mexp: 216091,
    pos1: 627,
    sl1: 11,
    sl2: 3,
    sr1: 10,
    sr2: 1,
    msk: [0xbff7bff7, 0xbfffffff, 0xbffffa7f, 0xffddfbfb],
    parity: [0xf8000001, 0x89e80709, 0x3bd2b64b, 0x0c64b1e4],
    id: "SFMT-216091:627-11-3-10-1:bff7bff7-bfffffff-bffffa7f-ffddfbfb",
};

/// All precomputed parameter sets, ordered by MEXP
pub static PARAMETER_SETS: [&ParameterSet; 3] = [&SFMT_607, &SFMT_19937, &SFMT_216091];

impl ParameterSet {
    /// Look up the precomputed parameter set for a Mersenne exponent
    pub fn for_mexp(mexp: u32) -> Result<&'static ParameterSet, SfmtError> {
        PARAMETER_SETS
            .iter()
            .copied()
            .find(|p| p.mexp == mexp)
            .ok_or(SfmtError::InvalidParameterSet(mexp))
    }

    /// State size in 128-bit words
    #[inline]
    pub const fn n(&self) -> usize {
        self.mexp as usize / 128 + 1
    }

    /// State size in 32-bit lanes
    #[inline]
    pub const fn n32(&self) -> usize {
        self.n() * 4
    }

    /// Minimum size (in 32-bit words) accepted by `fill_array32`
    #[inline]
    pub const fn min_array_size32(&self) -> usize {
        self.n32()
    }

    /// Identification string
    pub fn id_string(&self) -> &'static str {
        self.id
    }

    /// Rebuild the identification string from the numeric constants
    pub(crate) fn format_id(&self) -> String {
        format!(
            "SFMT-{}:{}-{}-{}-{}-{}:{:08x}-{:08x}-{:08x}-{:08x}",
            self.mexp,
            self.pos1,
            self.sl1,
            self.sl2,
            self.sr1,
            self.sr2,
            self.msk[0],
            self.msk[1],
            self.msk[2],
            self.msk[3]
        )
    }

    /// Check the structural invariants of the constant tuple
    pub fn is_well_formed(&self) -> bool {
        self.n32() >= 4
            && self.pos1 < self.n()
            && self.sl1 < 32
            && self.sr1 < 32
            && self.sl2 < 16
            && self.sr2 < 16
            && self.msk.iter().all(|&m| m != 0)
            && self.parity.iter().any(|&p| p != 0)
            && SUPPORTED_MEXPS.contains(&self.mexp)
            && self.format_id() == self.id
    }

    /// Human-readable parameter listing
    pub fn dump(&self) -> String {
        let lanes = |name: &str, values: &[u32; 4]| -> String {
            values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{}{} = {:#010x}U\n", name, i + 1, v))
                .collect()
        };

        format!(
            "MEXP = {}\nN = {}\nN32 = {}\nPOS1 = {}\nSL1 = {}\nSL2 = {}\nSR1 = {}\nSR2 = {}\n\
             {}{}IDSTR = {}\nsizeof(state) = {}\n",
            self.mexp,
            self.n(),
            self.n32(),
            self.pos1,
            self.sl1,
            self.sl2,
            self.sr1,
            self.sr2,
            lanes("MSK", &self.msk),
            lanes("PARITY", &self.parity),
            self.id,
            self.n32() * 4
        )
    }
}

impl std::fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id)
    }
}
