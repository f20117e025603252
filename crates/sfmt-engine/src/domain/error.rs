//! Engine error type

use thiserror::Error;

/// Errors raised by the SFMT engine
///
/// Every variant is a caller error: the engine does no I/O, so nothing here is
/// transient or worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SfmtError {
    /// Output was requested before `init_gen_rand` or `init_by_array`
    #[error("SFMT state is not initialized: call init_gen_rand or init_by_array first")]
    UninitializedState,

    /// Bulk size is not a multiple of 4 or is below the minimum array size
    #[error("invalid array size {size}: must be a multiple of 4 and at least {min}")]
    InvalidBufferSize { size: usize, min: usize },

    /// No precomputed parameter set exists for this Mersenne exponent
    #[error("no SFMT parameter set for MEXP {0}")]
    InvalidParameterSet(u32),

    /// Bulk generation was requested while single values remain in the current block
    #[error("fill_array32 called with {remaining} buffered values unread; reseed or drain the block first")]
    BufferNotDrained { remaining: usize },
}
