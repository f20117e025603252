//! State initialization
//!
//! Both seeding procedures work on the flat 32-bit lane view of the state and
//! finish with period certification.

use super::ParameterSet;
use crate::constants::{
    ARRAY_FILL, FUNC_SHIFT, FUNC1_MULTIPLIER, FUNC2_MULTIPLIER, INIT_MULTIPLIER, INIT_SHIFT,
};

#[inline]
fn func1(x: u32) -> u32 {
    (x ^ (x >> FUNC_SHIFT)).wrapping_mul(FUNC1_MULTIPLIER)
}

#[inline]
fn func2(x: u32) -> u32 {
    (x ^ (x >> FUNC_SHIFT)).wrapping_mul(FUNC2_MULTIPLIER)
}

/// Lag used by `init_by_array` for a state of `size` lanes
fn array_lag(size: usize) -> usize {
    if size >= 623 {
        11
    } else if size >= 68 {
        7
    } else if size >= 39 {
        5
    } else {
        3
    }
}

/// Fill the state from a single 32-bit seed
pub(crate) fn init_gen_rand(p: &ParameterSet, state: &mut [u32], seed: u32) {
    debug_assert_eq!(state.len(), p.n32());

    // LCG (Linear Congruential Generator) initialization
    state[0] = seed;
    for i in 1..state.len() {
        let prev = state[i - 1];
        state[i] = INIT_MULTIPLIER
            .wrapping_mul(prev ^ (prev >> INIT_SHIFT))
            .wrapping_add(i as u32);
    }

    period_certification(p, state);
}

/// Fill the state from a key of arbitrary length
pub(crate) fn init_by_array(p: &ParameterSet, state: &mut [u32], key: &[u32]) {
    let size = p.n32();
    debug_assert_eq!(state.len(), size);

    let lag = array_lag(size);
    let mid = (size - lag) / 2;
    // the key length enters the mixing as a wrapping 32-bit value
    let key_len = key.len() as u32;

    state.fill(ARRAY_FILL);

    let mut count = (key.len() + 1).max(size);

    let mut r = func1(state[0] ^ state[mid] ^ state[size - 1]);
    state[mid] = state[mid].wrapping_add(r);
    r = r.wrapping_add(key_len);
    state[mid + lag] = state[mid + lag].wrapping_add(r);
    state[0] = r;

    count -= 1;
    let mut i = 1;
    for j in 0..count {
        r = func1(state[i] ^ state[(i + mid) % size] ^ state[(i + size - 1) % size]);
        state[(i + mid) % size] = state[(i + mid) % size].wrapping_add(r);
        r = match key.get(j) {
            Some(&k) => r.wrapping_add(k).wrapping_add(i as u32),
            None => r.wrapping_add(i as u32),
        };
        state[(i + mid + lag) % size] = state[(i + mid + lag) % size].wrapping_add(r);
        state[i] = r;
        i = (i + 1) % size;
    }

    for _ in 0..size {
        r = func2(
            state[i]
                .wrapping_add(state[(i + mid) % size])
                .wrapping_add(state[(i + size - 1) % size]),
        );
        state[(i + mid) % size] ^= r;
        r = r.wrapping_sub(i as u32);
        state[(i + mid + lag) % size] ^= r;
        state[i] = r;
        i = (i + 1) % size;
    }

    period_certification(p, state);
}

/// Certify the period of 2^MEXP - 1
///
/// Returns `true` when a bit had to be flipped.
pub(crate) fn period_certification(p: &ParameterSet, state: &mut [u32]) -> bool {
    let mut inner = 0u32;
    for i in 0..4 {
        inner ^= state[i] & p.parity[i];
    }

    // Calculate parity
    inner ^= inner >> 16;
    inner ^= inner >> 8;
    inner ^= inner >> 4;
    inner ^= inner >> 2;
    inner ^= inner >> 1;
    inner &= 1;

    if inner == 1 {
        return false;
    }

    // flip the lowest parity bit of the first non-zero parity lane
    for i in 0..4 {
        if p.parity[i] != 0 {
            state[i] ^= 1 << p.parity[i].trailing_zeros();
            tracing::trace!(
                lane = i,
                bit = p.parity[i].trailing_zeros(),
                "period certification flipped a bit"
            );
            return true;
        }
    }

    false
}
