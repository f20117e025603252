//! State advance and bulk generation

use super::ParameterSet;
use super::w128::{W128, do_recursion};

/// Regenerate the whole state in place (one block of N32 values)
pub(crate) fn gen_rand_all(p: &ParameterSet, state: &mut [u32]) {
    let n = p.n();
    let pos1 = p.pos1;

    let mut r1 = W128::load(state, n - 2);
    let mut r2 = W128::load(state, n - 1);

    for i in 0..(n - pos1) {
        let r = do_recursion(p, W128::load(state, i), W128::load(state, i + pos1), r1, r2);
        r.store(state, i);
        r1 = r2;
        r2 = r;
    }

    for i in (n - pos1)..n {
        let r = do_recursion(p, W128::load(state, i), W128::load(state, i + pos1 - n), r1, r2);
        r.store(state, i);
        r1 = r2;
        r2 = r;
    }
}

/// Generate `array.len() / 4` words into `array`, using it as an extension of the state
///
/// The caller guarantees `array.len()` is a multiple of 4 and at least N32.
/// On return the state holds the last N words written to `array`, so the next
/// `gen_rand_all` continues the same sequence.
pub(crate) fn gen_rand_array(p: &ParameterSet, state: &mut [u32], array: &mut [u32]) {
    let n = p.n();
    let pos1 = p.pos1;
    let size = array.len() / 4;
    debug_assert!(size >= n);

    let mut r1 = W128::load(state, n - 2);
    let mut r2 = W128::load(state, n - 1);

    let mut step = |a: W128, b: W128, array: &mut [u32], i: usize| {
        let r = do_recursion(p, a, b, r1, r2);
        r.store(array, i);
        r1 = r2;
        r2 = r;
        r
    };

    for i in 0..(n - pos1) {
        step(W128::load(state, i), W128::load(state, i + pos1), array, i);
    }

    for i in (n - pos1)..n {
        let b = W128::load(array, i + pos1 - n);
        step(W128::load(state, i), b, array, i);
    }

    // main loop: both operands come from the array
    let mut i = n;
    while i + n < size {
        let (a, b) = (W128::load(array, i - n), W128::load(array, i + pos1 - n));
        step(a, b, array, i);
        i += 1;
    }

    // words already in the array that belong to the final state window
    let mut j = 0;
    while j + size < 2 * n {
        W128::load(array, j + size - n).store(state, j);
        j += 1;
    }

    while i < size {
        let (a, b) = (W128::load(array, i - n), W128::load(array, i + pos1 - n));
        step(a, b, array, i).store(state, j);
        i += 1;
        j += 1;
    }
}
