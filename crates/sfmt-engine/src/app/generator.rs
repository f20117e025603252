//! Stream generation workflow
//!
//! This module provides functions for generating one output stream per seed,
//! sequentially or spread over rayon's thread pool. Every stream comes from
//! its own generator, so the parallel variants return exactly what the
//! sequential one does.

use crate::domain::error::SfmtError;
use crate::domain::params::ParameterSet;
use crate::domain::sfmt::Sfmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicU32, Ordering};

/// Progress is reported every this many finished streams
const PROGRESS_INTERVAL: u32 = 64;

/// Generate the first `count` values for one seed
///
/// Uses the bulk path for the largest prefix it accepts and single values for
/// the rest.
pub fn generate_stream(
    params: &'static ParameterSet,
    seed: u32,
    count: usize,
) -> Result<Vec<u32>, SfmtError> {
    let mut sfmt = Sfmt::from_seed(params, seed);
    let mut values = vec![0u32; count];

    let bulk = count - count % 4;
    let split = if bulk >= params.min_array_size32() {
        sfmt.fill_array32(&mut values[..bulk])?;
        bulk
    } else {
        0
    };

    for v in &mut values[split..] {
        *v = sfmt.gen_rand_u32()?;
    }

    Ok(values)
}

/// Generate one stream per seed, in seed order
pub fn generate_streams(
    params: &'static ParameterSet,
    seeds: &[u32],
    count: usize,
) -> Result<Vec<Vec<u32>>, SfmtError> {
    seeds
        .iter()
        .map(|&seed| generate_stream(params, seed, count))
        .collect()
}

/// Generate one stream per seed in parallel
///
/// The result is in seed order and identical to [`generate_streams`].
#[cfg(feature = "parallel")]
pub fn generate_streams_parallel(
    params: &'static ParameterSet,
    seeds: &[u32],
    count: usize,
) -> Result<Vec<Vec<u32>>, SfmtError> {
    tracing::debug!(mexp = params.mexp, streams = seeds.len(), count, "parallel generation");

    seeds
        .par_iter()
        .map(|&seed| generate_stream(params, seed, count))
        .collect()
}

/// Generate one stream per seed in parallel, with progress callback
///
/// `on_progress(done, total)` is called from worker threads as streams
/// finish, and once more with `(total, total)` at the end.
#[cfg(feature = "parallel")]
pub fn generate_streams_parallel_with_progress<F>(
    params: &'static ParameterSet,
    seeds: &[u32],
    count: usize,
    on_progress: F,
) -> Result<Vec<Vec<u32>>, SfmtError>
where
    F: Fn(u32, u32) + Sync, // (current, total)
{
    let total = seeds.len() as u32;
    let progress = AtomicU32::new(0);

    let streams = seeds
        .par_iter()
        .map(|&seed| -> Result<Vec<u32>, SfmtError> {
            let stream = generate_stream(params, seed, count)?;

            let done = progress.fetch_add(1, Ordering::Relaxed);
            if done % PROGRESS_INTERVAL == 0 {
                on_progress(done, total);
            }
            Ok(stream)
        })
        .collect::<Result<Vec<_>, SfmtError>>()?;

    on_progress(total, total);
    Ok(streams)
}

/// Generate one stream per seed (fallback version without rayon)
#[cfg(not(feature = "parallel"))]
pub fn generate_streams_parallel(
    params: &'static ParameterSet,
    seeds: &[u32],
    count: usize,
) -> Result<Vec<Vec<u32>>, SfmtError> {
    generate_streams(params, seeds, count)
}

/// Generate one stream per seed with progress callback (fallback version without rayon)
#[cfg(not(feature = "parallel"))]
pub fn generate_streams_parallel_with_progress<F>(
    params: &'static ParameterSet,
    seeds: &[u32],
    count: usize,
    on_progress: F,
) -> Result<Vec<Vec<u32>>, SfmtError>
where
    F: Fn(u32, u32) + Sync,
{
    let total = seeds.len() as u32;
    let mut streams = Vec::with_capacity(seeds.len());

    for (done, &seed) in seeds.iter().enumerate() {
        if done as u32 % PROGRESS_INTERVAL == 0 {
            on_progress(done as u32, total);
        }
        streams.push(generate_stream(params, seed, count)?);
    }

    on_progress(total, total);
    Ok(streams)
}
