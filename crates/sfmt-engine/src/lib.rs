//! sfmt-engine - SIMD-oriented Fast Mersenne Twister
//!
//! This crate provides:
//! - The SFMT generator for the precomputed parameter sets (MEXP 607, 19937, 216091)
//! - Seeding from a 32-bit seed or from a key array, with period certification
//! - Single-value and bulk output, bit-exact with the published check output
//! - Little-endian stream I/O and multi-stream generation on rayon

pub mod constants;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use constants::*;
pub use domain::error::SfmtError;
pub use domain::params::{PARAMETER_SETS, ParameterSet, SFMT_607, SFMT_19937, SFMT_216091};
pub use domain::reference_format::{CheckOutput, ReferenceFormatError};
pub use domain::sfmt::Sfmt;
pub use infra::stream_io::StreamError;
