//! Domain layer - Pure computational logic
//!
//! This module contains the generator and its data formats without I/O dependencies.

pub mod error;
pub mod params;
pub mod reference_format;
pub mod sfmt;
