//! Infrastructure layer - I/O and external dependencies
//!
//! This module handles byte streams and reference files.

pub mod stream_io;
