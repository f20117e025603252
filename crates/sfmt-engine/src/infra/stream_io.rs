//! Stream file I/O operations
//!
//! This module provides functions for writing generator output as a raw
//! little-endian byte stream, reading such streams back, and loading
//! check output files from disk.

use crate::domain::error::SfmtError;
use crate::domain::reference_format::{CheckOutput, ReferenceFormatError, parse_check_output};
use crate::domain::sfmt::Sfmt;
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Stream and reference file errors
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("reference format error: {0}")]
    Format(#[from] ReferenceFormatError),

    #[error(transparent)]
    Sfmt(#[from] SfmtError),
}

/// Write the next `count` 32-bit values of `sfmt` as little-endian bytes
///
/// The writer is not buffered here; pass a `BufWriter` for files or pipes.
pub fn write_u32_stream<W: Write>(
    mut writer: W,
    sfmt: &mut Sfmt,
    count: u64,
) -> Result<(), StreamError> {
    for _ in 0..count {
        writer.write_u32::<LittleEndian>(sfmt.gen_rand_u32()?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a little-endian 32-bit stream until end of input
pub fn read_u32_stream<R: Read>(mut reader: R) -> Result<Vec<u32>, StreamError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.len() % 4 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("stream length {} is not a multiple of 4 bytes", bytes.len()),
        )
        .into());
    }

    let mut values = vec![0u32; bytes.len() / 4];
    LittleEndian::read_u32_into(&bytes, &mut values);
    Ok(values)
}

/// Save the next `count` values of `sfmt` to a file
pub fn save_stream(path: impl AsRef<Path>, sfmt: &mut Sfmt, count: u64) -> Result<(), StreamError> {
    let file = File::create(path)?;
    write_u32_stream(BufWriter::new(file), sfmt, count)
}

/// Load a stream file
pub fn load_stream(path: impl AsRef<Path>) -> Result<Vec<u32>, StreamError> {
    let file = File::open(path)?;
    read_u32_stream(BufReader::new(file))
}

/// Load and parse a check output file
pub fn load_reference(path: impl AsRef<Path>) -> Result<CheckOutput, StreamError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_check_output(&text)?)
}
