//! The four-record PGM header.

use alloc::vec::Vec;
use std::io::{BufRead, Write};

use super::{EncodingMode, Precision};
use crate::error::{FormatError, PgmError};

/// Comment record written by the encoder.
pub const COMMENT: &str = "# Generated by zenpgm";

/// Parsed PGM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub mode: EncodingMode,
    pub width: u32,
    pub height: u32,
    pub precision: Precision,
}

/// Read the magic, comment, dimension and precision records in that
/// order, leaving `reader` at the first byte of pixel data.
///
/// Dimensions are read leniently (a missing or malformed number reads
/// as zero) and then rejected with [`FormatError::InvalidDimensions`]
/// if either is zero.
pub fn parse_header<R: BufRead>(reader: &mut R) -> Result<Header, PgmError> {
    let mut line = Vec::new();

    read_record(reader, &mut line)?;
    let mode = EncodingMode::from_magic(&line).ok_or_else(|| {
        FormatError::UnrecognizedMagic(String::from_utf8_lossy(trim_eol(&line)).into_owned())
    })?;

    // comment, content discarded
    read_record(reader, &mut line)?;

    read_record(reader, &mut line)?;
    let mut fields = line.split(|b| b.is_ascii_whitespace()).filter(|f| !f.is_empty());
    let width = fields.next().map_or(0, parse_leading_u64);
    let height = fields.next().map_or(0, parse_leading_u64);
    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(FormatError::InvalidDimensions {
                width: width.min(u64::from(u32::MAX)) as u32,
                height: height.min(u64::from(u32::MAX)) as u32,
            }
            .into());
        }
    };

    read_record(reader, &mut line)?;
    let raw_precision = parse_leading_u64(&line);
    let precision = u32::try_from(raw_precision)
        .ok()
        .and_then(Precision::new)
        .ok_or(FormatError::InvalidPrecision(raw_precision))?;

    let header = Header {
        mode,
        width,
        height,
        precision,
    };
    log::debug!(
        "pgm header: {} {}x{} precision {}",
        mode.magic(),
        width,
        height,
        precision
    );
    Ok(header)
}

/// Write the four header records, each newline-terminated.
///
/// The comment is always [`COMMENT`]; a comment read from an input file
/// is not carried over.
pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> Result<(), PgmError> {
    writeln!(writer, "{}", header.mode.magic())?;
    writeln!(writer, "{COMMENT}")?;
    writeln!(writer, "{} {}", header.width, header.height)?;
    writeln!(writer, "{}", header.precision)?;
    Ok(())
}

fn read_record<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> Result<(), PgmError> {
    line.clear();
    if reader.read_until(b'\n', line)? == 0 {
        return Err(FormatError::TruncatedHeader.into());
    }
    Ok(())
}

fn trim_eol(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// `atoi`-style parse: skip leading whitespace, accept an optional `+`,
/// then take digits until the first non-digit. No digits reads as zero,
/// as does a leading `-`. Saturates instead of overflowing.
pub(crate) fn parse_leading_u64(field: &[u8]) -> u64 {
    let mut rest = field.trim_ascii_start();
    if let Some(r) = rest.strip_prefix(b"+") {
        rest = r;
    }
    rest.iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u64, |n, &d| n.saturating_mul(10).saturating_add(u64::from(d - b'0')))
}
