//! P2/P5 sample readers.

use alloc::string::String;
use alloc::vec::Vec;
use enough::Stop;
use std::io::Read;

use super::header::parse_leading_u64;
use super::{ByteDepth, Header, SampleParsing};
use crate::error::{FormatError, PgmError};
use crate::image::{alloc_samples, sample_count};

/// Read whitespace-separated decimal samples until the stream ends.
///
/// The stream must hold exactly `width * height` tokens; anything else is
/// [`FormatError::PixelCountMismatch`]. The count is checked before the
/// sample buffer is allocated. With `max_text` set, a body longer than
/// that many bytes is [`PgmError::LimitExceeded`].
pub(crate) fn decode_ascii<R: Read>(
    reader: &mut R,
    header: &Header,
    parsing: SampleParsing,
    max_text: Option<u64>,
    stop: &dyn Stop,
) -> Result<Vec<f64>, PgmError> {
    let expected = sample_count(header.width, header.height)?;
    let mut text = Vec::new();
    match max_text {
        Some(max) => {
            reader.take(max.saturating_add(1)).read_to_end(&mut text)?;
            if text.len() as u64 > max {
                return Err(PgmError::LimitExceeded(alloc::format!(
                    "P2 body exceeds memory limit {max}"
                )));
            }
        }
        None => {
            reader.read_to_end(&mut text)?;
        }
    }
    log::trace!("P2 body: {} bytes for {expected} samples", text.len());

    let tokens = || {
        text.split(|b| b.is_ascii_whitespace())
            .filter(|t| !t.is_empty())
    };
    let actual = tokens().count();
    if actual != expected {
        return Err(FormatError::PixelCountMismatch { expected, actual }.into());
    }

    let mut out = alloc_samples(expected)?;
    let precision = header.precision.as_f64();
    let max = u64::from(header.precision.get());
    let row = (header.width as usize).max(1);

    for (index, token) in tokens().enumerate() {
        if index % row == 0 {
            stop.check()?;
        }
        let value = match parsing {
            SampleParsing::Strict => strict_value(token, max, index)?,
            SampleParsing::Lenient => lenient_value(token, max, index),
        };
        out.push(value as f64 / precision);
    }
    Ok(out)
}

/// Read exactly `width * height` fixed-width big-endian samples.
///
/// Bytes after the grid are left unread. The raw buffer grows only as
/// data arrives, so a short body fails with
/// [`FormatError::TruncatedPixelData`] before the grid is allocated.
pub(crate) fn decode_binary<R: Read>(
    reader: &mut R,
    header: &Header,
    parsing: SampleParsing,
    stop: &dyn Stop,
) -> Result<Vec<f64>, PgmError> {
    let count = sample_count(header.width, header.height)?;
    let depth = header.precision.byte_depth();
    let expected = count
        .checked_mul(depth.bytes())
        .ok_or(PgmError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    log::debug!("P5 body: {count} samples, {} byte(s) each", depth.bytes());

    let mut raw = Vec::new();
    reader.take(expected as u64).read_to_end(&mut raw)?;
    if raw.len() < expected {
        return Err(FormatError::TruncatedPixelData {
            expected,
            actual: raw.len(),
        }
        .into());
    }

    let mut out = alloc_samples(count)?;
    let precision = header.precision.as_f64();
    let max = header.precision.get();
    let row_bytes = (header.width as usize).max(1) * depth.bytes();

    for (row_idx, row) in raw.chunks_exact(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (col, sample) in row.chunks_exact(depth.bytes()).enumerate() {
            let value = match depth {
                ByteDepth::One => u16::from(sample[0]),
                ByteDepth::Two => u16::from_be_bytes([sample[0], sample[1]]),
            };
            let value = if value > max {
                let index = row_idx * header.width as usize + col;
                match parsing {
                    SampleParsing::Strict => {
                        return Err(FormatError::InvalidSample {
                            index,
                            token: alloc::format!("{value}"),
                        }
                        .into());
                    }
                    SampleParsing::Lenient => {
                        log::warn!("sample {index}: {value} above precision {max}, clamped");
                        max
                    }
                }
            } else {
                value
            };
            out.push(f64::from(value) / precision);
        }
    }
    Ok(out)
}

fn strict_value(token: &[u8], max: u64, index: usize) -> Result<u64, PgmError> {
    let invalid = || FormatError::InvalidSample {
        index,
        token: String::from_utf8_lossy(token).into_owned(),
    };
    if !token.iter().all(u8::is_ascii_digit) {
        return Err(invalid().into());
    }
    let value = parse_leading_u64(token);
    if value > max {
        return Err(invalid().into());
    }
    Ok(value)
}

fn lenient_value(token: &[u8], max: u64, index: usize) -> u64 {
    let value = parse_leading_u64(token);
    if !token.iter().all(u8::is_ascii_digit) {
        log::warn!(
            "sample {index}: {:?} is not a number, read as {value}",
            String::from_utf8_lossy(token)
        );
    }
    if value > max {
        log::warn!("sample {index}: {value} above precision {max}, clamped");
        return max;
    }
    value
}
