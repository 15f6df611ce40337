//! P2/P5 sample writers.

use enough::Stop;
use std::io::Write;

use super::{ByteDepth, Precision};
use crate::error::PgmError;
use crate::image::Image;

/// Map a normalized sample to its on-disk integer value.
///
/// Samples are clamped to `[0.0, 1.0]` first (NaN counts as 0), then
/// scaled and rounded half-to-even, so the result never exceeds
/// `precision`.
pub fn quantize(sample: f64, precision: Precision) -> u16 {
    let sample = if sample.is_nan() {
        0.0
    } else {
        sample.clamp(0.0, 1.0)
    };
    (sample * precision.as_f64()).round_ties_even() as u16
}

/// One decimal integer per line, row-major.
pub(crate) fn encode_ascii<W: Write>(
    writer: &mut W,
    image: &Image,
    precision: Precision,
    stop: &dyn Stop,
) -> Result<(), PgmError> {
    for row in image.rows() {
        stop.check()?;
        for &sample in row {
            writeln!(writer, "{}", quantize(sample, precision))?;
        }
    }
    Ok(())
}

/// `width * height * ByteDepth` big-endian bytes.
pub(crate) fn encode_binary<W: Write>(
    writer: &mut W,
    image: &Image,
    precision: Precision,
    stop: &dyn Stop,
) -> Result<(), PgmError> {
    let depth = precision.byte_depth();
    let mut buf = alloc::vec::Vec::with_capacity(image.width() as usize * depth.bytes());
    for (row_idx, row) in image.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        buf.clear();
        for &sample in row {
            let value = quantize(sample, precision);
            match depth {
                // quantize never exceeds a precision below 256
                ByteDepth::One => buf.push(value as u8),
                ByteDepth::Two => buf.extend_from_slice(&value.to_be_bytes()),
            }
        }
        writer.write_all(&buf)?;
    }
    Ok(())
}
