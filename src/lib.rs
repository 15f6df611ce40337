//! # zenpgm
//!
//! Portable graymap (PGM) decoder and encoder working on normalized
//! floating-point samples.
//!
//! ## Supported Formats
//!
//! - **P2** — ASCII graymap, one decimal integer per sample
//! - **P5** — binary graymap, 1 byte per sample when precision < 256,
//!   otherwise 2 bytes big-endian
//!
//! Decoded samples are always `value / precision`, in `[0.0, 1.0]`,
//! whatever the file's encoding. The precision travels next to the
//! image rather than inside it, so a file can be re-saved at a
//! different precision.
//!
//! ## Header Layout
//!
//! Files are read as exactly four header lines: magic, a single comment,
//! `"<width> <height>"`, precision. The comment line is required. This
//! is stricter than Netpbm, which allows comments anywhere.
//!
//! ## Non-Goals
//!
//! - PBM and PPM (bitmap and color) variants
//! - Streaming decode; the whole image is held in memory
//! - Gamma or color-space handling
//!
//! ## Usage
//!
//! ```no_run
//! use zenpgm::EncodingMode;
//!
//! let (mut image, precision) = zenpgm::load("terrain.pgm")?;
//! for s in image.pixels_mut() {
//!     *s *= 0.5;
//! }
//! zenpgm::save("out.pgm", &image, precision, EncodingMode::Binary)?;
//! # Ok::<(), zenpgm::PgmError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod image;
mod limits;

pub mod pgm;

#[cfg(feature = "cli")]
pub mod params;

mod decode;
mod encode;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// Re-exports
pub use decode::{DecodeRequest, Decoded};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{FormatError, PgmError, Result};
pub use image::Image;
pub use limits::Limits;
pub use pgm::{ByteDepth, EncodingMode, Header, Precision, SampleParsing};

/// Decode P2 or P5 bytes with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Decoded> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode `image` at `precision` in the given mode.
pub fn encode(
    image: &Image,
    precision: Precision,
    mode: EncodingMode,
    stop: impl Stop,
) -> Result<Vec<u8>> {
    EncodeRequest::new(mode)
        .with_precision(precision)
        .encode(image, stop)
}

/// Read only the header of a PGM file.
pub fn probe(data: &[u8]) -> Result<Header> {
    let mut data = data;
    pgm::parse_header(&mut data)
}

/// Load a PGM file, returning the image and the precision from its header.
pub fn load(path: impl AsRef<Path>) -> Result<(Image, Precision)> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let decoded = DecodeRequest::new(&[]).decode_reader(reader, Unstoppable)?;
    Ok((decoded.image, decoded.precision))
}

/// Write `image` to a PGM file, replacing it if it exists.
///
/// A failed save may leave a partial file behind.
pub fn save(
    path: impl AsRef<Path>,
    image: &Image,
    precision: Precision,
    mode: EncodingMode,
) -> Result<()> {
    let path = path.as_ref();
    log::debug!("saving {} as {}", path.display(), mode.magic());
    let mut writer = BufWriter::new(File::create(path)?);
    EncodeRequest::new(mode)
        .with_precision(precision)
        .encode_to(&mut writer, image, Unstoppable)?;
    writer.flush()?;
    Ok(())
}
