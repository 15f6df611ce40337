use alloc::vec::Vec;
use enough::Stop;
use std::io::Write;

use crate::error::{FormatError, PgmError};
use crate::image::Image;
use crate::pgm::{self, EncodingMode, Header, Precision};

/// Builder for a single encode.
///
/// Precision defaults to [`Precision::U8`].
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    mode: EncodingMode,
    precision: Precision,
}

impl EncodeRequest {
    pub fn new(mode: EncodingMode) -> Self {
        Self {
            mode,
            precision: Precision::default(),
        }
    }

    /// P2 output.
    pub fn ascii() -> Self {
        Self::new(EncodingMode::Ascii)
    }

    /// P5 output.
    pub fn binary() -> Self {
        Self::new(EncodingMode::Binary)
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Encode into a fresh buffer.
    pub fn encode(self, image: &Image, stop: impl Stop) -> Result<Vec<u8>, PgmError> {
        let size = self.estimated_size(image);
        let mut out = Vec::new();
        out.try_reserve(size)
            .map_err(|_| PgmError::Allocation { bytes: size })?;
        self.encode_into(&mut out, image, &stop)?;
        Ok(out)
    }

    /// Encode to `writer`. Nothing is flushed; wrap files in a
    /// `BufWriter` and flush it afterwards.
    pub fn encode_to<W: Write>(
        self,
        mut writer: W,
        image: &Image,
        stop: impl Stop,
    ) -> Result<(), PgmError> {
        self.encode_into(&mut writer, image, &stop)
    }

    fn encode_into<W: Write>(
        self,
        writer: &mut W,
        image: &Image,
        stop: &dyn Stop,
    ) -> Result<(), PgmError> {
        // the header would be unreadable
        if image.width() == 0 || image.height() == 0 {
            return Err(FormatError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            }
            .into());
        }
        let header = Header {
            mode: self.mode,
            width: image.width(),
            height: image.height(),
            precision: self.precision,
        };
        log::debug!(
            "encoding {}x{} as {} precision {} ({:?} per sample)",
            header.width,
            header.height,
            self.mode.magic(),
            self.precision,
            self.precision.byte_depth()
        );
        pgm::write_header(writer, &header)?;
        match self.mode {
            EncodingMode::Ascii => pgm::encode_ascii(writer, image, self.precision, stop),
            EncodingMode::Binary => pgm::encode_binary(writer, image, self.precision, stop),
        }
    }

    fn estimated_size(&self, image: &Image) -> usize {
        let samples = image.pixels().len();
        let per_sample = match self.mode {
            // widest value plus newline
            EncodingMode::Ascii => self.precision.to_string().len() + 1,
            EncodingMode::Binary => self.precision.byte_depth().bytes(),
        };
        64usize.saturating_add(samples.saturating_mul(per_sample))
    }
}
