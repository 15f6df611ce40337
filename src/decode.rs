use enough::Stop;
use std::io::BufRead;

use crate::error::PgmError;
use crate::image::{Image, sample_count};
use crate::limits::Limits;
use crate::pgm::{self, EncodingMode, Header, Precision, SampleParsing};

/// Decoded image plus the header fields the image does not carry.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub image: Image,
    /// Precision read from the file header.
    pub precision: Precision,
    pub mode: EncodingMode,
}

impl Decoded {
    /// Drop the header details and keep the image.
    pub fn into_image(self) -> Image {
        self.image
    }
}

/// Builder for a single decode.
///
/// ```
/// use zenpgm::{DecodeRequest, SampleParsing, Unstoppable};
///
/// let data = b"P2\n# x\n2 1\n255\n0\n255\n";
/// let decoded = DecodeRequest::new(data)
///     .with_sample_parsing(SampleParsing::Lenient)
///     .decode(Unstoppable)?;
/// assert_eq!(decoded.image.pixels(), &[0.0, 1.0]);
/// # Ok::<(), zenpgm::PgmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    parsing: SampleParsing,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            parsing: SampleParsing::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_sample_parsing(mut self, parsing: SampleParsing) -> Self {
        self.parsing = parsing;
        self
    }

    /// Decode the bytes given to [`DecodeRequest::new`].
    pub fn decode(self, stop: impl Stop) -> Result<Decoded, PgmError> {
        let mut data = self.data;
        decode_from(&mut data, self.limits, self.parsing, &stop)
    }

    /// Decode from `reader` instead, using this request's settings.
    pub fn decode_reader<R: BufRead>(
        self,
        mut reader: R,
        stop: impl Stop,
    ) -> Result<Decoded, PgmError> {
        decode_from(&mut reader, self.limits, self.parsing, &stop)
    }
}

pub(crate) fn decode_from<R: BufRead>(
    reader: &mut R,
    limits: Option<&Limits>,
    parsing: SampleParsing,
    stop: &dyn Stop,
) -> Result<Decoded, PgmError> {
    let header = pgm::parse_header(reader)?;
    check_limits(limits, &header)?;
    stop.check()?;

    let pixels = match header.mode {
        EncodingMode::Ascii => {
            let max_text = limits.and_then(|l| l.max_memory_bytes);
            pgm::decode_ascii(reader, &header, parsing, max_text, stop)?
        }
        EncodingMode::Binary => pgm::decode_binary(reader, &header, parsing, stop)?,
    };
    let image = Image::from_buffer(header.width, header.height, pixels)?;
    Ok(Decoded {
        image,
        precision: header.precision,
        mode: header.mode,
    })
}

fn check_limits(limits: Option<&Limits>, header: &Header) -> Result<(), PgmError> {
    let Some(limits) = limits else {
        return Ok(());
    };
    limits.check(header.width, header.height)?;
    let count = sample_count(header.width, header.height)?;
    let out_bytes = count.saturating_mul(core::mem::size_of::<f64>());
    // P5 holds the raw grid and the f64 grid at once
    let raw_bytes = match header.mode {
        EncodingMode::Ascii => 0,
        EncodingMode::Binary => count.saturating_mul(header.precision.byte_depth().bytes()),
    };
    limits.check_memory(out_bytes.saturating_add(raw_bytes))
}
