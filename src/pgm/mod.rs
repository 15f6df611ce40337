//! PGM family: P2 (ASCII graymap) and P5 (binary graymap).
//!
//! The on-disk layout is four newline-terminated header records
//! (magic, one comment line, `"<width> <height>"`, precision) followed
//! by the samples. Unlike general Netpbm readers, the comment line is
//! mandatory and must be the second line; there is no support for
//! inline or repeated comments.

mod decode;
mod encode;
mod header;

pub(crate) use decode::{decode_ascii, decode_binary};
pub(crate) use encode::{encode_ascii, encode_binary};
pub use encode::quantize;
pub use header::{COMMENT, Header, parse_header, write_header};

/// Which PGM sub-format a file uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodingMode {
    /// P2 — one decimal integer per sample.
    Ascii,
    /// P5 — fixed-width big-endian binary samples.
    Binary,
}

impl EncodingMode {
    /// The two-character magic token written at the start of the file.
    pub const fn magic(self) -> &'static str {
        match self {
            EncodingMode::Ascii => "P2",
            EncodingMode::Binary => "P5",
        }
    }

    /// Look at the first two bytes of a magic record. Anything after
    /// them is ignored.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic.get(..2)? {
            b"P2" => Some(EncodingMode::Ascii),
            b"P5" => Some(EncodingMode::Binary),
            _ => None,
        }
    }
}

/// Maximum sample value of a file (the PGM `maxval`), `1..=65535`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u16);

impl Precision {
    /// 8-bit samples.
    pub const U8: Precision = Precision(255);
    /// Full 16-bit samples.
    pub const U16: Precision = Precision(65535);

    /// Returns `None` for zero or anything that does not fit in two bytes.
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 || value > u16::MAX as u32 {
            None
        } else {
            Some(Precision(value as u16))
        }
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    pub const fn byte_depth(self) -> ByteDepth {
        ByteDepth::for_precision(self)
    }

    pub(crate) fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision::U8
    }
}

impl core::fmt::Display for Precision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bytes per binary sample. Derived from precision, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteDepth {
    One,
    Two,
}

impl ByteDepth {
    /// One byte when every value up to `precision` fits in a `u8`.
    pub const fn for_precision(precision: Precision) -> Self {
        if precision.0 < 256 {
            ByteDepth::One
        } else {
            ByteDepth::Two
        }
    }

    pub const fn bytes(self) -> usize {
        match self {
            ByteDepth::One => 1,
            ByteDepth::Two => 2,
        }
    }
}

/// What the decoder does with samples it cannot represent.
///
/// `Strict` rejects non-numeric ASCII tokens and raw values above the
/// header precision with [`crate::FormatError::InvalidSample`].
/// `Lenient` reads the leading digits of a token (zero if there are
/// none) and clamps raw values to the precision, logging a warning for
/// each substitution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleParsing {
    Lenient,
    #[default]
    Strict,
}
