use alloc::string::String;
use enough::StopReason;

/// Errors from PGM decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PgmError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not allocate {bytes} bytes for pixel buffer")]
    Allocation { bytes: usize },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer holds {actual} samples, image needs {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PgmError {
    fn from(r: StopReason) -> Self {
        PgmError::Cancelled(r)
    }
}

/// Malformed or unsupported file contents.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("unrecognized magic {0:?} (expected P2 or P5)")]
    UnrecognizedMagic(String),

    #[error("header ended before all four records were read")]
    TruncatedHeader,

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid precision {0} (expected 1..=65535)")]
    InvalidPrecision(u64),

    #[error("pixel data truncated: need {expected} bytes, got {actual}")]
    TruncatedPixelData { expected: usize, actual: usize },

    #[error("expected {expected} samples, found {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("invalid sample {token:?} at index {index}")]
    InvalidSample { index: usize, token: String },
}

/// Result alias with [`PgmError`].
pub type Result<T> = core::result::Result<T, PgmError>;

impl PgmError {
    /// The format error behind this failure, if any.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            PgmError::Format(e) => Some(e),
            _ => None,
        }
    }
}
