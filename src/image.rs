use alloc::vec::Vec;

use crate::error::PgmError;

/// A grayscale image with samples normalized to `[0.0, 1.0]`.
///
/// The buffer is row-major and always holds exactly `width * height`
/// samples. The image owns it outright; nothing else aliases it.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    buffer: Vec<f64>,
}

impl Image {
    /// A black image of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, PgmError> {
        let len = sample_count(width, height)?;
        let mut buffer = alloc_samples(len)?;
        buffer.resize(len, 0.0);
        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Fails with [`PgmError::BufferSizeMismatch`] unless
    /// `buffer.len() == width * height`.
    pub fn from_buffer(width: u32, height: u32, buffer: Vec<f64>) -> Result<Self, PgmError> {
        let expected = sample_count(width, height)?;
        if buffer.len() != expected {
            return Err(PgmError::BufferSizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All samples in row-major order.
    pub fn pixels(&self) -> &[f64] {
        &self.buffer
    }

    /// Mutable access to the samples. The length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    /// Sample at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.buffer
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero, and a zero-width image has no rows anyway
        self.buffer.chunks_exact(self.width.max(1) as usize)
    }

    /// Give up the image and keep its buffer.
    pub fn into_buffer(self) -> Vec<f64> {
        self.buffer
    }
}

pub(crate) fn sample_count(width: u32, height: u32) -> Result<usize, PgmError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(PgmError::DimensionsTooLarge { width, height })
}

/// Reserve room for `len` samples without aborting on allocation failure.
pub(crate) fn alloc_samples(len: usize) -> Result<Vec<f64>, PgmError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PgmError::Allocation {
            bytes: len.saturating_mul(core::mem::size_of::<f64>()),
        })?;
    Ok(buffer)
}
