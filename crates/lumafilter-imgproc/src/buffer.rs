use lumafilter_image::{ImageError, PlaneSize};

/// A row-major `f32` buffer used between the stages of a filter.
///
/// Buffers are allocated per frame and dropped with it.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkingBuffer {
    data: Vec<f32>,
    size: PlaneSize,
}

impl WorkingBuffer {
    /// Allocate a zero filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::AllocationFailed`] if the memory cannot be reserved.
    pub fn try_new(size: PlaneSize) -> Result<Self, ImageError> {
        let len = size
            .width
            .checked_mul(size.height)
            .ok_or(ImageError::AllocationFailed(usize::MAX))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageError::AllocationFailed(len))?;
        data.resize(len, 0.0);

        Ok(Self { data, size })
    }

    /// Create a buffer from existing samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the length of `data` does not match `size`.
    pub fn from_vec(size: PlaneSize, data: Vec<f32>) -> Result<Self, ImageError> {
        if data.len() != size.num_samples() {
            return Err(ImageError::InvalidPlaneLength(
                data.len(),
                size.num_samples(),
            ));
        }
        Ok(Self { data, size })
    }

    /// Get the size of the buffer.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Get the width of the buffer.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the buffer.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the samples of the buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get row `y`.
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.size.width;
        &self.data[start..start + self.size.width]
    }

    /// Get row `y` mutably.
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.size.width;
        &mut self.data[start..start + self.size.width]
    }

    /// Get the sample at column `x` and row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.size.width + x]
    }

    /// Set the sample at column `x` and row `y`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.size.width + x] = value;
    }
}
