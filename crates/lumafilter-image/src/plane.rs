use crate::error::ImageError;

/// Plane size in samples
///
/// # Examples
///
/// ```
/// use lumafilter_image::PlaneSize;
///
/// let size = PlaneSize {
///   width: 16,
///   height: 8,
/// };
///
/// assert_eq!(size.num_samples(), 128);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaneSize {
    /// Width of the plane in samples
    pub width: usize,
    /// Height of the plane in samples
    pub height: usize,
}

impl PlaneSize {
    /// Number of samples covered by the plane, excluding row padding.
    pub fn num_samples(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for PlaneSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for PlaneSize {
    fn from(size: [usize; 2]) -> Self {
        PlaneSize {
            width: size[0],
            height: size[1],
        }
    }
}

// the last row only needs `width` samples, strided buffers are often cut there
fn required_len(stride: usize, size: PlaneSize) -> usize {
    match size.height {
        0 => 0,
        h => stride * (h - 1) + size.width,
    }
}

fn validate(len: usize, stride: usize, size: PlaneSize, bit_depth: u8) -> Result<(), ImageError> {
    if stride == 0 || stride < size.width {
        return Err(ImageError::InvalidPlaneStride(stride, size.width));
    }

    if !(1..=8).contains(&bit_depth) {
        return Err(ImageError::InvalidBitDepth(bit_depth));
    }

    let required = required_len(stride, size);
    if len < required {
        return Err(ImageError::InvalidPlaneLength(len, required));
    }

    Ok(())
}

fn neutral_value(bit_depth: u8) -> u8 {
    (1u16 << (bit_depth - 1)) as u8
}

/// A read-only view over one plane of a planar frame.
///
/// The pixel bytes are owned by the caller. Rows are `stride` bytes apart and
/// only the first `width` bytes of each row are samples.
#[derive(Clone, Copy, Debug)]
pub struct Plane<'a> {
    data: &'a [u8],
    stride: usize,
    size: PlaneSize,
    bit_depth: u8,
}

impl<'a> Plane<'a> {
    /// Create a new plane view.
    ///
    /// # Arguments
    ///
    /// * `data` - The plane bytes, at least `stride * (height - 1) + width` long.
    /// * `stride` - The number of bytes between the start of two rows.
    /// * `size` - The size of the plane in samples.
    /// * `bit_depth` - The number of significant bits per sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the stride is smaller than the width, the data is
    /// too short or the bit depth is not in `1..=8`.
    pub fn new(
        data: &'a [u8],
        stride: usize,
        size: PlaneSize,
        bit_depth: u8,
    ) -> Result<Self, ImageError> {
        validate(data.len(), stride, size, bit_depth)?;
        Ok(Self {
            data,
            stride,
            size,
            bit_depth,
        })
    }

    /// Get the size of the plane in samples.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Get the width of the plane in samples.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the plane in samples.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the bit depth of a sample.
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// The mid-gray value `2^(bit_depth - 1)` of this plane.
    pub fn neutral_value(&self) -> u8 {
        neutral_value(self.bit_depth)
    }

    /// Get the raw bytes of the plane, including row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Get the samples of row `y`, without row padding.
    ///
    /// PRECONDITION: `y < height`.
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.size.width]
    }

    /// Iterate over the rows of the plane, without row padding.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let width = self.size.width;
        self.data
            .chunks(self.stride)
            .take(self.size.height)
            .map(move |row| &row[..width])
    }

    /// Get the sample at column `x` and row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.data[y * self.stride + x])
    }
}

/// A writable view over one plane of a planar frame.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    data: &'a mut [u8],
    stride: usize,
    size: PlaneSize,
    bit_depth: u8,
}

impl<'a> PlaneMut<'a> {
    /// Create a new writable plane view.
    ///
    /// # Errors
    ///
    /// Same validation as [`Plane::new`].
    pub fn new(
        data: &'a mut [u8],
        stride: usize,
        size: PlaneSize,
        bit_depth: u8,
    ) -> Result<Self, ImageError> {
        validate(data.len(), stride, size, bit_depth)?;
        Ok(Self {
            data,
            stride,
            size,
            bit_depth,
        })
    }

    /// Get the size of the plane in samples.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Get the width of the plane in samples.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the plane in samples.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the bit depth of a sample.
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Reborrow the plane as a read-only view.
    pub fn as_plane(&self) -> Plane<'_> {
        Plane {
            data: &*self.data,
            stride: self.stride,
            size: self.size,
            bit_depth: self.bit_depth,
        }
    }

    /// Get the mutable samples of row `y`, without row padding.
    ///
    /// PRECONDITION: `y < height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + self.size.width]
    }

    /// Iterate mutably over the rows of the plane, without row padding.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let width = self.size.width;
        self.data
            .chunks_mut(self.stride)
            .take(self.size.height)
            .map(move |row| &mut row[..width])
    }

    /// Set every sample of the plane to `value`. Row padding is left untouched.
    pub fn fill(&mut self, value: u8) {
        self.rows_mut().for_each(|row| row.fill(value));
    }

    /// Copy the samples of `src` into this plane, row by row.
    ///
    /// # Errors
    ///
    /// Returns an error if the two planes differ in size.
    pub fn copy_from(&mut self, src: &Plane) -> Result<(), ImageError> {
        if src.size() != self.size {
            return Err(ImageError::PlaneSizeMismatch {
                plane: 0,
                src: src.size(),
                dst: self.size,
            });
        }

        self.rows_mut()
            .zip(src.rows())
            .for_each(|(dst_row, src_row)| dst_row.copy_from_slice(src_row));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_rows_skip_padding() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let data = [
            1, 2, 3, 0,
            4, 5, 6, 0,
            7, 8, 9,
        ];
        let plane = Plane::new(&data, 4, [3, 3].into(), 8)?;

        assert_eq!(plane.row(1), &[4, 5, 6]);
        assert_eq!(plane.get(2, 2), Some(9));
        assert_eq!(plane.get(3, 0), None);

        let rows = plane.rows().collect::<Vec<_>>();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6], &[7, 8, 9]]);
        Ok(())
    }

    #[test]
    fn plane_validation() {
        let data = [0u8; 10];
        assert_eq!(
            Plane::new(&data, 2, [3, 3].into(), 8).unwrap_err(),
            ImageError::InvalidPlaneStride(2, 3)
        );
        assert_eq!(
            Plane::new(&data, 4, [3, 3].into(), 8).unwrap_err(),
            ImageError::InvalidPlaneLength(10, 11)
        );
        assert_eq!(
            Plane::new(&data, 3, [3, 3].into(), 0).unwrap_err(),
            ImageError::InvalidBitDepth(0)
        );
    }

    #[test]
    fn neutral_value_from_bit_depth() -> Result<(), ImageError> {
        let data = [0u8; 4];
        assert_eq!(Plane::new(&data, 2, [2, 2].into(), 8)?.neutral_value(), 128);
        assert_eq!(Plane::new(&data, 2, [2, 2].into(), 1)?.neutral_value(), 1);
        assert_eq!(Plane::new(&data, 2, [2, 2].into(), 5)?.neutral_value(), 16);
        Ok(())
    }

    #[test]
    fn plane_mut_fill_and_copy() -> Result<(), ImageError> {
        let src_data = [10u8, 20, 30, 40];
        let src = Plane::new(&src_data, 2, [2, 2].into(), 8)?;

        let mut dst_data = [0u8; 6];
        let mut dst = PlaneMut::new(&mut dst_data, 3, [2, 2].into(), 8)?;
        dst.fill(7);
        assert_eq!(dst.as_plane().as_slice(), &[7, 7, 0, 7, 7, 0]);

        dst.copy_from(&src)?;
        assert_eq!(dst_data, [10, 20, 0, 30, 40, 0]);
        Ok(())
    }
}
