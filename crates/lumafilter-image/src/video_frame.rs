use crate::error::ImageError;
use crate::frame::{Frame, FrameMut, VideoFormat, NUM_PLANES};
use crate::plane::{Plane, PlaneMut, PlaneSize};

/// An owned planar video frame.
///
/// Each plane lives in its own buffer with its own row stride, the way
/// frames handed out by a video pipeline usually are.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFrame {
    format: VideoFormat,
    size: PlaneSize,
    strides: [usize; NUM_PLANES],
    data: [Vec<u8>; NUM_PLANES],
}

impl VideoFrame {
    /// Create a new frame with tightly packed rows and every sample set to `val`.
    ///
    /// # Arguments
    ///
    /// * `format` - The pixel format of the frame.
    /// * `size` - The size of the luma plane.
    /// * `val` - The initial value of every sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumafilter_image::{VideoFormat, VideoFrame};
    ///
    /// let frame = VideoFrame::from_size_val(VideoFormat::I420, [16, 16].into(), 128).unwrap();
    ///
    /// assert_eq!(frame.plane_data(1).len(), 64);
    /// ```
    pub fn from_size_val(
        format: VideoFormat,
        size: PlaneSize,
        val: u8,
    ) -> Result<Self, ImageError> {
        let strides = format.plane_sizes(size).map(|s| s.width.max(1));
        Self::with_strides(format, size, strides, val)
    }

    /// Create a new frame with explicit row strides per plane.
    ///
    /// Row padding bytes are zero, samples are set to `val`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stride is smaller than the width of its plane.
    pub fn with_strides(
        format: VideoFormat,
        size: PlaneSize,
        strides: [usize; NUM_PLANES],
        val: u8,
    ) -> Result<Self, ImageError> {
        let sizes = format.plane_sizes(size);
        let mut data: [Vec<u8>; NUM_PLANES] = Default::default();

        for (i, (plane_size, &stride)) in sizes.iter().zip(strides.iter()).enumerate() {
            if stride == 0 || stride < plane_size.width {
                return Err(ImageError::InvalidPlaneStride(stride, plane_size.width));
            }
            let mut buffer = vec![0u8; stride * plane_size.height];
            buffer
                .chunks_exact_mut(stride)
                .for_each(|row| row[..plane_size.width].fill(val));
            data[i] = buffer;
        }

        Ok(Self {
            format,
            size,
            strides,
            data,
        })
    }

    /// Create a frame from tightly packed planar bytes, luma plane first.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not exactly [`VideoFrame::frame_len`] long.
    pub fn from_bytes(format: VideoFormat, size: PlaneSize, bytes: &[u8]) -> Result<Self, ImageError> {
        let expected = Self::frame_len(format, size);
        if bytes.len() != expected {
            return Err(ImageError::InvalidPlaneLength(bytes.len(), expected));
        }

        let mut frame = Self::from_size_val(format, size, 0)?;
        let mut offset = 0;
        for i in 0..NUM_PLANES {
            let len = frame.data[i].len();
            frame.data[i].copy_from_slice(&bytes[offset..offset + len]);
            offset += len;
        }

        Ok(frame)
    }

    /// Number of bytes of a tightly packed frame.
    pub fn frame_len(format: VideoFormat, size: PlaneSize) -> usize {
        format
            .plane_sizes(size)
            .iter()
            .map(|s| s.num_samples())
            .sum()
    }

    /// Serialize the frame as tightly packed planar bytes, luma plane first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::frame_len(self.format, self.size));
        for (i, plane_size) in self.format.plane_sizes(self.size).iter().enumerate() {
            for row in self.data[i].chunks(self.strides[i]).take(plane_size.height) {
                bytes.extend_from_slice(&row[..plane_size.width]);
            }
        }
        bytes
    }

    /// Get the pixel format of the frame.
    pub fn format(&self) -> VideoFormat {
        self.format
    }

    /// Get the size of the luma plane.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Get the row stride of plane `index`.
    pub fn stride(&self, index: usize) -> usize {
        self.strides[index]
    }

    /// Get the raw bytes of plane `index`, including row padding.
    pub fn plane_data(&self, index: usize) -> &[u8] {
        &self.data[index]
    }

    /// Get the raw bytes of plane `index` mutably, including row padding.
    pub fn plane_data_mut(&mut self, index: usize) -> &mut [u8] {
        &mut self.data[index]
    }

    /// Borrow the frame as a read-only view.
    pub fn as_frame(&self) -> Result<Frame<'_>, ImageError> {
        let sizes = self.format.plane_sizes(self.size);
        let depth = self.format.bit_depth();
        let [y, u, v] = &self.data;

        Frame::new(
            self.format,
            [
                Plane::new(y, self.strides[0], sizes[0], depth)?,
                Plane::new(u, self.strides[1], sizes[1], depth)?,
                Plane::new(v, self.strides[2], sizes[2], depth)?,
            ],
        )
    }

    /// Borrow the frame as a writable view.
    pub fn as_frame_mut(&mut self) -> Result<FrameMut<'_>, ImageError> {
        let sizes = self.format.plane_sizes(self.size);
        let depth = self.format.bit_depth();
        let [y, u, v] = &mut self.data;

        FrameMut::new(
            self.format,
            [
                PlaneMut::new(y, self.strides[0], sizes[0], depth)?,
                PlaneMut::new(u, self.strides[1], sizes[1], depth)?,
                PlaneMut::new(v, self.strides[2], sizes[2], depth)?,
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_strides_round_trip_bytes() -> Result<(), ImageError> {
        let size = PlaneSize {
            width: 4,
            height: 2,
        };
        let bytes = (0u8..12).collect::<Vec<_>>();
        let packed = VideoFrame::from_bytes(VideoFormat::I420, size, &bytes)?;
        assert_eq!(packed.plane_data(0), &bytes[..8]);
        assert_eq!(packed.plane_data(1), &[8, 9]);

        let mut strided = VideoFrame::with_strides(VideoFormat::I420, size, [6, 4, 4], 0)?;
        {
            let src = packed.as_frame()?;
            let mut dst = strided.as_frame_mut()?;
            for (d, s) in dst.planes_mut().iter_mut().zip(src.planes().iter()) {
                d.copy_from(s)?;
            }
        }

        assert_eq!(strided.plane_data(0), &[0, 1, 2, 3, 0, 0, 4, 5, 6, 7, 0, 0]);
        assert_eq!(strided.to_bytes(), bytes);
        Ok(())
    }

    #[test]
    fn from_bytes_checks_length() {
        let res = VideoFrame::from_bytes(VideoFormat::I420, [4, 4].into(), &[0u8; 10]);
        assert_eq!(res, Err(ImageError::InvalidPlaneLength(10, 24)));
    }
}
