use crate::error::ImageError;
use crate::plane::{Plane, PlaneMut, PlaneSize};

/// Number of planes of the supported planar formats.
pub const NUM_PLANES: usize = 3;

/// Index of the luma plane.
pub const LUMA: usize = 0;

/// The planar pixel formats a frame can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VideoFormat {
    /// 8-bit Y, U, V planes with 2x2 subsampled chroma.
    #[default]
    I420,
}

impl VideoFormat {
    /// The caps name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            VideoFormat::I420 => "I420",
        }
    }

    /// Bits per sample of every plane.
    pub fn bit_depth(&self) -> u8 {
        match self {
            VideoFormat::I420 => 8,
        }
    }

    /// The plane sizes of a frame with the given luma size.
    ///
    /// Chroma planes round up for odd luma sizes.
    pub fn plane_sizes(&self, size: PlaneSize) -> [PlaneSize; NUM_PLANES] {
        match self {
            VideoFormat::I420 => {
                let chroma = PlaneSize {
                    width: size.width.div_ceil(2),
                    height: size.height.div_ceil(2),
                };
                [size, chroma, chroma]
            }
        }
    }
}

impl std::fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for VideoFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I420" | "i420" => Ok(VideoFormat::I420),
            _ => Err(ImageError::UnsupportedFormat(s.to_string())),
        }
    }
}

fn validate_layout(format: VideoFormat, sizes: [PlaneSize; NUM_PLANES]) -> Result<(), ImageError> {
    if format.plane_sizes(sizes[LUMA]) != sizes {
        return Err(ImageError::InvalidFrameSize(
            sizes[LUMA],
            format.name().to_string(),
        ));
    }
    Ok(())
}

/// A read-only planar video frame made of a luma and two chroma planes.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    format: VideoFormat,
    planes: [Plane<'a>; NUM_PLANES],
}

impl<'a> Frame<'a> {
    /// Create a frame from its three planes.
    ///
    /// # Errors
    ///
    /// Returns an error if the chroma planes do not match the layout of `format`.
    pub fn new(format: VideoFormat, planes: [Plane<'a>; NUM_PLANES]) -> Result<Self, ImageError> {
        validate_layout(format, planes.map(|p| p.size()))?;
        Ok(Self { format, planes })
    }

    /// Get the pixel format of the frame.
    pub fn format(&self) -> VideoFormat {
        self.format
    }

    /// Get the size of the luma plane.
    pub fn size(&self) -> PlaneSize {
        self.planes[LUMA].size()
    }

    /// Get the luma plane.
    pub fn luma(&self) -> &Plane<'a> {
        &self.planes[LUMA]
    }

    /// Get all the planes of the frame, luma first.
    pub fn planes(&self) -> &[Plane<'a>; NUM_PLANES] {
        &self.planes
    }
}

/// A writable planar video frame.
#[derive(Debug)]
pub struct FrameMut<'a> {
    format: VideoFormat,
    planes: [PlaneMut<'a>; NUM_PLANES],
}

impl<'a> FrameMut<'a> {
    /// Create a writable frame from its three planes.
    ///
    /// # Errors
    ///
    /// Returns an error if the chroma planes do not match the layout of `format`.
    pub fn new(
        format: VideoFormat,
        planes: [PlaneMut<'a>; NUM_PLANES],
    ) -> Result<Self, ImageError> {
        validate_layout(
            format,
            [planes[0].size(), planes[1].size(), planes[2].size()],
        )?;
        Ok(Self { format, planes })
    }

    /// Get the pixel format of the frame.
    pub fn format(&self) -> VideoFormat {
        self.format
    }

    /// Get the size of the luma plane.
    pub fn size(&self) -> PlaneSize {
        self.planes[LUMA].size()
    }

    /// Get the luma plane mutably.
    pub fn luma_mut(&mut self) -> &mut PlaneMut<'a> {
        &mut self.planes[LUMA]
    }

    /// Get all the planes of the frame, luma first.
    pub fn planes(&self) -> &[PlaneMut<'a>; NUM_PLANES] {
        &self.planes
    }

    /// Get all the planes of the frame mutably, luma first.
    pub fn planes_mut(&mut self) -> &mut [PlaneMut<'a>; NUM_PLANES] {
        &mut self.planes
    }
}

/// Check that `dst` can receive the filtered content of `src`.
///
/// Both frames must share the format and, plane by plane, the size and bit depth.
///
/// # Errors
///
/// Returns the first mismatch found, luma plane first.
pub fn check_frame_geometry(src: &Frame, dst: &FrameMut) -> Result<(), ImageError> {
    if src.format() != dst.format() {
        return Err(ImageError::UnsupportedFormat(dst.format().name().to_string()));
    }

    for (plane, (s, d)) in src.planes().iter().zip(dst.planes().iter()).enumerate() {
        if s.size() != d.size() {
            return Err(ImageError::PlaneSizeMismatch {
                plane,
                src: s.size(),
                dst: d.size(),
            });
        }
        if s.bit_depth() != d.bit_depth() {
            return Err(ImageError::BitDepthMismatch {
                plane,
                src: s.bit_depth(),
                dst: d.bit_depth(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i420_plane_sizes() {
        let sizes = VideoFormat::I420.plane_sizes([16, 16].into());
        assert_eq!(sizes[1], PlaneSize { width: 8, height: 8 });

        let sizes = VideoFormat::I420.plane_sizes([5, 3].into());
        assert_eq!(sizes[0], PlaneSize { width: 5, height: 3 });
        assert_eq!(sizes[2], PlaneSize { width: 3, height: 2 });
    }

    #[test]
    fn frame_rejects_bad_chroma() -> Result<(), ImageError> {
        let y = [0u8; 16];
        let uv = [0u8; 4];
        let luma = Plane::new(&y, 4, [4, 4].into(), 8)?;
        let chroma = Plane::new(&uv, 2, [2, 2].into(), 8)?;
        let wrong = Plane::new(&uv, 4, [4, 1].into(), 8)?;

        assert!(Frame::new(VideoFormat::I420, [luma, chroma, chroma]).is_ok());
        assert!(Frame::new(VideoFormat::I420, [luma, chroma, wrong]).is_err());
        Ok(())
    }

    #[test]
    fn geometry_mismatch_is_reported() -> Result<(), ImageError> {
        let y = [0u8; 16];
        let uv = [0u8; 4];
        let src = Frame::new(
            VideoFormat::I420,
            [
                Plane::new(&y, 4, [4, 4].into(), 8)?,
                Plane::new(&uv, 2, [2, 2].into(), 8)?,
                Plane::new(&uv, 2, [2, 2].into(), 8)?,
            ],
        )?;

        let mut dy = [0u8; 4];
        let mut du = [0u8; 1];
        let mut dv = [0u8; 1];
        let dst = FrameMut::new(
            VideoFormat::I420,
            [
                PlaneMut::new(&mut dy, 2, [2, 2].into(), 8)?,
                PlaneMut::new(&mut du, 1, [1, 1].into(), 8)?,
                PlaneMut::new(&mut dv, 1, [1, 1].into(), 8)?,
            ],
        )?;

        assert_eq!(
            check_frame_geometry(&src, &dst),
            Err(ImageError::PlaneSizeMismatch {
                plane: 0,
                src: [4, 4].into(),
                dst: [2, 2].into(),
            })
        );
        Ok(())
    }
}
