use lumafilter_image::{check_frame_geometry, Frame, FrameMut, ImageError, Plane, PlaneSize};

use super::{kernels, separable_filter, ConstantWeight, RangeWeight};
use crate::buffer::WorkingBuffer;
use crate::combine::{neutralize_chroma, write_luma, OutputPolicy};
use crate::padding::{pad_plane, PaddingMode};

/// The result of filtering a padded plane.
///
/// Holds the padded buffer and the padding radius, and is addressed in the
/// coordinates of the unpadded plane.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredPlane {
    buffer: WorkingBuffer,
    radius: usize,
}

impl FilteredPlane {
    /// Wrap a filtered buffer padded by `radius` on every side.
    pub fn new(buffer: WorkingBuffer, radius: usize) -> Self {
        Self { buffer, radius }
    }

    /// Size of the unpadded plane.
    pub fn size(&self) -> PlaneSize {
        PlaneSize {
            width: self.buffer.width().saturating_sub(2 * self.radius),
            height: self.buffer.height().saturating_sub(2 * self.radius),
        }
    }

    /// The padding radius.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The padded buffer.
    pub fn buffer(&self) -> &WorkingBuffer {
        &self.buffer
    }

    /// Row `y` of the unpadded plane.
    pub fn row(&self, y: usize) -> &[f32] {
        let width = self.size().width;
        &self.buffer.row(y + self.radius)[self.radius..self.radius + width]
    }

    /// The filtered value at `(x, y)` of the unpadded plane.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.buffer.get(x + self.radius, y + self.radius)
    }
}

/// Mode of the gaussian blur filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlurMode {
    /// Output the blurred plane.
    LowPass,
    /// Output the input plane unchanged.
    #[default]
    Off,
    /// Add the difference between input and blurred plane to the input.
    HighPass,
}

impl BlurMode {
    /// The integer encoding of the mode: -1, 0 or 1.
    pub fn as_i32(&self) -> i32 {
        match self {
            BlurMode::LowPass => -1,
            BlurMode::Off => 0,
            BlurMode::HighPass => 1,
        }
    }

    /// Decode the integer encoding of the mode.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            -1 => Some(BlurMode::LowPass),
            0 => Some(BlurMode::Off),
            1 => Some(BlurMode::HighPass),
            _ => None,
        }
    }

    /// The factor of the linear combination, `None` when the filter is off.
    pub fn factor(&self) -> Option<f32> {
        match self {
            BlurMode::Off => None,
            mode => Some(mode.as_i32() as f32),
        }
    }
}

impl std::fmt::Display for BlurMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            BlurMode::LowPass => "low-pass",
            BlurMode::Off => "off",
            BlurMode::HighPass => "high-pass",
        };
        write!(f, "{name}")
    }
}

/// Blur a plane with a gaussian of standard deviation `sigma`.
///
/// # Arguments
///
/// * `src` - The plane to blur.
/// * `sigma` - The sigma of the gaussian; the kernel radius is `floor(2 * sigma)`.
/// * `padding` - How the plane border is extended.
///
/// # Errors
///
/// Returns an error if a working buffer cannot be allocated.
///
/// PRECONDITION: the plane is at least as large as the kernel.
pub fn gaussian_blur_plane(
    src: &Plane,
    sigma: f32,
    padding: PaddingMode,
) -> Result<FilteredPlane, ImageError> {
    let kernel = kernels::blur_kernel_1d(sigma);
    let radius = kernel.radius();

    let padded = pad_plane(src, radius, padding)?;
    let buffer = separable_filter(&padded, &kernel, ConstantWeight::new(&kernel))?;

    Ok(FilteredPlane::new(buffer, radius))
}

/// Smooth a plane with the separable bilateral filter.
///
/// # Arguments
///
/// * `src` - The plane to filter.
/// * `sigma_d` - The sigma of the 5 tap domain kernel.
/// * `sigma_r` - The sigma of the range gaussian; smaller values keep more edges.
/// * `padding` - How the plane border is extended.
///
/// # Errors
///
/// Returns an error if a working buffer cannot be allocated.
///
/// PRECONDITION: the plane is at least 5x5.
pub fn bilateral_plane(
    src: &Plane,
    sigma_d: f32,
    sigma_r: f32,
    padding: PaddingMode,
) -> Result<FilteredPlane, ImageError> {
    let kernel = kernels::bilateral_kernel_1d(sigma_d);
    let radius = kernel.radius();

    let padded = pad_plane(src, radius, padding)?;
    let buffer = separable_filter(&padded, &kernel, RangeWeight::new(sigma_r))?;

    Ok(FilteredPlane::new(buffer, radius))
}

/// Apply the gaussian low/high-pass filter to a frame.
///
/// The luma plane is blurred and combined with the input according to `mode`;
/// both chroma planes are set to mid-gray.
///
/// # Arguments
///
/// * `src` - The input frame.
/// * `dst` - The output frame with the same geometry as `src`.
/// * `sigma` - The sigma of the gaussian.
/// * `mode` - Low-pass, off or high-pass.
/// * `padding` - How the luma border is extended.
///
/// # Errors
///
/// Returns an error if the frames differ in geometry or a working buffer
/// cannot be allocated. In both cases `dst` is left untouched.
pub fn gaussian_blur_frame(
    src: &Frame,
    dst: &mut FrameMut,
    sigma: f32,
    mode: BlurMode,
    padding: PaddingMode,
) -> Result<(), ImageError> {
    check_frame_geometry(src, dst)?;

    match mode.factor() {
        None => write_luma(src.luma(), dst.luma_mut(), OutputPolicy::Copy)?,
        Some(factor) => {
            let filtered = gaussian_blur_plane(src.luma(), sigma, padding)?;
            log::debug!(
                "blurred {} luma, sigma {sigma}, radius {}, {mode}",
                src.size(),
                filtered.radius()
            );
            write_luma(
                src.luma(),
                dst.luma_mut(),
                OutputPolicy::Linear {
                    filtered: &filtered,
                    mode: factor,
                },
            )?
        }
    }

    neutralize_chroma(src, dst);
    Ok(())
}

/// Apply the separable bilateral filter to a frame.
///
/// When `enabled` is false the luma plane is copied unchanged. Both chroma
/// planes are always set to mid-gray.
///
/// # Errors
///
/// Returns an error if the frames differ in geometry or a working buffer
/// cannot be allocated. In both cases `dst` is left untouched.
pub fn bilateral_frame(
    src: &Frame,
    dst: &mut FrameMut,
    sigma_d: f32,
    sigma_r: f32,
    enabled: bool,
    padding: PaddingMode,
) -> Result<(), ImageError> {
    check_frame_geometry(src, dst)?;

    if enabled {
        let filtered = bilateral_plane(src.luma(), sigma_d, sigma_r, padding)?;
        log::debug!(
            "bilateral filtered {} luma, sigma_d {sigma_d}, sigma_r {sigma_r}",
            src.size()
        );
        write_luma(src.luma(), dst.luma_mut(), OutputPolicy::Direct(&filtered))?;
    } else {
        write_luma(src.luma(), dst.luma_mut(), OutputPolicy::Copy)?;
    }

    neutralize_chroma(src, dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumafilter_image::{VideoFormat, VideoFrame};

    fn impulse_frame(size: PlaneSize, at: (usize, usize)) -> Result<VideoFrame, ImageError> {
        let mut frame = VideoFrame::from_size_val(VideoFormat::I420, size, 0)?;
        let stride = frame.stride(0);
        frame.plane_data_mut(0)[at.1 * stride + at.0] = 255;
        Ok(frame)
    }

    #[test]
    fn test_gaussian_impulse_response() -> Result<(), ImageError> {
        let size = PlaneSize {
            width: 15,
            height: 15,
        };
        let frame = impulse_frame(size, (7, 7))?;
        let src = frame.as_frame()?;

        let filtered = gaussian_blur_plane(src.luma(), 1.0, PaddingMode::Zero)?;
        assert_eq!(filtered.radius(), 2);

        let kernel = kernels::blur_kernel_1d(1.0);
        let w = kernel.weight_sum();
        let k = |d: isize| kernel.as_slice()[(d + 2) as usize] / w;

        for y in 0..15isize {
            for x in 0..15isize {
                let (dx, dy) = (x - 7, y - 7);
                let value = filtered.get(x as usize, y as usize);
                if dx.abs() > 2 || dy.abs() > 2 {
                    assert_eq!(value, 0.0);
                } else {
                    assert_relative_eq!(value, 255.0 * k(dx) * k(dy), epsilon = 1e-3);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_zero_padding_darkens_edges() -> Result<(), ImageError> {
        let frame = VideoFrame::from_size_val(VideoFormat::I420, [8, 8].into(), 100)?;
        let src = frame.as_frame()?;

        let zero = gaussian_blur_plane(src.luma(), 1.0, PaddingMode::Zero)?;
        assert!(zero.get(0, 0) < 60.0);
        assert_relative_eq!(zero.get(4, 4), 100.0, epsilon = 1e-3);

        let replicate = gaussian_blur_plane(src.luma(), 1.0, PaddingMode::Replicate)?;
        assert_relative_eq!(replicate.get(0, 0), 100.0, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn test_high_pass_mirrors_low_pass() -> Result<(), ImageError> {
        let size = PlaneSize {
            width: 12,
            height: 10,
        };
        let bytes = (0..VideoFrame::frame_len(VideoFormat::I420, size))
            .map(|i| ((i * 37) % 101 + 60) as u8)
            .collect::<Vec<_>>();
        let input = VideoFrame::from_bytes(VideoFormat::I420, size, &bytes)?;
        let src = input.as_frame()?;

        let filtered = gaussian_blur_plane(src.luma(), 1.5, PaddingMode::Zero)?;
        for y in 0..size.height {
            for x in 0..size.width {
                let s = src.luma().row(y)[x] as f32;
                let low = crate::combine::linear_combination(s, filtered.get(x, y), -1.0);
                let high = crate::combine::linear_combination(s, filtered.get(x, y), 1.0);
                assert_relative_eq!(high, 2.0 * s - low, epsilon = 1e-3);
            }
        }

        let mut low = VideoFrame::from_size_val(VideoFormat::I420, size, 0)?;
        let mut high = VideoFrame::from_size_val(VideoFormat::I420, size, 0)?;
        gaussian_blur_frame(
            &src,
            &mut low.as_frame_mut()?,
            1.5,
            BlurMode::LowPass,
            PaddingMode::Zero,
        )?;
        gaussian_blur_frame(
            &src,
            &mut high.as_frame_mut()?,
            1.5,
            BlurMode::HighPass,
            PaddingMode::Zero,
        )?;

        // rounding both outputs costs at most one code value
        for ((&s, &l), &h) in input
            .plane_data(0)
            .iter()
            .zip(low.plane_data(0))
            .zip(high.plane_data(0))
        {
            let expected = (2 * s as i32 - l as i32).clamp(0, 255);
            assert!((h as i32 - expected).abs() <= 1);
        }
        Ok(())
    }

    #[test]
    fn test_off_mode_copies_luma() -> Result<(), ImageError> {
        let size: PlaneSize = [6, 6].into();
        let bytes = (0..VideoFrame::frame_len(VideoFormat::I420, size))
            .map(|i| (i * 7 % 256) as u8)
            .collect::<Vec<_>>();
        let input = VideoFrame::from_bytes(VideoFormat::I420, size, &bytes)?;

        let mut blur_out = VideoFrame::from_size_val(VideoFormat::I420, size, 0)?;
        gaussian_blur_frame(
            &input.as_frame()?,
            &mut blur_out.as_frame_mut()?,
            3.0,
            BlurMode::Off,
            PaddingMode::Zero,
        )?;
        assert_eq!(blur_out.plane_data(0), input.plane_data(0));
        assert_eq!(blur_out.plane_data(1), &[128; 9]);

        let mut bilateral_out = VideoFrame::from_size_val(VideoFormat::I420, size, 0)?;
        bilateral_frame(
            &input.as_frame()?,
            &mut bilateral_out.as_frame_mut()?,
            2.0,
            25.0,
            false,
            PaddingMode::Zero,
        )?;
        assert_eq!(bilateral_out.plane_data(0), input.plane_data(0));
        assert_eq!(bilateral_out.plane_data(2), &[128; 9]);
        Ok(())
    }

    #[test]
    fn test_geometry_mismatch_leaves_output_untouched() -> Result<(), ImageError> {
        let input = VideoFrame::from_size_val(VideoFormat::I420, [8, 8].into(), 50)?;
        let mut output = VideoFrame::from_size_val(VideoFormat::I420, [6, 8].into(), 9)?;

        let res = bilateral_frame(
            &input.as_frame()?,
            &mut output.as_frame_mut()?,
            2.0,
            25.0,
            true,
            PaddingMode::Zero,
        );
        assert!(matches!(res, Err(ImageError::PlaneSizeMismatch { plane: 0, .. })));
        assert!(output.plane_data(1).iter().all(|&v| v == 9));
        Ok(())
    }

    #[test]
    fn test_tiny_sigma_keeps_flat_frame() -> Result<(), ImageError> {
        let input = VideoFrame::from_size_val(VideoFormat::I420, [8, 8].into(), 128)?;

        let mut low = VideoFrame::from_size_val(VideoFormat::I420, [8, 8].into(), 0)?;
        gaussian_blur_frame(
            &input.as_frame()?,
            &mut low.as_frame_mut()?,
            1e-40,
            BlurMode::LowPass,
            PaddingMode::Zero,
        )?;
        assert_eq!(low.plane_data(0), &[128; 64]);

        let mut bilateral = VideoFrame::from_size_val(VideoFormat::I420, [8, 8].into(), 0)?;
        bilateral_frame(
            &input.as_frame()?,
            &mut bilateral.as_frame_mut()?,
            2.0,
            1e-40,
            true,
            PaddingMode::Zero,
        )?;
        assert_eq!(bilateral.plane_data(0), &[128; 64]);
        Ok(())
    }

    #[test]
    fn test_blur_mode_encoding() {
        for mode in [BlurMode::LowPass, BlurMode::Off, BlurMode::HighPass] {
            assert_eq!(BlurMode::from_i32(mode.as_i32()), Some(mode));
        }
        assert_eq!(BlurMode::from_i32(2), None);
        assert_eq!(BlurMode::HighPass.factor(), Some(1.0));
        assert_eq!(BlurMode::Off.factor(), None);
    }
}
