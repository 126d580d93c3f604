use lumafilter_image::ImageError;

use super::kernels::{range_gaussian, Kernel};
use crate::buffer::WorkingBuffer;

/// Trait for floating point casting
pub trait FloatConversion {
    /// Convert the type to f32
    fn to_f32(&self) -> f32;
    /// Convert the type from f32
    fn from_f32(val: f32) -> Self;
}

impl FloatConversion for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(val: f32) -> Self {
        val
    }
}

impl FloatConversion for u8 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    /// Rounds to the nearest value and saturates to `[0, 255]`.
    fn from_f32(val: f32) -> Self {
        val.round().clamp(0.0, 255.0) as u8
    }
}

/// The weight given to each tap of the separable convolution.
pub trait TapWeight {
    /// Weight of a tap given its domain kernel weight, the center sample and
    /// the tap sample.
    fn weight(&self, domain: f32, center: f32, sample: f32) -> f32;

    /// Turn the weighted sum of a pixel into its output value.
    ///
    /// `used` is the sum of the tap weights that produced `acc`.
    fn normalize(&self, acc: f32, used: f32) -> f32;
}

/// Plain convolution, normalized by a constant kernel weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantWeight {
    kernel_weight: f32,
}

impl ConstantWeight {
    /// Normalize by the sum of the kernel weights.
    pub fn new(kernel: &Kernel) -> Self {
        Self {
            kernel_weight: kernel.weight_sum(),
        }
    }
}

impl TapWeight for ConstantWeight {
    #[inline]
    fn weight(&self, domain: f32, _center: f32, _sample: f32) -> f32 {
        domain
    }

    #[inline]
    fn normalize(&self, acc: f32, _used: f32) -> f32 {
        acc / self.kernel_weight
    }
}

/// Bilateral weighting: the domain weight is scaled by a gaussian of the
/// intensity difference to the center sample, and every pixel is normalized
/// by the weights it actually used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeWeight {
    sigma_r: f32,
}

impl RangeWeight {
    /// Range weighting with standard deviation `sigma_r`.
    pub fn new(sigma_r: f32) -> Self {
        Self { sigma_r }
    }
}

impl TapWeight for RangeWeight {
    #[inline]
    fn weight(&self, domain: f32, center: f32, sample: f32) -> f32 {
        domain * range_gaussian(self.sigma_r, center - sample)
    }

    #[inline]
    fn normalize(&self, acc: f32, used: f32) -> f32 {
        acc / used
    }
}

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// The filter runs on a padded working buffer and only writes the interior
/// `[radius, width - radius) x [radius, height - radius)`, which maps back onto
/// the unpadded plane. The horizontal sweep covers every row so that the
/// vertical sweep can read the top and bottom border rows.
///
/// With [`RangeWeight`] the range term is applied along each axis in turn.
/// This approximates a 2D bilateral filter, it is not an exact one.
pub struct SeparableFilter<'a, W> {
    kernel: &'a Kernel,
    tap_weight: W,
}

impl<'a, W: TapWeight> SeparableFilter<'a, W> {
    /// Create a new separable filter with the same kernel on both axes.
    pub fn new(kernel: &'a Kernel, tap_weight: W) -> Self {
        Self { kernel, tap_weight }
    }

    /// Apply the filter to a padded buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the intermediate or result buffer cannot be allocated.
    pub fn apply(&self, src: &WorkingBuffer) -> Result<WorkingBuffer, ImageError> {
        let mut temp = WorkingBuffer::try_new(src.size())?;
        let mut dst = WorkingBuffer::try_new(src.size())?;

        self.horizontal(src, &mut temp);
        self.vertical(&temp, &mut dst);

        Ok(dst)
    }

    fn horizontal(&self, src: &WorkingBuffer, dst: &mut WorkingBuffer) {
        let radius = self.kernel.radius();
        let cols = src.width();

        for r in 0..src.height() {
            let row = src.row(r);
            let out = dst.row_mut(r);

            for c in radius..cols.saturating_sub(radius) {
                let center = row[c];
                let taps = &row[c - radius..=c + radius];
                out[c] = self.convolve(center, taps.iter().copied());
            }
        }
    }

    fn vertical(&self, src: &WorkingBuffer, dst: &mut WorkingBuffer) {
        let radius = self.kernel.radius();
        let cols = src.width();
        let rows = src.height();

        for r in radius..rows.saturating_sub(radius) {
            for c in radius..cols.saturating_sub(radius) {
                let center = src.get(c, r);
                let taps = (r - radius..=r + radius).map(|y| src.get(c, y));
                dst.set(c, r, self.convolve(center, taps));
            }
        }
    }

    #[inline]
    fn convolve(&self, center: f32, taps: impl Iterator<Item = f32>) -> f32 {
        let mut acc = 0.0f32;
        let mut used = 0.0f32;
        for (&k, sample) in self.kernel.as_slice().iter().zip(taps) {
            let w = self.tap_weight.weight(k, center, sample);
            acc += sample * w;
            used += w;
        }
        self.tap_weight.normalize(acc, used)
    }
}

/// Apply a separable filter to a padded working buffer.
///
/// # Arguments
///
/// * `src` - The padded buffer, usually built with [`crate::padding::pad_plane`].
/// * `kernel` - The kernel applied along both axes.
/// * `tap_weight` - How each tap is weighted and each pixel normalized.
///
/// # Returns
///
/// A buffer of the same size as `src`; the border of width `kernel.radius()` is zero.
pub fn separable_filter<W: TapWeight>(
    src: &WorkingBuffer,
    kernel: &Kernel,
    tap_weight: W,
) -> Result<WorkingBuffer, ImageError> {
    SeparableFilter::new(kernel, tap_weight).apply(src)
}
