use lumafilter_image::ImageError;

/// Radius of the bilateral domain kernel, independent of its sigma.
pub const BILATERAL_KERNEL_RADIUS: usize = 2;

/// How the samples of a gaussian kernel are scaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// The normal probability density, `1/(sqrt(2*pi)*sigma) * exp(-x^2/(2*sigma^2))`.
    Density,
    /// The bare exponential, `exp(-x^2/(2*sigma^2))`, peaking at 1.
    Unnormalized,
}

/// A one dimensional convolution kernel of odd length.
///
/// The center sample sits at index [`Kernel::radius`].
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from its weights.
    ///
    /// # Errors
    ///
    /// Returns an error if `weights` is empty or of even length.
    pub fn new(weights: Vec<f32>) -> Result<Self, ImageError> {
        if weights.len() % 2 == 0 {
            return Err(ImageError::InvalidKernelLength(weights.len()));
        }
        Ok(Self { weights })
    }

    /// Number of taps on each side of the center sample.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Number of taps, always `2 * radius + 1`.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// A kernel always holds at least its center tap.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The kernel weights.
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    /// Sum of all the weights, the normalizer of a constant-weight convolution.
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

/// Evaluate a gaussian of standard deviation `sigma` at `x`.
///
/// A non positive `sigma`, or one so small that `2 * sigma^2` underflows,
/// is treated as the limit of the gaussian: 1 at `x == 0` and 0 anywhere else.
pub fn gaussian_1d(sigma: f32, x: f32, normalization: Normalization) -> f32 {
    let two_sigma_sq = 2.0 * sigma * sigma;
    if sigma <= 0.0 || two_sigma_sq == 0.0 {
        return if x == 0.0 { 1.0 } else { 0.0 };
    }

    let e = (-(x * x) / two_sigma_sq).exp();
    match normalization {
        Normalization::Density => e / ((2.0 * std::f32::consts::PI).sqrt() * sigma),
        Normalization::Unnormalized => e,
    }
}

/// Weight of an intensity difference `delta` for a range sigma `sigma_r`.
pub fn range_gaussian(sigma_r: f32, delta: f32) -> f32 {
    gaussian_1d(sigma_r, delta, Normalization::Unnormalized)
}

/// Create a gaussian domain kernel.
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian.
/// * `radius` - Number of taps on each side of the center.
/// * `normalization` - How the gaussian samples are scaled.
///
/// # Returns
///
/// A kernel of `2 * radius + 1` samples, sample `i` evaluated at offset `i - radius`.
pub fn domain_kernel_1d(sigma: f32, radius: usize, normalization: Normalization) -> Kernel {
    let weights = (0..2 * radius + 1)
        .map(|i| gaussian_1d(sigma, i as f32 - radius as f32, normalization))
        .collect();
    Kernel { weights }
}

/// Radius of the blur kernel for `sigma`, `floor(2 * sigma)`.
pub fn blur_kernel_radius(sigma: f32) -> usize {
    (2.0 * sigma).floor().max(0.0) as usize
}

/// Create the kernel of the gaussian blur.
///
/// The samples are the normal density and the radius is [`blur_kernel_radius`].
/// A zero sigma gives the single tap kernel `[1]`.
pub fn blur_kernel_1d(sigma: f32) -> Kernel {
    domain_kernel_1d(sigma, blur_kernel_radius(sigma), Normalization::Density)
}

/// Create the domain kernel of the bilateral filter.
///
/// The samples are unnormalized since every pixel is normalized by the
/// weights it actually used. The radius is [`BILATERAL_KERNEL_RADIUS`].
pub fn bilateral_kernel_1d(sigma_d: f32) -> Kernel {
    domain_kernel_1d(
        sigma_d,
        BILATERAL_KERNEL_RADIUS,
        Normalization::Unnormalized,
    )
}
