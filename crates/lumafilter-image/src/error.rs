use crate::plane::PlaneSize;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the row stride is smaller than the plane width.
    #[error("Plane stride ({0}) is smaller than the plane width ({1})")]
    InvalidPlaneStride(usize, usize),

    /// Error when the plane data is too short for the declared geometry.
    #[error("Plane data length ({0}) is smaller than the required length ({1})")]
    InvalidPlaneLength(usize, usize),

    /// Error when the bit depth is not in `1..=8`.
    #[error("Invalid bit depth {0}, expected a value in 1..=8")]
    InvalidBitDepth(u8),

    /// Error when the input and output planes differ in size.
    #[error("Plane {plane} size mismatch: source {src}, destination {dst}")]
    PlaneSizeMismatch {
        /// Index of the offending plane.
        plane: usize,
        /// Size of the source plane.
        src: PlaneSize,
        /// Size of the destination plane.
        dst: PlaneSize,
    },

    /// Error when the input and output planes differ in bit depth.
    #[error("Plane {plane} bit depth mismatch: source {src}, destination {dst}")]
    BitDepthMismatch {
        /// Index of the offending plane.
        plane: usize,
        /// Bit depth of the source plane.
        src: u8,
        /// Bit depth of the destination plane.
        dst: u8,
    },

    /// Error when the frame size cannot be represented in the requested format.
    #[error("Frame size {0} is not valid for format {1}")]
    InvalidFrameSize(PlaneSize, String),

    /// Error when the pixel format is not supported.
    #[error("Unsupported video format: {0}")]
    UnsupportedFormat(String),

    /// Error when a working buffer could not be allocated.
    #[error("Failed to allocate a working buffer of {0} samples")]
    AllocationFailed(usize),

    /// Error when the kernel length is not odd.
    #[error("Invalid kernel length {0}, expected an odd length")]
    InvalidKernelLength(usize),

    /// Error when the working buffer does not match the expected size.
    #[error("Working buffer size {0} does not match the expected size {1}")]
    InvalidBufferSize(PlaneSize, PlaneSize),
}
