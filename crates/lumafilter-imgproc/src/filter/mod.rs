//! Filter operations
//!
//! Gaussian low/high-pass and separable bilateral filtering of luma planes.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
