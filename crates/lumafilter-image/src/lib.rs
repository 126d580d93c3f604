#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// Borrowed three-plane frame views and geometry checks.
pub mod frame;

/// Single plane views with stride and bit depth.
pub mod plane;

/// Owning storage for planar video frames.
pub mod video_frame;

pub use crate::error::ImageError;
pub use crate::frame::{check_frame_geometry, Frame, FrameMut, VideoFormat};
pub use crate::plane::{Plane, PlaneMut, PlaneSize};
pub use crate::video_frame::VideoFrame;
