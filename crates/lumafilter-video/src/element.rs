use lumafilter_image::{Frame, FrameMut, ImageError, VideoFormat, VideoFrame};

use crate::control::NavigationEvent;
use crate::error::VideoFilterError;
use crate::property::{PropertySpec, PropertyValue};

/// Descriptive metadata of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementMetadata {
    /// Human readable element name.
    pub long_name: &'static str,
    /// Element classification.
    pub classification: &'static str,
    /// What the element does.
    pub description: &'static str,
    /// Who wrote it.
    pub author: &'static str,
}

/// A video filter that transforms frames of a fixed geometry.
///
/// Parameters live behind a lock so that properties and navigation events can
/// be handled from any thread while frames are being filtered.
pub trait VideoFilter: Send + Sync {
    /// The factory name of the element.
    fn name(&self) -> &'static str;

    /// Descriptive metadata.
    fn metadata(&self) -> &'static ElementMetadata;

    /// The properties the element exposes.
    fn properties(&self) -> &'static [PropertySpec];

    /// Set a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is unknown, or the value has the wrong
    /// type or is out of bounds. The parameters are unchanged in that case.
    fn set_property(&self, name: &str, value: PropertyValue) -> Result<(), VideoFilterError>;

    /// Get the current value of a property.
    fn property(&self, name: &str) -> Result<PropertyValue, VideoFilterError>;

    /// Handle an event travelling upstream.
    ///
    /// Returns whether the event should be forwarded further upstream.
    fn src_event(&self, event: &NavigationEvent) -> Result<bool, VideoFilterError>;

    /// Filter `src` into `dst`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frames differ in geometry or format, or a
    /// working buffer cannot be allocated. `dst` is left untouched.
    fn transform_frame(&self, src: &Frame, dst: &mut FrameMut) -> Result<(), VideoFilterError>;

    /// Formats accepted on both pads.
    fn supported_formats(&self) -> &'static [VideoFormat] {
        &[VideoFormat::I420]
    }

    /// Filter an owned frame into a new frame with the same layout.
    fn transform(&self, src: &VideoFrame) -> Result<VideoFrame, VideoFilterError> {
        if !self.supported_formats().contains(&src.format()) {
            return Err(ImageError::UnsupportedFormat(src.format().to_string()).into());
        }
        let strides = [src.stride(0), src.stride(1), src.stride(2)];
        let mut dst = VideoFrame::with_strides(src.format(), src.size(), strides, 0)?;
        self.transform_frame(&src.as_frame()?, &mut dst.as_frame_mut()?)?;
        Ok(dst)
    }
}
