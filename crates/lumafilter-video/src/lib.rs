#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// The separable bilateral filter element.
pub mod bilateral;

/// The gaussian low/high-pass filter element.
pub mod blur;

/// Key events and the parameter changes they trigger.
pub mod control;

/// The video filter element interface.
pub mod element;

/// Error types for the video filter elements.
///
/// Defines [`VideoFilterError`] for property, locking, I/O and frame errors.
pub mod error;

/// Filter parameters, their bounds and JSON presets.
pub mod params;

/// Typed element properties.
pub mod property;

/// Raw planar video file reading and writing.
pub mod raw;

/// Element factories and plugin descriptors.
pub mod registry;

/// Lock-guarded parameter storage shared between frames and events.
pub mod store;

pub use crate::bilateral::BilateralFilter;
pub use crate::blur::BlurFilter;
pub use crate::control::{Key, KeyControl, NavigationEvent};
pub use crate::element::{ElementMetadata, VideoFilter};
pub use crate::error::VideoFilterError;
pub use crate::params::{BilateralParams, BlurParams};
pub use crate::property::{PropertySpec, PropertyValue};
pub use crate::registry::Registry;
pub use crate::store::ParamStore;
