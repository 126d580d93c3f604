use lumafilter_image::ImageError;

/// An error type for the video filter elements.
#[derive(thiserror::Error, Debug)]
pub enum VideoFilterError {
    /// An error occurred while filtering a frame.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// The element has no property with this name.
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// The property was given a value of the wrong type.
    #[error("Property {name} expects a value of type {expected}")]
    InvalidPropertyType {
        /// Name of the property.
        name: String,
        /// Name of the expected type.
        expected: &'static str,
    },

    /// The property value is outside its bounds.
    #[error("Property {name} value {value} is out of range [{min}, {max}]")]
    PropertyOutOfRange {
        /// Name of the property.
        name: String,
        /// The rejected value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// No element factory is registered under this name.
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// An element factory is already registered under this name.
    #[error("Element already registered: {0}")]
    DuplicateElement(String),

    /// The parameter lock was poisoned by a panicking holder.
    #[error("Could not lock the mutex")]
    MutexPoisonError,

    /// An I/O error occurred while reading or writing frames.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// A parameter preset could not be parsed.
    #[error(transparent)]
    ConfigError(#[from] serde_json::Error),

    /// The stream ended in the middle of a frame.
    #[error("Truncated frame: got {0} of {1} bytes")]
    TruncatedFrame(usize, usize),
}
