#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use lumafilter_image as image;

#[doc(inline)]
pub use lumafilter_imgproc as imgproc;

#[doc(inline)]
pub use lumafilter_video as video;
