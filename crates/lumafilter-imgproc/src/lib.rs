#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// floating point working buffers.
pub mod buffer;

/// writing filtered luma and neutral chroma to output planes.
pub mod combine;

/// image filtering module.
pub mod filter;

/// border padding of planes into working buffers.
pub mod padding;
