use lumafilter_image::{ImageError, Plane, PlaneSize};

use crate::buffer::WorkingBuffer;
use crate::filter::FloatConversion;

/// A border type for the padded working buffer.
///
/// Both video filters pad with zeros, which darkens the outermost `radius`
/// pixels of the output. The other modes are explicit alternatives for
/// callers that want correct edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaddingMode {
    /// Fill the border with zeros.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    #[default]
    Zero,

    /// Repeat the outermost row or column of samples into the border.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// Reflect at the boundary, starting with the sample next to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,
}

impl PaddingMode {
    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else if i >= len {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    /// Maps index `i` to a valid index within `[0, len)`.
    ///
    /// Returns `None` for [`PaddingMode::Zero`] when `i` is outside the plane.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            PaddingMode::Zero => None,
            PaddingMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            PaddingMode::Reflect101 => Some(Self::reflect101(i, len)),
        }
    }
}

impl std::str::FromStr for PaddingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero" => Ok(PaddingMode::Zero),
            "replicate" => Ok(PaddingMode::Replicate),
            "reflect101" => Ok(PaddingMode::Reflect101),
            other => Err(format!("unknown padding mode: {other}")),
        }
    }
}

/// Size of a plane after adding `radius` samples on every side.
pub fn padded_size(size: PlaneSize, radius: usize) -> PlaneSize {
    PlaneSize {
        width: size.width + 2 * radius,
        height: size.height + 2 * radius,
    }
}

/// Copy a plane into a new working buffer with a `radius` wide border.
///
/// The sample at `(x, y)` of `src` lands at `(x + radius, y + radius)`; the
/// border is filled according to `mode`.
///
/// # Arguments
///
/// * `src` - The plane to pad.
/// * `radius` - The border width, usually the kernel radius.
/// * `mode` - How the border is filled.
///
/// # Errors
///
/// Returns an error if the working buffer cannot be allocated.
pub fn pad_plane(src: &Plane, radius: usize, mode: PaddingMode) -> Result<WorkingBuffer, ImageError> {
    let size = padded_size(src.size(), radius);
    let mut dst = WorkingBuffer::try_new(size)?;

    let (width, height) = (src.width(), src.height());

    // copy the plane as center of the buffer
    for (y, src_row) in src.rows().enumerate() {
        let dst_row = &mut dst.row_mut(y + radius)[radius..radius + width];
        for (d, s) in dst_row.iter_mut().zip(src_row.iter()) {
            *d = s.to_f32();
        }
    }

    if mode == PaddingMode::Zero || width == 0 || height == 0 {
        return Ok(dst);
    }

    for y in 0..size.height {
        let interior_row = y >= radius && y < height + radius;
        let sy = mode.map_index(y as isize - radius as isize, height);

        for x in 0..size.width {
            if interior_row && x >= radius && x < width + radius {
                continue;
            }
            let sx = mode.map_index(x as isize - radius as isize, width);
            if let (Some(sx), Some(sy)) = (sx, sy) {
                dst.set(x, y, src.row(sy)[sx].to_f32());
            }
        }
    }

    Ok(dst)
}
