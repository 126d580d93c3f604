use lumafilter_image::{Frame, FrameMut, ImageError, Plane, PlaneMut};

use crate::filter::{FilteredPlane, FloatConversion};

/// How the output luma plane is derived from the input and the filtered plane.
#[derive(Clone, Copy, Debug)]
pub enum OutputPolicy<'a> {
    /// Copy the input samples unchanged.
    Copy,
    /// Write the filtered samples.
    Direct(&'a FilteredPlane),
    /// Write `input + mode * (input - filtered)`.
    ///
    /// `mode = -1` gives the filtered plane (low-pass), `mode = 1` adds the
    /// high frequencies once more (high-pass boost).
    Linear {
        /// The filtered plane.
        filtered: &'a FilteredPlane,
        /// The factor applied to the difference between input and filtered.
        mode: f32,
    },
}

/// Combine an input sample with its filtered value.
#[inline]
pub fn linear_combination(input: f32, filtered: f32, mode: f32) -> f32 {
    input + mode * (input - filtered)
}

/// Write the luma plane of the output frame.
///
/// # Arguments
///
/// * `src` - The unpadded input luma plane.
/// * `dst` - The output luma plane.
/// * `policy` - How the output samples are derived.
///
/// # Errors
///
/// Returns an error if `src`, `dst` and the filtered plane differ in size.
pub fn write_luma(src: &Plane, dst: &mut PlaneMut, policy: OutputPolicy) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::PlaneSizeMismatch {
            plane: 0,
            src: src.size(),
            dst: dst.size(),
        });
    }

    let filtered = match policy {
        OutputPolicy::Copy => return dst.copy_from(src),
        OutputPolicy::Direct(filtered) | OutputPolicy::Linear { filtered, .. } => filtered,
    };

    if filtered.size() != src.size() {
        return Err(ImageError::InvalidBufferSize(filtered.size(), src.size()));
    }

    for (y, (dst_row, src_row)) in dst.rows_mut().zip(src.rows()).enumerate() {
        let filtered_row = filtered.row(y);
        for ((d, &s), &f) in dst_row.iter_mut().zip(src_row).zip(filtered_row) {
            let value = match policy {
                OutputPolicy::Linear { mode, .. } => linear_combination(s.to_f32(), f, mode),
                _ => f,
            };
            *d = u8::from_f32(value);
        }
    }

    Ok(())
}

/// Set both chroma planes of `dst` to mid-gray.
///
/// The value of each plane is `2^(bit_depth - 1)` of the matching source plane.
pub fn neutralize_chroma(src: &Frame, dst: &mut FrameMut) {
    for (s, d) in src
        .planes()
        .iter()
        .zip(dst.planes_mut().iter_mut())
        .skip(1)
    {
        d.fill(s.neutral_value());
    }
}
