//! Baseline separable bilinear resize.
//!
//! Destination sample `i` maps to source coordinate
//! `i * (src_len - 1) / (dst_len - 1)`, so the first and last destination
//! pixels land exactly on the first and last source pixels. A destination
//! axis of length 1 maps to source coordinate 0.
//!
//! The other scalers use this as a primitive: the doubling template finishes
//! with it, and the self-similarity scaler builds its frequency bands with it.

use super::{check_dimensions, ScaleError};
use crate::raster::Image;
use image::Rgb;

/// Map a destination index to a fractional source coordinate.
///
/// Computed as a single division so the last destination index lands on
/// `src_len - 1` exactly.
#[inline]
pub(crate) fn source_coord(i: u32, src_len: u32, dst_len: u32) -> f32 {
    if dst_len <= 1 {
        return 0.0;
    }
    (i as f32 * (src_len - 1) as f32) / (dst_len - 1) as f32
}

/// Integer base index and fractional weight for each destination index.
fn axis_samples(src_len: u32, dst_len: u32) -> Vec<(i32, f32)> {
    (0..dst_len)
        .map(|i| {
            let s = source_coord(i, src_len, dst_len);
            let base = s.floor();
            (base as i32, s - base)
        })
        .collect()
}

/// Resize `src` to `dst_w x dst_h` with bilinear interpolation.
///
/// Neighbours beyond the border are clamped to the edge pixels.
///
/// # Errors
///
/// Returns [`ScaleError::InvalidDimensions`] if any dimension is zero.
pub fn scale_linear(src: &Image, dst_w: u32, dst_h: u32) -> Result<Image, ScaleError> {
    check_dimensions(src, dst_w, dst_h)?;

    let xs = axis_samples(src.width(), dst_w);
    let ys = axis_samples(src.height(), dst_h);
    let mut out = Image::new(dst_w, dst_h);

    for (j, &(y0, fy)) in ys.iter().enumerate() {
        for (i, &(x0, fx)) in xs.iter().enumerate() {
            let p00 = src.get_pixel(x0, y0);
            let p10 = src.get_pixel(x0 + 1, y0);
            let p01 = src.get_pixel(x0, y0 + 1);
            let p11 = src.get_pixel(x0 + 1, y0 + 1);
            out.set_pixel(i as i32, j as i32, bilerp(p00, p10, p01, p11, fx, fy));
        }
    }

    Ok(out)
}

/// Bilinear blend of four corner colors, rounded to nearest.
#[inline]
fn bilerp(p00: Rgb<u8>, p10: Rgb<u8>, p01: Rgb<u8>, p11: Rgb<u8>, fx: f32, fy: f32) -> Rgb<u8> {
    let channel = |c: usize| {
        let top = p00.0[c] as f32 * (1.0 - fx) + p10.0[c] as f32 * fx;
        let bottom = p01.0[c] as f32 * (1.0 - fx) + p11.0[c] as f32 * fx;
        (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
    };
    Rgb([channel(0), channel(1), channel(2)])
}
