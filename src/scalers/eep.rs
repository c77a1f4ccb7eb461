//! Edge-enhancing parity (EEP) doubling step.
//!
//! The 2x output grid is filled pixel by pixel; the parity of the destination
//! coordinates picks one of four sampling rules:
//!
//! ```text
//!   (even, even)  copy of the source pixel
//!   (even, odd)   vertical pair average, sharpened against its side pairs
//!   (odd,  even)  horizontal pair average, sharpened against the rows around
//!   (odd,  odd)   diagonal blend weighted toward the smoother diagonal
//! ```
//!
//! Arbitrary destination sizes are reached through the doubling template.

use super::doubling::Doubler;
use super::ScaleError;
use crate::color::{average, average_weighted, diff};
use crate::raster::Image;
use image::Rgb;

/// Weight (out of 256) of the near pair against the far pairs: roughly 4:1.
const NEAR_PAIR_WEIGHT: u32 = 205;

/// Edge-enhancing parity averaging scaler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EepScaler;

impl Doubler for EepScaler {
    fn name(&self) -> &'static str {
        "EEP"
    }

    fn double(&self, src: &Image) -> Result<Image, ScaleError> {
        let mut dst = Image::new(src.width() * 2, src.height() * 2);

        for j in 0..dst.height() as i32 {
            for i in 0..dst.width() as i32 {
                let p = match (i & 1, j & 1) {
                    (0, 0) => sample_even_even(src, i, j),
                    (0, _) => sample_even_odd(src, i, j),
                    (_, 0) => sample_odd_even(src, i, j),
                    _ => sample_odd_odd(src, i, j),
                };
                dst.set_pixel(i, j, p);
            }
        }

        Ok(dst)
    }
}

fn sample_even_even(src: &Image, i: i32, j: i32) -> Rgb<u8> {
    src.get_pixel(i / 2, j / 2)
}

/// Between two source rows.
fn sample_even_odd(src: &Image, i: i32, j: i32) -> Rgb<u8> {
    let (si, sj) = (i / 2, j / 2);

    let near = average(src.get_pixel(si, sj), src.get_pixel(si, sj + 1));
    let left = average(src.get_pixel(si - 1, sj), src.get_pixel(si - 1, sj + 1));
    let right = average(src.get_pixel(si + 1, sj), src.get_pixel(si + 1, sj + 1));

    average_weighted(near, average(left, right), NEAR_PAIR_WEIGHT)
}

/// Between two source columns.
fn sample_odd_even(src: &Image, i: i32, j: i32) -> Rgb<u8> {
    let (si, sj) = (i / 2, j / 2);

    let near = average(src.get_pixel(si, sj), src.get_pixel(si + 1, sj));
    let above = average(src.get_pixel(si, sj - 1), src.get_pixel(si + 1, sj - 1));
    let below = average(src.get_pixel(si, sj + 1), src.get_pixel(si + 1, sj + 1));

    average_weighted(near, average(above, below), NEAR_PAIR_WEIGHT)
}

/// Center of a 2x2 source quad.
///
/// ```text
///   A   B
///     X
///   C   D
/// ```
fn sample_odd_odd(src: &Image, i: i32, j: i32) -> Rgb<u8> {
    let (si, sj) = (i / 2, j / 2);

    let a = src.get_pixel(si, sj);
    let b = src.get_pixel(si + 1, sj);
    let c = src.get_pixel(si, sj + 1);
    let d = src.get_pixel(si + 1, sj + 1);

    let diff_ad = diff(a, d);
    let diff_bc = diff(b, c);

    if diff_ad == 0 && diff_bc == 0 {
        return a;
    }

    let avg_ad = average(a, d);
    let avg_bc = average(b, c);

    if diff_ad == 0 {
        return avg_ad;
    }
    if diff_bc == 0 {
        return avg_bc;
    }

    let (small_diff, large_diff, small_avg, large_avg) = if diff_ad < diff_bc {
        (diff_ad, diff_bc, avg_ad, avg_bc)
    } else {
        (diff_bc, diff_ad, avg_bc, avg_ad)
    };

    // Share of the rougher diagonal; at most one half
    let w = 1.0 / (1.0 + large_diff as f32 / small_diff as f32);
    let wi = (w * 256.0).clamp(0.0, 256.0) as u32;

    average_weighted(large_avg, small_avg, wi)
}
