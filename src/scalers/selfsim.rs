//! Self-similarity super-resolution doubling step.
//!
//! Natural images repeat their local structure across scales. This scaler
//! upsamples the image's smooth content with a plain linear resize, then
//! restores detail by borrowing it from the source itself:
//!
//! 1. Split the source into a low band (downscale by 2, upscale back) and a
//!    high band (source minus low).
//! 2. Upscale the source 2x linearly. This blurry canvas is the output's low
//!    band.
//! 3. For every patch position of the canvas, find the source patch whose
//!    low band looks most like it, searching a small window around the
//!    half-scale position, and add that patch's high band into an
//!    accumulator.
//! 4. Average the overlapping contributions and add them to the canvas.
//!
//! Patch centres run from `PATCH_SIZE / 2` up to (excluding)
//! `size - PATCH_SIZE`, so the last `PATCH_SIZE - PATCH_SIZE / 2` rows and
//! columns of the output never receive a transplant and keep the plain
//! canvas values.

use super::doubling::Doubler;
use super::{scale_linear, ScaleError};
use crate::channels::ChannelImage;
use crate::raster::Image;

/// Side of the square patch that is compared and transplanted.
pub const PATCH_SIZE: usize = 5;

/// Side of the square source window a patch search may cover.
pub const PATCH_SEARCH_SIZE: usize = 11;

const HALF: i32 = (PATCH_SIZE / 2) as i32;

/// Number of candidate offsets on each side of the projected centre.
const FREEDOM: i32 = ((PATCH_SEARCH_SIZE - PATCH_SEARCH_SIZE / 2) - (PATCH_SIZE - PATCH_SIZE / 2)) as i32;

/// Self-similarity super-resolution scaler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelfSimScaler;

impl SelfSimScaler {
    /// Split `src` into its low and high frequency bands.
    ///
    /// `low + high` reproduces `src` exactly.
    pub fn split_bands(src: &Image) -> Result<(ChannelImage, ChannelImage), ScaleError> {
        let (w, h) = src.dimensions();
        let half = scale_linear(src, w / 2, h / 2)?;
        let low = ChannelImage::from(&scale_linear(&half, w, h)?);
        let high = ChannelImage::subtract(&ChannelImage::from(src), &low);
        Ok((low, high))
    }
}

impl Doubler for SelfSimScaler {
    fn name(&self) -> &'static str {
        "SelfSim"
    }

    /// The half-size low band must have at least one pixel.
    fn min_source(&self) -> (u32, u32) {
        (2, 2)
    }

    fn double(&self, src: &Image) -> Result<Image, ScaleError> {
        let (w, h) = src.dimensions();
        let (low, high) = Self::split_bands(src)?;

        let canvas = ChannelImage::from(&scale_linear(src, w * 2, h * 2)?);
        let mut detail = ChannelImage::zeros(canvas.width(), canvas.height());

        let large_w = canvas.width() as i32;
        let large_h = canvas.height() as i32;
        for x in HALF..large_w - PATCH_SIZE as i32 {
            for y in HALF..large_h - PATCH_SIZE as i32 {
                if let Some((bx, by)) = locate_best_patch(&low, &canvas, x, y) {
                    apply_patch(&high, bx, by, &mut detail, x, y);
                }
            }
        }

        detail.divide((PATCH_SIZE * PATCH_SIZE) as i32);

        Ok(ChannelImage::add(&canvas, &detail).to_image())
    }
}

/// Sum of absolute channel differences between the patch centred at
/// `(sx, sy)` in `small` and the one centred at `(lx, ly)` in `large`.
fn diff_patch(small: &ChannelImage, sx: i32, sy: i32, large: &ChannelImage, lx: i32, ly: i32) -> i32 {
    let small_stride = small.width() as usize;
    let large_stride = large.width() as usize;
    let small_origin = (sx - HALF) as usize + small_stride * (sy - HALF) as usize;
    let large_origin = (lx - HALF) as usize + large_stride * (ly - HALF) as usize;

    let mut total = 0;
    for row in 0..PATCH_SIZE {
        for col in 0..PATCH_SIZE {
            let s = small_origin + row * small_stride + col;
            let l = large_origin + row * large_stride + col;
            total += (large.red[l] - small.red[s]).abs()
                + (large.green[l] - small.green[s]).abs()
                + (large.blue[l] - small.blue[s]).abs();
        }
    }
    total
}

/// Find the source patch centre that best matches the canvas patch at
/// `(lx, ly)`.
///
/// Candidates are scanned x-outer, y-inner; the first lowest score wins.
/// Returns `None` when no candidate patch fits inside `small`.
fn locate_best_patch(small: &ChannelImage, large: &ChannelImage, lx: i32, ly: i32) -> Option<(i32, i32)> {
    let start_x = lx / 2 - FREEDOM;
    let start_y = ly / 2 - FREEDOM;
    let small_w = small.width() as i32;
    let small_h = small.height() as i32;

    let mut best: Option<(i32, i32, i32)> = None;
    for sx in start_x..start_x + 2 * FREEDOM {
        if sx - HALF < 0 || sx + HALF >= small_w {
            continue;
        }
        for sy in start_y..start_y + 2 * FREEDOM {
            if sy - HALF < 0 || sy + HALF >= small_h {
                continue;
            }

            let score = diff_patch(small, sx, sy, large, lx, ly);
            if best.map_or(true, |(_, _, min)| score < min) {
                best = Some((sx, sy, score));
            }
        }
    }

    best.map(|(sx, sy, _)| (sx, sy))
}

/// Add the patch centred at `(sx, sy)` in `src` onto the one centred at
/// `(lx, ly)` in `dst`.
fn apply_patch(src: &ChannelImage, sx: i32, sy: i32, dst: &mut ChannelImage, lx: i32, ly: i32) {
    let src_stride = src.width() as usize;
    let dst_stride = dst.width() as usize;
    let src_origin = (sx - HALF) as usize + src_stride * (sy - HALF) as usize;
    let dst_origin = (lx - HALF) as usize + dst_stride * (ly - HALF) as usize;

    for row in 0..PATCH_SIZE {
        for col in 0..PATCH_SIZE {
            let s = src_origin + row * src_stride + col;
            let d = dst_origin + row * dst_stride + col;
            dst.red[d] += src.red[s];
            dst.green[d] += src.green[s];
            dst.blue[d] += src.blue[s];
        }
    }
}
