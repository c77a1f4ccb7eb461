//! Data-dependent triangulation (DDT) scaler.
//!
//! Each 2x2 block of source pixels is split into two triangles along one of
//! its diagonals. The diagonal is chosen from brightness: the pair of corners
//! that are most alike stays connected, so interpolation runs along an edge
//! instead of across it.
//!
//! ```text
//!   slash (/)        backslash (\)
//!   NW---NE          NW---NE
//!   |   / |          | \   |
//!   |  /  |          |  \  |
//!   | /   |          |   \ |
//!   SW---SE          SW---SE
//! ```
//!
//! # Algorithm
//!
//! 1. Classify every block: backslash if `|L(nw) - L(se)| < |L(ne) - L(sw)|`,
//!    otherwise slash (ties resolve to slash).
//! 2. One majority pass over a snapshot of the map: an interior block with
//!    more than four slash neighbours becomes slash, fewer becomes
//!    backslash, exactly four keeps its own value.
//! 3. Sample each destination pixel inside its block's triangle with a
//!    three-corner blend.

use super::linear::source_coord;
use super::{check_dimensions, check_min_source, ScaleError};
use crate::color::{clamp_channel_f32, luminance};
use crate::raster::Image;
use image::Rgb;

/// Diagonal orientation map over the 2x2 blocks of one source image.
///
/// Built fresh by every [`DdtScaler::scale`] call and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    width: usize,
    height: usize,
    slash: Vec<bool>,
}

impl EdgeMap {
    /// Classify every 2x2 block of `src` by luminance.
    ///
    /// The map is `(w - 1) x (h - 1)`; a source narrower or shorter than two
    /// pixels yields an empty map.
    pub fn classify(src: &Image) -> Self {
        let width = (src.width() as usize).saturating_sub(1);
        let height = (src.height() as usize).saturating_sub(1);
        let mut slash = Vec::with_capacity(width * height);

        for j in 0..height as i32 {
            for i in 0..width as i32 {
                let lnw = luminance(src.get_pixel(i, j)) as i32;
                let lne = luminance(src.get_pixel(i + 1, j)) as i32;
                let lse = luminance(src.get_pixel(i + 1, j + 1)) as i32;
                let lsw = luminance(src.get_pixel(i, j + 1)) as i32;

                slash.push((lnw - lse).abs() >= (lne - lsw).abs());
            }
        }

        Self { width, height, slash }
    }

    /// Apply one neighbourhood-majority pass.
    ///
    /// Reads from a snapshot so updates never feed into later cells. Cells in
    /// the first row/column and the last two rows/columns are left as-is.
    pub fn smooth(&mut self) {
        let snapshot = self.slash.clone();
        let w = self.width;

        for j in 1..self.height.saturating_sub(2) {
            for i in 1..self.width.saturating_sub(2) {
                let mut slash_count = 0;
                for nj in j - 1..=j + 1 {
                    for ni in i - 1..=i + 1 {
                        if (ni, nj) != (i, j) && snapshot[ni + nj * w] {
                            slash_count += 1;
                        }
                    }
                }

                let idx = i + j * w;
                self.slash[idx] = match slash_count {
                    4 => snapshot[idx],
                    n if n > 4 => true,
                    _ => false,
                };
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if block `(i, j)` is split along the slash diagonal.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is outside the map.
    pub fn is_slash(&self, i: usize, j: usize) -> bool {
        assert!(i < self.width && j < self.height, "edge cell ({i}, {j}) out of range");
        self.slash[i + j * self.width]
    }
}

/// Edge-directed triangulation scaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdtScaler {
    /// Run the majority pass over the edge map before sampling.
    pub smoothing: bool,
}

impl Default for DdtScaler {
    fn default() -> Self {
        Self { smoothing: true }
    }
}

impl DdtScaler {
    /// Smallest source the triangulation can work on.
    pub const MIN_SOURCE: (u32, u32) = (2, 2);

    pub fn new(smoothing: bool) -> Self {
        Self { smoothing }
    }

    /// Build the (optionally smoothed) edge map this scaler would use.
    pub fn edge_map(&self, src: &Image) -> Result<EdgeMap, ScaleError> {
        check_min_source("DDT", src, Self::MIN_SOURCE)?;
        let mut edges = EdgeMap::classify(src);
        if self.smoothing {
            edges.smooth();
        }
        Ok(edges)
    }

    /// Scale `src` to `dst_w x dst_h`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidDimensions`] for zero dimensions and
    /// [`ScaleError::SourceTooSmall`] for sources under 2x2 (unless the
    /// destination equals the source size, which is a plain copy).
    pub fn scale(&self, src: &Image, dst_w: u32, dst_h: u32) -> Result<Image, ScaleError> {
        check_dimensions(src, dst_w, dst_h)?;
        if src.dimensions() == (dst_w, dst_h) {
            return Ok(src.clone());
        }

        let edges = self.edge_map(src)?;
        let mut out = Image::new(dst_w, dst_h);

        for j in 0..dst_h {
            for i in 0..dst_w {
                let sif = source_coord(i, src.width(), dst_w) + 0.5;
                let sjf = source_coord(j, src.height(), dst_h) + 0.5;
                out.set_pixel(i as i32, j as i32, sample(src, &edges, sif, sjf));
            }
        }

        Ok(out)
    }
}

/// Split a pixel-center coordinate into the top-left corner of its block and
/// the offset within that block, in `[0, 1)`.
#[inline]
fn split_cell(s: f32) -> (i32, f32) {
    let base = s.floor();
    let frac = s - base;
    if frac < 0.5 {
        (base as i32 - 1, frac + 0.5)
    } else {
        (base as i32, frac - 0.5)
    }
}

/// Sample the triangulated surface at source position `(sif, sjf)`.
fn sample(src: &Image, edges: &EdgeMap, sif: f32, sjf: f32) -> Rgb<u8> {
    let (si, u) = split_cell(sif);
    let (sj, v) = split_cell(sjf);

    let ei = si.clamp(0, edges.width() as i32 - 1) as usize;
    let ej = sj.clamp(0, edges.height() as i32 - 1) as usize;

    if edges.is_slash(ei, ej) {
        sample_slash(src, si, sj, u, v)
    } else {
        sample_backslash(src, si, sj, u, v)
    }
}

fn sample_slash(src: &Image, i: i32, j: i32, u: f32, v: f32) -> Rgb<u8> {
    if u + v <= 1.0 {
        // upper-left triangle: NW, NE, SW
        let a = src.get_pixel(i, j);
        let b = src.get_pixel(i + 1, j);
        let c = src.get_pixel(i, j + 1);
        mix3(a, b, c, u, v)
    } else {
        // lower-right triangle: SE, SW, NE
        let a = src.get_pixel(i + 1, j + 1);
        let b = src.get_pixel(i, j + 1);
        let c = src.get_pixel(i + 1, j);
        mix3(a, b, c, 1.0 - u, 1.0 - v)
    }
}

fn sample_backslash(src: &Image, i: i32, j: i32, u: f32, v: f32) -> Rgb<u8> {
    if u >= v {
        // upper-right triangle: NE, NW, SE
        let a = src.get_pixel(i + 1, j);
        let b = src.get_pixel(i, j);
        let c = src.get_pixel(i + 1, j + 1);
        mix3(a, b, c, 1.0 - u, v)
    } else {
        // lower-left triangle: SW, SE, NW
        let a = src.get_pixel(i, j + 1);
        let b = src.get_pixel(i + 1, j + 1);
        let c = src.get_pixel(i, j);
        mix3(a, b, c, u, 1.0 - v)
    }
}

/// Blend three corners of a triangle.
///
/// `a` is the right-angle corner, `b` lies along `u` and `c` along `v`.
/// `b` carries weight `u`, the rest is split between `a` and `c` by `v`.
#[inline]
fn mix3(a: Rgb<u8>, b: Rgb<u8>, c: Rgb<u8>, u: f32, v: f32) -> Rgb<u8> {
    let omu = 1.0 - u;
    let omv = 1.0 - v;
    let channel = |k: usize| {
        let (ak, bk, ck) = (a.0[k] as f32, b.0[k] as f32, c.0[k] as f32);
        let top = ak * omu + bk * u;
        let bottom = ck * omu + bk * u;
        clamp_channel_f32(top * omv + bottom * v)
    };
    Rgb([channel(0), channel(1), channel(2)])
}
