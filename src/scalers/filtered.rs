//! Reference resampling filters from the `image` crate.
//!
//! These give the comparison a familiar baseline next to the bespoke
//! algorithms. They accept any positive source size.

use crate::raster::Image;
use image::imageops::{self, FilterType};

/// A resampling filter implemented by [`image::imageops::resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Nearest,
    /// Catmull-Rom cubic
    Cubic,
    /// Lanczos with window 3
    Lanczos,
}

impl FilterKind {
    fn filter_type(self) -> FilterType {
        match self {
            FilterKind::Nearest => FilterType::Nearest,
            FilterKind::Cubic => FilterType::CatmullRom,
            FilterKind::Lanczos => FilterType::Lanczos3,
        }
    }

    /// Resample `src` to `dst_w x dst_h`.
    ///
    /// Callers validate dimensions first; see [`super::Scaler::scale`].
    pub fn resize(self, src: &Image, dst_w: u32, dst_h: u32) -> Image {
        let resized = imageops::resize(&src.to_rgb_image(), dst_w, dst_h, self.filter_type());
        Image::from(resized)
    }
}
