//! Doubling template for exact-2x operators.
//!
//! Some algorithms are only defined as "make the image exactly twice as large".
//! [`scale_by_doubling`] serves arbitrary destination sizes with them: it
//! applies the doubling step until the working image meets or exceeds the
//! target in both dimensions, then finishes with one [`scale_linear`] pass to
//! the exact requested size.
//!
//! ```text
//! 3x3 --double--> 6x6 --double--> 12x12 --double--> 24x24 --linear--> 20x20
//! ```

use super::{check_dimensions, check_min_source, scale_linear, ScaleError};
use crate::raster::Image;
use log::debug;

/// An algorithm defined as an exact 2x upscale.
pub trait Doubler {
    /// Name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Smallest source the doubling step accepts.
    fn min_source(&self) -> (u32, u32) {
        (1, 1)
    }

    /// Produce an image of exactly `2 * width x 2 * height`.
    fn double(&self, src: &Image) -> Result<Image, ScaleError>;
}

/// Scale `src` to `dst_w x dst_h` by repeated doubling plus a final resize.
///
/// # Errors
///
/// Returns [`ScaleError::InvalidDimensions`] for zero dimensions and
/// [`ScaleError::SourceTooSmall`] when `src` is below the doubler's minimum.
pub fn scale_by_doubling<D: Doubler + ?Sized>(
    doubler: &D,
    src: &Image,
    dst_w: u32,
    dst_h: u32,
) -> Result<Image, ScaleError> {
    check_dimensions(src, dst_w, dst_h)?;
    if src.dimensions() == (dst_w, dst_h) {
        return Ok(src.clone());
    }
    check_min_source(doubler.name(), src, doubler.min_source())?;

    let mut current = src.clone();
    let mut steps = 0u32;
    while current.width() < dst_w || current.height() < dst_h {
        current = doubler.double(&current)?;
        steps += 1;
    }

    debug!(
        "{}: {} doubling step(s) reached {}x{}, resizing to {}x{}",
        doubler.name(),
        steps,
        current.width(),
        current.height(),
        dst_w,
        dst_h
    );

    scale_linear(&current, dst_w, dst_h)
}
