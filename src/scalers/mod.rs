//! Image upscaling engines
//!
//! Every scaler satisfies the same contract: `scale(src, width, height)`
//! produces a new [`Image`] of exactly `width x height`, or fails with a
//! [`ScaleError`] before producing anything.
//!
//! # Module Structure
//!
//! - [`linear`] - Baseline separable bilinear resize, shared by the others
//! - [`doubling`] - Template that lifts an exact-2x operator to any size
//! - [`ddt`] - Edge-directed triangulation
//! - [`eep`] - Edge-enhancing parity averaging (a doubling step)
//! - [`selfsim`] - Self-similarity super-resolution (a doubling step)
//! - [`filtered`] - Resampling filters delegated to the `image` crate

pub mod ddt;
pub mod doubling;
pub mod eep;
pub mod filtered;
pub mod linear;
pub mod selfsim;

pub use ddt::{DdtScaler, EdgeMap};
pub use doubling::{scale_by_doubling, Doubler};
pub use eep::EepScaler;
pub use filtered::FilterKind;
pub use linear::scale_linear;
pub use selfsim::SelfSimScaler;

use crate::raster::Image;
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a scale call is rejected.
///
/// Both variants are bad-argument failures: no output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    /// A source or destination dimension was zero
    #[error("invalid dimensions: source {src_width}x{src_height}, destination {dst_width}x{dst_height} (all must be positive)")]
    InvalidDimensions { src_width: u32, src_height: u32, dst_width: u32, dst_height: u32 },
    /// The source is smaller than the algorithm's minimum window
    #[error("{scaler} needs a source of at least {min_width}x{min_height}, got {width}x{height}")]
    SourceTooSmall { scaler: &'static str, width: u32, height: u32, min_width: u32, min_height: u32 },
}

impl ScaleError {
    /// Returns true for failures caused by the caller's arguments.
    pub fn is_bad_argument(&self) -> bool {
        matches!(self, ScaleError::InvalidDimensions { .. } | ScaleError::SourceTooSmall { .. })
    }
}

/// Reject zero-sized sources or destinations.
pub(crate) fn check_dimensions(src: &Image, dst_w: u32, dst_h: u32) -> Result<(), ScaleError> {
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 || dst_w == 0 || dst_h == 0 {
        return Err(ScaleError::InvalidDimensions {
            src_width: w,
            src_height: h,
            dst_width: dst_w,
            dst_height: dst_h,
        });
    }
    Ok(())
}

/// Reject sources smaller than `min` in either dimension.
pub(crate) fn check_min_source(
    scaler: &'static str,
    src: &Image,
    min: (u32, u32),
) -> Result<(), ScaleError> {
    let (width, height) = src.dimensions();
    if width < min.0 || height < min.1 {
        return Err(ScaleError::SourceTooSmall {
            scaler,
            width,
            height,
            min_width: min.0,
            min_height: min.1,
        });
    }
    Ok(())
}

/// The available scaler kinds, in registry order.
///
/// | Kind | Method | Arbitrary sizes |
/// |------|--------|-----------------|
/// | `nearest` | `image` crate nearest neighbour | Yes |
/// | `linear` | Baseline bilinear resize | Yes |
/// | `cubic` | `image` crate Catmull-Rom | Yes |
/// | `lanczos` | `image` crate Lanczos3 | Yes |
/// | `ddt` | Edge-directed triangulation | Yes |
/// | `eep` | Parity averaging, doubled then resized | Via doubling |
/// | `selfsim` | Patch transplant, doubled then resized | Via doubling |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScalerKind {
    /// Nearest neighbour resampling
    Nearest,
    /// Separable bilinear resampling
    Linear,
    /// Catmull-Rom bicubic resampling
    Cubic,
    /// Lanczos (a = 3) resampling
    Lanczos,
    /// Data-dependent triangulation along detected diagonals
    Ddt,
    /// Edge-enhancing parity averaging
    Eep,
    /// Self-similarity super-resolution
    #[serde(rename = "selfsim")]
    #[value(name = "selfsim")]
    SelfSim,
}

impl ScalerKind {
    /// Every kind in registry order.
    pub const ALL: [ScalerKind; 7] = [
        ScalerKind::Nearest,
        ScalerKind::Linear,
        ScalerKind::Cubic,
        ScalerKind::Lanczos,
        ScalerKind::Ddt,
        ScalerKind::Eep,
        ScalerKind::SelfSim,
    ];

    /// Human-facing name, also used in output file names.
    ///
    /// # Examples
    ///
    /// ```
    /// use scalecmp::scalers::ScalerKind;
    ///
    /// assert_eq!(ScalerKind::Ddt.display_name(), "DDT");
    /// assert_eq!(ScalerKind::SelfSim.display_name(), "SelfSim");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            ScalerKind::Nearest => "Nearest",
            ScalerKind::Linear => "Linear",
            ScalerKind::Cubic => "Cubic",
            ScalerKind::Lanczos => "Lanczos",
            ScalerKind::Ddt => "DDT",
            ScalerKind::Eep => "EEP",
            ScalerKind::SelfSim => "SelfSim",
        }
    }

    /// Returns true if the kind grows images through repeated 2x steps.
    pub fn is_doubling(&self) -> bool {
        matches!(self, ScalerKind::Eep | ScalerKind::SelfSim)
    }
}

impl std::fmt::Display for ScalerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalerKind::Nearest => write!(f, "nearest"),
            ScalerKind::Linear => write!(f, "linear"),
            ScalerKind::Cubic => write!(f, "cubic"),
            ScalerKind::Lanczos => write!(f, "lanczos"),
            ScalerKind::Ddt => write!(f, "ddt"),
            ScalerKind::Eep => write!(f, "eep"),
            ScalerKind::SelfSim => write!(f, "selfsim"),
        }
    }
}

/// A configured scaler, dispatched by variant.
///
/// Scalers hold no per-image state; scratch buffers such as the DDT edge map
/// live only for the duration of one [`Scaler::scale`] call, so one value can
/// serve many images, including from several threads at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaler {
    Linear,
    Ddt(DdtScaler),
    Eep(EepScaler),
    SelfSim(SelfSimScaler),
    Filtered(FilterKind),
}

impl Scaler {
    /// The kind this scaler was built from.
    pub fn kind(&self) -> ScalerKind {
        match self {
            Scaler::Linear => ScalerKind::Linear,
            Scaler::Ddt(_) => ScalerKind::Ddt,
            Scaler::Eep(_) => ScalerKind::Eep,
            Scaler::SelfSim(_) => ScalerKind::SelfSim,
            Scaler::Filtered(FilterKind::Nearest) => ScalerKind::Nearest,
            Scaler::Filtered(FilterKind::Cubic) => ScalerKind::Cubic,
            Scaler::Filtered(FilterKind::Lanczos) => ScalerKind::Lanczos,
        }
    }

    /// Scale `src` to exactly `dst_w x dst_h`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidDimensions`] if any dimension is zero and
    /// [`ScaleError::SourceTooSmall`] if the algorithm needs a larger source.
    /// A destination equal to the source size always yields a copy.
    pub fn scale(&self, src: &Image, dst_w: u32, dst_h: u32) -> Result<Image, ScaleError> {
        check_dimensions(src, dst_w, dst_h)?;
        if src.dimensions() == (dst_w, dst_h) {
            return Ok(src.clone());
        }

        debug!(
            "{}: {}x{} -> {}x{}",
            self.kind().display_name(),
            src.width(),
            src.height(),
            dst_w,
            dst_h
        );

        match self {
            Scaler::Linear => scale_linear(src, dst_w, dst_h),
            Scaler::Ddt(ddt) => ddt.scale(src, dst_w, dst_h),
            Scaler::Eep(eep) => scale_by_doubling(eep, src, dst_w, dst_h),
            Scaler::SelfSim(selfsim) => scale_by_doubling(selfsim, src, dst_w, dst_h),
            Scaler::Filtered(filter) => Ok(filter.resize(src, dst_w, dst_h)),
        }
    }
}
