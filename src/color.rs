//! Packed RGB color helpers
//!
//! Every scaler works on three 8-bit components per pixel. These helpers
//! implement the small amount of per-channel math the scalers share:
//! brightness proxies, distances and integer averages.

use image::Rgb;

/// Opaque black, the fill color for freshly allocated images.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Opaque white.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Relative brightness proxy: the plain sum of the three components.
///
/// This is not a perceptual luma. It only has to order pixels consistently
/// for edge detection, so the full `0..=765` range is kept.
///
/// # Examples
///
/// ```
/// use image::Rgb;
/// use scalecmp::color::luminance;
///
/// assert_eq!(luminance(Rgb([255, 255, 255])), 765);
/// assert_eq!(luminance(Rgb([10, 20, 30])), 60);
/// ```
#[inline]
pub fn luminance(c: Rgb<u8>) -> u32 {
    c.0.iter().map(|&v| u32::from(v)).sum()
}

/// Sum of absolute per-channel differences between two colors.
#[inline]
pub fn diff(a: Rgb<u8>, b: Rgb<u8>) -> u32 {
    a.0.iter().zip(b.0.iter()).map(|(&x, &y)| u32::from(x.abs_diff(y))).sum()
}

/// Per-channel integer average, rounding down.
#[inline]
pub fn average(a: Rgb<u8>, b: Rgb<u8>) -> Rgb<u8> {
    Rgb([
        ((u16::from(a.0[0]) + u16::from(b.0[0])) >> 1) as u8,
        ((u16::from(a.0[1]) + u16::from(b.0[1])) >> 1) as u8,
        ((u16::from(a.0[2]) + u16::from(b.0[2])) >> 1) as u8,
    ])
}

/// Per-channel weighted average in 8.8 fixed point.
///
/// `weight` is the share of `a` out of 256; `b` receives `256 - weight`.
/// Values above 256 are clamped.
#[inline]
pub fn average_weighted(a: Rgb<u8>, b: Rgb<u8>, weight: u32) -> Rgb<u8> {
    let w = weight.min(256);
    let omw = 256 - w;
    let mix = |x: u8, y: u8| ((u32::from(x) * w + u32::from(y) * omw) >> 8) as u8;
    Rgb([mix(a.0[0], b.0[0]), mix(a.0[1], b.0[1]), mix(a.0[2], b.0[2])])
}

/// Clamp a floating point channel value into `0..=255`, truncating.
#[inline]
pub fn clamp_channel_f32(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Clamp a wide integer channel value into `0..=255`.
#[inline]
pub fn clamp_channel_i32(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
