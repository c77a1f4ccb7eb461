//! Planar wide-integer channel decomposition
//!
//! A [`ChannelImage`] splits an [`Image`] into three signed `i32` planes so
//! frequency bands can be subtracted, accumulated and averaged without
//! saturating at 8 bits. Results are folded back into an [`Image`] by
//! clamping each channel to `0..=255`.

use crate::color::clamp_channel_i32;
use crate::raster::Image;
use image::Rgb;

/// Three equally sized planes of signed channel values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelImage {
    width: u32,
    height: u32,
    pub(crate) red: Vec<i32>,
    pub(crate) green: Vec<i32>,
    pub(crate) blue: Vec<i32>,
}

impl ChannelImage {
    /// Zero-filled planes of the given size.
    pub fn zeros(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Planes where every channel value is `v`.
    pub fn filled(width: u32, height: u32, v: i32) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, red: vec![v; len], green: vec![v; len], blue: vec![v; len] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn red(&self) -> &[i32] {
        &self.red
    }

    pub fn green(&self) -> &[i32] {
        &self.green
    }

    pub fn blue(&self) -> &[i32] {
        &self.blue
    }

    /// Number of samples per plane.
    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Elementwise `a + b`.
    ///
    /// If the two differ in width or height the result is a copy of `a`.
    pub fn add(a: &ChannelImage, b: &ChannelImage) -> ChannelImage {
        Self::zip_with(a, b, |x, y| x + y)
    }

    /// Elementwise `a - b`.
    ///
    /// If the two differ in width or height the result is a copy of `a`.
    pub fn subtract(a: &ChannelImage, b: &ChannelImage) -> ChannelImage {
        Self::zip_with(a, b, |x, y| x - y)
    }

    fn zip_with(a: &ChannelImage, b: &ChannelImage, f: impl Fn(i32, i32) -> i32) -> ChannelImage {
        let mut out = a.clone();
        if (a.width, a.height) != (b.width, b.height) {
            return out;
        }
        for (dst, src) in [
            (&mut out.red, &b.red),
            (&mut out.green, &b.green),
            (&mut out.blue, &b.blue),
        ] {
            for (d, &s) in dst.iter_mut().zip(src.iter()) {
                *d = f(*d, s);
            }
        }
        out
    }

    fn for_each_mut(&mut self, f: impl Fn(&mut i32)) {
        self.red.iter_mut().chain(self.green.iter_mut()).chain(self.blue.iter_mut()).for_each(f);
    }

    /// Add `v` to every channel value.
    pub fn add_scalar(&mut self, v: i32) {
        self.for_each_mut(|c| *c += v);
    }

    /// Subtract `v` from every channel value.
    pub fn subtract_scalar(&mut self, v: i32) {
        self.add_scalar(-v);
    }

    /// Multiply every channel value by `v`.
    pub fn multiply(&mut self, v: i32) {
        self.for_each_mut(|c| *c *= v);
    }

    /// Divide every channel value by `v`, truncating toward zero.
    ///
    /// # Panics
    ///
    /// Panics if `v` is zero.
    pub fn divide(&mut self, v: i32) {
        self.for_each_mut(|c| *c /= v);
    }

    /// Set every channel value to `v`.
    pub fn assign(&mut self, v: i32) {
        self.for_each_mut(|c| *c = v);
    }

    /// Fold the planes back into 8-bit pixels, clamping to `0..=255`.
    pub fn to_image(&self) -> Image {
        let pixels = self
            .red
            .iter()
            .zip(&self.green)
            .zip(&self.blue)
            .map(|((&r, &g), &b)| {
                Rgb([clamp_channel_i32(r), clamp_channel_i32(g), clamp_channel_i32(b)])
            })
            .collect();
        // Plane length always equals width * height
        Image::from_pixels(self.width, self.height, pixels).unwrap_or_default()
    }
}

impl From<&Image> for ChannelImage {
    fn from(img: &Image) -> Self {
        let pixels = img.pixels();
        Self {
            width: img.width(),
            height: img.height(),
            red: pixels.iter().map(|p| i32::from(p.0[0])).collect(),
            green: pixels.iter().map(|p| i32::from(p.0[1])).collect(),
            blue: pixels.iter().map(|p| i32::from(p.0[2])).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        let mut img = Image::new(3, 2);
        img.set_pixel(0, 0, Rgb([1, 2, 3]));
        img.set_pixel(2, 1, Rgb([250, 128, 0]));
        img
    }

    #[test]
    fn test_round_trip_is_exact() {
        let img = sample();
        let channels = ChannelImage::from(&img);
        assert_eq!(channels.len(), 6);
        assert_eq!(channels.to_image(), img);
    }

    #[test]
    fn test_add_and_subtract() {
        let a = ChannelImage::from(&sample());
        let b = ChannelImage::filled(3, 2, 10);
        let sum = ChannelImage::add(&a, &b);
        assert_eq!(sum.red[0], 11);
        assert_eq!(sum.blue[5], 10);
        let diff = ChannelImage::subtract(&sum, &b);
        assert_eq!(diff, a);
    }

    #[test]
    fn test_mismatched_geometry_is_identity() {
        let a = ChannelImage::filled(2, 2, 5);
        let b = ChannelImage::filled(3, 3, 1);
        assert_eq!(ChannelImage::add(&a, &b), a);
        assert_eq!(ChannelImage::subtract(&a, &b), a);

        // Same sample count, different shape
        let tall = ChannelImage::filled(2, 3, 5);
        let wide = ChannelImage::filled(3, 2, 1);
        assert_eq!(ChannelImage::add(&tall, &wide), tall);
        assert_eq!(ChannelImage::subtract(&tall, &wide).red(), &[5; 6]);
    }

    #[test]
    fn test_plane_accessors() {
        let c = ChannelImage::from(&sample());
        assert_eq!(c.red()[0], 1);
        assert_eq!(c.green()[0], 2);
        assert_eq!(c.blue()[5], 0);
        assert_eq!(c.red().len(), c.width() as usize * c.height() as usize);
    }

    #[test]
    fn test_scalar_ops() {
        let mut c = ChannelImage::zeros(2, 1);
        c.add_scalar(7);
        assert_eq!(c.green, vec![7, 7]);
        c.multiply(3);
        assert_eq!(c.red, vec![21, 21]);
        c.subtract_scalar(1);
        c.divide(4);
        assert_eq!(c.blue, vec![5, 5]);
        c.assign(-9);
        assert_eq!(c.red, vec![-9, -9]);
    }

    #[test]
    fn test_divide_truncates_toward_zero() {
        let mut c = ChannelImage::filled(1, 1, -7);
        c.divide(2);
        assert_eq!(c.red[0], -3);
    }

    #[test]
    fn test_to_image_clamps() {
        let mut c = ChannelImage::filled(1, 1, 300);
        c.blue[0] = -20;
        let img = c.to_image();
        assert_eq!(img.get_pixel(0, 0), Rgb([255, 255, 0]));
    }
}
