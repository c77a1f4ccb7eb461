//! Fixed-size RGB raster with border-clamped sampling
//!
//! [`Image`] is the value every scaler consumes and produces. Reads outside
//! the image are clamped to the nearest edge pixel (never wrapped), writes
//! outside the image are ignored.

use crate::color::BLACK;
use image::{Rgb, RgbImage};

/// A row-major RGB image with origin at the top-left corner.
///
/// The pixel buffer always holds exactly `width * height` entries. Cloning
/// performs a full copy of the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgb<u8>>,
}

impl Image {
    /// Create a black image of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, BLACK)
    }

    /// Create an image where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgb<u8>) -> Self {
        Self { width, height, pixels: vec![color; width as usize * height as usize] }
    }

    /// Build an image from a row-major pixel vector.
    ///
    /// Returns `None` when the vector length does not match `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb<u8>>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major view of the pixel buffer.
    pub fn pixels(&self) -> &[Rgb<u8>] {
        &self.pixels
    }

    /// Read a pixel, clamping out-of-range coordinates to the border.
    ///
    /// An empty image has no border to clamp to and reads as black.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgb<u8> {
        if self.is_empty() {
            return BLACK;
        }
        let cx = x.clamp(0, self.width as i32 - 1) as usize;
        let cy = y.clamp(0, self.height as i32 - 1) as usize;
        self.pixels[cx + self.width as usize * cy]
    }

    /// Write a pixel. Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb<u8>) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = x as usize + self.width as usize * y as usize;
        self.pixels[idx] = color;
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Rgb<u8>) {
        self.pixels.fill(color);
    }

    /// Read every coordinate of `self` from `other` using clamped sampling.
    ///
    /// Coordinates beyond `other`'s extent repeat its edge pixels. An empty
    /// `other` leaves `self` untouched.
    pub fn copy_from(&mut self, other: &Image) {
        if other.is_empty() {
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.set_pixel(x, y, other.get_pixel(x, y));
            }
        }
    }

    /// Change the width, keeping pixels at matching coordinates.
    pub fn set_width(&mut self, width: u32) {
        self.set_size(width, self.height);
    }

    /// Change the height, keeping pixels at matching coordinates.
    pub fn set_height(&mut self, height: u32) {
        self.set_size(self.width, height);
    }

    /// Change both dimensions, keeping pixels at matching coordinates.
    ///
    /// The old content is snapshotted, the buffer reallocated black, and the
    /// snapshot copied back with border clamping.
    pub fn set_size(&mut self, width: u32, height: u32) {
        let snapshot = std::mem::take(self);
        *self = Image::new(width, height);
        self.copy_from(&snapshot);
    }

    /// Convert into an `image` crate buffer for encoding.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width, self.height);
        for (dst, src) in out.pixels_mut().zip(self.pixels.iter()) {
            *dst = *src;
        }
        out
    }
}

impl From<&RgbImage> for Image {
    fn from(img: &RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height, pixels: img.pixels().copied().collect() }
    }
}

impl From<RgbImage> for Image {
    fn from(img: RgbImage) -> Self {
        Image::from(&img)
    }
}
