/*!
A decoded, resized image as a row-major grid of [`Pixel`]s.
*/

use crate::{
    error::{InceptorError, Result},
    pixel::Pixel,
};
use image::RgbImage;

/// An ordered 2-D container of pixels, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Create a grid from row-major `pixels`.
    ///
    /// # Errors
    ///
    /// [`InceptorError::ShapeMismatch`] if `pixels` doesn't hold exactly `width * height` elements.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(InceptorError::shape_mismatch(
                &[height, width],
                &[pixels.len()],
            ));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// A grid where every cell holds `pixel`.
    pub fn uniform(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Convert an 8-bit RGB image; channel values stay in `0..=255`.
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let pixels = image.pixels().map(|p| Pixel::from_rgb8(p.0)).collect();

        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `[height, width]`, the order used in tensors.
    pub fn dims(&self) -> [usize; 2] {
        [self.height, self.width]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[y * self.width + x])
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> + '_ {
        // chunks(0) panics; a zero-width grid has no rows worth visiting.
        self.pixels.chunks(self.width.max(1))
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Arithmetic mean over every cell.
    ///
    /// # Errors
    ///
    /// [`InceptorError::EmptyImage`] if the grid has no pixels.
    pub fn mean(&self) -> Result<Pixel> {
        if self.pixels.is_empty() {
            return Err(InceptorError::EmptyImage);
        }

        let (r, g, b) = self.pixels.iter().fold((0f64, 0f64, 0f64), |acc, p| {
            (
                acc.0 + f64::from(p.r),
                acc.1 + f64::from(p.g),
                acc.2 + f64::from(p.b),
            )
        });

        let count = self.pixels.len() as f64;
        Ok(Pixel::new(
            (r / count) as f32,
            (g / count) as f32,
            (b / count) as f32,
        ))
    }

    /// Subtract `pixel` from every cell.
    pub fn subtract(&self, pixel: Pixel) -> Self {
        self.map(|p| p - pixel)
    }

    /// Divide every cell by `scalar`.
    ///
    /// # Errors
    ///
    /// [`InceptorError::DivideByZero`] if `scalar` is zero.
    pub fn scalar_divide(&self, scalar: f32) -> Result<Self> {
        if scalar == 0.0 {
            return Err(InceptorError::DivideByZero);
        }

        Ok(self.map(|p| Pixel::new(p.r / scalar, p.g / scalar, p.b / scalar)))
    }

    fn map(&self, f: impl Fn(Pixel) -> Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }
}
