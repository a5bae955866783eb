/*!
The atomic unit of all numeric work: a single RGB sample.
*/

use crate::error::{InceptorError, Result};
use std::ops::{Add, Sub};

/// A single RGB sample with `f32` channels. Alpha is never carried.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Pixel {
    /// The black pixel, identity for [`Add`].
    pub const ZERO: Pixel = Pixel::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Widen an 8-bit RGB sample; channels end up in `0.0..=255.0`.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(f32::from(rgb[0]), f32::from(rgb[1]), f32::from(rgb[2]))
    }

    /// Channels in tensor order.
    #[inline]
    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Divide every channel by `scalar`.
    ///
    /// # Errors
    ///
    /// [`InceptorError::DivideByZero`] if `scalar` is zero.
    pub fn scalar_divide(self, scalar: f32) -> Result<Self> {
        if scalar == 0.0 {
            return Err(InceptorError::DivideByZero);
        }

        Ok(Self::new(self.r / scalar, self.g / scalar, self.b / scalar))
    }

    /// Round each channel to the nearest integer value, ties away from zero.
    pub fn round(self) -> Self {
        Self::new(self.r.round(), self.g.round(), self.b.round())
    }
}

impl Add for Pixel {
    type Output = Pixel;

    fn add(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Sub for Pixel {
    type Output = Pixel;

    fn sub(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}
