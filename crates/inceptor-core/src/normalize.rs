/*!
Per-image centering and scaling.

Each image is centered on its own rounded mean rather than a fixed
dataset-wide mean, then scaled so raw `0..=255` channels land roughly in
`[-1, 1]`.
*/

use crate::{
    error::{InceptorError, Result},
    grid::PixelGrid,
};

/// Scale applied to centered 8-bit channels.
pub const DEFAULT_SCALE: f32 = 255.0;

/// Centers a grid on its rounded mean pixel and divides by a fixed scale.
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    scale: f32,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

impl Normalizer {
    /// Create a normalizer dividing by `scale`.
    ///
    /// # Errors
    ///
    /// [`InceptorError::DivideByZero`] if `scale` is zero.
    pub fn new(scale: f32) -> Result<Self> {
        if scale == 0.0 {
            return Err(InceptorError::DivideByZero);
        }

        Ok(Self { scale })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Produce the normalized copy of `grid`, same dimensions.
    ///
    /// # Errors
    ///
    /// [`InceptorError::EmptyImage`] if the grid has no pixels.
    pub fn normalize(&self, grid: &PixelGrid) -> Result<PixelGrid> {
        let mean = grid.mean()?.round();
        log::trace!("centering {:?} grid on {:?}", grid.dims(), mean);

        grid.subtract(mean).scalar_divide(self.scale)
    }
}
