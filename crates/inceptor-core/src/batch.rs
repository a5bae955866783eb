/*!
Collects normalized grids and packs them into the fixed-shape tensor the
graph expects.

The tensor is always `[capacity, height, width, 3]` no matter how many grids
were appended; slots past the last appended grid stay zero. Appending past
capacity is an error rather than a silent truncation.
*/

mod tensor;

pub use tensor::{BatchTensor, CHANNELS};

use crate::{
    error::{InceptorError, Result},
    grid::PixelGrid,
};

/// Reference batch capacity.
pub const DEFAULT_CAPACITY: usize = 5;

/// An ordered, bounded collection of grids waiting to be packed.
pub struct BatchAssembler {
    capacity: usize,
    height: usize,
    width: usize,
    grids: Vec<PixelGrid>,
}

impl BatchAssembler {
    /// Create an empty assembler for up to `capacity` grids of `height × width`.
    pub fn new(capacity: usize, height: usize, width: usize) -> Self {
        Self {
            capacity,
            height,
            width,
            grids: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// The shape of the tensor [`Self::assemble`] produces.
    pub fn tensor_shape(&self) -> [usize; 4] {
        [self.capacity, self.height, self.width, CHANNELS]
    }

    /// Add a grid to the next free slot.
    ///
    /// # Errors
    ///
    /// [`InceptorError::BatchOverflow`] if all slots are taken.
    pub fn append(&mut self, grid: PixelGrid) -> Result<()> {
        if self.grids.len() >= self.capacity {
            return Err(InceptorError::BatchOverflow {
                capacity: self.capacity,
            });
        }

        self.grids.push(grid);
        Ok(())
    }

    /// Pack all appended grids into a `[capacity, height, width, 3]` tensor.
    ///
    /// # Errors
    ///
    /// [`InceptorError::ShapeMismatch`] if a grid isn't `height × width`.
    pub fn assemble(self) -> Result<BatchTensor> {
        let expected = [self.height, self.width];
        let mut tensor = BatchTensor::zeros(self.tensor_shape());

        for (index, grid) in self.grids.iter().enumerate() {
            if grid.dims() != expected {
                return Err(InceptorError::shape_mismatch(&expected, &grid.dims()));
            }

            let slot = tensor.slot_mut(index);
            for (cell, pixel) in slot.chunks_exact_mut(CHANNELS).zip(grid.pixels()) {
                cell.copy_from_slice(&pixel.channels());
            }
        }

        log::debug!(
            "assembled {} of {} slots into {:?}",
            self.grids.len(),
            self.capacity,
            tensor.shape()
        );

        Ok(tensor)
    }
}
