use std::ops::Range;

/// Channels per pixel in every tensor built here.
pub const CHANNELS: usize = 3;

/// A dense `[batch, height, width, channel]` tensor of `f32`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl BatchTensor {
    /// An all-zero tensor of the provided shape.
    pub fn zeros(shape: [usize; 4]) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.iter().product()],
        }
    }

    /// The full shape, batch dimension first.
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// Number of batch slots.
    pub fn batch_size(&self) -> usize {
        self.shape[0]
    }

    /// The shape of one batch element.
    pub fn element_shape(&self) -> &[usize] {
        &self.shape[1..]
    }

    /// Number of values in one batch element.
    #[inline]
    pub fn element_len(&self) -> usize {
        self.shape[1..].iter().product()
    }

    /// The value at `[index, y, x, channel]`.
    pub fn get(&self, index: usize, y: usize, x: usize, channel: usize) -> Option<f32> {
        let [n, h, w, c] = self.shape;
        if index >= n || y >= h || x >= w || channel >= c {
            return None;
        }

        Some(self.data[((index * h + y) * w + x) * c + channel])
    }

    /// A view of batch element `index`.
    #[inline]
    pub fn slot(&self, index: usize) -> &[f32] {
        &self.data[self.slot_range(index)]
    }

    /// A mutable view of batch element `index`.
    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut [f32] {
        let range = self.slot_range(index);
        &mut self.data[range]
    }

    /// All values in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn slot_range(&self, index: usize) -> Range<usize> {
        let count = self.element_len();
        index * count..(index + 1) * count
    }
}
