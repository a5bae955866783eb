/*!
Binds an assembled tensor to a graph, runs it once, and reads back the
class scores.
*/

use crate::{
    batch::BatchTensor,
    error::{InceptorError, Result},
    inferer::Inferer,
};

/// Per-slot class scores, shaped `[rows, classes]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityMatrix {
    rows: usize,
    classes: usize,
    data: Vec<f32>,
}

impl ProbabilityMatrix {
    /// Wrap row-major `data`.
    ///
    /// # Errors
    ///
    /// [`InceptorError::ShapeMismatch`] if `data` isn't `rows * classes` long.
    pub fn new(rows: usize, classes: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * classes {
            return Err(InceptorError::ShapeMismatch {
                expected: vec![rows, classes],
                actual: vec![data.len()],
            });
        }

        Ok(Self {
            rows,
            classes,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    /// The probability vector for slot `index`.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }

        Some(&self.data[index * self.classes..(index + 1) * self.classes])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.rows).filter_map(move |idx| self.row(idx))
    }
}

/// Run `inferer` once with `tensor` bound to `input`, reading `output`.
///
/// Trailing output dimensions are flattened into the class axis, so a
/// `[C, 1, 1, K]` output reads the same as `[C, K]`.
///
/// # Errors
///
/// * [`InceptorError::GraphBinding`] if `input` or `output` isn't an endpoint of
///   the graph, or the graph has other inputs that would stay unbound.
/// * [`InceptorError::ShapeMismatch`] if the tensor doesn't match the declared
///   input, or the output batch dimension differs from the tensor's.
/// * [`InceptorError::InferenceExecution`] if the graph fails to execute.
pub fn run(
    inferer: &mut dyn Inferer,
    tensor: BatchTensor,
    input: &str,
    output: &str,
) -> Result<ProbabilityMatrix> {
    let (input_slot, (_, input_shape)) = inferer
        .input_shapes()
        .iter()
        .enumerate()
        .find(|(_, (name, _))| name == input)
        .ok_or_else(|| InceptorError::GraphBinding(input.to_owned()))?;

    if let Some((unbound, _)) = inferer
        .input_shapes()
        .iter()
        .enumerate()
        .find(|(idx, _)| *idx != input_slot)
        .map(|(_, slot)| slot)
    {
        return Err(InceptorError::GraphBinding(unbound.clone()));
    }

    if tensor.element_shape() != input_shape.as_slice() {
        return Err(InceptorError::shape_mismatch(
            input_shape,
            tensor.element_shape(),
        ));
    }

    if tensor.batch_size() != inferer.batch_size() {
        return Err(InceptorError::shape_mismatch(
            &[inferer.batch_size()],
            &[tensor.batch_size()],
        ));
    }

    let output_slot = inferer
        .output_shapes()
        .iter()
        .position(|(name, _)| name == output)
        .ok_or_else(|| InceptorError::GraphBinding(output.to_owned()))?;

    let batch_size = tensor.batch_size();
    log::debug!(
        "running graph on {:?}, binding {:?} -> {:?}",
        tensor.shape(),
        input,
        output
    );

    let mut outputs = inferer
        .infer_raw(vec![tensor])
        .map_err(InceptorError::InferenceExecution)?;

    if output_slot >= outputs.len() {
        return Err(InceptorError::GraphBinding(output.to_owned()));
    }

    let raw = outputs.swap_remove(output_slot);
    let rows = raw.shape.first().copied().unwrap_or(0);
    if rows != batch_size {
        return Err(InceptorError::ShapeMismatch {
            expected: vec![batch_size],
            actual: raw.shape,
        });
    }

    let classes = raw.shape.get(1..).unwrap_or_default().iter().product();
    ProbabilityMatrix::new(rows, classes, raw.data)
}
