/*!
Errors produced while preparing a batch and resolving its result.
*/

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can be returned by Inceptor Core.
#[derive(Error, Debug)]
pub enum InceptorError {
    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("image contains no pixels")]
    EmptyImage,

    #[error("batch is full, capacity is {capacity}")]
    BatchOverflow { capacity: usize },

    #[error("division by zero")]
    DivideByZero,

    #[error("graph has no usable endpoint named {0:?}")]
    GraphBinding(String),

    #[error("inference execution failed: {0}")]
    InferenceExecution(anyhow::Error),

    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InceptorError {
    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

/// Result alias used throughout the core crate.
pub type Result<T, E = InceptorError> = std::result::Result<T, E>;
