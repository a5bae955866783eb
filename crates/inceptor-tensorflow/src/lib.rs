//! Contains utilities for using inceptor with frozen TensorFlow graphs.
//!
//! A frozen graph is a serialized `GraphDef` (`.pb`) with all variables folded
//! into constants, such as the `inception5h` classifier.

use anyhow::Result;
use inceptor_core::prelude::{Endpoints, InfererBuilder, InfererProvider, TractInferer};
use std::{ffi::OsStr, io::Read, path::Path};
use tract_tensorflow::prelude::*;

pub use tract_tensorflow;

/// Utility function to check if a file name looks like a frozen graph.
pub fn is_frozen_graph(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str) == Some("pb")
}

fn model_for_reader(reader: &mut dyn Read) -> Result<InferenceModel> {
    let tensorflow = tract_tensorflow::tensorflow();
    tensorflow.model_for_read(reader)
}

/// Wrapper for a reader providing a frozen TensorFlow graph.
pub struct TensorflowData<T: Read>(pub T);

impl<T> TensorflowData<T>
where
    T: Read,
{
    fn load(&mut self) -> Result<InferenceModel> {
        model_for_reader(&mut self.0)
    }
}

impl<T> InfererProvider for TensorflowData<T>
where
    T: Read,
{
    fn build(
        mut self,
        endpoints: &Endpoints,
        batch_size: usize,
        element_shape: &[usize],
    ) -> Result<TractInferer> {
        let model = self.load()?;
        log::debug!("imported tensorflow graph with {} nodes", model.nodes().len());
        TractInferer::from_model(model, endpoints, batch_size, element_shape)
    }
}

/// Utility function for creating an [`InfererBuilder`] for [`TensorflowData`].
pub fn builder<T: Read>(read: T) -> InfererBuilder<TensorflowData<T>> {
    InfererBuilder::new(TensorflowData(read))
}
