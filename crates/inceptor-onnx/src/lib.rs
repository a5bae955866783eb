//! Contains utilities for using inceptor with ONNX.

use anyhow::Result;
use inceptor_core::prelude::{Endpoints, InfererBuilder, InfererProvider, TractInferer};
use std::{ffi::OsStr, io::Read, path::Path};
use tract_onnx::prelude::*;

pub use tract_onnx;

/// Utility function to check if a file name is `.onnx`.
pub fn is_onnx(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str) == Some("onnx")
}

fn model_for_reader(reader: &mut dyn Read) -> Result<InferenceModel> {
    let onnx = tract_onnx::onnx();
    onnx.model_for_read(reader)
}

/// Wrapper for a reader providing ONNX data.
pub struct OnnxData<T: Read>(pub T);

impl<T> OnnxData<T>
where
    T: Read,
{
    fn load(&mut self) -> Result<InferenceModel> {
        model_for_reader(&mut self.0)
    }
}

impl<T> InfererProvider for OnnxData<T>
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
        log::debug!("imported onnx graph with {} nodes", model.nodes().len());
        TractInferer::from_model(model, endpoints, batch_size, element_shape)
    }
}

/// Utility function for creating an [`InfererBuilder`] for [`OnnxData`].
pub fn builder<T: Read>(read: T) -> InfererBuilder<OnnxData<T>> {
    InfererBuilder::new(OnnxData(read))
}
