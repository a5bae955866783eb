use crate::config::PipelineConfig;
use anyhow::{bail, Context, Result};
use inceptor_core::prelude::TractInferer;
use std::{fs::File, io::BufReader, path::Path};

/// The serialized graph formats we can load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    /// A frozen TensorFlow `GraphDef`.
    Tensorflow,

    /// An ONNX `ModelProto`.
    Onnx,
}

impl GraphFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if inceptor_tensorflow::is_frozen_graph(path) {
            return Ok(Self::Tensorflow);
        }

        if inceptor_onnx::is_onnx(path) {
            return Ok(Self::Onnx);
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(other) => bail!("unknown graph type {:?}", other),
            None => bail!("missing file extension {:?}", path),
        }
    }
}

/// Load the graph at `path` and bind it the way `config` describes.
pub fn load_inferer(path: &Path, config: &PipelineConfig) -> Result<TractInferer> {
    let format = GraphFormat::from_path(path)?;
    let file = File::open(path).with_context(|| format!("opening graph {:?}", path))?;
    let reader = BufReader::new(file);

    let endpoints = config.endpoints.clone();
    let element_shape = config.element_shape();

    log::info!("loading {:?} graph from {:?}", format, path);
    let inferer = match format {
        GraphFormat::Tensorflow => inceptor_tensorflow::builder(reader)
            .with_endpoints(endpoints)
            .build(config.capacity, &element_shape),
        GraphFormat::Onnx => inceptor_onnx::builder(reader)
            .with_endpoints(endpoints)
            .build(config.capacity, &element_shape),
    };

    inferer.with_context(|| format!("building inferer for {:?}", path))
}
