/*!

# Inceptor

Classifies a directory of photographs with a pre-trained image graph in one
batched inference call.

## Inceptor Core

The core crate holds the preprocessing (decode, resize, per-image centering),
the fixed-capacity batch tensor, the tract-backed inferer and the label
resolver.

```no_run
use inceptor::core::prelude::*;

let grid = load_grid("photo.jpg".as_ref(), 224, 224)?;
let normalized = Normalizer::default().normalize(&grid)?;

let mut batch = BatchAssembler::new(DEFAULT_CAPACITY, 224, 224);
batch.append(normalized)?;
let tensor = batch.assemble()?;
# Ok::<(), Box<dyn std::error::Error>>(())
```

## Inceptor TensorFlow and Inceptor ONNX

Thin loaders turning a serialized graph into a bound inferer.

```no_run
# fn load_bytes(s: &str) -> std::io::Cursor<Vec<u8>> { std::io::Cursor::new(vec![]) }
let graph = load_bytes("tensorflow_inception_graph.pb");
let inferer = inceptor::tensorflow::builder(graph).build(5, &[224, 224, 3])?;
# Ok::<(), Box<dyn std::error::Error>>(())
```

## Pipeline

Ties it all together, including fetching the model on first use.

```no_run
use inceptor::{list_images, Pipeline, PipelineConfig};
use inceptor::provision::ModelStore;

let store = ModelStore::new("/data/models");
let mut pipeline = Pipeline::load(PipelineConfig::default(), &store, false)?;

let images = list_images("/data/images".as_ref())?;
for result in pipeline.classify(&images)? {
    println!("{:?}: {}", result.path, result.best);
}
# Ok::<(), Box<dyn std::error::Error>>(())
```

*/

#![warn(rust_2018_idioms)]

pub use inceptor_core as core;
pub use inceptor_onnx as onnx;
pub use inceptor_provision as provision;
pub use inceptor_tensorflow as tensorflow;

mod config;
mod graph;
mod pipeline;

pub use config::{PipelineConfig, DEFAULT_RESOLUTION};
pub use graph::{load_inferer, GraphFormat};
pub use pipeline::{list_images, Classification, Pipeline};
