/*!

# Inceptor Core

Turns a set of decoded photographs into the fixed-shape tensor an image
classifier expects, runs the classifier through tract, and resolves the
result to a label.

```no_run
use inceptor_core::prelude::*;
# fn build_inferer() -> Box<dyn Inferer> { unimplemented!() }
# fn main() -> Result<(), Box<dyn std::error::Error>> {
let normalizer = Normalizer::default();
let mut batch = BatchAssembler::new(DEFAULT_CAPACITY, 224, 224);

let grid = load_grid("photo.jpg".as_ref(), 224, 224)?;
batch.append(normalizer.normalize(&grid)?)?;

let mut inferer = build_inferer();
let scores = invoker::run(inferer.as_mut(), batch.assemble()?, "input", "output")?;

let labels = LabelTable::load("labels.txt".as_ref())?;
let best = best_label(scores.row(0).unwrap(), &labels)?;
println!("{}", best);
# Ok(())
# }
```

 */

#![warn(rust_2018_idioms)]

pub use tract_core;
pub use tract_hir;

pub mod batch;
pub mod decode;
pub mod error;
pub mod grid;
pub mod inferer;
pub mod invoker;
pub mod labels;
mod model_api;
pub mod normalize;
pub mod pixel;

/// Most core utilities are re-exported here.
pub mod prelude {
    pub use super::batch::{BatchAssembler, BatchTensor, DEFAULT_CAPACITY};
    pub use super::decode::load_grid;
    pub use super::error::InceptorError;
    pub use super::grid::PixelGrid;
    pub use super::inferer::{
        Endpoints, Inferer, InfererBuilder, InfererProvider, RawOutput, TractInferer,
    };
    pub use super::invoker::{self, ProbabilityMatrix};
    pub use super::labels::{best_label, BestMatch, LabelTable};
    pub use super::model_api::ModelApi;
    pub use super::normalize::{Normalizer, DEFAULT_SCALE};
    pub use super::pixel::Pixel;
}
