/*!
Inferers wrap an executable graph behind a small object-safe API.

The pipeline only ever talks to [`Inferer`]; the concrete [`TractInferer`] is
built by the format crates through an [`InfererProvider`], which lets tests
and callers substitute their own graphs.

An inferer is built for one fixed batch size. Tensors handed to
[`Inferer::infer_raw`] are expected to carry exactly that many slots.
*/

mod tract;

pub use self::tract::TractInferer;

use crate::batch::BatchTensor;
use anyhow::Result;

/// Input endpoint name used by the reference graph.
pub const DEFAULT_INPUT: &str = "input";

/// Output endpoint name used by the reference graph.
pub const DEFAULT_OUTPUT: &str = "output";

/// The named endpoints a graph is bound through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub input: String,
    pub output: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.to_owned(),
            output: DEFAULT_OUTPUT.to_owned(),
        }
    }
}

/// One output tensor as returned from a graph execution.
#[derive(Clone, Debug, PartialEq)]
pub struct RawOutput {
    /// Full shape, batch dimension first.
    pub shape: Vec<usize>,

    /// Values in row-major order.
    pub data: Vec<f32>,
}

/// The main workhorse: executes a graph on pre-batched data.
pub trait Inferer {
    /// The batch size this inferer was built for.
    fn batch_size(&self) -> usize;

    /// Retrieve the name and per-element shapes of the model inputs.
    fn input_shapes(&self) -> &[(String, Vec<usize>)];

    /// Retrieve the name and per-element shapes of the model outputs.
    fn output_shapes(&self) -> &[(String, Vec<usize>)];

    /// Execute the graph once with one tensor per input, in [`Inferer::input_shapes`]
    /// order. Returns one entry per output, in [`Inferer::output_shapes`] order.
    fn infer_raw(&mut self, inputs: Vec<BatchTensor>) -> Result<Vec<RawOutput>>;
}

/// Helper trait implemented by the loadable graph formats.
pub trait InfererProvider {
    /// Build a [`TractInferer`] bound to `endpoints`, accepting
    /// `[batch_size, ..element_shape]` inputs.
    fn build(
        self,
        endpoints: &Endpoints,
        batch_size: usize,
        element_shape: &[usize],
    ) -> Result<TractInferer>;
}

/// Builder for inferers.
pub struct InfererBuilder<P: InfererProvider> {
    provider: P,
    endpoints: Endpoints,
}

impl<P> InfererBuilder<P>
where
    P: InfererProvider,
{
    /// Begin the building process from the provided model provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            endpoints: Endpoints::default(),
        }
    }

    /// Bind through `endpoints` instead of the default `input`/`output`.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Build a [`TractInferer`] for `[batch_size, ..element_shape]` inputs.
    pub fn build(self, batch_size: usize, element_shape: &[usize]) -> Result<TractInferer> {
        self.provider
            .build(&self.endpoints, batch_size, element_shape)
    }
}
