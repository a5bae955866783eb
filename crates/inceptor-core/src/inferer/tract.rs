/*!
A fixed-batch inferer backed by a tract plan.
*/

use super::{Endpoints, Inferer, RawOutput};
use crate::{batch::BatchTensor, error::InceptorError, model_api::ModelApi};
use anyhow::{ensure, Result};
use tract_core::prelude::*;
use tract_hir::prelude::*;

/// Runs an optimized tract plan specialized for one batch size.
///
/// The plan is built once from the inference model: the named endpoints are
/// bound, the input fact is fixed to `[batch_size, ..element_shape]` f32, and
/// the graph is typed, decluttered and optimized. Each call to
/// [`Inferer::infer_raw`] executes it exactly once.
pub struct TractInferer {
    plan: TypedSimplePlan<TypedModel>,
    model_api: ModelApi,
    batch_size: usize,
}

fn has_endpoint(model: &InferenceModel, name: &str) -> bool {
    model.node_by_name(name).is_ok()
        || model
            .outlet_labels
            .values()
            .any(|label| label.split(':').next() == Some(name))
}

impl TractInferer {
    /// Create an inferer for the provided `inference` model.
    ///
    /// # Errors
    ///
    /// * [`InceptorError::GraphBinding`] if either endpoint doesn't exist in the graph.
    /// * Anything forwarded from the tract typing and optimization steps.
    pub fn from_model(
        mut model: InferenceModel,
        endpoints: &Endpoints,
        batch_size: usize,
        element_shape: &[usize],
    ) -> Result<Self> {
        for name in [&endpoints.input, &endpoints.output] {
            if !has_endpoint(&model, name) {
                return Err(InceptorError::GraphBinding(name.clone()).into());
            }
        }

        model.set_input_names([endpoints.input.as_str()])?;
        model.set_output_names([endpoints.output.as_str()])?;

        // Output facts are re-inferred from the fixed input; clear them first.
        model.set_output_fact(0, Default::default())?;

        let mut full_shape = tvec![batch_size];
        full_shape.extend_from_slice(element_shape);
        model.set_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), full_shape))?;

        let model = model.into_typed()?.into_decluttered()?;
        let mut model_api = ModelApi::for_typed_model(&model)?;

        // Decluttering can shunt away the bound node (e.g. a trailing
        // Identity), leaving its producer's name on the outlet.
        model_api.rename_endpoints(endpoints);
        log::debug!("bound graph: {:?}", model_api);

        let plan = model.into_optimized()?.into_runnable()?;

        Ok(Self {
            plan,
            model_api,
            batch_size,
        })
    }

    pub fn model_api(&self) -> &ModelApi {
        &self.model_api
    }
}

impl Inferer for TractInferer {
    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn input_shapes(&self) -> &[(String, Vec<usize>)] {
        &self.model_api.inputs
    }

    fn output_shapes(&self) -> &[(String, Vec<usize>)] {
        &self.model_api.outputs
    }

    fn infer_raw(&mut self, inputs: Vec<BatchTensor>) -> Result<Vec<RawOutput>> {
        ensure!(
            inputs.len() == self.model_api.inputs.len(),
            "expected {} inputs, got {}",
            self.model_api.inputs.len(),
            inputs.len()
        );

        let mut values = TVec::default();
        for input in &inputs {
            let tensor = Tensor::from_shape(&input.shape(), input.as_slice())?;
            values.push(TValue::from(tensor));
        }

        let result = self.plan.run(values)?;

        result
            .iter()
            .map(|value| -> Result<RawOutput> {
                Ok(RawOutput {
                    shape: value.shape().to_vec(),
                    data: value.as_slice::<f32>()?.to_vec(),
                })
            })
            .collect()
    }
}
