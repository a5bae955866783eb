use crate::inferer::Endpoints;
use tract_core::prelude::{ShapeFact, TractResult, TypedModel};

/// The `ModelApi` describes the named inputs and outputs of a graph.
///
/// Shapes are per batch element: the leading batch dimension is stripped.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelApi {
    /// The named model inputs.
    pub inputs: Vec<(String, Vec<usize>)>,

    /// The named model outputs.
    pub outputs: Vec<(String, Vec<usize>)>,
}

/// TensorFlow and ONNX exporters decorate tensor names with an output index.
fn clean_name(raw: &str) -> String {
    let name = raw.split(':').next().unwrap_or(raw);
    name.strip_suffix("_0").unwrap_or(name).to_owned()
}

fn element_shape(shape: &ShapeFact) -> Vec<usize> {
    shape
        .iter()
        .skip(1)
        .filter_map(|dim| dim.to_i64().map(|v| v as usize).ok())
        .collect()
}

impl ModelApi {
    /// Extract the model API from a typed model with concrete shapes.
    pub fn for_typed_model(model: &TypedModel) -> TractResult<Self> {
        let mut inputs = Vec::new();
        for (idx, outlet) in model.input_outlets()?.iter().enumerate() {
            let name = clean_name(&model.node(outlet.node).name);
            inputs.push((name, element_shape(&model.input_fact(idx)?.shape)));
        }

        let mut outputs = Vec::new();
        for (idx, outlet) in model.output_outlets()?.iter().enumerate() {
            let raw = model
                .outlet_labels
                .get(outlet)
                .map(String::as_str)
                .unwrap_or(model.node(outlet.node).name.as_str());

            outputs.push((clean_name(raw), element_shape(&model.output_fact(idx)?.shape)));
        }

        Ok(Self { inputs, outputs })
    }

    /// Name the single bound input and output after `endpoints`.
    pub(crate) fn rename_endpoints(&mut self, endpoints: &Endpoints) {
        if let [(name, _)] = self.inputs.as_mut_slice() {
            *name = endpoints.input.clone();
        }

        if let [(name, _)] = self.outputs.as_mut_slice() {
            *name = endpoints.output.clone();
        }
    }
}
