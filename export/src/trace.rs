use std::path::Path;

use anyhow::{Context, Result, ensure};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tract_onnx::prelude::*;

use facegraph_zoo::ModelSpec;

/// Decode the pretrained network and reduce it to its inference form, with
/// the input fact pinned to the geometry from `spec`.
///
/// Decluttering eliminates training-only and identity structure, so forward
/// passes over the resulting graph are deterministic given deterministic
/// input.
pub fn load_inference_graph(network: &Path, spec: &ModelSpec) -> Result<TypedModel> {
    let [n, c, h, w] = spec.input_shape;
    let graph = tract_onnx::onnx()
        .model_for_path(network)
        .with_context(|| format!("Decoding pretrained network {network:?}"))?
        .with_input_fact(0, f32::fact([n, c, h, w]).into())?
        .into_typed()
        .context("Translating the network to a typed graph")?
        .into_decluttered()
        .context("Reducing the graph to its inference form")?;
    log::debug!("Inference graph for {} has {} nodes", spec.id, graph.nodes.len());
    Ok(graph)
}

/// Uniform random tensor in [0, 1). Only the shape and dtype matter: the
/// values drive the recorded forward pass and are never inspected.
pub fn synthetic_input(shape: &[usize]) -> Result<Tensor> {
    let mut rng = SmallRng::from_entropy();
    let len = shape.iter().product::<usize>();
    let values: Vec<f32> = (0..len).map(|_| rng.r#gen::<f32>()).collect();
    Tensor::from_shape(shape, &values)
}

/// Build the optimized execution plan and run `input` through it once,
/// returning the shape of the single recorded output.
pub fn trace_once(graph: &TypedModel, input: Tensor) -> Result<Vec<usize>> {
    let plan = graph
        .clone()
        .into_optimized()
        .context("Optimizing the typed graph into a static plan")?
        .into_runnable()?;
    let mut outputs = plan.run(tvec!(input.into()))?;
    ensure!(outputs.len() == 1, "Expected a single embedding output, got {}", outputs.len());
    let output = outputs.remove(0);
    Ok(output.shape().to_vec())
}
