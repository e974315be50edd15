//! Tracing/export pipeline for pretrained face recognition networks.
//!
//! The pipeline reduces a pretrained network to its inference form, records
//! one synthetic forward pass through the optimized plan to validate the
//! static graph, and serializes the graph (weights included) as a single
//! self-describing artifact.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use tract_onnx::prelude::*;

use facegraph_zoo::ModelSpec;

mod artifact;
mod trace;

pub use artifact::{save_artifact, verify_artifact};
pub use trace::{load_inference_graph, synthetic_input, trace_once};

/// Run the full export procedure for `spec`: decode the pretrained network
/// at `network`, trace it, and write the artifact to `output`.
pub fn export(spec: &ModelSpec, network: &Path, output: &Path) -> Result<()> {
    let graph = load_inference_graph(network, spec)?;
    export_graph(graph, spec, output)
}

/// Trace and serialize an already-decoded inference graph.
///
/// The synthetic input is built from the spec's geometry, so the shape
/// invariant holds by construction; a graph that does not accept it, or that
/// produces anything but a `(batch, embedding_dim)` output, fails here and
/// nothing is written.
pub fn export_graph(graph: TypedModel, spec: &ModelSpec, output: &Path) -> Result<()> {
    let input = synthetic_input(&spec.input_shape)?;
    let shape = trace_once(&graph, input).context("Recording the forward pass")?;
    ensure!(
        shape == [spec.input_shape[0], spec.embedding_dim],
        "Traced graph maps {:?} to {:?}, expected a {}-d embedding",
        spec.input_shape,
        shape,
        spec.embedding_dim
    );
    save_artifact(&graph, output)?;
    log::info!("Exported {} to {output:?}", spec.id);
    Ok(())
}
