use std::path::Path;

use anyhow::{Context, Result, ensure};
use tract_nnef::prelude::*;

use facegraph_zoo::ModelSpec;

use crate::trace::{synthetic_input, trace_once};

fn exporter() -> tract_nnef::internal::Nnef {
    tract_nnef::nnef().with_tract_core()
}

/// Serialize the typed graph to `path`, overwriting any previous artifact.
///
/// The archive goes to a temp file in the destination directory first and is
/// renamed into place, so a failed write leaves no partial artifact behind.
pub fn save_artifact(graph: &TypedModel, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut part = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Creating temp file in {dir:?}"))?;
    exporter()
        .write_to_tar(graph, &mut part)
        .with_context(|| format!("Serializing graph for {path:?}"))?;
    part.persist(path).with_context(|| format!("Moving artifact into place at {path:?}"))?;
    log::info!("Wrote {path:?}");
    Ok(())
}

/// Reload a previously written artifact and replay one synthetic input of
/// the spec's geometry through it, checking the embedding dimensionality.
pub fn verify_artifact(path: &Path, spec: &ModelSpec) -> Result<Vec<usize>> {
    ensure!(path.is_file(), "No artifact at {path:?}");
    let graph =
        exporter().model_for_path(path).with_context(|| format!("Reloading artifact {path:?}"))?;
    let input = synthetic_input(&spec.input_shape)?;
    let shape = trace_once(&graph, input).with_context(|| format!("Replaying artifact {path:?}"))?;
    ensure!(
        shape == [spec.input_shape[0], spec.embedding_dim],
        "Artifact {path:?} maps {:?} to {shape:?}, expected a {}-d embedding",
        spec.input_shape,
        spec.embedding_dim
    );
    Ok(shape)
}
