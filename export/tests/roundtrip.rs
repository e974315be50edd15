use tract_core::internal::*;
use tract_core::ops::einsum::EinSum;

use facegraph_export::{export_graph, synthetic_input, trace_once, verify_artifact};
use facegraph_zoo::ModelSpec;

const TOY: ModelSpec = ModelSpec {
    id: "toy",
    url: "http://127.0.0.1:9/unused",
    file_name: "unused.onnx",
    input_shape: [1, 3, 8, 8],
    embedding_dim: 4,
};

// Same contraction shape as a face embedder: one NCHW input in, one
// (batch, embedding) out.
fn toy_embedder() -> TractResult<TypedModel> {
    let mut model = TypedModel::default();
    let input = model.add_source("input", f32::fact([1usize, 3, 8, 8]))?;
    let weights = model.add_const("weights", Tensor::zero::<f32>(&[3, 8, 8, 4])?)?;
    let output = model.wire_node(
        "embedding",
        EinSum { axes: "bchw,chwk->bk".parse()?, operating_dt: f32::datum_type(), q_params: None },
        &[input, weights],
    )?;
    model.set_output_outlets(&output)?;
    model.into_decluttered()
}

#[test]
fn export_writes_a_loadable_artifact() -> TractResult<()> {
    let dir = tempfile::tempdir()?;
    let artifact = dir.path().join(TOY.artifact_name());
    export_graph(toy_embedder()?, &TOY, &artifact)?;
    assert!(artifact.is_file());
    let shape = verify_artifact(&artifact, &TOY)?;
    assert_eq!(shape, [1, TOY.embedding_dim]);
    Ok(())
}

#[test]
fn re_export_overwrites_with_a_fresher_artifact() -> TractResult<()> {
    let dir = tempfile::tempdir()?;
    let artifact = dir.path().join(TOY.artifact_name());
    export_graph(toy_embedder()?, &TOY, &artifact)?;
    let first = std::fs::metadata(&artifact)?.modified()?;
    std::thread::sleep(std::time::Duration::from_millis(50));
    export_graph(toy_embedder()?, &TOY, &artifact)?;
    let second = std::fs::metadata(&artifact)?.modified()?;
    assert!(second > first);
    Ok(())
}

#[test]
fn mismatched_input_shape_fails_and_writes_nothing() -> TractResult<()> {
    let narrow = ModelSpec { input_shape: [1, 1, 8, 8], ..TOY };
    let dir = tempfile::tempdir()?;
    let artifact = dir.path().join(narrow.artifact_name());
    assert!(export_graph(toy_embedder()?, &narrow, &artifact).is_err());
    assert!(!artifact.exists());
    Ok(())
}

#[test]
fn trace_rejects_an_input_of_the_wrong_geometry() -> TractResult<()> {
    let graph = toy_embedder()?;
    let input = synthetic_input(&[1, 1, 8, 8])?;
    assert!(trace_once(&graph, input).is_err());
    Ok(())
}

#[cfg(unix)]
#[test]
fn read_only_directory_fails_without_partial_artifact() -> TractResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let artifact = dir.path().join(TOY.artifact_name());
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555))?;
    // Directory modes don't bind privileged users, nothing to observe there.
    if std::fs::File::create(dir.path().join("probe")).is_ok() {
        std::fs::remove_file(dir.path().join("probe"))?;
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }
    let result = export_graph(toy_embedder()?, &TOY, &artifact);
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755))?;
    assert!(result.is_err());
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}
