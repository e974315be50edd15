//! Registry of pretrained face recognition networks and their local cache.
//!
//! The registry maps a pretrained-weights identifier (`"vggface2"`) to the
//! distribution point and geometry of the corresponding network. [`fetch`]
//! materializes the network file in the cache directory, downloading it on
//! first use.

use std::path::PathBuf;

use anyhow::{Context, Result};

mod fetch;
pub use fetch::fetch;

/// Static description of a pretrained network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSpec {
    /// Pretrained-weights identifier.
    pub id: &'static str,
    /// Where the serialized network is distributed.
    pub url: &'static str,
    /// File name under the cache directory.
    pub file_name: &'static str,
    /// Input geometry the network expects, NCHW.
    pub input_shape: [usize; 4],
    /// Length of the embedding vector produced for one input.
    pub embedding_dim: usize,
}

impl ModelSpec {
    /// Name of the exported artifact, derived from the identifier.
    pub fn artifact_name(&self) -> String {
        format!("{}.pt", self.id)
    }
}

/// InceptionResnetV1 pretrained on the VGGFace2 dataset, 512-d embeddings.
pub const VGGFACE2: ModelSpec = ModelSpec {
    id: "vggface2",
    url: "https://github.com/facegraph/models/releases/download/v1.0/vggface2-inception-resnet-v1.onnx",
    file_name: "vggface2-inception-resnet-v1.onnx",
    input_shape: [1, 3, 224, 224],
    embedding_dim: 512,
};

static REGISTRY: &[ModelSpec] = &[VGGFACE2];

/// All networks the zoo knows how to retrieve.
pub fn registry() -> &'static [ModelSpec] {
    REGISTRY
}

/// Resolve a pretrained-weights identifier.
pub fn lookup(id: &str) -> Result<&'static ModelSpec> {
    registry().iter().find(|spec| spec.id == id).with_context(|| {
        let known: Vec<&str> = registry().iter().map(|spec| spec.id).collect();
        format!("No pretrained network named {id:?} (known: {})", known.join(", "))
    })
}

/// Default cache location for downloaded networks.
pub fn default_cache_dir() -> Result<PathBuf> {
    let home =
        home::home_dir().context("Could not determine a home directory for the weight cache")?;
    Ok(home.join(".cache").join("facegraph"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn registry_knows_vggface2() {
        let spec = lookup("vggface2").unwrap();
        assert_eq!(spec.input_shape, [1, 3, 224, 224]);
        assert_eq!(spec.embedding_dim, 512);
        assert_eq!(spec.artifact_name(), "vggface2.pt");
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = lookup("imagenet").unwrap_err();
        assert!(err.to_string().contains("imagenet"));
    }
}
