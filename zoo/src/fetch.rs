use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ModelSpec;

/// Return the local path of the pretrained network file, downloading it into
/// `cache_dir` on first use. A file already present in the cache is reused
/// without touching the network.
pub fn fetch(spec: &ModelSpec, cache_dir: &Path) -> Result<PathBuf> {
    let target = cache_dir.join(spec.file_name);
    if target.exists() {
        log::debug!("Reusing cached network {target:?}");
        return Ok(target);
    }
    fs_err::create_dir_all(cache_dir)?;
    log::info!("Downloading {} network from {}", spec.id, spec.url);
    let mut response = reqwest::blocking::get(spec.url)
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("Fetching pretrained weights for {:?}", spec.id))?;
    // Stream to a temp file: an interrupted download must not leave a file
    // that a later run would mistake for a complete network.
    let mut part = tempfile::NamedTempFile::new_in(cache_dir)
        .with_context(|| format!("Creating temp file in {cache_dir:?}"))?;
    response.copy_to(&mut part).with_context(|| format!("Downloading {}", spec.url))?;
    part.persist(&target)
        .with_context(|| format!("Moving downloaded network into place at {target:?}"))?;
    log::info!("Cached {} network at {target:?}", spec.id);
    Ok(target)
}
