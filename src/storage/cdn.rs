//! CDN storage.
//!
//! When the CDN already serves the artifact, its URL is returned with
//! no local merge at all. Otherwise the artifact is merged, written
//! locally (the upload step needs bytes to send) and uploaded. An
//! upload failure fails the whole request: a local URL would not be
//! reachable on a CDN-fronted site, so there is no fallback.

use std::path::Path;

use crate::asset::AssetKind;
use crate::debug;
use crate::error::PipelineError;

use super::filesystem::write_artifact;
use super::CdnClient;

/// Ensure the artifact is served by the CDN and return its remote URL.
pub fn ensure(
    client: &dyn CdnClient,
    local_path: &Path,
    kind: AssetKind,
    merge_fn: impl FnOnce() -> Result<String, PipelineError>,
) -> Result<String, PipelineError> {
    if let Some(url) = client.lookup(local_path) {
        debug!("cdn"; "already served by cdn: {url}");
        return Ok(url);
    }

    let contents = merge_fn()?;
    write_artifact(local_path, &contents, kind)?;

    client
        .upload(local_path)
        .ok_or_else(|| PipelineError::CdnUnavailable(local_path.to_path_buf()))
}
