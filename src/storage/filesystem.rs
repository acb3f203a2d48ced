//! Filesystem storage: merged artifacts written straight to the media
//! dir and served as static files.

use std::fs;
use std::path::Path;

use crate::asset::AssetKind;
use crate::debug;
use crate::error::PipelineError;

/// Ensure the artifact exists at `target`, merging only on a miss.
///
/// A second process racing to create the same path is tolerated: the
/// content is deterministic, so the overwrite is benign.
pub fn ensure(
    target: &Path,
    kind: AssetKind,
    merge_fn: impl FnOnce() -> Result<String, PipelineError>,
) -> Result<(), PipelineError> {
    if target.exists() {
        debug!("storage"; "artifact already on disk: {}", target.display());
        return Ok(());
    }

    let contents = merge_fn()?;
    write_artifact(target, &contents, kind)
}

/// Write artifact bytes to `target`, creating parent directories as
/// needed.
pub(crate) fn write_artifact(
    target: &Path,
    contents: &str,
    kind: AssetKind,
) -> Result<(), PipelineError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, contents)
    };

    write().map_err(|source| PipelineError::MergeFailure {
        kind,
        path: target.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_merges_and_writes_on_miss() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("js/u.abc.1.js");

        ensure(&target, AssetKind::Js, || Ok("merged".into())).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "merged");
    }

    #[test]
    fn test_existing_artifact_skips_merge() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("u.abc.1.js");
        fs::write(&target, "already there").unwrap();

        ensure(&target, AssetKind::Js, || {
            panic!("merge must not run when the artifact exists")
        })
        .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "already there");
    }

    #[test]
    fn test_merge_error_propagates() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("u.abc.1.css");

        let err = ensure(&target, AssetKind::Css, || {
            Err(PipelineError::MergeFailure {
                kind: AssetKind::Css,
                path: "a.css".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        })
        .unwrap_err();
        assert!(matches!(err, PipelineError::MergeFailure { .. }));
        assert!(!target.exists());
    }
}
