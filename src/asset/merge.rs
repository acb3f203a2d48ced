//! Ordered concatenation of resolved source files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

use super::minified::resolve_minified;
use super::AssetKind;

/// Merge the given source files, in order, into a single artifact body.
///
/// For each source the minified sibling is substituted when present,
/// and every block is prefixed with a provenance marker naming its
/// origin file. Input order is preserved exactly: it is part of the
/// artifact identity and of correctness (evaluation order matters).
pub fn merge_sources(
    sources: &[PathBuf],
    kind: AssetKind,
    base_dir: &Path,
    minified_root: Option<&Path>,
) -> Result<String, PipelineError> {
    let mut merged = String::new();

    for source in sources {
        let content = resolve_content(source, base_dir, minified_root)
            .map_err(|e| merge_failure(kind, source, e))?;

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        merged.push_str(&format!("\n\n/* FILE: {name} */\n"));
        merged.push_str(&content);
    }

    Ok(merged)
}

/// Minified sibling if present, otherwise the original file's content.
fn resolve_content(
    source: &Path,
    base_dir: &Path,
    minified_root: Option<&Path>,
) -> io::Result<String> {
    match resolve_minified(source, base_dir, minified_root)? {
        Some(minified) => Ok(minified),
        None => fs::read_to_string(source),
    }
}

fn merge_failure(kind: AssetKind, path: &Path, source: io::Error) -> PipelineError {
    PipelineError::MergeFailure {
        kind,
        path: path.to_path_buf(),
        source,
    }
}
