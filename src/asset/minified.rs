//! Minified-sibling lookup.
//!
//! For a source file `lib/app.js`, a precomputed minified counterpart is
//! searched in two places, in order:
//!
//! 1. Co-located: `lib/app.min.js`
//! 2. Mirrored: the source's path relative to the base dir, re-rooted
//!    under the kind's configured minified folder, with the same
//!    `.min.` naming.
//!
//! A miss is not an error; the caller falls back to the original file.
//! A read failure on a candidate that does exist propagates.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Build the `.min.` candidate name for a source file inside `dir`.
///
/// Returns `None` for files without a stem and an extension, which can
/// never have a minified sibling under the naming scheme.
fn min_candidate(dir: &Path, source: &Path) -> Option<PathBuf> {
    let stem = source.file_stem()?.to_str()?;
    let ext = source.extension()?.to_str()?;
    Some(dir.join(format!("{stem}.min.{ext}")))
}

/// Resolve the minified sibling of `source`, if one exists.
///
/// Returns `Ok(Some(content))` with a trailing newline appended (so
/// concatenated blocks stay statement-separated), `Ok(None)` when no
/// candidate exists.
pub fn resolve_minified(
    source: &Path,
    base_dir: &Path,
    minified_root: Option<&Path>,
) -> io::Result<Option<String>> {
    let dir = source.parent().unwrap_or(Path::new(""));

    // 1. Co-located candidate
    if let Some(candidate) = min_candidate(dir, source) {
        if candidate.exists() {
            return read_candidate(&candidate).map(Some);
        }
    }

    // 2. Mirrored candidate under the per-kind minified folder
    if let Some(root) = minified_root {
        let relative = relative_to_base(dir, base_dir);
        if let Some(candidate) = min_candidate(&root.join(relative), source) {
            if candidate.exists() {
                return read_candidate(&candidate).map(Some);
            }
        }
    }

    Ok(None)
}

/// Path of `dir` relative to `base_dir`, for re-rooting under the
/// minified folder.
///
/// A dir outside `base_dir` keeps its full path with the leading root
/// components dropped, so it still mirrors *under* the minified root
/// instead of escaping it.
fn relative_to_base(dir: &Path, base_dir: &Path) -> PathBuf {
    use std::path::Component;

    match dir.strip_prefix(base_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => dir
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect(),
    }
}

fn read_candidate(candidate: &Path) -> io::Result<String> {
    let mut content = fs::read_to_string(candidate)?;
    content.push('\n');
    Ok(content)
}
