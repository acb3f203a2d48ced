//! Deterministic artifact naming for cache busting.
//!
//! A merged artifact is identified by the ordered source list, the
//! process-wide version key, the secure flag and the asset kind:
//!
//! ```text
//! {"s"|"u"}.{md5hex(join(sourcePaths, ","))}.{versionKey}.{"css"|"js"}
//! ```
//!
//! Identical inputs always yield the identical name; this is the cache
//! key and the on-disk/db name. Source order is part of the identity on
//! purpose: CSS/JS evaluation order matters, so a permutation is a
//! different artifact.

use std::path::PathBuf;

use super::AssetKind;

/// Compute the deterministic filename for a merged artifact.
pub fn artifact_filename(
    sources: &[PathBuf],
    version_key: u64,
    secure: bool,
    kind: AssetKind,
) -> String {
    let joined = sources
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(",");
    let digest = format!("{:x}", md5::compute(joined.as_bytes()));
    let prefix = if secure { "s" } else { "u" };
    format!("{prefix}.{digest}.{version_key}.{}", kind.extension())
}
