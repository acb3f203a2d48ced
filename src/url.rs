//! Client URL transforms.
//!
//! Merged CSS/JS artifacts carry their version key in the filename, so
//! the only transforms applied to them are the secure prefix (part of
//! the artifact identity) and the optional protocol-relative rewrite.
//! Plain asset URLs (images, standalone css/js) instead get the version
//! key spliced in between base name and extension.

use std::sync::LazyLock;

use regex::Regex;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?:").unwrap());

static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.*)\.(gif|png|jpg)$").unwrap());

static STATIC_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.*)\.(css|js)$").unwrap());

/// Strip a leading `http:` or `https:` scheme, leaving `//host/...`.
///
/// Already-relative input is returned unchanged.
pub fn to_protocol_relative(uri: &str) -> String {
    SCHEME.replace(uri, "").into_owned()
}

/// Splice the version key into a recognized image URL:
/// `/media/a/b.png` → `/media/a/b.12345.png`.
///
/// Non-image extensions are left untouched.
pub fn version_image_url(uri: &str, version_key: u64) -> String {
    splice_version(&IMAGE_URL, uri, version_key)
}

/// Splice the version key into a standalone (non-merged) css/js URL:
/// `/skin/app.css` → `/skin/app.12345.css`.
pub fn version_static_url(uri: &str, version_key: u64) -> String {
    splice_version(&STATIC_URL, uri, version_key)
}

fn splice_version(pattern: &Regex, uri: &str, version_key: u64) -> String {
    match pattern.captures(uri) {
        Some(caps) => format!("{}.{version_key}.{}", &caps[1], &caps[2]),
        None => uri.to_string(),
    }
}
