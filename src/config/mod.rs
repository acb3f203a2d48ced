//! Pipeline configuration.
//!
//! # Example
//!
//! ```toml
//! base_dir = "/srv/site"
//! media_dir = "media"
//! media_base_url = "http://example.com/media/"
//! secure_front_urls = true
//!
//! [css]
//! storage = "filesystem"
//! protocol_relative_uris = true
//! minified_folder = "minified/css"
//! add_tstamp_to_assets = true
//!
//! [js]
//! storage = "cdn"
//! minified_folder = "minified/js"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::AssetKind;
use crate::error::ConfigError;
use crate::storage::StorageMode;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root directory source paths are resolved against; also the base
    /// for the mirrored minified-folder lookup.
    pub base_dir: PathBuf,

    /// Directory merged artifacts are written to, one subdirectory per
    /// asset kind. Relative values are joined onto `base_dir`.
    pub media_dir: PathBuf,

    /// Client-facing base URL of the media dir, with trailing slash.
    pub media_base_url: String,

    /// Whether admin-area URLs are served over https.
    pub secure_admin_urls: bool,

    /// Whether storefront URLs are served over https.
    pub secure_front_urls: bool,

    pub css: KindConfig,
    pub js: KindConfig,
}

/// Per-kind configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KindConfig {
    /// Storage backend for merged artifacts of this kind.
    pub storage: StorageMode,

    /// Strip the scheme from generated merged URLs (`http://h/x` →
    /// `//h/x`).
    pub protocol_relative_uris: bool,

    /// Mirrored root for minified-sibling lookup. Relative values are
    /// joined onto `base_dir`.
    pub minified_folder: Option<PathBuf>,

    /// Append the version key to recognized plain asset URLs. Only the
    /// `[css]` section's flag is consulted; kept per-section so the
    /// config shape matches the host's option table.
    pub add_tstamp_to_assets: bool,
}

impl PipelineConfig {
    /// Load configuration from a TOML file, normalize paths and
    /// validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config: Self = toml::from_str(&raw)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Join relative folders onto `base_dir`.
    pub fn normalize(&mut self) {
        if self.media_dir.is_relative() {
            self.media_dir = self.base_dir.join(&self.media_dir);
        }
        for kind in [AssetKind::Css, AssetKind::Js] {
            let base_dir = self.base_dir.clone();
            let section = self.kind_mut(kind);
            if let Some(folder) = &section.minified_folder {
                if folder.is_relative() {
                    section.minified_folder = Some(base_dir.join(folder));
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// `media_base_url` must be an absolute http(s) URL ending in `/`
    /// so that artifact URLs can be appended verbatim.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.media_base_url).map_err(|e| {
            ConfigError::Validation(format!(
                "media_base_url `{}` is not a valid URL: {e}",
                self.media_base_url
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "media_base_url `{}` must use http or https",
                self.media_base_url
            )));
        }
        if !self.media_base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "media_base_url `{}` must end with `/`",
                self.media_base_url
            )));
        }
        Ok(())
    }

    /// Per-kind section selection.
    pub fn kind(&self, kind: AssetKind) -> &KindConfig {
        match kind {
            AssetKind::Css => &self.css,
            AssetKind::Js => &self.js,
        }
    }

    fn kind_mut(&mut self, kind: AssetKind) -> &mut KindConfig {
        match kind {
            AssetKind::Css => &mut self.css,
            AssetKind::Js => &mut self.js,
        }
    }
}
