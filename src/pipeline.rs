//! The merge-version-persist-URL pipeline façade.
//!
//! Per request: resolve the version key, compute the deterministic
//! artifact name, ask the active storage backend to ensure the artifact
//! exists (merging lazily on a miss), then build the client URL. Any
//! step's failure surfaces to the caller unchanged; nothing is retried.

use std::path::PathBuf;
use std::sync::Arc;

use crate::asset::{artifact_filename, merge_sources, AssetKind};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::storage::{self, BlobStorage, CdnClient, StorageMode};
use crate::url::{to_protocol_relative, version_image_url, version_static_url};
use crate::version::{CacheStore, VersionKeyCache};

/// Serving area of the request the URL is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Storefront,
    Admin,
}

/// Security context of the current request.
///
/// Derived from the serving context by the host, never stored: the
/// resulting secure flag is part of the artifact identity, so two
/// requests differing only here produce two distinct artifacts (no
/// mixed-content reuse).
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub area: Area,
    /// Whether the inbound request itself arrived over https.
    pub request_secure: bool,
}

/// Pipeline façade over merging, versioning, storage and URL building.
///
/// Holds no per-request state; the only long-lived mutable state is
/// the version key in the injected cache store.
pub struct AssetPipeline {
    config: PipelineConfig,
    version: VersionKeyCache,
    blob: Option<Arc<dyn BlobStorage>>,
    cdn: Option<Arc<dyn CdnClient>>,
}

impl AssetPipeline {
    pub fn new(config: PipelineConfig, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            config,
            version: VersionKeyCache::new(cache),
            blob: None,
            cdn: None,
        }
    }

    /// Inject the database blob collaborator (required for
    /// `storage = "database"`).
    pub fn with_blob_storage(mut self, blob: Arc<dyn BlobStorage>) -> Self {
        self.blob = Some(blob);
        self
    }

    /// Inject the CDN collaborator (required for `storage = "cdn"`).
    pub fn with_cdn(mut self, cdn: Arc<dyn CdnClient>) -> Self {
        self.cdn = Some(cdn);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build the client URL for the merged artifact of `files`.
    ///
    /// Source order is significant: it is part of the artifact
    /// identity. The merge itself only runs when the active backend
    /// reports the artifact missing.
    pub fn merged_url(
        &self,
        kind: AssetKind,
        files: &[PathBuf],
        ctx: &RequestContext,
    ) -> Result<String, PipelineError> {
        let version_key = self.version.get();
        let secure = self.is_secure(ctx);
        let filename = artifact_filename(files, version_key, secure, kind);

        let target = self.config.media_dir.join(kind.as_str()).join(&filename);
        let relative_path = format!("{}/{filename}", kind.as_str());
        let section = self.config.kind(kind);

        let merge_fn = || {
            merge_sources(
                files,
                kind,
                &self.config.base_dir,
                section.minified_folder.as_deref(),
            )
        };

        let mut url = format!("{}{relative_path}", self.config.media_base_url);
        match section.storage {
            StorageMode::Filesystem => {
                storage::filesystem::ensure(&target, kind, merge_fn)?;
            }
            StorageMode::Database => {
                let blob = self.blob.as_deref().ok_or(PipelineError::UrlResolve)?;
                storage::database::ensure(blob, &relative_path, &target, kind, merge_fn)?;
            }
            StorageMode::Cdn => {
                let cdn = self.cdn.as_deref().ok_or(PipelineError::UrlResolve)?;
                url = storage::cdn::ensure(cdn, &target, kind, merge_fn)?;
            }
        }

        if section.protocol_relative_uris {
            url = to_protocol_relative(&url);
        }
        Ok(url)
    }

    /// Transform a plain asset URL (images): protocol-relative rewrite
    /// plus version-key suffixing for recognized image extensions.
    pub fn asset_url(&self, uri: &str) -> String {
        let mut uri = if self.config.css.protocol_relative_uris {
            to_protocol_relative(uri)
        } else {
            uri.to_string()
        };
        if self.config.css.add_tstamp_to_assets {
            uri = version_image_url(&uri, self.version.get());
        }
        uri
    }

    /// Transform a standalone (non-merged) css/js URL by splicing in
    /// the version key.
    pub fn static_url(&self, uri: &str) -> String {
        if self.config.css.add_tstamp_to_assets {
            version_static_url(uri, self.version.get())
        } else {
            uri.to_string()
        }
    }

    /// Secure/unsecure decision: admin area follows the admin-URL
    /// setting alone; the storefront requires both secure front URLs
    /// and a secure inbound request.
    fn is_secure(&self, ctx: &RequestContext) -> bool {
        match ctx.area {
            Area::Admin => self.config.secure_admin_urls,
            Area::Storefront => self.config.secure_front_urls && ctx.request_secure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::MemoryCacheStore;

    fn pipeline(config: PipelineConfig) -> AssetPipeline {
        AssetPipeline::new(config, Arc::new(MemoryCacheStore::new()))
    }

    fn base_config() -> PipelineConfig {
        PipelineConfig {
            media_base_url: "http://example.com/media/".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_secure_decision_storefront() {
        let mut config = base_config();
        config.secure_front_urls = true;
        let p = pipeline(config);

        assert!(p.is_secure(&RequestContext {
            area: Area::Storefront,
            request_secure: true,
        }));
        assert!(!p.is_secure(&RequestContext {
            area: Area::Storefront,
            request_secure: false,
        }));
    }

    #[test]
    fn test_secure_decision_admin_ignores_request() {
        let mut config = base_config();
        config.secure_admin_urls = true;
        let p = pipeline(config);

        assert!(p.is_secure(&RequestContext {
            area: Area::Admin,
            request_secure: false,
        }));
    }

    #[test]
    fn test_database_mode_without_collaborator_fails() {
        let mut config = base_config();
        config.js.storage = StorageMode::Database;
        let p = pipeline(config);

        let err = p
            .merged_url(
                AssetKind::Js,
                &["a.js".into()],
                &RequestContext {
                    area: Area::Storefront,
                    request_secure: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::UrlResolve));
    }

    #[test]
    fn test_asset_url_transforms() {
        let mut config = base_config();
        config.css.protocol_relative_uris = true;
        config.css.add_tstamp_to_assets = true;
        let store = Arc::new(MemoryCacheStore::new());
        store.set(crate::version::VERSION_CACHE_KEY, "12345", &[], None);
        let p = AssetPipeline::new(config, store);

        assert_eq!(
            p.asset_url("http://example.com/media/a/b.png"),
            "//example.com/media/a/b.12345.png"
        );
        // Non-image extensions only get the protocol rewrite.
        assert_eq!(
            p.asset_url("http://example.com/media/a/b.svg"),
            "//example.com/media/a/b.svg"
        );
    }

    #[test]
    fn test_static_url_versioning() {
        let mut config = base_config();
        config.css.add_tstamp_to_assets = true;
        let store = Arc::new(MemoryCacheStore::new());
        store.set(crate::version::VERSION_CACHE_KEY, "12345", &[], None);
        let p = AssetPipeline::new(config, store);

        assert_eq!(p.static_url("/skin/app.css"), "/skin/app.12345.css");
        assert_eq!(p.static_url("/skin/logo.png"), "/skin/logo.png");
    }

    #[test]
    fn test_static_url_disabled_is_identity() {
        let p = pipeline(base_config());
        assert_eq!(p.static_url("/skin/app.css"), "/skin/app.css");
    }
}
