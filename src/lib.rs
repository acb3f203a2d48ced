//! Mergestamp - merge CSS/JS sources into versioned, cache-busted
//! artifacts with pluggable storage.
//!
//! The pipeline concatenates an ordered set of source files (silently
//! substituting precomputed minified siblings), names the result
//! deterministically from the source list, a process-wide version key
//! and the request's security context, persists it through one of
//! three interchangeable storage backends (filesystem, database blob,
//! CDN) and returns a single client-facing URL.
//!
//! ```no_run
//! use std::sync::Arc;
//! use mergestamp::{Area, AssetKind, AssetPipeline, MemoryCacheStore, PipelineConfig, RequestContext};
//!
//! # fn main() -> Result<(), mergestamp::PipelineError> {
//! let config = PipelineConfig::load("mergestamp.toml".as_ref())?;
//! let pipeline = AssetPipeline::new(config, Arc::new(MemoryCacheStore::new()));
//!
//! let url = pipeline.merged_url(
//!     AssetKind::Js,
//!     &["js/prototype.js".into(), "js/app.js".into()],
//!     &RequestContext { area: Area::Storefront, request_secure: false },
//! )?;
//! # Ok(())
//! # }
//! ```

mod asset;
mod config;
mod error;
pub mod logger;
mod pipeline;
mod storage;
pub mod url;
mod version;

pub use asset::{artifact_filename, merge_sources, resolve_minified, AssetKind};
pub use config::{KindConfig, PipelineConfig};
pub use error::{ConfigError, PipelineError};
pub use pipeline::{Area, AssetPipeline, RequestContext};
pub use storage::{BlobStorage, CdnClient, StorageMode};
pub use version::{CacheStore, MemoryCacheStore, VersionKeyCache, VERSION_CACHE_KEY};
