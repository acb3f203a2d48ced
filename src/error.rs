//! Error types for the merge pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::asset::AssetKind;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline errors. All of these are fatal at the pipeline boundary:
/// nothing is retried internally and the caller is expected to abort
/// the surrounding render.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// I/O failure while reading a source or minified file, or while
    /// writing the merged artifact.
    ///
    /// A missing minified sibling is not an error (the original file is
    /// used instead); only a read failure on a file confirmed to exist
    /// ends up here.
    #[error("error while merging {kind} files at `{path}`")]
    MergeFailure {
        kind: AssetKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configured storage selector names no known backend.
    #[error("unsupported storage mode `{0}`")]
    UnsupportedStorageMode(String),

    /// Both CDN lookup and upload failed for the given artifact.
    ///
    /// There is no local-URL fallback: on a CDN-fronted site a local
    /// URL would not be reachable by clients.
    #[error("cdn unavailable for `{0}`")]
    CdnUnavailable(PathBuf),

    /// No URL could be resolved for the active storage mode, e.g. a
    /// backend was selected without its collaborator being injected.
    #[error("error while processing url")]
    UrlResolve,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
