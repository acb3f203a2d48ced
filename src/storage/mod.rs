//! Storage backend strategies for merged artifacts.
//!
//! Exactly one backend is selected per asset kind. All three share the
//! same contract: make the artifact retrievable at its deterministic
//! path, invoking the merge closure only when persistence is actually
//! needed. Racing writers are tolerated rather than prevented: content
//! is deterministic, so duplicate work converges on identical state.

pub mod cdn;
pub mod database;
pub mod filesystem;

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Storage selector, one per asset kind.
///
/// Deserialized from the config strings `filesystem` / `database` /
/// `cdn`; anything else surfaces as
/// [`PipelineError::UnsupportedStorageMode`] before any merge is
/// attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageMode {
    #[default]
    Filesystem,
    Database,
    Cdn,
}

impl StorageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filesystem => "filesystem",
            Self::Database => "database",
            Self::Cdn => "cdn",
        }
    }
}

impl TryFrom<String> for StorageMode {
    type Error = PipelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "filesystem" => Ok(Self::Filesystem),
            "database" => Ok(Self::Database),
            "cdn" => Ok(Self::Cdn),
            _ => Err(PipelineError::UnsupportedStorageMode(value)),
        }
    }
}

impl From<StorageMode> for String {
    fn from(mode: StorageMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Database-backed blob storage collaborator.
///
/// Delivery to clients happens outside this pipeline (e.g. a rewrite
/// rule reading records from the same store); the backend only has to
/// guarantee the record exists before returning.
pub trait BlobStorage: Send + Sync {
    fn exists(&self, relative_path: &str) -> bool;
    /// Persist a record for the file staged at `relative_path`.
    fn save(&self, relative_path: &str) -> io::Result<()>;
}

/// CDN collaborator: existence lookup and upload, nothing else.
///
/// `None` means "not available" in both cases; transport failures are
/// collapsed into absence, matching the two-operation contract.
pub trait CdnClient: Send + Sync {
    fn lookup(&self, local_path: &Path) -> Option<String>;
    fn upload(&self, local_path: &Path) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_config_string() {
        let mode: StorageMode = toml::from_str::<toml::Value>(r#"storage = "database""#)
            .unwrap()
            .get("storage")
            .cloned()
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(mode, StorageMode::Database);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = StorageMode::try_from("s3".to_string()).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedStorageMode(m) if m == "s3"));
    }

    #[test]
    fn test_roundtrip_string() {
        for mode in [StorageMode::Filesystem, StorageMode::Database, StorageMode::Cdn] {
            assert_eq!(StorageMode::try_from(String::from(mode)).unwrap(), mode);
        }
    }
}
