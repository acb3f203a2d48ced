//! Asset kind definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of mergeable asset.
///
/// A closed enum rather than a string selector: the per-kind config
/// section, merger subdirectory and file extension are all derived
/// from it with exhaustive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Css,
    Js,
}

impl AssetKind {
    /// File extension of merged artifacts of this kind.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }

    /// Subdirectory under the media dir (and URL segment) holding
    /// merged artifacts of this kind.
    pub fn as_str(self) -> &'static str {
        self.extension()
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(AssetKind::Css.extension(), "css");
        assert_eq!(AssetKind::Js.extension(), "js");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AssetKind::Js), "js");
    }
}
