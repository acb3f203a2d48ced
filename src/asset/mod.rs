//! Asset identity, minified-sibling lookup and merging.

mod identity;
mod kind;
mod merge;
mod minified;

pub use identity::artifact_filename;
pub use kind::AssetKind;
pub use merge::merge_sources;
pub use minified::resolve_minified;
