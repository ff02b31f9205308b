//! Resource discovery for directory auto-loading.
/// Indexer types
pub mod types;
/// Directory walker
pub mod workspace;

pub use types::{
    IndexerError,
    ResourceFile,
    ResourceKind,
};
pub use workspace::ResourceIndexer;
