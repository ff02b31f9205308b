//! Indexer type definitions.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::types::{
    KeyPath,
    LocaleId,
};

/// Supported resource formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Lang,
    Json,
    Csv,
}

impl ResourceKind {
    /// Infers the resource format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("lang") => Some(Self::Lang),
            Some("json") => Some(Self::Json),
            Some("csv") => Some(Self::Csv),
            _ => None,
        }
    }
}

/// A resource found during discovery, with the locale and prefix it loads into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: PathBuf,
    pub kind: ResourceKind,
    /// `None` for sheets that name their locales row by row.
    pub locale: Option<LocaleId>,
    pub superiors: Option<KeyPath>,
}

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Resource directory not found: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Failed to walk resource directory: {0}")]
    Walk(#[from] ignore::Error),
}
