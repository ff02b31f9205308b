//! Resource loaders.
//!
//! Every loader turns one resource into [`Entry`](crate::table::Entry)
//! values, the same shape [`parse_lang`](crate::lang::parse_lang) produces,
//! so callers can insert the result into a table in one step.

/// CSV translation sheets
pub mod csv;
/// JSON translation files
pub mod json;
/// `.lang` files on disk
pub mod lang;

use std::path::Path;

use thiserror::Error;

use crate::lang::{
    EscapeError,
    ParseError,
};
use crate::types::TypeError;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error(transparent)]
    Lang(#[from] ParseError),

    /// Well-formed document with an unexpected structure.
    #[error("unexpected resource layout: {0}")]
    Shape(String),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Escape(#[from] EscapeError),
}

/// Reads a UTF-8 resource file.
pub(crate) fn read_resource(path: &Path) -> Result<String, InputError> {
    tracing::debug!(path = %path.display(), "Reading resource");
    Ok(std::fs::read_to_string(path)?)
}

pub use csv::{
    load_csv_i18n_file,
    load_csv_i18n_str,
};
pub use json::{
    flatten_json,
    load_json_file,
    load_json_i18n_file,
    load_json_i18n_str,
    load_json_i18n_value,
    load_json_str,
    load_json_value,
};
pub use lang::load_lang_file;
