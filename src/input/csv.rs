//! CSV translation sheets.
//!
//! ```text
//! locale,key,value
//! en_US,greeting,Hello
//! zh_CN,greeting,你好
//! ```
//!
//! Columns are matched by header name, so their order does not matter and
//! extra columns are ignored.

use std::path::Path;

use serde::Deserialize;

use super::{
    InputError,
    read_resource,
};
use crate::lang::decode_escape_sequences;
use crate::table::Entry;
use crate::types::{
    KeyPath,
    LocaleId,
};

/// One row of a translation sheet.
#[derive(Debug, Deserialize)]
struct CsvRow {
    /// Locale column.
    locale: String,
    /// Dotted key column.
    key: String,
    /// Text with `\n`-style escapes still encoded.
    value: String,
}

impl CsvRow {
    /// Validates the row and decodes its escapes.
    fn into_entry(self) -> Result<Entry, InputError> {
        Ok(Entry::new(
            LocaleId::new(self.locale)?,
            KeyPath::parse(&self.key)?,
            decode_escape_sequences(&self.value)?,
        ))
    }
}

/// Parses a `locale,key,value` sheet.
pub fn load_csv_i18n_str(text: &str) -> Result<Vec<Entry>, InputError> {
    let mut reader =
        ::csv::ReaderBuilder::new().trim(::csv::Trim::Headers).from_reader(text.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|row| row.map_err(InputError::from).and_then(CsvRow::into_entry))
        .collect()
}

pub fn load_csv_i18n_file(path: &Path) -> Result<Vec<Entry>, InputError> {
    let entries = load_csv_i18n_str(&read_resource(path)?)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "Loaded CSV resource");
    Ok(entries)
}
