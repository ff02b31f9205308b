use std::path::Path;

use super::{
    InputError,
    read_resource,
};
use crate::lang::parse_lang;
use crate::table::Entry;
use crate::types::{
    KeyPath,
    LocaleId,
};

/// Reads and compiles a `.lang` file.
///
/// See [`parse_lang`] for how `locale` and `superiors` seed the parser.
pub fn load_lang_file(
    path: &Path,
    locale: Option<LocaleId>,
    superiors: Option<KeyPath>,
) -> Result<Vec<Entry>, InputError> {
    let source = read_resource(path)?;
    let entries = parse_lang(&source, locale, superiors)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "Loaded lang resource");
    Ok(entries)
}
