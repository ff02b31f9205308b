//! JSON translation files.
//!
//! Two layouts are understood: a single-locale object (`{"hello": "Hello"}`)
//! and a multi-locale object keyed by locale (`{"en_US": {"hello": "Hello"}}`).

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use super::{
    InputError,
    read_resource,
};
use crate::table::Entry;
use crate::types::{
    KEY_SEPARATOR,
    KeyPath,
    LocaleId,
};

/// Flatten nested JSON object into dot-separated key map.
///
/// Array elements get an index suffix (`items[0]`) and non-string scalars
/// are stored as their JSON text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18nco::input::json::flatten_json;
///
/// let json = json!({
///     "mode": {
///         "singleton": "Singleton Mode",
///         "multiple": "Multiple Mode"
///     }
/// });
///
/// let flattened = flatten_json(&json, None);
/// assert_eq!(flattened.get("mode.singleton"), Some(&"Singleton Mode".to_string()));
/// assert_eq!(flattened.get("mode.multiple"), Some(&"Multiple Mode".to_string()));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, prefix: Option<&str>) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_json_value(json, prefix, &mut result);
    result
}

/// Recursive step of [`flatten_json`].
fn flatten_json_value(json: &Value, prefix: Option<&str>, result: &mut BTreeMap<String, String>) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{KEY_SEPARATOR}{key}"));
                flatten_json_value(value, Some(&full_key), result);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, Some(&full_key), result);
            }
        }
        Value::String(text) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), text.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}

/// Converts a single-locale JSON object into entries for `locale`.
///
/// `superiors` prefixes every key.
pub fn load_json_value(
    json: &Value,
    locale: &LocaleId,
    superiors: Option<&KeyPath>,
) -> Result<Vec<Entry>, InputError> {
    if !json.is_object() {
        return Err(InputError::Shape(format!(
            "expected a JSON object of translations for '{locale}'"
        )));
    }

    let prefix = superiors.filter(|s| !s.is_empty()).map(KeyPath::dotted);
    flatten_json(json, prefix.as_deref())
        .into_iter()
        .map(|(key, value)| {
            Ok::<_, InputError>(Entry::new(locale.clone(), KeyPath::parse(&key)?, value))
        })
        .collect()
}

/// Converts a `{locale: {key: value}}` object into entries.
pub fn load_json_i18n_value(json: &Value) -> Result<Vec<Entry>, InputError> {
    let Value::Object(locales) = json else {
        return Err(InputError::Shape("expected a JSON object keyed by locale".to_string()));
    };

    let mut entries = Vec::new();
    for (locale, translations) in locales {
        let locale = LocaleId::new(locale.as_str())?;
        entries.extend(load_json_value(translations, &locale, None)?);
    }
    Ok(entries)
}

pub fn load_json_str(
    text: &str,
    locale: &LocaleId,
    superiors: Option<&KeyPath>,
) -> Result<Vec<Entry>, InputError> {
    let json: Value = serde_json::from_str(text)?;
    load_json_value(&json, locale, superiors)
}

pub fn load_json_i18n_str(text: &str) -> Result<Vec<Entry>, InputError> {
    let json: Value = serde_json::from_str(text)?;
    load_json_i18n_value(&json)
}

/// Loads a single-locale JSON file.
pub fn load_json_file(
    path: &Path,
    locale: &LocaleId,
    superiors: Option<&KeyPath>,
) -> Result<Vec<Entry>, InputError> {
    let entries = load_json_str(&read_resource(path)?, locale, superiors)?;
    tracing::debug!(path = %path.display(), %locale, count = entries.len(), "Loaded JSON resource");
    Ok(entries)
}

/// Loads a multi-locale JSON file.
pub fn load_json_i18n_file(path: &Path) -> Result<Vec<Entry>, InputError> {
    let entries = load_json_i18n_str(&read_resource(path)?)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "Loaded JSON i18n resource");
    Ok(entries)
}
