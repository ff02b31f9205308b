//! Locale-aware translation storage.

use std::collections::{
    BTreeMap,
    HashMap,
};

use thiserror::Error;

use crate::types::{
    KeyPath,
    LocaleId,
};

/// A fully resolved translation ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub locale: LocaleId,
    pub key: KeyPath,
    pub value: String,
}

impl Entry {
    #[must_use]
    pub fn new(locale: LocaleId, key: KeyPath, value: impl Into<String>) -> Self {
        Self { locale, key, value: value.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("translation key '{key}' not found for locale '{locale}'")]
    KeyNotFound { locale: String, key: String },
}

/// Locale -> dotted key -> value.
///
/// Writing an existing `(locale, key)` pair replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    /// Per-locale maps keyed by dotted key.
    locales: HashMap<LocaleId, HashMap<String, String>>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `key` in `locale`.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales.get(locale)?.get(key).map(String::as_str)
    }

    /// Like [`Self::get`], but reports a missing pair as an error.
    ///
    /// # Errors
    /// [`TableError::KeyNotFound`] when the locale or the key is absent.
    pub fn lookup(&self, locale: &str, key: &str) -> Result<&str, TableError> {
        self.get(locale, key).ok_or_else(|| TableError::KeyNotFound {
            locale: locale.to_string(),
            key: key.to_string(),
        })
    }

    /// Stores a value and returns the one it replaced.
    pub fn set(
        &mut self,
        locale: LocaleId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.locales.entry(locale).or_default().insert(key.into(), value.into())
    }

    pub fn insert(&mut self, entry: Entry) -> Option<String> {
        self.set(entry.locale, entry.key.dotted(), entry.value)
    }

    pub fn remove(&mut self, locale: &str, key: &str) -> Option<String> {
        let keys = self.locales.get_mut(locale)?;
        let removed = keys.remove(key);
        if keys.is_empty() {
            self.locales.remove(locale);
        }
        removed
    }

    /// Drops every key of `locale`, returning how many were removed.
    pub fn clear_locale(&mut self, locale: &str) -> usize {
        self.locales.remove(locale).map_or(0, |keys| keys.len())
    }

    /// Locales holding at least one key, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&LocaleId> {
        let mut locales: Vec<&LocaleId> = self.locales.keys().collect();
        locales.sort();
        locales
    }

    #[must_use]
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Number of keys stored for `locale`.
    #[must_use]
    pub fn locale_len(&self, locale: &str) -> usize {
        self.locales.get(locale).map_or(0, HashMap::len)
    }

    /// Total number of `(locale, key)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Sorted copy of the table, suitable for serialization.
    #[must_use]
    pub fn to_sorted(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.locales
            .iter()
            .map(|(locale, keys)| {
                let keys = keys.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                (locale.to_string(), keys)
            })
            .collect()
    }
}

impl Extend<Entry> for TranslationTable {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, entries: I) {
        for entry in entries {
            self.insert(entry);
        }
    }
}

impl FromIterator<Entry> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = Entry>>(entries: I) -> Self {
        let mut table = Self::new();
        table.extend(entries);
        table
    }
}
