//! Core types used throughout the crate.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Separator between the segments of a dotted key.
pub const KEY_SEPARATOR: char = '.';

/// Errors raised when constructing a [`LocaleId`] or a [`KeyPath`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("locale identifier must not be empty")]
    EmptyLocale,

    #[error("locale identifier '{0}' must not contain whitespace")]
    LocaleWhitespace(String),

    #[error("key path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// An opaque, case-sensitive locale tag such as `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId(String);

impl LocaleId {
    /// Creates a locale identifier.
    ///
    /// The only requirement is a non-empty, whitespace-free token.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyLocale);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(TypeError::LocaleWhitespace(id));
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Language part of the tag (`en` for `en_US` or `en-GB`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split(['_', '-']).next().unwrap_or(&self.0)
    }

    /// Wraps a crate-internal literal that is known to be valid.
    pub(crate) fn from_static(id: &'static str) -> Self {
        debug_assert!(Self::new(id).is_ok(), "invalid built-in locale {id}");
        Self(id.to_string())
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LocaleId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LocaleId {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for LocaleId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<LocaleId> for String {
    fn from(locale: LocaleId) -> Self {
        locale.0
    }
}

impl PartialEq<str> for LocaleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A dotted key split into its segments (`mode.singleton` -> `["mode", "singleton"]`).
///
/// Segments are never empty. A translation key has at least one segment; only
/// a superiors prefix may be the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parses a dotted translation key.
    ///
    /// # Errors
    /// [`TypeError::EmptySegment`] for an empty string or an empty segment.
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        let segments: Vec<String> = text.split(KEY_SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(TypeError::EmptySegment(text.to_string()));
        }

        Ok(Self(segments))
    }

    /// Parses a superiors prefix, where an empty string means no prefix.
    ///
    /// # Errors
    /// [`TypeError::EmptySegment`] when a non-empty prefix has an empty segment.
    pub fn parse_prefix(text: &str) -> Result<Self, TypeError> {
        if text.is_empty() { Ok(Self::empty()) } else { Self::parse(text) }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `self ++ suffix`.
    #[must_use]
    pub fn concat(&self, suffix: &Self) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + suffix.0.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&suffix.0);
        Self(segments)
    }

    /// Joins the segments with `.`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl FromStr for KeyPath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
