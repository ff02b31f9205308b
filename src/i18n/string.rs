//! Translated text that remembers where it came from.

use std::fmt::{
    self,
    Display,
    Formatter,
};

use super::Internationalization;
use crate::types::{
    KEY_SEPARATOR,
    LocaleId,
};

/// The result of [`Internationalization::translation`].
///
/// Besides the text it keeps the key and the context it was looked up in,
/// so nested keys can be reached with [`I18nString::child`].
#[derive(Debug, Clone)]
pub struct I18nString<'a> {
    /// Dotted key.
    key: String,
    /// Context the key resolves in.
    context: &'a Internationalization,
    /// Locale explicitly requested by the caller, carried into children.
    locale: Option<&'a LocaleId>,
}

impl<'a> I18nString<'a> {
    /// Wraps a lookup without resolving it yet.
    pub(super) const fn new(
        key: String,
        context: &'a Internationalization,
        locale: Option<&'a LocaleId>,
    ) -> Self {
        Self { key, context, locale }
    }

    /// The translated text, or the key when no locale has it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.context.resolve(&self.key, self.locale).unwrap_or(&self.key)
    }

    /// The dotted key this text was looked up with.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether no locale had the key and the text is the key itself.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.context.resolve(&self.key, self.locale).is_none()
    }

    /// Looks up `name` below this key.
    ///
    /// `i18n.translation("mode", None).child("singleton")` is the same lookup
    /// as `i18n.translation("mode.singleton", None)`.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let key = if self.key.is_empty() {
            name.to_string()
        } else {
            format!("{}{KEY_SEPARATOR}{name}", self.key)
        };
        Self::new(key, self.context, self.locale)
    }

    /// Replaces `{0}`, `{1}`, … with `args` and `{name}` with `named`.
    ///
    /// Placeholders without a value are left untouched.
    #[must_use]
    pub fn format(&self, args: &[&dyn Display], named: &[(&str, &dyn Display)]) -> String {
        format_placeholders(self.as_str(), args, named)
    }
}

impl Display for I18nString<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for I18nString<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for I18nString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<I18nString<'_>> for String {
    fn from(value: I18nString<'_>) -> Self {
        value.as_str().to_string()
    }
}

/// Plain `{placeholder}` substitution, positional values first.
fn format_placeholders(
    template: &str,
    args: &[&dyn Display],
    named: &[(&str, &dyn Display)],
) -> String {
    let positional = args.iter().enumerate().map(|(index, value)| (index.to_string(), *value));
    let named = named.iter().map(|(name, value)| ((*name).to_string(), *value));

    positional.chain(named).fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), &value.to_string())
    })
}
