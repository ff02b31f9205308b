//! Parse state driven by `#define` directives.

use super::error::ParseErrorKind;
use super::statement::{
    Assignment,
    Directive,
};
use crate::table::Entry;
use crate::types::{
    KeyPath,
    LocaleId,
};

/// `#define locale <locale>...`
pub const LOCALE_DIRECTIVE: &str = "locale";
/// `#define superiors [<prefix>...]`
pub const SUPERIORS_DIRECTIVE: &str = "superiors";

/// Active locales and key prefix applied to the assignments that follow.
///
/// The locale list is never empty; a rejected directive leaves the state
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveState {
    /// Locales the next assignments are written to.
    locales: Vec<LocaleId>,
    /// Prefix of the next assignment keys.
    superiors: KeyPath,
}

impl DirectiveState {
    #[must_use]
    pub fn new(default_locale: LocaleId, default_superiors: KeyPath) -> Self {
        Self { locales: vec![default_locale], superiors: default_superiors }
    }

    #[must_use]
    pub fn locales(&self) -> &[LocaleId] {
        &self.locales
    }

    #[must_use]
    pub const fn superiors(&self) -> &KeyPath {
        &self.superiors
    }

    /// Applies one directive.
    pub fn apply(&mut self, directive: &Directive) -> Result<(), ParseErrorKind> {
        match directive.name.as_str() {
            LOCALE_DIRECTIVE => {
                self.locales = parse_locales(&directive.arguments)?;
            }
            SUPERIORS_DIRECTIVE => {
                self.superiors = parse_superiors(&directive.arguments)?;
            }
            other => return Err(ParseErrorKind::UnknownDirective(other.to_string())),
        }
        tracing::trace!(locales = ?self.locales, superiors = %self.superiors, "directive applied");
        Ok(())
    }

    /// Resolves an assignment against the current state, one entry per active locale.
    pub fn entries_for<'s>(
        &'s self,
        assignment: &'s Assignment,
    ) -> impl Iterator<Item = Entry> + 's {
        let key = self.superiors.concat(&assignment.key);
        self.locales.iter().map(move |locale| Entry {
            locale: locale.clone(),
            key: key.clone(),
            value: assignment.value.clone(),
        })
    }
}

/// `#locale` arguments, deduplicated in order.
fn parse_locales(arguments: &[String]) -> Result<Vec<LocaleId>, ParseErrorKind> {
    if arguments.is_empty() {
        return Err(ParseErrorKind::EmptyLocaleDirective);
    }

    let mut locales: Vec<LocaleId> = Vec::with_capacity(arguments.len());
    for argument in arguments {
        let locale = LocaleId::new(argument.as_str())
            .map_err(|e| ParseErrorKind::InvalidLocale(e.to_string()))?;
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }
    Ok(locales)
}

/// Tokens made only of `.`, `/` or `#` clear the prefix.
fn is_clear_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| matches!(c, '.' | '/' | '#'))
}

/// Joins `#superiors` arguments with `.` into a prefix.
fn parse_superiors(arguments: &[String]) -> Result<KeyPath, ParseErrorKind> {
    if arguments.iter().all(|argument| is_clear_token(argument)) {
        return Ok(KeyPath::empty());
    }

    let joined = arguments.join(".");
    KeyPath::parse_prefix(&joined).map_err(|e| ParseErrorKind::MalformedStatement(e.to_string()))
}
