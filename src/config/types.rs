use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::LocaleId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one-per-line rendering of validation failures.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.i18nco.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Preferred locale. Unset means the system locale.
    pub first_locale: Option<String>,

    /// Locale consulted when the first one has no translation. Unset means
    /// `zh_CN`, or `en_US` when the first locale is `zh_CN`.
    pub second_locale: Option<String>,

    /// Replace the second locale with the best available match after loading.
    pub auto_adjust: bool,

    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl I18nSettings {
    /// # Errors
    /// - Empty or whitespace-containing locale
    /// - Same first and second locale
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let locales = [("firstLocale", &self.first_locale), ("secondLocale", &self.second_locale)];
        for (field, locale) in locales {
            if let Some(locale) = locale
                && let Err(e) = LocaleId::new(locale.as_str())
            {
                errors.push(ValidationError::new(
                    field,
                    format!("{e}. Use an identifier such as \"en_US\", or remove this field"),
                ));
            }
        }

        if let (Some(first), Some(second)) = (&self.first_locale, &self.second_locale)
            && first == second
        {
            errors.push(ValidationError::new(
                "firstLocale/secondLocale",
                format!("The first and second locale must differ, both are '{first}'"),
            ));
        }

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.{lang,json,csv}\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Configured first locale, once validated.
    #[must_use]
    pub fn first_locale_id(&self) -> Option<LocaleId> {
        self.first_locale.as_deref().and_then(|locale| LocaleId::new(locale).ok())
    }

    /// Configured second locale, once validated.
    #[must_use]
    pub fn second_locale_id(&self) -> Option<LocaleId> {
        self.second_locale.as_deref().and_then(|locale| LocaleId::new(locale).ok())
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            first_locale: None,
            second_locale: None,
            auto_adjust: true,
            include_patterns: vec!["**/*.{lang,json,csv}".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}
