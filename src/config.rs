//! `.i18nco.json` settings for a resource directory.
/// Settings file reading
mod loader;
/// Resource file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    I18nSettings,
    ValidationError,
};
