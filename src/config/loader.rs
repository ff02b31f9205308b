//! Reading `.i18nco.json` from a resource directory.

use std::fs;
use std::io;
use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// Settings file looked up directly in the resource directory.
pub const CONFIG_FILE_NAME: &str = ".i18nco.json";

impl I18nSettings {
    /// Reads and validates `resource_root/.i18nco.json`.
    ///
    /// A directory without the file gets [`I18nSettings::default`]; fields
    /// missing from the file keep their defaults too.
    ///
    /// # Errors
    /// The file cannot be read, is not valid JSON, or fails [`I18nSettings::validate`].
    pub fn load(resource_root: &Path) -> Result<Self, ConfigError> {
        let path = resource_root.join(CONFIG_FILE_NAME);
        let settings = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Self>(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                Self::default()
            }
            Err(err) => return Err(err.into()),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(path = %path.display(), ?settings, "Settings ready");
        Ok(settings)
    }
}
