//! Notifier settings and their loading from files and the environment.

use crate::error::{ObserveError, Result};
use config::{Environment, File};
use serde::Deserialize;
use std::path::Path;

#[cfg(feature = "validation")]
use crate::core::Validate;
#[cfg(feature = "validation")]
use crate::error::ValidationError;

/// Longest accepted notifier name.
#[cfg(feature = "validation")]
const MAX_NAME_LEN: usize = 64;

/// Settings for a [`ChangeNotifier`](crate::core::ChangeNotifier).
///
/// Missing fields take their default values, so an empty file is valid.
///
/// # Examples
///
/// ```yaml
/// name: orders
/// log_failures: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Label used in log events and metrics.
    pub name: String,
    /// Log isolated listener failures at warn level.
    pub log_failures: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            log_failures: true,
        }
    }
}

impl NotifierConfig {
    /// Load settings from an optional file, then apply environment overrides.
    ///
    /// The file format is detected from its extension (`.yaml`, `.yml`,
    /// `.toml`, `.json`). Environment variables named `<PREFIX>_<FIELD>`
    /// override file values, e.g. `NOTIFIER_LOG_FAILURES=false`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file has an unsupported extension or cannot be read
    /// - A value cannot be deserialized into its field
    /// - The resulting settings fail validation
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use change_notifier::settings::NotifierConfig;
    /// use std::path::Path;
    ///
    /// # fn example() -> change_notifier::error::Result<()> {
    /// let config = NotifierConfig::load(Some(Path::new("config/notifier.toml")), "NOTIFIER")?;
    /// println!("notifier name: {}", config.name);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        Self::load_sources(path, Some(env_prefix))
    }

    /// Load settings from a file, with no environment overrides.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_sources(Some(path.as_ref()), None)
    }

    fn load_sources(path: Option<&Path>, env_prefix: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            validate_extension(path)?;
            if !path.exists() {
                return Err(ObserveError::LoadError(format!(
                    "Settings file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        if let Some(prefix) = env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings = builder
            .build()
            .map_err(|e| ObserveError::LoadError(format!("Failed to build settings: {}", e)))?;

        let config: Self = settings.try_deserialize().map_err(|e| {
            ObserveError::DeserializationError(format!("Failed to deserialize settings: {}", e))
        })?;

        #[cfg(feature = "validation")]
        config.validate()?;

        tracing::debug!(
            notifier = %config.name,
            log_failures = config.log_failures,
            "loaded notifier settings"
        );

        Ok(config)
    }
}

/// Check that the file extension is one the loader understands.
fn validate_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            ObserveError::LoadError(format!(
                "Unable to determine file format for: {}",
                path.display()
            ))
        })?;

    match extension {
        "yaml" | "yml" | "toml" | "json" => Ok(()),
        _ => Err(ObserveError::LoadError(format!(
            "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
            extension
        ))),
    }
}

#[cfg(feature = "validation")]
impl Validate for NotifierConfig {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::invalid_field("name", "must not be empty"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::invalid_field(
                "name",
                format!("must be at most {} characters", MAX_NAME_LEN),
            ));
        }
        Ok(())
    }
}
