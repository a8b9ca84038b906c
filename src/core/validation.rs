//! Settings validation support.

use crate::error::ValidationError;

/// Trait for settings validation.
///
/// Implemented by [`NotifierConfig`](crate::settings::NotifierConfig) and
/// checked before a notifier is built from it.
///
/// # Examples
///
/// ```rust
/// use change_notifier::core::Validate;
/// use change_notifier::settings::NotifierConfig;
///
/// let config = NotifierConfig {
///     name: String::new(),
///     ..NotifierConfig::default()
/// };
/// assert!(config.validate().is_err());
/// ```
pub trait Validate {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}
