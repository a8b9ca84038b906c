//! Error types for change-notifier.

use std::fmt;

/// Result type alias for change-notifier operations.
pub type Result<T> = std::result::Result<T, ObserveError>;

/// Errors that can occur when configuring a notifier.
///
/// Registration and dispatch never fail; these errors only come out of
/// settings loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ObserveError {
    /// Failed to load settings from a source.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// Failed to deserialize settings.
    #[error("Failed to deserialize settings: {0}")]
    DeserializationError(String),

    /// Settings validation failed.
    #[error("Settings validation failed: {0}")]
    ValidationError(String),
}

/// Error returned by a listener from [`ChangeListener::on_change`].
///
/// The notifier never hands this back to the code that changed the property;
/// it is logged and passed to the failure hook instead.
///
/// [`ChangeListener::on_change`]: crate::core::ChangeListener::on_change
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Create a listener error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message the listener reported.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Validation error for notifier settings.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific field has an invalid value.
    InvalidField {
        /// The field name/path
        field: String,
        /// The reason why it's invalid
        reason: String,
    },
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ObserveError {
    fn from(err: ValidationError) -> Self {
        ObserveError::ValidationError(err.to_string())
    }
}
