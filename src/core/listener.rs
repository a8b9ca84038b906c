//! Listener trait and the failure record produced by dispatch.

use crate::core::PropertyChange;
use crate::error::ListenerError;
use std::fmt;

/// Something that wants to hear about property changes.
///
/// Listeners are invoked synchronously on the thread that changed the
/// property, so implementations should return promptly. A listener must not
/// trigger notification of the same property on the same target in a way that
/// recurses forever; the notifier does not detect cycles.
///
/// # Examples
///
/// ```rust
/// use change_notifier::core::{ChangeListener, PropertyChange};
/// use change_notifier::error::ListenerError;
///
/// struct AuditLog;
///
/// impl ChangeListener for AuditLog {
///     fn on_change(&self, change: &PropertyChange<'_>) -> Result<(), ListenerError> {
///         println!("{} changed", change.property());
///         Ok(())
///     }
/// }
/// ```
pub trait ChangeListener: Send + Sync {
    /// Handle one property change.
    ///
    /// # Errors
    ///
    /// A returned error is reported by the notifier and does not stop delivery
    /// to the remaining listeners.
    fn on_change(&self, change: &PropertyChange<'_>) -> Result<(), ListenerError>;
}

/// Adapts an infallible closure into a [`ChangeListener`].
pub(crate) struct FnListener<F>(F);

impl<F> FnListener<F>
where
    F: Fn(&PropertyChange<'_>) + Send + Sync,
{
    pub(crate) fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> ChangeListener for FnListener<F>
where
    F: Fn(&PropertyChange<'_>) + Send + Sync,
{
    fn on_change(&self, change: &PropertyChange<'_>) -> Result<(), ListenerError> {
        (self.0)(change);
        Ok(())
    }
}

/// Why a listener invocation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The listener returned an error.
    Error(ListenerError),
    /// The listener panicked; carries the panic payload when it was a string.
    Panic(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => write!(f, "listener returned error: {}", err),
            Self::Panic(msg) => write!(f, "listener panicked: {}", msg),
        }
    }
}

/// A single failed listener invocation, reported after it was isolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Position of the failing listener in the dispatch snapshot.
    pub index: usize,
    /// Property that was being delivered.
    pub property: String,
    /// What went wrong.
    pub cause: FailureCause,
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "listener #{} failed on '{}': {}",
            self.index, self.property, self.cause
        )
    }
}

/// Callback invoked for each isolated listener failure.
pub type FailureHook = dyn Fn(&ListenerFailure) + Send + Sync + 'static;
