//! Core notification types.

mod builder;
mod change;
mod listener;
mod notifier;
mod property;

#[cfg(feature = "validation")]
mod validation;

pub use builder::ChangeNotifierBuilder;
pub use change::PropertyChange;
pub use listener::{ChangeListener, FailureCause, FailureHook, ListenerFailure};
pub use notifier::ChangeNotifier;
pub use property::{set_optional_property, set_property};

#[cfg(feature = "validation")]
pub use validation::Validate;
