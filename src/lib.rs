//! # change-notifier
//!
//! Synchronous property change notification with lock-free listener snapshots.
//!
//! ## Overview
//!
//! `change-notifier` decouples code that mutates objects from code that wants
//! to hear about those mutations:
//! - A [`ChangeNotifier`](crate::core::ChangeNotifier) holds an ordered registry of listeners
//! - `notify` delivers one property change to every listener, in registration order
//! - Registration is copy-on-write using `arc-swap`, so dispatch never blocks on it
//! - A failing or panicking listener never stops delivery to the others
//!
//! ## Quick Start
//!
//! ```rust
//! use change_notifier::prelude::*;
//!
//! struct Account {
//!     balance: u64,
//! }
//!
//! let notifier = ChangeNotifier::new();
//! notifier.register_fn(|change| {
//!     if let (Some(new), Some(old)) = (change.new_value::<u64>(), change.old_value::<u64>()) {
//!         println!("{}: {} -> {}", change.property(), old, new);
//!     }
//! });
//!
//! let mut account = Account { balance: 100 };
//! set_property(&notifier, &mut account, "balance", |a| &mut a.balance, 250);
//! assert_eq!(account.balance, 250);
//! ```
//!
//! ## Feature Flags
//!
//! - `validation` (default): validate settings before building a notifier
//! - `metrics`: OpenTelemetry dispatch metrics

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod settings;

#[cfg(feature = "metrics")]
pub mod metrics;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ChangeListener, ChangeNotifier, ChangeNotifierBuilder, FailureCause, ListenerFailure,
        PropertyChange, set_optional_property, set_property,
    };
    pub use crate::error::{ListenerError, ObserveError, Result};
    pub use crate::settings::NotifierConfig;

    #[cfg(feature = "validation")]
    pub use crate::core::Validate;
}
