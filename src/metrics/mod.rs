//! Built-in metrics for notification dispatch.
//!
//! Provides OpenTelemetry metrics tracking:
//! - Dispatches and listener deliveries
//! - Isolated listener failures
//! - Dispatch duration
//! - Registered listeners
//! - Time since the last dispatch
//!
//! # Examples
//!
//! ```rust,no_run
//! use change_notifier::prelude::*;
//! use opentelemetry::global;
//!
//! # fn example() -> Result<()> {
//! let meter = global::meter("my-app");
//!
//! let notifier = ChangeNotifier::builder()
//!     .with_name("orders")
//!     .with_metrics(meter)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod notifier_metrics;

pub use notifier_metrics::NotifierMetrics;
