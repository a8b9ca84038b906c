//! Builder for constructing ChangeNotifier instances.

use crate::core::listener::FnListener;
use crate::core::notifier::{ListenerList, NotifierParts};
use crate::core::{ChangeListener, ChangeNotifier, FailureHook, ListenerFailure, PropertyChange};
use crate::error::Result;
use crate::settings::NotifierConfig;
use std::sync::Arc;

#[cfg(feature = "validation")]
use crate::core::Validate;

#[cfg(feature = "metrics")]
use crate::metrics::NotifierMetrics;

/// Builder for constructing a `ChangeNotifier` instance.
///
/// Provides a fluent interface for naming the notifier, choosing how listener
/// failures are reported, and pre-registering listeners.
///
/// # Examples
///
/// ```rust
/// use change_notifier::prelude::*;
///
/// # fn example() -> Result<()> {
/// let notifier = ChangeNotifier::builder()
///     .with_name("orders")
///     .on_listener_failure(|failure| eprintln!("{}", failure))
///     .with_listener_fn(|change| println!("{} changed", change.property()))
///     .build()?;
///
/// assert_eq!(notifier.name(), "orders");
/// assert_eq!(notifier.listener_count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct ChangeNotifierBuilder {
    config: NotifierConfig,
    listeners: ListenerList,
    failure_hook: Option<Arc<FailureHook>>,
    #[cfg(feature = "metrics")]
    metrics: Option<NotifierMetrics>,
}

impl ChangeNotifierBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: NotifierConfig::default(),
            listeners: Vec::new(),
            failure_hook: None,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Set the name used in log events and metrics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Choose whether isolated listener failures are logged at warn level.
    ///
    /// Enabled by default. The failure hook is called either way.
    pub fn log_failures(mut self, enabled: bool) -> Self {
        self.config.log_failures = enabled;
        self
    }

    /// Replace every setting with a loaded configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use change_notifier::prelude::*;
    /// use std::path::Path;
    ///
    /// # fn example() -> Result<()> {
    /// let config = NotifierConfig::load(Some(Path::new("config/notifier.yaml")), "NOTIFIER")?;
    /// let notifier = ChangeNotifier::builder().with_config(config).build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(mut self, config: NotifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Pre-register a listener. Listeners keep the order they are added in.
    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: ChangeListener + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Pre-register a closure as an infallible listener.
    pub fn with_listener_fn<F>(self, callback: F) -> Self
    where
        F: Fn(&PropertyChange<'_>) + Send + Sync + 'static,
    {
        self.with_listener(FnListener::new(callback))
    }

    /// Set a callback that receives every isolated listener failure.
    ///
    /// The callback runs on the dispatching thread, right after the failing
    /// listener and before the next one.
    pub fn on_listener_failure<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ListenerFailure) + Send + Sync + 'static,
    {
        self.failure_hook = Some(Arc::new(hook));
        self
    }

    /// Record dispatch metrics through OpenTelemetry.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, meter: opentelemetry::metrics::Meter) -> Self {
        self.metrics = Some(NotifierMetrics::new(meter));
        self
    }

    /// Build the notifier.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the settings are invalid (for example an
    /// empty name).
    pub fn build(self) -> Result<ChangeNotifier> {
        #[cfg(feature = "validation")]
        self.config.validate()?;

        tracing::debug!(
            notifier = %self.config.name,
            listeners = self.listeners.len(),
            "building change notifier"
        );

        Ok(ChangeNotifier::from_parts(NotifierParts {
            config: self.config,
            listeners: self.listeners,
            failure_hook: self.failure_hook,
            #[cfg(feature = "metrics")]
            metrics: self.metrics,
        }))
    }
}

impl Default for ChangeNotifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
