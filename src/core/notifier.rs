//! The listener registry and synchronous dispatch.

use crate::core::listener::FnListener;
use crate::core::{
    ChangeListener, ChangeNotifierBuilder, FailureCause, FailureHook, ListenerFailure,
    PropertyChange,
};
use crate::error::Result;
use crate::settings::NotifierConfig;
use arc_swap::ArcSwap;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::NotifierMetrics;

/// Snapshot of the registered listeners, in registration order.
pub(crate) type ListenerList = Vec<Arc<dyn ChangeListener>>;

/// Everything a notifier is assembled from.
#[derive(Default)]
pub(crate) struct NotifierParts {
    pub(crate) config: NotifierConfig,
    pub(crate) listeners: ListenerList,
    pub(crate) failure_hook: Option<Arc<FailureHook>>,
    #[cfg(feature = "metrics")]
    pub(crate) metrics: Option<NotifierMetrics>,
}

/// Shared state behind every clone of a [`ChangeNotifier`].
struct NotifierInner {
    /// Label used in log events and metrics
    name: String,
    /// Registered listeners, replaced wholesale on every registration
    listeners: ArcSwap<ListenerList>,
    /// Whether isolated failures are logged at warn level
    log_failures: bool,
    /// Optional callback for isolated failures
    failure_hook: Option<Arc<FailureHook>>,
    #[cfg(feature = "metrics")]
    metrics: Option<NotifierMetrics>,
}

/// Registry of change listeners with synchronous, in-order dispatch.
///
/// Registration is copy-on-write: each [`register`](Self::register) publishes a
/// new listener list atomically, and each [`notify`](Self::notify) iterates over
/// the list that was current when it started. Readers never block writers and
/// a dispatch never observes a half-built list.
///
/// Cloning is cheap and every clone shares the same registry, so one notifier
/// can be handed to every component that mutates or observes tracked objects.
///
/// A listener that returns an error or panics is isolated: the failure is
/// logged, passed to the failure hook if one is set, and delivery continues
/// with the next listener. `notify` itself never fails.
///
/// # Examples
///
/// ```rust
/// use change_notifier::prelude::*;
///
/// struct User { name: String }
///
/// let notifier = ChangeNotifier::new();
/// notifier.register_fn(|change| {
///     println!("{} changed", change.property());
/// });
///
/// let mut user = User { name: "ada".to_string() };
/// let old = std::mem::replace(&mut user.name, "grace".to_string());
/// notifier.notify(&user, "name", Some(&user.name), Some(&old));
/// ```
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Arc<NotifierInner>,
}

impl ChangeNotifier {
    /// Create a notifier with default settings and no listeners.
    pub fn new() -> Self {
        Self::from_parts(NotifierParts::default())
    }

    /// Create a builder for a configured notifier.
    pub fn builder() -> ChangeNotifierBuilder {
        ChangeNotifierBuilder::new()
    }

    /// Create a notifier from validated settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the settings are invalid.
    pub fn from_config(config: NotifierConfig) -> Result<Self> {
        Self::builder().with_config(config).build()
    }

    pub(crate) fn from_parts(parts: NotifierParts) -> Self {
        #[cfg(feature = "metrics")]
        if let Some(metrics) = &parts.metrics {
            metrics.update_listener_count(parts.listeners.len() as i64);
        }

        Self {
            inner: Arc::new(NotifierInner {
                name: parts.config.name,
                listeners: ArcSwap::from_pointee(parts.listeners),
                log_failures: parts.config.log_failures,
                failure_hook: parts.failure_hook,
                #[cfg(feature = "metrics")]
                metrics: parts.metrics,
            }),
        }
    }

    /// Name of this notifier, as used in log events.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Register a listener.
    ///
    /// The listener is appended after every listener already registered.
    /// Registering an equal listener twice is allowed and makes it run twice
    /// per notification.
    pub fn register<L>(&self, listener: L)
    where
        L: ChangeListener + 'static,
    {
        self.register_arc(Arc::new(listener));
    }

    /// Register a listener that is already shared.
    ///
    /// Passing clones of the same `Arc` registers the same listener more
    /// than once.
    pub fn register_arc(&self, listener: Arc<dyn ChangeListener>) {
        let previous = self.inner.listeners.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Arc::clone(&listener));
            next
        });
        let count = previous.len() + 1;

        tracing::debug!(notifier = %self.inner.name, listeners = count, "listener registered");

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.inner.metrics {
            metrics.update_listener_count(count as i64);
        }
    }

    /// Register a closure as an infallible listener.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use change_notifier::prelude::*;
    /// let notifier = ChangeNotifier::new();
    /// notifier.register_fn(|change| println!("changed: {}", change.property()));
    /// assert_eq!(notifier.listener_count(), 1);
    /// ```
    pub fn register_fn<F>(&self, callback: F)
    where
        F: Fn(&PropertyChange<'_>) + Send + Sync + 'static,
    {
        self.register(FnListener::new(callback));
    }

    /// Notify every registered listener that `property` of `target` changed.
    ///
    /// Call this after the mutation is applied, so a listener reading `target`
    /// back sees the new state. Listeners run on the calling thread, in
    /// registration order, each exactly once; this returns once all of them
    /// have run. Listeners registered while this call is in progress are not
    /// guaranteed to receive this event.
    ///
    /// Either value may be `None`, for example when a property had no
    /// previous value.
    pub fn notify(
        &self,
        target: &dyn Any,
        property: &str,
        new_value: Option<&dyn Any>,
        old_value: Option<&dyn Any>,
    ) {
        self.dispatch(&PropertyChange::new(target, property, new_value, old_value));
    }

    /// Deliver an already-built change to every registered listener.
    ///
    /// Same guarantees as [`notify`](Self::notify).
    pub fn dispatch(&self, change: &PropertyChange<'_>) {
        let property = change.property();
        if property.is_empty() {
            tracing::warn!(notifier = %self.inner.name, "notified with an empty property name");
        }

        let listeners = self.inner.listeners.load_full();
        tracing::trace!(
            notifier = %self.inner.name,
            property,
            listeners = listeners.len(),
            "dispatching change"
        );

        #[cfg(feature = "metrics")]
        let timer = self.inner.metrics.as_ref().map(|m| m.start_dispatch());

        let mut failures = 0usize;
        for (index, listener) in listeners.iter().enumerate() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.on_change(change)));
            let cause = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(err)) => FailureCause::Error(err),
                Err(payload) => FailureCause::Panic(panic_message(payload.as_ref())),
            };
            failures += 1;
            self.report_failure(ListenerFailure {
                index,
                property: property.to_string(),
                cause,
            });
        }

        if failures > 0 {
            tracing::debug!(
                notifier = %self.inner.name,
                property,
                failures,
                "dispatch finished with isolated failures"
            );
        }

        #[cfg(feature = "metrics")]
        if let (Some(metrics), Some(timer)) = (&self.inner.metrics, timer) {
            metrics.record_dispatch(timer, listeners.len() as u64, failures as u64);
        }
    }

    /// Number of registered listeners, duplicates included.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.load().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }

    fn report_failure(&self, failure: ListenerFailure) {
        if self.inner.log_failures {
            tracing::warn!(
                notifier = %self.inner.name,
                property = %failure.property,
                listener = failure.index,
                error = %failure.cause,
                "listener failed, continuing dispatch"
            );
        }
        if let Some(hook) = &self.inner.failure_hook {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| hook(&failure))) {
                if self.inner.log_failures {
                    tracing::warn!(
                        notifier = %self.inner.name,
                        property = %failure.property,
                        listener = failure.index,
                        error = %panic_message(payload.as_ref()),
                        "failure hook panicked, continuing dispatch"
                    );
                }
            }
        }
    }
}

/// Extract a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("name", &self.inner.name)
            .field("listeners", &self.listener_count())
            .field("log_failures", &self.inner.log_failures)
            .finish()
    }
}
