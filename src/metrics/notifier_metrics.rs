//! Dispatch metrics tracking using OpenTelemetry.

use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter};
use std::sync::Arc;
use std::time::Instant;

/// Metrics collector for notification dispatch.
///
/// Tracks dispatch counts, listener deliveries and failures, dispatch latency
/// and the number of registered listeners using OpenTelemetry metrics.
///
/// # Examples
///
/// ```rust,no_run
/// use change_notifier::metrics::NotifierMetrics;
/// use opentelemetry::global;
///
/// let meter = global::meter("change-notifier");
/// let metrics = NotifierMetrics::new(meter);
///
/// let timer = metrics.start_dispatch();
/// // ... invoke listeners ...
/// metrics.record_dispatch(timer, 3, 0);
/// ```
#[derive(Clone)]
pub struct NotifierMetrics {
    dispatches: Counter<u64>,
    deliveries: Counter<u64>,
    listener_failures: Counter<u64>,
    dispatch_duration: Histogram<f64>,
    listeners: Gauge<i64>,
    idle_seconds: Gauge<i64>,
    last_dispatch: Arc<parking_lot::Mutex<Instant>>,
}

impl NotifierMetrics {
    /// Create a new metrics collector with the provided meter.
    pub fn new(meter: Meter) -> Self {
        let dispatches = meter
            .u64_counter("change_notifier.dispatches")
            .with_description("Total number of change notifications dispatched")
            .build();

        let deliveries = meter
            .u64_counter("change_notifier.deliveries")
            .with_description("Number of listener invocations")
            .build();

        let listener_failures = meter
            .u64_counter("change_notifier.listener_failures")
            .with_description("Number of listener invocations that failed and were isolated")
            .build();

        let dispatch_duration = meter
            .f64_histogram("change_notifier.dispatch.duration")
            .with_description("Duration of a full dispatch pass in seconds")
            .with_unit("s")
            .build();

        let listeners = meter
            .i64_gauge("change_notifier.listeners")
            .with_description("Number of registered listeners")
            .build();

        let idle_seconds = meter
            .i64_gauge("change_notifier.idle")
            .with_description("Time since the last dispatch in seconds")
            .with_unit("s")
            .build();

        Self {
            dispatches,
            deliveries,
            listener_failures,
            dispatch_duration,
            listeners,
            idle_seconds,
            last_dispatch: Arc::new(parking_lot::Mutex::new(Instant::now())),
        }
    }

    /// Start a dispatch timer.
    ///
    /// Returns an `Instant` that should be passed to `record_dispatch` once
    /// every listener has run.
    pub fn start_dispatch(&self) -> Instant {
        self.dispatches.add(1, &[]);
        Instant::now()
    }

    /// Record a finished dispatch pass.
    ///
    /// # Arguments
    ///
    /// * `start` - The `Instant` returned from `start_dispatch()`
    /// * `delivered` - Number of listeners invoked
    /// * `failed` - Number of those invocations that failed
    ///
    /// Also records the idle gap that ended when this dispatch started.
    pub fn record_dispatch(&self, start: Instant, delivered: u64, failed: u64) {
        let duration = start.elapsed().as_secs_f64();
        self.deliveries.add(delivered, &[]);
        if failed > 0 {
            self.listener_failures.add(failed, &[]);
        }
        self.dispatch_duration.record(duration, &[]);

        let mut last = self.last_dispatch.lock();
        self.idle_seconds.record(start.saturating_duration_since(*last).as_secs() as i64, &[]);
        *last = Instant::now();
    }

    /// Update the number of registered listeners.
    pub fn update_listener_count(&self, count: i64) {
        self.listeners.record(count, &[]);
    }

    /// Update the idle-time metric.
    ///
    /// Dispatch records the gap it closes. Call this periodically (e.g. from a
    /// housekeeping timer) to see a notifier that has stopped dispatching.
    pub fn update_idle_time(&self) {
        let idle_secs = self.last_dispatch.lock().elapsed().as_secs() as i64;
        self.idle_seconds.record(idle_secs, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChangeNotifier;
    use opentelemetry::global;

    #[test]
    fn test_metrics_creation() {
        let meter = global::meter("test");
        let metrics = NotifierMetrics::new(meter);

        // Test basic operations don't panic
        let timer = metrics.start_dispatch();
        metrics.record_dispatch(timer, 2, 1);

        metrics.update_listener_count(5);
        metrics.update_idle_time();
    }

    #[test]
    fn test_dispatch_resets_idle_clock() {
        let metrics = NotifierMetrics::new(global::meter("test"));
        let before = *metrics.last_dispatch.lock();

        std::thread::sleep(std::time::Duration::from_millis(5));
        let timer = metrics.start_dispatch();
        metrics.record_dispatch(timer, 1, 0);

        assert!(*metrics.last_dispatch.lock() > before);
        metrics.update_idle_time();
    }

    #[test]
    fn test_metrics_clone() {
        let meter = global::meter("test");
        let metrics = NotifierMetrics::new(meter);
        let metrics2 = metrics.clone();

        let timer1 = metrics.start_dispatch();
        let timer2 = metrics2.start_dispatch();

        metrics.record_dispatch(timer1, 1, 0);
        metrics2.record_dispatch(timer2, 1, 0);
    }

    #[test]
    fn test_notifier_with_metrics() {
        let notifier = ChangeNotifier::builder()
            .with_metrics(global::meter("test"))
            .with_listener_fn(|_| {})
            .log_failures(false)
            .build()
            .unwrap();

        notifier.register_fn(|_| panic!("metrics listener"));
        let target = 7u16;
        notifier.notify(&target, "value", Some(&8u16), Some(&7u16));
        assert_eq!(notifier.listener_count(), 2);
    }
}
