//! Lookup performance counters for the resolver

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Hit rate below which a report warns, in percent
pub const LOW_HIT_RATE_PERCENT: f64 = 80.0;

/// Average lookup time above which a report warns
pub const SLOW_LOOKUP: Duration = Duration::from_millis(1);

/// Interval between periodic reports in development builds
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(30);

/// Snapshot of lookup counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LookupMetrics {
    /// Total number of resolve calls
    pub lookups: u64,
    /// Resolves answered from the memo cache
    pub cache_hits: u64,
    /// Resolves that walked a dictionary
    pub cache_misses: u64,
    /// Sum of all lookup durations
    pub total_lookup_time: Duration,
    /// Mean lookup duration
    pub average_lookup_time: Duration,
}

impl LookupMetrics {
    /// Percentage of lookups served from cache; 0 when nothing was looked up
    pub fn cache_hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / self.lookups as f64 * 100.0
    }
}

/// Thread-safe accumulator of lookup timings
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    inner: Mutex<LookupMetrics>,
}

impl MetricsRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one lookup
    pub fn record(&self, elapsed: Duration, cache_hit: bool) {
        let mut metrics = self.inner.lock();
        metrics.lookups += 1;
        metrics.total_lookup_time += elapsed;
        if cache_hit {
            metrics.cache_hits += 1;
        } else {
            metrics.cache_misses += 1;
        }
        let lookups = u32::try_from(metrics.lookups).unwrap_or(u32::MAX);
        metrics.average_lookup_time = metrics.total_lookup_time / lookups;
    }

    /// Current counters
    pub fn snapshot(&self) -> LookupMetrics {
        *self.inner.lock()
    }

    /// Zero every counter
    pub fn reset(&self) {
        *self.inner.lock() = LookupMetrics::default();
    }

    /// Log a summary of the counters and warn on poor cache behaviour
    pub fn log_report(&self) {
        let metrics = self.snapshot();
        info!(
            lookups = metrics.lookups,
            cache_hit_rate = %format!("{:.2}%", metrics.cache_hit_rate()),
            average_lookup_us = metrics.average_lookup_time.as_micros() as u64,
            total_lookup_us = metrics.total_lookup_time.as_micros() as u64,
            "Translation lookup report"
        );

        if metrics.cache_hit_rate() < LOW_HIT_RATE_PERCENT {
            warn!("Low translation cache hit rate: {:.2}%", metrics.cache_hit_rate());
        }
        if metrics.average_lookup_time > SLOW_LOOKUP {
            warn!("High average translation lookup time: {:?}", metrics.average_lookup_time);
        }
    }
}

/// Handle to a periodic report task; the task stops when the handle drops
#[derive(Debug)]
pub struct ReporterHandle {
    task: JoinHandle<()>,
}

impl ReporterHandle {
    /// Stop reporting
    pub fn stop(self) {}
}

impl Drop for ReporterHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Log a report every `interval` while any lookups have been recorded.
///
/// Must be called from within a tokio runtime.
pub fn spawn_reporter(recorder: Arc<MetricsRecorder>, interval: Duration) -> ReporterHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if recorder.snapshot().lookups > 0 {
                recorder.log_report();
            }
        }
    });
    ReporterHandle { task }
}
