//! Metrics collection for SEO Pulse
//!
//! This module keeps in-process counters for the analysis pipeline:
//! - Atomic counters for analyses, link classification and exports
//! - Failure breakdown by error kind
//! - A bounded ring buffer of analysis durations for percentiles
//! - Prometheus-compatible text rendering
//!
//! # Example
//!
//! ```rust
//! use seo_pulse::metrics::global_metrics;
//! use std::time::Duration;
//!
//! global_metrics().record_success(Duration::from_millis(420));
//! let output = global_metrics().to_prometheus_format();
//! assert!(output.contains("seo_pulse_analyses_succeeded_total"));
//! ```

use crate::error::ErrorKind;
use crate::export::ExportFormat;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

/// Maximum number of duration samples kept for percentiles
const MAX_HISTOGRAM_SAMPLES: usize = 1000;

/// Pipeline metrics
///
/// Thread-safe; counters are atomics, breakdowns sit behind `RwLock`s.
#[derive(Debug)]
pub struct Metrics {
    /// Analyses started
    pub analyses_started: AtomicU64,
    /// Analyses that produced a report
    pub analyses_succeeded: AtomicU64,
    /// Analyses that ended in an error
    pub analyses_failed: AtomicU64,
    /// Links placed in the internal partition
    pub links_internal: AtomicU64,
    /// Links placed in the external partition
    pub links_external: AtomicU64,
    /// Links dropped because their href did not resolve
    pub links_dropped: AtomicU64,
    /// Reports exported
    pub exports_total: AtomicU64,

    analysis_durations: RwLock<RingBuffer<Duration>>,
    failures_by_kind: RwLock<HashMap<ErrorKind, u64>>,
    exports_by_format: RwLock<HashMap<ExportFormat, u64>>,
}

/// Fixed-capacity sample buffer; oldest samples are overwritten
#[derive(Debug, Clone)]
struct RingBuffer<T> {
    data: Vec<T>,
    capacity: usize,
    write_pos: usize,
    total_samples: u64,
}

impl<T: Clone + Ord> RingBuffer<T> {
    fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            write_pos: 0,
            total_samples: 0,
        }
    }

    fn push(&mut self, value: T) {
        if self.data.len() < self.capacity {
            self.data.push(value);
        } else {
            self.data[self.write_pos] = value;
        }
        self.write_pos = (self.write_pos + 1) % self.capacity;
        self.total_samples += 1;
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Percentile in `0.0..=1.0`, nearest rank
    fn percentile(&self, p: f64) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let mut sorted = self.data.clone();
        sorted.sort();
        let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
        sorted.get(idx).cloned()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create an empty metrics set
    pub fn new() -> Self {
        Self {
            analyses_started: AtomicU64::new(0),
            analyses_succeeded: AtomicU64::new(0),
            analyses_failed: AtomicU64::new(0),
            links_internal: AtomicU64::new(0),
            links_external: AtomicU64::new(0),
            links_dropped: AtomicU64::new(0),
            exports_total: AtomicU64::new(0),
            analysis_durations: RwLock::new(RingBuffer::new(MAX_HISTOGRAM_SAMPLES)),
            failures_by_kind: RwLock::new(HashMap::new()),
            exports_by_format: RwLock::new(HashMap::new()),
        }
    }

    /// An analysis began
    pub fn record_start(&self) {
        self.analyses_started.fetch_add(1, Ordering::Relaxed);
    }

    /// An analysis produced a report after `duration`
    pub fn record_success(&self, duration: Duration) {
        self.analyses_succeeded.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut durations) = self.analysis_durations.write() {
            durations.push(duration);
        }
    }

    /// An analysis failed
    pub fn record_failure(&self, kind: ErrorKind) {
        self.analyses_failed.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut breakdown) = self.failures_by_kind.write() {
            *breakdown.entry(kind).or_insert(0) += 1;
        }
    }

    /// Outcome of one link classification
    pub fn record_links(&self, internal: usize, external: usize, dropped: usize) {
        self.links_internal
            .fetch_add(internal as u64, Ordering::Relaxed);
        self.links_external
            .fetch_add(external as u64, Ordering::Relaxed);
        self.links_dropped.fetch_add(dropped as u64, Ordering::Relaxed);
    }

    /// A report was exported
    pub fn record_export(&self, format: ExportFormat) {
        self.exports_total.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut breakdown) = self.exports_by_format.write() {
            *breakdown.entry(format).or_insert(0) += 1;
        }
    }

    /// Failures recorded for one kind
    pub fn failures(&self, kind: ErrorKind) -> u64 {
        self.failures_by_kind
            .read()
            .ok()
            .and_then(|b| b.get(&kind).copied())
            .unwrap_or(0)
    }

    /// Median analysis duration, if any analysis succeeded
    pub fn median_duration(&self) -> Option<Duration> {
        self.analysis_durations
            .read()
            .ok()
            .and_then(|d| d.percentile(0.5))
    }

    /// Render all metrics in Prometheus text format
    pub fn to_prometheus_format(&self) -> String {
        let mut output = String::new();

        let counters = [
            ("seo_pulse_analyses_started_total", &self.analyses_started),
            ("seo_pulse_analyses_succeeded_total", &self.analyses_succeeded),
            ("seo_pulse_analyses_failed_total", &self.analyses_failed),
            ("seo_pulse_links_internal_total", &self.links_internal),
            ("seo_pulse_links_external_total", &self.links_external),
            ("seo_pulse_links_dropped_total", &self.links_dropped),
            ("seo_pulse_exports_total", &self.exports_total),
        ];
        for (name, counter) in counters {
            output.push_str(&format!("{} {}\n", name, counter.load(Ordering::Relaxed)));
        }

        if let Ok(breakdown) = self.failures_by_kind.read() {
            let mut kinds: Vec<_> = breakdown.iter().collect();
            kinds.sort_by_key(|(kind, _)| kind.as_str());
            for (kind, count) in kinds {
                output.push_str(&format!(
                    "seo_pulse_failures_total{{kind=\"{}\"}} {}\n",
                    kind.as_str(),
                    count
                ));
            }
        }

        if let Ok(breakdown) = self.exports_by_format.read() {
            let mut formats: Vec<_> = breakdown.iter().collect();
            formats.sort_by_key(|(format, _)| format.extension());
            for (format, count) in formats {
                output.push_str(&format!(
                    "seo_pulse_exports_by_format_total{{format=\"{}\"}} {}\n",
                    format.extension(),
                    count
                ));
            }
        }

        if let Ok(durations) = self.analysis_durations.read() {
            if !durations.is_empty() {
                for (label, p) in [("p50", 0.5), ("p95", 0.95), ("p99", 0.99)] {
                    if let Some(value) = durations.percentile(p) {
                        output.push_str(&format!(
                            "seo_pulse_analysis_duration_{}_ms {}\n",
                            label,
                            value.as_millis()
                        ));
                    }
                }
            }
        }

        output
    }
}

/// Process-wide metrics instance
pub static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Get or initialize the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    METRICS.get_or_init(Metrics::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = Metrics::new();

        metrics.record_start();
        metrics.record_success(Duration::from_millis(100));
        assert_eq!(metrics.analyses_started.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.analyses_succeeded.load(Ordering::Relaxed), 1);

        metrics.record_failure(ErrorKind::FetchFailure);
        metrics.record_failure(ErrorKind::FetchFailure);
        assert_eq!(metrics.failures(ErrorKind::FetchFailure), 2);
        assert_eq!(metrics.failures(ErrorKind::Unknown), 0);

        metrics.record_links(3, 2, 1);
        assert_eq!(metrics.links_dropped.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_ring_buffer_wraps() {
        let mut buffer = RingBuffer::new(3);
        for v in [5, 1, 9, 7] {
            buffer.push(v);
        }
        assert_eq!(buffer.total_samples, 4);
        assert_eq!(buffer.data, vec![7, 1, 9]);
        assert_eq!(buffer.percentile(0.5), Some(7));
    }

    #[test]
    fn test_prometheus_output() {
        let metrics = Metrics::new();
        metrics.record_success(Duration::from_millis(250));
        metrics.record_failure(ErrorKind::InvalidInput);
        metrics.record_export(ExportFormat::Markdown);

        let output = metrics.to_prometheus_format();
        assert!(output.contains("seo_pulse_analyses_succeeded_total 1\n"));
        assert!(output.contains("seo_pulse_failures_total{kind=\"invalid_input\"} 1\n"));
        assert!(output.contains("seo_pulse_exports_by_format_total{format=\"md\"} 1\n"));
        assert!(output.contains("seo_pulse_analysis_duration_p50_ms 250\n"));
        assert_eq!(metrics.median_duration(), Some(Duration::from_millis(250)));
    }
}
