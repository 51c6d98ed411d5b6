//! Logging setup and run counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout carries only the count report. `RUST_LOG`
/// overrides the default `info` filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    urls_fetched: AtomicU64,
    host_failures: AtomicU64,
    deadline_failures: AtomicU64,
    bytes_read: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_fetched(&self, body_len: usize) {
        self.urls_fetched.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(body_len as u64, Ordering::Relaxed);
        tracing::debug!(counter = "urls_fetched", "Metric incremented");
    }

    pub fn host_failed(&self) {
        self.host_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "host_failures", "Metric incremented");
    }

    pub fn deadline_exceeded(&self) {
        self.deadline_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "deadline_failures", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            urls_fetched: self.urls_fetched.load(Ordering::Relaxed),
            host_failures: self.host_failures.load(Ordering::Relaxed),
            deadline_failures: self.deadline_failures.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub urls_fetched: u64,
    pub host_failures: u64,
    pub deadline_failures: u64,
    pub bytes_read: u64,
}
