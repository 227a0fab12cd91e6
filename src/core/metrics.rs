//! Logger metrics for observability
//!
//! Counters shared by every logger bound to the same policy.

use std::sync::atomic::{AtomicU64, Ordering};

/// Emission counters
///
/// # Example
///
/// ```
/// use leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.suppressed_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines written to a destination
    emitted: AtomicU64,

    /// Messages filtered out by threshold
    suppressed: AtomicU64,

    /// Lines the destination failed to accept
    write_failures: AtomicU64,

    /// FATAL messages emitted
    fatal: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            fatal: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failure_count(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fatal_count(&self) -> u64 {
        self.fatal.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fatal(&self) -> u64 {
        self.fatal.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.fatal.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
