//! Lock Metrics Module
//!
//! This module provides lock-acquisition monitoring for the containers in this
//! crate. Every acquisition first tries the lock without blocking; only when that
//! fails is the acquisition counted as contended and its wait time measured, so
//! the uncontended path costs two relaxed atomic increments.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Snapshot of the lock activity of one container
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LockMetrics {
    /// Number of shared (read) acquisitions
    pub shared_acquisitions: u64,
    /// Number of exclusive (write) acquisitions
    pub exclusive_acquisitions: u64,
    /// Acquisitions that found the lock held and had to block
    pub contended_acquisitions: u64,
    /// Total time spent blocked in contended acquisitions, in nanoseconds
    pub total_wait_ns: u64,
    /// Longest single blocked acquisition, in nanoseconds
    pub max_wait_ns: u64,
    /// Bounds-checked operations that rejected their index
    pub rejected_operations: u64,
}

impl LockMetrics {
    /// Total number of lock acquisitions
    pub fn total_acquisitions(&self) -> u64 {
        self.shared_acquisitions + self.exclusive_acquisitions
    }

    /// Contention rate as percentage of all acquisitions
    pub fn contention_rate(&self) -> f64 {
        let total = self.total_acquisitions();
        if total == 0 {
            0.0
        } else {
            (self.contended_acquisitions as f64 / total as f64) * 100.0
        }
    }

    /// Average wait of a contended acquisition
    pub fn avg_wait(&self) -> Duration {
        if self.contended_acquisitions == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(self.total_wait_ns / self.contended_acquisitions)
        }
    }

    /// Longest wait of a contended acquisition
    pub fn max_wait(&self) -> Duration {
        Duration::from_nanos(self.max_wait_ns)
    }
}

/// Internal atomic metrics collection
#[derive(Debug)]
pub struct AtomicMetrics {
    enabled: AtomicBool,
    shared_acquisitions: AtomicU64,
    exclusive_acquisitions: AtomicU64,
    contended_acquisitions: AtomicU64,
    total_wait_ns: AtomicU64,
    max_wait_ns: AtomicU64,
    rejected_operations: AtomicU64,
}

impl Default for AtomicMetrics {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            shared_acquisitions: AtomicU64::new(0),
            exclusive_acquisitions: AtomicU64::new(0),
            contended_acquisitions: AtomicU64::new(0),
            total_wait_ns: AtomicU64::new(0),
            max_wait_ns: AtomicU64::new(0),
            rejected_operations: AtomicU64::new(0),
        }
    }
}

impl AtomicMetrics {
    /// Whether recording is currently enabled
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable recording
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Record a shared acquisition
    #[inline]
    pub fn record_shared(&self) {
        if self.is_enabled() {
            self.shared_acquisitions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an exclusive acquisition
    #[inline]
    pub fn record_exclusive(&self) {
        if self.is_enabled() {
            self.exclusive_acquisitions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an acquisition that blocked for `wait`
    pub fn record_contention(&self, wait: Duration) {
        if !self.is_enabled() {
            return;
        }

        let wait_ns = u64::try_from(wait.as_nanos()).unwrap_or(u64::MAX);

        self.contended_acquisitions.fetch_add(1, Ordering::Relaxed);
        self.total_wait_ns.fetch_add(wait_ns, Ordering::Relaxed);

        let mut current_max = self.max_wait_ns.load(Ordering::Relaxed);
        while wait_ns > current_max {
            match self.max_wait_ns.compare_exchange_weak(
                current_max,
                wait_ns,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(x) => current_max = x,
            }
        }
    }

    /// Record a rejected bounds check
    #[inline]
    pub fn record_rejection(&self) {
        if self.is_enabled() {
            self.rejected_operations.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> LockMetrics {
        LockMetrics {
            shared_acquisitions: self.shared_acquisitions.load(Ordering::Relaxed),
            exclusive_acquisitions: self.exclusive_acquisitions.load(Ordering::Relaxed),
            contended_acquisitions: self.contended_acquisitions.load(Ordering::Relaxed),
            total_wait_ns: self.total_wait_ns.load(Ordering::Relaxed),
            max_wait_ns: self.max_wait_ns.load(Ordering::Relaxed),
            rejected_operations: self.rejected_operations.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters; the enabled flag is left as is
    pub fn reset(&self) {
        self.shared_acquisitions.store(0, Ordering::Relaxed);
        self.exclusive_acquisitions.store(0, Ordering::Relaxed);
        self.contended_acquisitions.store(0, Ordering::Relaxed);
        self.total_wait_ns.store(0, Ordering::Relaxed);
        self.max_wait_ns.store(0, Ordering::Relaxed);
        self.rejected_operations.store(0, Ordering::Relaxed);
    }
}

/// Trait for containers that record lock metrics
pub trait MetricsCollector {
    /// Get current lock metrics
    fn metrics(&self) -> LockMetrics;

    /// Reset all metrics
    fn reset_metrics(&self);

    /// Enable or disable metrics collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Check if metrics collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}
