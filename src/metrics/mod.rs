//! Operation Metrics Module
//!
//! This module provides lightweight metrics collection for the map: operation
//! counts, hit/miss accounting for lookups, lock contention, and operation
//! timing. Collection can be toggled at runtime; when disabled, operations
//! take no timestamps.
//!
//! Metrics never take the data lock and never change operation semantics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Point-in-time snapshot of a map's operation metrics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MapMetrics {
    /// Number of shared-lock read operations recorded
    pub read_operations: u64,
    /// Number of exclusive-lock write operations recorded
    pub write_operations: u64,
    /// Number of lookups that found their key
    pub get_hits: u64,
    /// Number of lookups that missed
    pub get_misses: u64,
    /// Number of operations whose lock fast path was blocked
    pub contended_operations: u64,
    /// Average operation time in nanoseconds, lock wait included
    pub avg_operation_time_ns: u64,
    /// Maximum operation time in nanoseconds
    pub max_operation_time_ns: u64,
}

impl MapMetrics {
    /// Total number of recorded operations
    pub fn total_operations(&self) -> u64 {
        self.read_operations + self.write_operations
    }

    /// Lookup hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.get_hits + self.get_misses;
        if lookups == 0 {
            0.0
        } else {
            (self.get_hits as f64 / lookups as f64) * 100.0
        }
    }

    /// Contention rate as a percentage of all recorded operations
    pub fn contention_rate(&self) -> f64 {
        let total = self.total_operations();
        if total == 0 {
            0.0
        } else {
            (self.contended_operations as f64 / total as f64) * 100.0
        }
    }

    /// Get average operation time as Duration
    pub fn avg_operation_time(&self) -> Duration {
        Duration::from_nanos(self.avg_operation_time_ns)
    }

    /// Get maximum operation time as Duration
    pub fn max_operation_time(&self) -> Duration {
        Duration::from_nanos(self.max_operation_time_ns)
    }
}

/// Internal atomic metrics collection
#[derive(Debug)]
pub struct AtomicMetrics {
    read_operations: AtomicU64,
    write_operations: AtomicU64,
    get_hits: AtomicU64,
    get_misses: AtomicU64,
    contended_operations: AtomicU64,
    total_time_ns: AtomicU64,
    max_time_ns: AtomicU64,
}

impl Default for AtomicMetrics {
    fn default() -> Self {
        Self {
            read_operations: AtomicU64::new(0),
            write_operations: AtomicU64::new(0),
            get_hits: AtomicU64::new(0),
            get_misses: AtomicU64::new(0),
            contended_operations: AtomicU64::new(0),
            total_time_ns: AtomicU64::new(0),
            max_time_ns: AtomicU64::new(0),
        }
    }
}

impl AtomicMetrics {
    /// Record a shared-lock operation with its duration
    pub fn record_read(&self, duration: Duration) {
        self.read_operations.fetch_add(1, Ordering::Relaxed);
        self.record_time(duration);
    }

    /// Record an exclusive-lock operation with its duration
    pub fn record_write(&self, duration: Duration) {
        self.write_operations.fetch_add(1, Ordering::Relaxed);
        self.record_time(duration);
    }

    /// Record a lookup that found its key
    pub fn record_hit(&self) {
        self.get_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that missed
    pub fn record_miss(&self) {
        self.get_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an operation whose lock fast path was blocked
    pub fn record_contention(&self) {
        self.contended_operations.fetch_add(1, Ordering::Relaxed);
    }

    fn record_time(&self, duration: Duration) {
        let duration_ns = duration.as_nanos() as u64;
        self.total_time_ns.fetch_add(duration_ns, Ordering::Relaxed);

        // Update max time if this operation was slower
        let mut current_max = self.max_time_ns.load(Ordering::Relaxed);
        while duration_ns > current_max {
            match self.max_time_ns.compare_exchange_weak(
                current_max,
                duration_ns,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(x) => current_max = x,
            }
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MapMetrics {
        let reads = self.read_operations.load(Ordering::Relaxed);
        let writes = self.write_operations.load(Ordering::Relaxed);
        let total_ops = reads + writes;
        let total_time = self.total_time_ns.load(Ordering::Relaxed);

        MapMetrics {
            read_operations: reads,
            write_operations: writes,
            get_hits: self.get_hits.load(Ordering::Relaxed),
            get_misses: self.get_misses.load(Ordering::Relaxed),
            contended_operations: self.contended_operations.load(Ordering::Relaxed),
            avg_operation_time_ns: if total_ops > 0 { total_time / total_ops } else { 0 },
            max_operation_time_ns: self.max_time_ns.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.read_operations.store(0, Ordering::Relaxed);
        self.write_operations.store(0, Ordering::Relaxed);
        self.get_hits.store(0, Ordering::Relaxed);
        self.get_misses.store(0, Ordering::Relaxed);
        self.contended_operations.store(0, Ordering::Relaxed);
        self.total_time_ns.store(0, Ordering::Relaxed);
        self.max_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Trait for data structures that support operation metrics
pub trait MetricsCollector {
    /// Get current operation metrics
    fn metrics(&self) -> MapMetrics;

    /// Reset all metrics
    fn reset_metrics(&self);

    /// Enable or disable metrics collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Check if metrics collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}
