//! Concurrent Map Implementation
//!
//! This module implements a thread-safe hash map guarded by a single
//! reader-writer lock. The design favors simplicity and predictability over
//! raw scalability: one lock, one backing table, no partial states.
//!
//! ## Design
//!
//! The map uses:
//! - A single `parking_lot::RwLock` as the only synchronization primitive
//! - An `FxHashMap` backing table for fast, non-cryptographic hashing
//! - Shared acquisition for reads, exclusive acquisition for writes
//! - Clone-out reads, so no lock guard ever escapes the API
//!
//! ## Locking discipline
//!
//! - `get`, `len`, `is_empty`, `contains_key`, `keys`, `values`, and
//!   `entries` hold the lock in shared mode; any number may run in parallel
//! - `insert`, `remove`, and `clear` hold the lock in exclusive mode,
//!   mutually exclusive with all readers and writers
//! - The lock is never acquired recursively and is never held across a call
//!   to another operation, so no deadlock is possible
//!
//! ## Performance Characteristics
//!
//! - **Get**: O(1) average case, parallel with other reads
//! - **Insert**: O(1) average case, serializes against all other operations
//! - **Remove**: O(1) average case, serializes against all other operations
//! - **Keys/Values/Entries**: O(n) snapshot under one shared acquisition
//!
//! ## Example
//!
//! ```rust
//! use rwmap::ConcurrentMap;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let map = Arc::new(ConcurrentMap::new());
//!
//! // Writer thread
//! let writer = thread::spawn({
//!     let map = Arc::clone(&map);
//!     move || {
//!         for i in 0..1000 {
//!             map.insert(i, i * 2);
//!         }
//!     }
//! });
//!
//! // Reader thread
//! let reader = thread::spawn({
//!     let map = Arc::clone(&map);
//!     move || {
//!         let mut seen = 0;
//!         for i in 0..1000 {
//!             if map.get(&i).is_some() {
//!                 seen += 1;
//!             }
//!         }
//!         seen
//!     }
//! });
//!
//! writer.join().unwrap();
//! reader.join().unwrap();
//! assert_eq!(map.len(), 1000);
//! ```

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use fxhash::{FxBuildHasher, FxHashMap};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::metrics::{AtomicMetrics, MapMetrics, MetricsCollector};

/// A thread-safe hash map behind a single reader-writer lock
///
/// Every operation takes `&self` and acquires the internal lock for exactly
/// the duration of the operation: shared for reads, exclusive for writes.
/// Single-key operations are linearizable; enumeration methods return a
/// snapshot taken under one shared acquisition.
///
/// # Type Parameters
///
/// * `K` - The key type, must implement `Hash + Eq`
/// * `V` - The value type; `Clone` is required only by operations that copy
///   values out of the lock
///
/// # Safety
///
/// This map is safe to use from any number of threads simultaneously. The
/// lock is the single source of truth for mutual exclusion; no operation
/// observes a partially applied mutation from another operation.
///
/// # Examples
///
/// ```rust
/// use rwmap::ConcurrentMap;
///
/// let map: ConcurrentMap<i32, String> = ConcurrentMap::new();
/// map.insert(1, "hello".to_string());
/// assert_eq!(map.get(&1), Some("hello".to_string()));
/// ```
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    // Single source of truth for mutual exclusion; guards the only copy
    // of the data.
    data: RwLock<FxHashMap<K, V>>,

    // Operation metrics
    metrics: AtomicMetrics,

    // Metrics enabled flag
    metrics_enabled: AtomicUsize,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Hash + Eq,
{
    /// Create a new, empty map
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, String> = ConcurrentMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            data: RwLock::new(FxHashMap::default()),
            metrics: AtomicMetrics::default(),
            metrics_enabled: AtomicUsize::new(1), // Enabled by default
        }
    }

    /// Create a new map with space for at least `capacity` entries
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of entries to reserve space for
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, String> = ConcurrentMap::with_capacity(100);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RwLock::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                FxBuildHasher::default(),
            )),
            metrics: AtomicMetrics::default(),
            metrics_enabled: AtomicUsize::new(1),
        }
    }

    /// Insert a key-value pair into the map
    ///
    /// If the key already exists, the value is overwritten. Acquires the
    /// lock in exclusive mode; once this call returns, every subsequent
    /// read observes the update.
    ///
    /// # Returns
    ///
    /// * `Some(old_value)` if the key existed and was updated
    /// * `None` if the key was newly inserted
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, String> = ConcurrentMap::new();
    /// assert_eq!(map.insert(1, "hello".to_string()), None);
    /// assert_eq!(map.insert(1, "world".to_string()), Some("hello".to_string()));
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.with_write(|map| map.insert(key, value))
    }

    /// Get a value from the map by key
    ///
    /// Acquires the lock in shared mode and clones the value out, so the
    /// lock is released before this call returns and writers are never
    /// blocked longer than the read itself.
    ///
    /// The key may be any borrowed form of the map's key type (for example
    /// `&str` against `String` keys).
    ///
    /// # Returns
    ///
    /// * `Some(value)` if the key was present at the instant of the read
    /// * `None` if it was not
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<String, i32> = ConcurrentMap::new();
    /// map.insert("one".to_string(), 1);
    /// assert_eq!(map.get("one"), Some(1));
    /// assert_eq!(map.get("two"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let value = self.with_read(|map| map.get(key).cloned());
        if self.metrics_on() {
            match value {
                Some(_) => self.metrics.record_hit(),
                None => self.metrics.record_miss(),
            }
        }
        value
    }

    /// Remove a key-value pair from the map
    ///
    /// Acquires the lock in exclusive mode. Removing an absent key is a
    /// no-op, not an error.
    ///
    /// # Returns
    ///
    /// * `Some(value)` if the key existed and was removed
    /// * `None` if the key did not exist
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, String> = ConcurrentMap::new();
    /// map.insert(1, "hello".to_string());
    /// assert_eq!(map.remove(&1), Some("hello".to_string()));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.with_write(|map| map.remove(key))
    }

    /// Check whether a key is present
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, i32> = ConcurrentMap::new();
    /// map.insert(1, 10);
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.with_read(|map| map.contains_key(key))
    }

    /// Get the number of key-value pairs in the map
    ///
    /// The count is accurate at the instant of the read; concurrent writers
    /// may have changed it by the time the caller observes the return value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, String> = ConcurrentMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "hello".to_string());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.with_read(|map| map.len())
    }

    /// Check if the map is empty
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, String> = ConcurrentMap::new();
    /// assert!(map.is_empty());
    /// map.insert(1, "hello".to_string());
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.with_read(|map| map.is_empty())
    }

    /// Return a snapshot of all keys
    ///
    /// Holds the lock in shared mode while the snapshot is produced and
    /// releases it before returning. Order is unspecified and not stable
    /// across calls.
    ///
    /// Pairing with a separate [`values`](Self::values) call is not
    /// guaranteed; a writer may run between the two acquisitions. Use
    /// [`entries`](Self::entries) when key-value pairing matters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, i32> = ConcurrentMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    /// let mut keys = map.keys();
    /// keys.sort();
    /// assert_eq!(keys, vec![1, 2]);
    /// ```
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.with_read(|map| map.keys().cloned().collect())
    }

    /// Return a snapshot of all values
    ///
    /// Same contract as [`keys`](Self::keys): one shared acquisition,
    /// unspecified order, no pairing guarantee relative to a separate
    /// `keys` call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, i32> = ConcurrentMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    /// let mut values = map.values();
    /// values.sort();
    /// assert_eq!(values, vec![10, 20]);
    /// ```
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.with_read(|map| map.values().cloned().collect())
    }

    /// Return a snapshot of all key-value pairs
    ///
    /// Unlike separate [`keys`](Self::keys) and [`values`](Self::values)
    /// calls, every returned pair was stored together at the snapshot
    /// instant. Order is unspecified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, i32> = ConcurrentMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    /// let mut entries = map.entries();
    /// entries.sort();
    /// assert_eq!(entries, vec![(1, 10), (2, 20)]);
    /// ```
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.with_read(|map| {
            map.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
    }

    /// Remove all entries from the map
    ///
    /// Acquires the lock in exclusive mode; on return, [`len`](Self::len)
    /// is zero and no previously stored key is found. Allocated capacity is
    /// retained for reuse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwmap::ConcurrentMap;
    ///
    /// let map: ConcurrentMap<i32, i32> = ConcurrentMap::new();
    /// map.insert(1, 10);
    /// map.clear();
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.get(&1), None);
    /// ```
    pub fn clear(&self) {
        self.with_write(|map| map.clear());
    }

    // Private helper methods

    // Runs `op` under the shared lock, recording timing when metrics are on.
    // The guard is dropped before the metric writes.
    fn with_read<T>(&self, op: impl FnOnce(&FxHashMap<K, V>) -> T) -> T {
        let start = self.metrics_on().then(Instant::now);
        let result = {
            let guard = self.read_lock();
            op(&guard)
        };
        if let Some(start) = start {
            self.metrics.record_read(start.elapsed());
        }
        result
    }

    // Runs `op` under the exclusive lock, recording timing when metrics
    // are on.
    fn with_write<T>(&self, op: impl FnOnce(&mut FxHashMap<K, V>) -> T) -> T {
        let start = self.metrics_on().then(Instant::now);
        let result = {
            let mut guard = self.write_lock();
            op(&mut guard)
        };
        if let Some(start) = start {
            self.metrics.record_write(start.elapsed());
        }
        result
    }

    // Shared acquisition, counting a blocked fast path as contention.
    fn read_lock(&self) -> RwLockReadGuard<'_, FxHashMap<K, V>> {
        if !self.metrics_on() {
            return self.data.read();
        }
        match self.data.try_read() {
            Some(guard) => guard,
            None => {
                self.metrics.record_contention();
                self.data.read()
            }
        }
    }

    // Exclusive acquisition, counting a blocked fast path as contention.
    fn write_lock(&self) -> RwLockWriteGuard<'_, FxHashMap<K, V>> {
        if !self.metrics_on() {
            return self.data.write();
        }
        match self.data.try_write() {
            Some(guard) => guard,
            None => {
                self.metrics.record_contention();
                self.data.write()
            }
        }
    }

    #[inline]
    fn metrics_on(&self) -> bool {
        self.metrics_enabled.load(Ordering::Relaxed) != 0
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for ConcurrentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Deep copy of the map's contents at one shared-lock instant.
    /// The clone starts with fresh metrics.
    fn clone(&self) -> Self {
        let snapshot = self.data.read().clone();
        Self {
            data: RwLock::new(snapshot),
            metrics: AtomicMetrics::default(),
            metrics_enabled: AtomicUsize::new(1),
        }
    }
}

impl<K, V> MetricsCollector for ConcurrentMap<K, V> {
    fn metrics(&self) -> MapMetrics {
        self.metrics.snapshot()
    }

    fn reset_metrics(&self) {
        self.metrics.reset();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.metrics_enabled.store(enabled as usize, Ordering::Relaxed);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.metrics_enabled.load(Ordering::Relaxed) != 0
    }
}
