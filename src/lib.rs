//! # rwmap
//!
//! A thread-safe hash map guarded by a single reader-writer lock.
//!
//! ## Features
//!
//! - **Concurrent reads**: any number of threads may read simultaneously
//! - **Exclusive writes**: mutations are serialized and atomic
//! - **Snapshot enumeration**: keys, values, and entries are copied out under
//!   one lock acquisition
//!
//! ## Philosophy
//!
//! `rwmap` deliberately uses one coarse lock instead of sharding or lock-free
//! tricks. The result is a small, predictable structure: every operation is
//! linearizable at the instant the lock is held, no operation can fail, and
//! there is no interleaving subtle enough to tear state. For read-mostly
//! workloads the reader-writer lock already admits full read parallelism.
//!
//! ## Quick Start
//!
//! ```rust
//! use rwmap::ConcurrentMap;
//!
//! let map = ConcurrentMap::new();
//! map.insert("answer", 42);
//! assert_eq!(map.get("answer"), Some(42));
//! ```
//!
//! ## Thread Safety
//!
//! [`ConcurrentMap`] takes `&self` for every operation and is `Send + Sync`
//! whenever its key and value types are; share it across threads behind an
//! [`Arc`](std::sync::Arc) (or borrow it into scoped threads) without any
//! additional synchronization.
//!
//! ## Consistency caveat
//!
//! Single-key operations are linearizable. Enumeration snapshots are
//! consistent only at their own lock-held instant: calling
//! [`keys`](ConcurrentMap::keys) and then [`values`](ConcurrentMap::values)
//! performs two separate acquisitions, and a writer may slip between them.
//! Use [`entries`](ConcurrentMap::entries) when pairing matters.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod map;
pub mod metrics;

pub use crate::map::ConcurrentMap;
pub use crate::metrics::{MapMetrics, MetricsCollector};
