//! Map implementations
//!
//! This module provides the crate's concurrent map.
//!
//! ## Available Maps
//!
//! - [`ConcurrentMap`]: a hash map behind a single reader-writer lock
//!
//! ## Choosing a Map
//!
//! - Use `ConcurrentMap` for shared key-value state with simple, total
//!   operations and linearizable single-key semantics
//! - Read-heavy workloads scale with the reader count; write-heavy workloads
//!   serialize on the exclusive lock

pub mod concurrent;

pub use self::concurrent::ConcurrentMap;


#[cfg(test)]
mod proptests;
