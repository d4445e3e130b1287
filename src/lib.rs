//! # threadsafe
//!
//! Lock-guarded collections that can be shared between threads without any
//! synchronization on the caller's side.
//!
//! ## Features
//!
//! - **SyncMap**: a `HashMap` with atomic read-and-remove (`pull`) and snapshot reads
//! - **SyncVec**: a `Vec` with paired panicking and checked index operations
//! - **Lock policies**: choose a reader/writer lock or a plain mutex per container
//! - **Metrics**: contention counters and wait times for every container
//!
//! ## Quick Start
//!
//! ```rust
//! use threadsafe::{SyncMap, SyncVec};
//!
//! let map = SyncMap::new();
//! map.set("a", 1);
//! map.set("b", 2);
//! assert_eq!(map.pull("a"), Some(1));
//! assert_eq!(map.len(), 1);
//!
//! let seq: SyncVec<i32> = SyncVec::from(vec![10, 20, 30]);
//! seq.delete(1);
//! assert!(seq.try_delete(5).is_err());
//! assert_eq!(seq.to_vec(), vec![10, 30]);
//! ```
//!
//! ## Thread Safety
//!
//! Every operation acquires the container's lock, does its work and releases the
//! lock before returning. Nothing a method returns borrows the container: reads hand
//! out clones and owned snapshots. The only way around the lock is the explicitly
//! `unsafe` `data_unguarded` accessor.
//!
//! ## Out-of-Range Indices
//!
//! `SyncVec::get`, `insert`, `replace` and `delete` treat an invalid index as a
//! programming error and panic. Their `try_` counterparts return `None` or
//! [`Error::OutOfBounds`] instead and leave the sequence untouched.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod lock;
pub mod map;
pub mod metrics;
pub mod vec;

pub use crate::lock::{Exclusive, LockPolicy, ReadWrite};
pub use crate::map::{ExclusiveMap, SyncMap};
pub use crate::metrics::{LockMetrics, MetricsCollector};
pub use crate::vec::{ExclusiveVec, SyncVec};

/// Error types for threadsafe operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An index fell outside the valid range of a sequence
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds {
        /// The rejected index
        index: usize,
        /// Length of the sequence when the index was checked
        len: usize,
    },
}

/// Result type for threadsafe operations
pub type Result<T> = core::result::Result<T, Error>;
