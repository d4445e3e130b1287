//! Map implementations
//!
//! This module provides the lock-guarded map.
//!
//! ## Available Maps
//!
//! - [`SyncMap`]: a `HashMap` behind a [`LockPolicy`](crate::lock::LockPolicy)-selected lock
//! - [`ExclusiveMap`]: `SyncMap` with the [`Exclusive`] policy
//!
//! ## Choosing a Policy
//!
//! - Keep the default `ReadWrite` policy when lookups and snapshots dominate
//! - Use `ExclusiveMap` for write-heavy maps such as work registries drained with `pull`

pub mod sync_map;

pub use self::sync_map::SyncMap;

use crate::lock::Exclusive;

/// A [`SyncMap`] whose reads and writes all take one mutex
pub type ExclusiveMap<K, V> = SyncMap<K, V, Exclusive>;


#[cfg(test)]
mod proptests;
