//! Sequence implementations
//!
//! This module provides the lock-guarded sequence.
//!
//! ## Available Sequences
//!
//! - [`SyncVec`]: a `Vec` behind a [`LockPolicy`](crate::lock::LockPolicy)-selected lock
//! - [`ExclusiveVec`]: `SyncVec` with the [`Exclusive`] policy

pub mod sync_vec;

pub use self::sync_vec::SyncVec;

use crate::lock::Exclusive;

/// A [`SyncVec`] whose reads and writes all take one mutex
pub type ExclusiveVec<T> = SyncVec<T, Exclusive>;


#[cfg(test)]
mod proptests;
