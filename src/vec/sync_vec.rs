//! Lock-guarded Vec
//!
//! [`SyncVec`] wraps a `Vec<T>` behind a lock selected by a [`LockPolicy`]. Indices
//! always address the contiguous range `0..len`; inserting and deleting shift the
//! tail of the sequence so no gaps ever appear.
//!
//! ## Checked and Panicking Accessors
//!
//! Index-based operations come in pairs:
//!
//! | Panics when out of range | Reports out of range |
//! |--------------------------|----------------------|
//! | [`get`](SyncVec::get) | [`try_get`](SyncVec::try_get) returns `None` |
//! | [`insert`](SyncVec::insert) | [`try_insert`](SyncVec::try_insert) returns `Err` |
//! | [`replace`](SyncVec::replace) | [`try_replace`](SyncVec::try_replace) returns `Err` |
//! | [`delete`](SyncVec::delete) | [`try_delete`](SyncVec::try_delete) returns `Err` |
//!
//! Both sides run the same bounds check under the lock. The panicking side
//! releases the lock before it panics, so the sequence stays usable and unmodified
//! after a caught out-of-range panic.
//!
//! ## Example
//!
//! ```rust
//! use threadsafe::{Error, SyncVec};
//!
//! let seq: SyncVec<i32> = SyncVec::from(vec![10, 20, 30]);
//! assert_eq!(seq.delete(1), 20);
//! assert_eq!(seq.to_vec(), vec![10, 30]);
//!
//! assert_eq!(seq.try_delete(5), Err(Error::OutOfBounds { index: 5, len: 2 }));
//! assert_eq!(seq.to_vec(), vec![10, 30]);
//! ```

use crate::lock::{Guarded, LockPolicy, ReadWrite};
use crate::metrics::{LockMetrics, MetricsCollector};
use crate::{Error, Result};
use core::fmt;

/// Check that `index` addresses an existing element.
#[inline]
fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::OutOfBounds { index, len })
    }
}

/// Check that `index` is a valid insertion point (one past the end included).
#[inline]
fn check_insert(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(Error::OutOfBounds { index, len })
    }
}

#[cold]
#[track_caller]
fn out_of_bounds(operation: &str, err: Error) -> ! {
    panic!("{operation}: {err}")
}

/// A Vec guarded by a lock
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `P` - The [`LockPolicy`], [`ReadWrite`] by default
///
/// # Examples
///
/// ```rust
/// use threadsafe::SyncVec;
///
/// let seq = SyncVec::new();
/// seq.append("a");
/// seq.append("c");
/// seq.insert(1, "b");
///
/// assert_eq!(seq.to_vec(), vec!["a", "b", "c"]);
/// assert_eq!(seq.position(|s| *s == "c"), Some(2));
/// ```
pub struct SyncVec<T, P: LockPolicy = ReadWrite> {
    inner: Guarded<Vec<T>, P>,
}

impl<T> SyncVec<T> {
    /// Create an empty sequence with the default [`ReadWrite`] policy
    ///
    /// Sequences with another policy are created through [`Default`] or
    /// [`From<Vec<T>>`](From).
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create an empty sequence with room for at least `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }
}

impl<T, P: LockPolicy> SyncVec<T, P> {
    fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: Guarded::new(data),
        }
    }

    fn rejected(&self, operation: &str, err: Error) -> Error {
        self.inner.metrics().record_rejection();
        log::trace!("{} {operation} rejected: {err}", P::NAME);
        err
    }

    /// Add `value` at the end
    pub fn append(&self, value: T) {
        self.inner.write().push(value);
    }

    /// Insert `value` at `index`, shifting later elements right
    ///
    /// # Panics
    ///
    /// Panics if `index > len`. The sequence is left unmodified.
    #[track_caller]
    pub fn insert(&self, index: usize, value: T) {
        let mut data = self.inner.write();
        if let Err(err) = check_insert(index, data.len()) {
            drop(data);
            out_of_bounds("insert", err);
        }
        data.insert(index, value);
    }

    /// Insert `value` at `index` if `index <= len`
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the value was inserted
    /// * `Err(Error::OutOfBounds)` if `index > len`; nothing is inserted
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::SyncVec;
    ///
    /// let seq: SyncVec<i32> = SyncVec::from(vec![1, 3]);
    /// assert!(seq.try_insert(1, 2).is_ok());
    /// assert!(seq.try_insert(3, 4).is_ok());
    /// assert!(seq.try_insert(9, 5).is_err());
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn try_insert(&self, index: usize, value: T) -> Result<()> {
        let mut data = self.inner.write();
        if let Err(err) = check_insert(index, data.len()) {
            drop(data);
            return Err(self.rejected("insert", err));
        }
        data.insert(index, value);
        Ok(())
    }

    /// Overwrite the element at `index`, returning the previous element
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`. The sequence is left unmodified.
    #[track_caller]
    pub fn replace(&self, index: usize, value: T) -> T {
        let mut data = self.inner.write();
        if let Err(err) = check_index(index, data.len()) {
            drop(data);
            out_of_bounds("replace", err);
        }
        core::mem::replace(&mut data[index], value)
    }

    /// Overwrite the element at `index` if it exists
    ///
    /// # Returns
    ///
    /// * `Ok(previous)` with the element that was replaced
    /// * `Err(Error::OutOfBounds)` if `index >= len`; nothing is written
    pub fn try_replace(&self, index: usize, value: T) -> Result<T> {
        let mut data = self.inner.write();
        if let Err(err) = check_index(index, data.len()) {
            drop(data);
            return Err(self.rejected("replace", err));
        }
        Ok(core::mem::replace(&mut data[index], value))
    }

    /// Remove the element at `index`, shifting later elements left
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`. The sequence is left unmodified.
    #[track_caller]
    pub fn delete(&self, index: usize) -> T {
        let mut data = self.inner.write();
        if let Err(err) = check_index(index, data.len()) {
            drop(data);
            out_of_bounds("delete", err);
        }
        data.remove(index)
    }

    /// Remove the element at `index` if it exists
    ///
    /// # Returns
    ///
    /// * `Ok(removed)` with the element that was removed
    /// * `Err(Error::OutOfBounds)` if `index >= len`; nothing is removed
    pub fn try_delete(&self, index: usize) -> Result<T> {
        let mut data = self.inner.write();
        if let Err(err) = check_index(index, data.len()) {
            drop(data);
            return Err(self.rejected("delete", err));
        }
        Ok(data.remove(index))
    }

    /// Index of the first element matching `predicate`
    ///
    /// The whole scan runs under one shared lock, so the result reflects a single
    /// state of the sequence. `predicate` must not call back into this sequence:
    /// with the [`Exclusive`](crate::lock::Exclusive) policy that deadlocks
    /// immediately, and with [`ReadWrite`] it deadlocks as soon as a writer queues.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::SyncVec;
    ///
    /// let seq: SyncVec<i32> = SyncVec::from(vec![4, 8, 15, 16]);
    /// assert_eq!(seq.position(|n| n % 2 == 1), Some(2));
    /// assert_eq!(seq.position(|n| *n > 100), None);
    /// ```
    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.inner.read().iter().position(predicate)
    }

    /// Discard every element
    ///
    /// The old elements are dropped after the lock is released.
    pub fn empty(&self) {
        let old = core::mem::take(&mut *self.inner.write());
        log::debug!(
            "emptied {} sequence, discarding {} elements",
            P::NAME,
            old.len()
        );
        drop(old);
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the sequence has no elements
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Mutable access to the stored Vec through a unique borrow
    pub fn get_mut(&mut self) -> &mut Vec<T> {
        self.inner.get_mut()
    }

    /// Consume the container and return the stored Vec
    pub fn into_inner(self) -> Vec<T> {
        self.inner.into_inner()
    }

    /// Direct reference to the stored Vec, bypassing the lock
    ///
    /// All concurrency guarantees of this type are forfeited for the lifetime of
    /// the returned reference. Prefer [`to_vec`](Self::to_vec) or
    /// [`get_mut`](Self::get_mut).
    ///
    /// # Safety
    ///
    /// No thread may mutate the sequence while the returned reference is alive.
    pub unsafe fn data_unguarded(&self) -> &Vec<T> {
        // SAFETY: the pointer comes from a live lock owned by `self`; the caller
        // guarantees the absence of concurrent writers.
        &*self.inner.data_ptr()
    }
}

impl<T: Clone, P: LockPolicy> SyncVec<T, P> {
    /// Clone of the element at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn get(&self, index: usize) -> T {
        let data = self.inner.read();
        if let Err(err) = check_index(index, data.len()) {
            drop(data);
            out_of_bounds("get", err);
        }
        data[index].clone()
    }

    /// Clone of the element at `index`, or `None` if `index >= len`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::SyncVec;
    ///
    /// let seq: SyncVec<char> = SyncVec::from(vec!['a']);
    /// assert_eq!(seq.try_get(0), Some('a'));
    /// assert_eq!(seq.try_get(1), None);
    /// ```
    pub fn try_get(&self, index: usize) -> Option<T> {
        let data = self.inner.read();
        if let Some(value) = data.get(index) {
            return Some(value.clone());
        }

        let len = data.len();
        drop(data);
        self.rejected("get", Error::OutOfBounds { index, len });
        None
    }

    /// Snapshot of every element
    ///
    /// The returned Vec is an independent copy; changing it never affects the
    /// sequence and later changes to the sequence never show up in it.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().to_vec()
    }
}

impl<T, P: LockPolicy> Default for SyncVec<T, P> {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl<T: Clone, P: LockPolicy> Clone for SyncVec<T, P> {
    /// Snapshot the sequence into a new, independent container with fresh metrics
    fn clone(&self) -> Self {
        Self::from_vec(self.to_vec())
    }
}

impl<T, P: LockPolicy> From<Vec<T>> for SyncVec<T, P> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T, P: LockPolicy> FromIterator<T> for SyncVec<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug, P: LockPolicy> fmt::Debug for SyncVec<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("SyncVec");
        d.field("policy", &P::NAME);
        match self.inner.peek() {
            Some(data) => d.field("data", &*data),
            None => d.field("data", &format_args!("<locked>")),
        };
        d.finish()
    }
}

impl<T, P: LockPolicy> MetricsCollector for SyncVec<T, P> {
    fn metrics(&self) -> LockMetrics {
        self.inner.metrics().snapshot()
    }

    fn reset_metrics(&self) {
        self.inner.metrics().reset();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.inner.metrics().set_enabled(enabled);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.inner.metrics().is_enabled()
    }
}
