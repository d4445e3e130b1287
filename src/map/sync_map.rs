//! Lock-guarded HashMap
//!
//! [`SyncMap`] wraps a `std::collections::HashMap` behind a lock selected by a
//! [`LockPolicy`]. Every method acquires the lock for exactly the duration of the
//! call; nothing returned from a method borrows the map, so values are handed out
//! as clones and bulk reads as owned snapshots.
//!
//! ## Locking
//!
//! - `get`, `contains_key`, `keys`, `values`, `items`, `len` take the shared lock
//! - `set`, `pull`, `delete`, `empty` take the exclusive lock
//!
//! With the [`Exclusive`](crate::lock::Exclusive) policy both kinds serialize.
//!
//! ## Example
//!
//! ```rust
//! use threadsafe::SyncMap;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let map = Arc::new(SyncMap::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|id| {
//!         let map = Arc::clone(&map);
//!         thread::spawn(move || map.set(id, id * 10))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(map.len(), 4);
//! assert_eq!(map.pull(&2), Some(20));
//! assert_eq!(map.get(&2), None);
//! ```

use crate::lock::{Guarded, LockPolicy, ReadWrite};
use crate::metrics::{LockMetrics, MetricsCollector};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;
use std::collections::HashMap;

/// A HashMap guarded by a lock
///
/// # Type Parameters
///
/// * `K` - The key type, must implement `Hash + Eq`
/// * `V` - The value type
/// * `P` - The [`LockPolicy`], [`ReadWrite`] by default
/// * `S` - The hasher builder, `RandomState` by default
///
/// # Examples
///
/// ```rust
/// use threadsafe::SyncMap;
///
/// let map: SyncMap<&str, i32> = SyncMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
///
/// let mut keys = map.keys();
/// keys.sort();
/// assert_eq!(keys, vec!["a", "b"]);
///
/// assert_eq!(map.pull("a"), Some(1));
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get("a"), None);
/// ```
pub struct SyncMap<K, V, P: LockPolicy = ReadWrite, S = RandomState> {
    inner: Guarded<HashMap<K, V, S>, P>,
}

impl<K, V> SyncMap<K, V> {
    /// Create an empty map with the default [`ReadWrite`] policy
    ///
    /// Maps with another policy are created through [`Default`] or
    /// [`with_hasher`](Self::with_hasher).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::{ExclusiveMap, SyncMap};
    ///
    /// let map: SyncMap<u64, String> = SyncMap::new();
    /// assert!(map.is_empty());
    ///
    /// let exclusive: ExclusiveMap<u64, String> = ExclusiveMap::default();
    /// assert!(exclusive.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::from_map(HashMap::new())
    }

    /// Create an empty map with room for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_map(HashMap::with_capacity(capacity))
    }
}

impl<K, V, P: LockPolicy, S> SyncMap<K, V, P, S> {
    /// Create an empty map that hashes keys with `hasher`
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_map(HashMap::with_hasher(hasher))
    }

    /// Create an empty map with the given capacity and hasher
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::from_map(HashMap::with_capacity_and_hasher(capacity, hasher))
    }

    fn from_map(map: HashMap<K, V, S>) -> Self {
        Self {
            inner: Guarded::new(map),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Discard every entry
    ///
    /// The stored map is swapped for a fresh empty one under the exclusive lock.
    /// The old entries are dropped after the lock is released, so destructors of
    /// large maps do not stall other threads.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::SyncMap;
    ///
    /// let map = SyncMap::new();
    /// map.set(1, "one");
    /// map.empty();
    /// assert_eq!(map.len(), 0);
    /// ```
    pub fn empty(&self)
    where
        S: Clone,
    {
        let old = {
            let mut map = self.inner.write();
            let fresh = HashMap::with_hasher(map.hasher().clone());
            core::mem::replace(&mut *map, fresh)
        };
        log::debug!(
            "emptied {} map, discarding {} entries",
            P::NAME,
            old.len()
        );
        drop(old);
    }

    /// Mutable access to the stored map through a unique borrow
    ///
    /// No locking takes place; the borrow checker already guarantees exclusivity.
    pub fn get_mut(&mut self) -> &mut HashMap<K, V, S> {
        self.inner.get_mut()
    }

    /// Consume the container and return the stored map
    pub fn into_inner(self) -> HashMap<K, V, S> {
        self.inner.into_inner()
    }

    /// Direct reference to the stored map, bypassing the lock
    ///
    /// This is an escape hatch for callers that coordinate access by other means.
    /// All concurrency guarantees of this type are forfeited for the lifetime of
    /// the returned reference.
    ///
    /// # Safety
    ///
    /// No thread may mutate the map (through `set`, `pull`, `delete`, `empty` or
    /// any other exclusive operation) while the returned reference is alive.
    pub unsafe fn data_unguarded(&self) -> &HashMap<K, V, S> {
        // SAFETY: the pointer comes from a live lock owned by `self`; the caller
        // guarantees the absence of concurrent writers.
        &*self.inner.data_ptr()
    }
}

impl<K, V, P, S> SyncMap<K, V, P, S>
where
    K: Hash + Eq,
    P: LockPolicy,
    S: BuildHasher,
{
    /// Get a clone of the value stored at `key`
    ///
    /// # Returns
    ///
    /// * `Some(value)` if the key exists in the map
    /// * `None` if the key does not exist
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::SyncMap;
    ///
    /// let map: SyncMap<i32, String> = SyncMap::new();
    /// map.set(1, "hello".to_string());
    /// assert_eq!(map.get(&1), Some("hello".to_string()));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Whether `key` is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// Remove `key` and return its value in one critical section
    ///
    /// No other operation can observe the key between the read and the removal,
    /// so of several threads pulling the same key exactly one receives the value.
    /// An absent key leaves the map untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::SyncMap;
    ///
    /// let map = SyncMap::new();
    /// map.set("token", 7);
    /// assert_eq!(map.pull("token"), Some(7));
    /// assert_eq!(map.pull("token"), None);
    /// ```
    pub fn pull<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key)
    }

    /// Insert `value` at `key`, overwriting any previous value
    pub fn set(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }

    /// Remove `key` if present; a missing key is a no-op
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key);
    }

    /// Snapshot of all keys, in unspecified order
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.read().keys().cloned().collect()
    }

    /// Snapshot of all values, in unspecified order
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.inner.read().values().cloned().collect()
    }

    /// Snapshot of all entries as parallel vectors
    ///
    /// `keys[i]` maps to `values[i]` as of the moment the lock was held. The
    /// order is unspecified and may differ between calls.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadsafe::SyncMap;
    ///
    /// let map = SyncMap::new();
    /// map.set('x', 24);
    /// map.set('y', 25);
    ///
    /// let (keys, values) = map.items();
    /// assert_eq!(keys.len(), values.len());
    /// for (key, value) in keys.iter().zip(&values) {
    ///     assert_eq!(*key as i32 - 'x' as i32 + 24, *value);
    /// }
    /// ```
    pub fn items(&self) -> (Vec<K>, Vec<V>)
    where
        K: Clone,
        V: Clone,
    {
        let map = self.inner.read();
        let mut keys = Vec::with_capacity(map.len());
        let mut values = Vec::with_capacity(map.len());
        for (key, value) in map.iter() {
            keys.push(key.clone());
            values.push(value.clone());
        }
        (keys, values)
    }
}

impl<K, V, P: LockPolicy> Default for SyncMap<K, V, P, RandomState> {
    fn default() -> Self {
        Self::from_map(HashMap::new())
    }
}

impl<K, V, P, S> Clone for SyncMap<K, V, P, S>
where
    K: Clone,
    V: Clone,
    P: LockPolicy,
    S: Clone,
{
    /// Snapshot the map into a new, independent container with fresh metrics
    fn clone(&self) -> Self {
        let snapshot = (*self.inner.read()).clone();
        Self::from_map(snapshot)
    }
}

impl<K, V, P: LockPolicy, S> From<HashMap<K, V, S>> for SyncMap<K, V, P, S> {
    fn from(map: HashMap<K, V, S>) -> Self {
        Self::from_map(map)
    }
}

impl<K, V, P, S> FromIterator<(K, V)> for SyncMap<K, V, P, S>
where
    K: Hash + Eq,
    P: LockPolicy,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<K, V, P, S> fmt::Debug for SyncMap<K, V, P, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
    P: LockPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("SyncMap");
        d.field("policy", &P::NAME);
        match self.inner.peek() {
            Some(map) => d.field("data", &*map),
            None => d.field("data", &format_args!("<locked>")),
        };
        d.finish()
    }
}

impl<K, V, P: LockPolicy, S> MetricsCollector for SyncMap<K, V, P, S> {
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
