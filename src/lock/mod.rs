//! Lock policies
//!
//! Every container in this crate stores its collection behind a lock chosen by a
//! [`LockPolicy`] type parameter. Two policies are provided:
//!
//! - [`ReadWrite`]: a `parking_lot::RwLock`. Pure reads share the lock, mutations
//!   take it exclusively. This is the default.
//! - [`Exclusive`]: a `parking_lot::Mutex`. Reads and writes serialize against each
//!   other.
//!
//! ## Choosing a Policy
//!
//! - Use `ReadWrite` for read-heavy workloads where snapshots and lookups dominate
//! - Use `Exclusive` when writes dominate or critical sections are tiny; a mutex
//!   acquisition is cheaper than a writer acquisition on an rwlock
//!
//! ## Example
//!
//! ```rust
//! use threadsafe::lock::Exclusive;
//! use threadsafe::SyncVec;
//!
//! let seq: SyncVec<u32, Exclusive> = SyncVec::default();
//! seq.append(7);
//! assert_eq!(seq.get(0), 7);
//! ```

use crate::metrics::AtomicMetrics;
use core::ops::{Deref, DerefMut};
use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// A lock that owns a value of type `T`.
///
/// `read` grants shared access and `write` grants exclusive access. A backend
/// without a shared mode (a mutex) hands out the exclusive guard for both.
pub trait LockBackend<T>: Sized {
    /// Guard returned by [`read`](Self::read).
    type ReadGuard<'a>: Deref<Target = T>
    where
        Self: 'a;

    /// Guard returned by [`write`](Self::write).
    type WriteGuard<'a>: DerefMut<Target = T>
    where
        Self: 'a;

    /// Wrap `value` in a new unlocked lock.
    fn new(value: T) -> Self;

    /// Block until shared access is granted.
    fn read(&self) -> Self::ReadGuard<'_>;

    /// Attempt shared access without blocking.
    fn try_read(&self) -> Option<Self::ReadGuard<'_>>;

    /// Block until exclusive access is granted.
    fn write(&self) -> Self::WriteGuard<'_>;

    /// Attempt exclusive access without blocking.
    fn try_write(&self) -> Option<Self::WriteGuard<'_>>;

    /// Mutable access through a unique borrow; no locking takes place.
    fn get_mut(&mut self) -> &mut T;

    /// Consume the lock and return the protected value.
    fn into_inner(self) -> T;

    /// Raw pointer to the protected value, ignoring the lock state.
    fn data_ptr(&self) -> *mut T;
}

impl<T> LockBackend<T> for Mutex<T> {
    type ReadGuard<'a> = MutexGuard<'a, T> where Self: 'a;
    type WriteGuard<'a> = MutexGuard<'a, T> where Self: 'a;

    #[inline]
    fn new(value: T) -> Self {
        Mutex::new(value)
    }

    #[inline]
    fn read(&self) -> MutexGuard<'_, T> {
        Mutex::lock(self)
    }

    #[inline]
    fn try_read(&self) -> Option<MutexGuard<'_, T>> {
        Mutex::try_lock(self)
    }

    #[inline]
    fn write(&self) -> MutexGuard<'_, T> {
        Mutex::lock(self)
    }

    #[inline]
    fn try_write(&self) -> Option<MutexGuard<'_, T>> {
        Mutex::try_lock(self)
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        Mutex::get_mut(self)
    }

    #[inline]
    fn into_inner(self) -> T {
        Mutex::into_inner(self)
    }

    #[inline]
    fn data_ptr(&self) -> *mut T {
        Mutex::data_ptr(self)
    }
}

impl<T> LockBackend<T> for RwLock<T> {
    type ReadGuard<'a> = RwLockReadGuard<'a, T> where Self: 'a;
    type WriteGuard<'a> = RwLockWriteGuard<'a, T> where Self: 'a;

    #[inline]
    fn new(value: T) -> Self {
        RwLock::new(value)
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, T> {
        RwLock::read(self)
    }

    #[inline]
    fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
        RwLock::try_read(self)
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, T> {
        RwLock::write(self)
    }

    #[inline]
    fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
        RwLock::try_write(self)
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        RwLock::get_mut(self)
    }

    #[inline]
    fn into_inner(self) -> T {
        RwLock::into_inner(self)
    }

    #[inline]
    fn data_ptr(&self) -> *mut T {
        RwLock::data_ptr(self)
    }
}

/// Selects the lock a container uses for its storage.
pub trait LockPolicy {
    /// The lock type wrapping a value of type `T`.
    type Lock<T>: LockBackend<T>;

    /// Short name used in diagnostics.
    const NAME: &'static str;
}

/// Mutual exclusion for every operation (`parking_lot::Mutex`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exclusive;

impl LockPolicy for Exclusive {
    type Lock<T> = Mutex<T>;

    const NAME: &'static str = "exclusive";
}

/// Shared reads, exclusive writes (`parking_lot::RwLock`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadWrite;

impl LockPolicy for ReadWrite {
    type Lock<T> = RwLock<T>;

    const NAME: &'static str = "read-write";
}

/// A value behind a policy-selected lock, with acquisition metrics.
///
/// Both containers are thin typed layers over this. Every acquisition tries the
/// lock first and only times the blocking path.
pub(crate) struct Guarded<T, P: LockPolicy> {
    lock: P::Lock<T>,
    metrics: AtomicMetrics,
}

impl<T, P: LockPolicy> Guarded<T, P> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            lock: LockBackend::new(value),
            metrics: AtomicMetrics::default(),
        }
    }

    /// Shared access, recorded as a shared acquisition.
    pub(crate) fn read(&self) -> <P::Lock<T> as LockBackend<T>>::ReadGuard<'_> {
        self.metrics.record_shared();
        if let Some(guard) = self.lock.try_read() {
            return guard;
        }

        let start = Instant::now();
        let guard = self.lock.read();
        self.metrics.record_contention(start.elapsed());
        guard
    }

    /// Exclusive access, recorded as an exclusive acquisition.
    pub(crate) fn write(&self) -> <P::Lock<T> as LockBackend<T>>::WriteGuard<'_> {
        self.metrics.record_exclusive();
        if let Some(guard) = self.lock.try_write() {
            return guard;
        }

        let start = Instant::now();
        let guard = self.lock.write();
        self.metrics.record_contention(start.elapsed());
        guard
    }

    /// Shared access if immediately available; not recorded.
    pub(crate) fn peek(&self) -> Option<<P::Lock<T> as LockBackend<T>>::ReadGuard<'_>> {
        self.lock.try_read()
    }

    pub(crate) fn get_mut(&mut self) -> &mut T {
        self.lock.get_mut()
    }

    pub(crate) fn into_inner(self) -> T {
        self.lock.into_inner()
    }

    pub(crate) fn data_ptr(&self) -> *mut T {
        self.lock.data_ptr()
    }

    pub(crate) fn metrics(&self) -> &AtomicMetrics {
        &self.metrics
    }
}
