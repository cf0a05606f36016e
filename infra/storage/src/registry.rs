//! Per-collection lock bookkeeping.

use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Exclusive lock guarding mutation of one collection.
pub type CollectionLock = Arc<Mutex<()>>;

/// Maps collection names to their exclusive locks.
///
/// Locks are created lazily on first access and are never removed, so the
/// table grows with the number of distinct collections a driver has touched.
/// The whole lookup-or-insert runs under the registry's own mutex: two threads
/// racing on a brand-new collection always receive the same lock object.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<FxHashMap<String, CollectionLock>>,
}

impl LockRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `collection`, creating it if this is the first access.
    pub fn get_or_create(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock();

        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }

        let lock = CollectionLock::default();
        locks.insert(collection.to_owned(), Arc::clone(&lock));
        lock
    }

    /// Number of collections that own a lock.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
