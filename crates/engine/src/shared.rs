//! Shared access to one array from several threads
//!
//! [`Array`] does no locking of its own. [`SharedArray`] wraps it in an
//! `Arc<RwLock<_>>` that callers lock around every operation; the lock is
//! the array's synchronization root.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rankarray_storage::{SlotBuffer, StorageEngine};

use crate::array::Array;

/// Cloneable handle to a lock-protected array
#[derive(Debug)]
pub struct SharedArray<S: StorageEngine = SlotBuffer> {
    inner: Arc<RwLock<Array<S>>>,
}

impl<S: StorageEngine> Clone for SharedArray<S> {
    fn clone(&self) -> Self {
        SharedArray {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StorageEngine> SharedArray<S> {
    /// Take ownership of `array`
    pub fn new(array: Array<S>) -> Self {
        SharedArray {
            inner: Arc::new(RwLock::new(array)),
        }
    }

    /// Shared read access
    pub fn read(&self) -> RwLockReadGuard<'_, Array<S>> {
        self.inner.read()
    }

    /// Exclusive write access
    pub fn write(&self) -> RwLockWriteGuard<'_, Array<S>> {
        self.inner.write()
    }

    /// The lock callers synchronize on
    pub fn sync_root(&self) -> &Arc<RwLock<Array<S>>> {
        &self.inner
    }

    /// Recover the array if this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<Array<S>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| SharedArray { inner })
    }
}

impl<S: StorageEngine> From<Array<S>> for SharedArray<S> {
    fn from(array: Array<S>) -> Self {
        SharedArray::new(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankarray_core::{Element, ElementType, PrimitiveKind};
    use std::thread;

    #[test]
    fn test_concurrent_writers() {
        let array: Array = Array::vector(ElementType::primitive(PrimitiveKind::I64), 8).unwrap();
        let shared = SharedArray::new(array);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let mut guard = shared.write();
                        let current = guard.get_value1(t).unwrap().as_i64().unwrap();
                        guard.set_value1(t, current + 1).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let array = shared.try_unwrap().unwrap();
        assert!(array.elements().all(|e| e == Element::I64(100)));
    }

    #[test]
    fn test_try_unwrap_with_other_handles() {
        let array: Array = Array::vector(ElementType::object(), 1).unwrap();
        let shared = SharedArray::from(array);
        let other = shared.clone();
        let shared = shared.try_unwrap().unwrap_err();
        drop(other);
        assert!(shared.try_unwrap().is_ok());
    }

    #[test]
    fn test_sync_root_is_shared() {
        let array: Array = Array::vector(ElementType::object(), 1).unwrap();
        let shared = SharedArray::new(array);
        let other = shared.clone();
        assert!(Arc::ptr_eq(shared.sync_root(), other.sync_root()));
        assert_eq!(shared.read().long_length(), 1);
    }
}
