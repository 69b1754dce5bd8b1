// src/services/store_lock.rs

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Single mutual-exclusion domain shared by every service over one store.
///
/// Mutations hold the write guard from the existence checks through the
/// final write; queries hold the read guard. A reader can never observe a
/// relation that references an entity deleted in the same operation.
#[derive(Debug, Clone, Default)]
pub struct StoreLock {
    inner: Arc<RwLock<()>>,
}

impl StoreLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
