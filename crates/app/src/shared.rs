//! Serialized access to a registry from several callers.
//!
//! `pair_device` and `delete_device` both read a device, check it, and
//! write it back. Holding one lock around the whole registry for the
//! duration of each operation keeps those steps atomic with respect to
//! each other.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::registry::HomeRegistry;

/// A [`HomeRegistry`] behind a single mutex.
pub struct SharedRegistry<S> {
    inner: Mutex<HomeRegistry<S>>,
}

impl<S> SharedRegistry<S> {
    #[must_use]
    pub fn new(registry: HomeRegistry<S>) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }

    /// Exclusive access until the guard is dropped.
    ///
    /// A poisoned lock is taken over as is: operations never leave a record
    /// half-written, so the registry is still consistent.
    pub fn lock(&self) -> MutexGuard<'_, HomeRegistry<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the registry.
    pub fn with<T>(&self, f: impl FnOnce(&mut HomeRegistry<S>) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn into_inner(self) -> HomeRegistry<S> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
