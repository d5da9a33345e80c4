// ABOUTME: Admission gate - a counting semaphore capping how many philosophers
// ABOUTME: may hold chopsticks at once. Starts empty until the host preloads it.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Semaphore, SemaphorePermit};

use crate::error::GateError;

/// Global admission gate with a fixed capacity.
///
/// The gate is created with no free slots. [`AdmissionGate::preload`] hands
/// out exactly `capacity` permits once; from then on every admitted
/// philosopher returns its slot through [`AdmissionGate::release_permission`]
/// or by dropping the [`Permission`].
///
/// Waiters are not promised any particular admission order.
#[derive(Debug)]
pub struct AdmissionGate {
    slots: Semaphore,
    capacity: usize,
    loaded: AtomicBool,
}

/// A slot past the admission gate. Dropping it returns the slot.
#[derive(Debug)]
pub struct Permission<'a> {
    _permit: SemaphorePermit<'a>,
}

impl AdmissionGate {
    /// Create a gate of the given capacity with no slots loaded yet.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");

        Self {
            slots: Semaphore::new(0),
            capacity,
            loaded: AtomicBool::new(false),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    /// Load the gate with its `capacity` initial permits.
    ///
    /// Returns `false` without touching the count if the gate was already loaded.
    pub fn preload(&self) -> bool {
        if self.loaded.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.slots.add_permits(self.capacity);
        true
    }

    /// Wait for a free slot and take it.
    pub async fn acquire_permission(&self) -> Result<Permission<'_>, GateError> {
        let permit = self.slots.acquire().await.map_err(|_| GateError::Closed)?;
        Ok(Permission { _permit: permit })
    }

    /// Return a slot, admitting at most one waiter.
    pub fn release_permission(&self, permission: Permission<'_>) {
        drop(permission);
    }
}
