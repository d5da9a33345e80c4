// ABOUTME: A chopstick - a plain mutual-exclusion lock shared by two neighbours.
// ABOUTME: Tracks no owner; holding the guard is the only proof of ownership.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// A shared chopstick identified by its position on the table.
///
/// Not reentrant: a philosopher acquiring a chopstick it already holds waits
/// forever.
#[derive(Debug)]
pub struct Chopstick {
    index: usize,
    lock: Arc<Mutex<()>>,
}

/// Proof that a chopstick is held. Dropping it puts the chopstick down.
#[derive(Debug)]
pub struct Held {
    index: usize,
    _guard: OwnedMutexGuard<()>,
}

impl Chopstick {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Wait until the chopstick is free and pick it up.
    pub async fn acquire(&self) -> Held {
        Held {
            index: self.index,
            _guard: self.lock.clone().lock_owned().await,
        }
    }

    /// Put the chopstick down, waking at most one waiting neighbour.
    pub fn release(held: Held) {
        drop(held);
    }

    /// Whether somebody currently holds this chopstick.
    pub fn is_held(&self) -> bool {
        self.lock.try_lock().is_err()
    }
}

impl Held {
    pub fn index(&self) -> usize {
        self.index
    }
}
