// ABOUTME: Instrumentation counters for the table invariants.
// ABOUTME: Tracks admitted and eating philosophers, chopstick holders, and meals eaten.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared counters updated by every philosopher.
///
/// Counters go up only after the real acquisition succeeded and come down
/// before the real release, so a reading never exceeds the true value.
/// A reading above its bound is a real violation and is counted.
#[derive(Debug)]
pub struct Monitor {
    capacity: usize,
    admitted: AtomicUsize,
    peak_admitted: AtomicUsize,
    eating: AtomicUsize,
    peak_eating: AtomicUsize,
    holders: Vec<AtomicUsize>,
    peak_holders: AtomicUsize,
    meals: Vec<AtomicUsize>,
    violations: AtomicUsize,
}

/// Point-in-time copy of the [`Monitor`] counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSnapshot {
    /// Most philosophers ever past the gate at once.
    pub peak_admitted: usize,
    /// Most philosophers ever eating at once.
    pub peak_eating: usize,
    /// Most holders any single chopstick ever had.
    pub peak_holders: usize,
    /// Invariant breaches observed.
    pub violations: usize,
    /// Meals finished, indexed by philosopher id minus one.
    pub meals: Vec<usize>,
}

impl Monitor {
    pub fn new(actor_count: usize, resource_count: usize, capacity: usize) -> Self {
        Self {
            capacity,
            admitted: AtomicUsize::new(0),
            peak_admitted: AtomicUsize::new(0),
            eating: AtomicUsize::new(0),
            peak_eating: AtomicUsize::new(0),
            holders: (0..resource_count).map(|_| AtomicUsize::new(0)).collect(),
            peak_holders: AtomicUsize::new(0),
            meals: (0..actor_count).map(|_| AtomicUsize::new(0)).collect(),
            violations: AtomicUsize::new(0),
        }
    }

    /// A philosopher got past the gate.
    pub fn admit(&self, philosopher: usize) {
        let now = self.admitted.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_admitted.fetch_max(now, Ordering::SeqCst);
        if now > self.capacity {
            self.violation();
            tracing::error!(
                philosopher,
                admitted = now,
                capacity = self.capacity,
                "admission gate over capacity"
            );
        }
    }

    /// A philosopher is about to give its gate slot back.
    pub fn leave(&self) {
        self.admitted.fetch_sub(1, Ordering::SeqCst);
    }

    /// A chopstick was just picked up.
    pub fn pick_up(&self, philosopher: usize, chopstick: usize) {
        let Some(holders) = self.holders.get(chopstick) else {
            return;
        };
        let now = holders.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_holders.fetch_max(now, Ordering::SeqCst);
        if now > 1 {
            self.violation();
            tracing::error!(philosopher, chopstick, holders = now, "chopstick shared");
        }
    }

    /// A chopstick is about to be put down.
    pub fn put_down(&self, chopstick: usize) {
        if let Some(holders) = self.holders.get(chopstick) {
            holders.fetch_sub(1, Ordering::SeqCst);
        }
    }

    pub fn start_eating(&self) {
        let now = self.eating.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_eating.fetch_max(now, Ordering::SeqCst);
    }

    pub fn finish_eating(&self, philosopher: usize) {
        self.eating.fetch_sub(1, Ordering::SeqCst);
        if let Some(meals) = philosopher.checked_sub(1).and_then(|i| self.meals.get(i)) {
            meals.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Philosophers currently past the gate.
    pub fn admitted(&self) -> usize {
        self.admitted.load(Ordering::SeqCst)
    }

    /// Philosophers currently eating.
    pub fn eating(&self) -> usize {
        self.eating.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            peak_admitted: self.peak_admitted.load(Ordering::SeqCst),
            peak_eating: self.peak_eating.load(Ordering::SeqCst),
            peak_holders: self.peak_holders.load(Ordering::SeqCst),
            violations: self.violations.load(Ordering::SeqCst),
            meals: self
                .meals
                .iter()
                .map(|m| m.load(Ordering::SeqCst))
                .collect(),
        }
    }

    fn violation(&self) {
        self.violations.fetch_add(1, Ordering::SeqCst);
    }
}
