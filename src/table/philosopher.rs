// ABOUTME: A philosopher - waits for the gate, picks up two chopsticks, eats, cleans up.
// ABOUTME: Exposes its state machine through an atomic for lock-free observation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use crate::error::DiningError;
use crate::sync::{AdmissionGate, Chopstick, Held, WaitGroup};

use super::announce::{Announcement, Announcer};
use super::monitor::Monitor;
use super::policy::{AcquisitionOrder, MealPolicy, Side};

/// Where a philosopher is in its dinner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActorState {
    /// Seated but not started.
    Idle = 0,
    /// Waiting for a slot at the admission gate.
    WaitingForPermission = 1,
    /// Holding a gate slot, no chopsticks yet.
    Admitted = 2,
    /// Waiting on the left chopstick.
    WaitingForLeftResource = 3,
    /// Waiting on the right chopstick.
    WaitingForRightResource = 4,
    /// Holding both chopsticks and eating.
    Eating = 5,
    /// Putting chopsticks down.
    Cleanup = 6,
    /// Gate slot returned, dinner over.
    Done = 7,
}

impl ActorState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ActorState::Idle,
            1 => ActorState::WaitingForPermission,
            2 => ActorState::Admitted,
            3 => ActorState::WaitingForLeftResource,
            4 => ActorState::WaitingForRightResource,
            5 => ActorState::Eating,
            6 => ActorState::Cleanup,
            _ => ActorState::Done,
        }
    }
}

impl std::fmt::Display for ActorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorState::Idle => write!(f, "idle"),
            ActorState::WaitingForPermission => write!(f, "waiting for permission"),
            ActorState::Admitted => write!(f, "admitted"),
            ActorState::WaitingForLeftResource => write!(f, "waiting for left chopstick"),
            ActorState::WaitingForRightResource => write!(f, "waiting for right chopstick"),
            ActorState::Eating => write!(f, "eating"),
            ActorState::Cleanup => write!(f, "cleaning up"),
            ActorState::Done => write!(f, "done"),
        }
    }
}

/// Everything a philosopher shares with the rest of the table.
#[derive(Clone)]
pub struct TableContext {
    pub gate: Arc<AdmissionGate>,
    pub finished: Arc<WaitGroup>,
    pub announcer: Arc<dyn Announcer>,
    pub monitor: Arc<Monitor>,
    pub meal_duration: Duration,
    pub repeat_count: usize,
    pub order: AcquisitionOrder,
    pub meal_policy: MealPolicy,
}

/// A seated philosopher.
///
/// The two chopsticks are shared with the neighbours and owned by whoever
/// set the table; the philosopher only keeps references.
#[derive(Debug)]
pub struct Philosopher {
    id: usize,
    left: Arc<Chopstick>,
    right: Arc<Chopstick>,
    state: AtomicU8,
}

impl Philosopher {
    pub fn new(id: usize, left: Arc<Chopstick>, right: Arc<Chopstick>) -> Self {
        Self {
            id,
            left,
            right,
            state: AtomicU8::new(ActorState::Idle as u8),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn left(&self) -> &Chopstick {
        &self.left
    }

    pub fn right(&self) -> &Chopstick {
        &self.right
    }

    pub fn state(&self) -> ActorState {
        ActorState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Run the whole dinner: gate, chopsticks, `repeat_count` meals, cleanup.
    ///
    /// Checks out of `table.finished` exactly once, on reaching
    /// [`ActorState::Done`]. There is no timeout anywhere; a philosopher whose
    /// neighbours never let go waits forever.
    pub async fn dine(&self, table: &TableContext) -> Result<(), DiningError> {
        self.set_state(ActorState::WaitingForPermission);
        let permission = table.gate.acquire_permission().await?;
        table.monitor.admit(self.id);
        self.set_state(ActorState::Admitted);

        match table.meal_policy {
            MealPolicy::HoldThroughout => {
                let (left, right) = self.pick_up(table).await;
                for meal in 0..table.repeat_count {
                    self.eat(table, meal).await;
                }
                self.put_down(table, left, right);
            }
            MealPolicy::ReacquirePerMeal => {
                for meal in 0..table.repeat_count {
                    let (left, right) = self.pick_up(table).await;
                    self.eat(table, meal).await;
                    self.put_down(table, left, right);
                }
            }
        }

        table.monitor.leave();
        table.gate.release_permission(permission);
        self.set_state(ActorState::Done);
        tracing::debug!(philosopher = self.id, "done");
        table.finished.done();
        Ok(())
    }

    async fn pick_up(&self, table: &TableContext) -> (Held, Held) {
        match table.order.sequence(self.left.index(), self.right.index()) {
            [Side::Right, _] => {
                let right = self.take(table, Side::Right).await;
                let left = self.take(table, Side::Left).await;
                (left, right)
            }
            _ => {
                let left = self.take(table, Side::Left).await;
                let right = self.take(table, Side::Right).await;
                (left, right)
            }
        }
    }

    async fn take(&self, table: &TableContext, side: Side) -> Held {
        let (chopstick, waiting) = match side {
            Side::Left => (&self.left, ActorState::WaitingForLeftResource),
            Side::Right => (&self.right, ActorState::WaitingForRightResource),
        };
        self.set_state(waiting);
        let held = chopstick.acquire().await;
        table.monitor.pick_up(self.id, held.index());
        tracing::trace!(philosopher = self.id, chopstick = held.index(), "picked up");
        held
    }

    async fn eat(&self, table: &TableContext, meal: usize) {
        self.set_state(ActorState::Eating);
        table.monitor.start_eating();
        table.announcer.announce(Announcement::starting(self.id));
        tokio::time::sleep(table.meal_duration).await;
        table.announcer.announce(Announcement::finishing(self.id));
        table.monitor.finish_eating(self.id);
        tracing::trace!(philosopher = self.id, meal, "meal finished");
    }

    // Left goes down before right whichever was picked up first.
    fn put_down(&self, table: &TableContext, left: Held, right: Held) {
        self.set_state(ActorState::Cleanup);
        table.monitor.put_down(left.index());
        Chopstick::release(left);
        table.monitor.put_down(right.index());
        Chopstick::release(right);
    }

    fn set_state(&self, state: ActorState) {
        self.state.store(state as u8, Ordering::SeqCst);
        tracing::debug!(philosopher = self.id, %state, "state");
    }
}
