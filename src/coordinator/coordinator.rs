// ABOUTME: Dinner coordinator - sets the table, seats philosophers, and waits for them.
// ABOUTME: Owns the chopsticks, the admission gate, and the completion wait group.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::TableConfig;
use crate::error::DiningError;
use crate::sync::{AdmissionGate, Chopstick, WaitGroup};
use crate::table::{
    ActorState, Announcer, Monitor, MonitorSnapshot, Philosopher, StdoutAnnouncer, TableContext,
};

/// Wiring of one seat: philosopher id and its chopstick indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub philosopher: usize,
    pub left: usize,
    pub right: usize,
}

/// Outcome of a finished dinner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiningReport {
    /// Time from launch until the last philosopher checked out.
    pub elapsed: Duration,
    /// Final state of every philosopher, in id order.
    pub states: Vec<ActorState>,
    /// Invariant counters collected during the run.
    pub monitor: MonitorSnapshot,
}

impl DiningReport {
    pub fn all_done(&self) -> bool {
        self.states.iter().all(|s| *s == ActorState::Done)
    }

    /// Total meals eaten across the table.
    pub fn meals(&self) -> usize {
        self.monitor.meals.iter().sum()
    }
}

/// Coordinator for a dining run.
///
/// Builds `resource_count` chopsticks, seats `actor_count` philosophers in
/// ring topology, and creates one admission gate of `concurrency_limit`
/// slots. [`Coordinator::run`] launches every philosopher as its own task,
/// loads the gate and waits for all of them.
///
/// # Failure
///
/// There is no partial-failure handling. A philosopher whose task dies, or a
/// table that deadlocks, leaves `run` waiting forever.
pub struct Coordinator {
    config: TableConfig,
    chopsticks: Vec<Arc<Chopstick>>,
    philosophers: Vec<Arc<Philosopher>>,
    gate: Arc<AdmissionGate>,
    finished: Arc<WaitGroup>,
    monitor: Arc<Monitor>,
    announcer: Arc<dyn Announcer>,
}

impl Coordinator {
    /// Set the table described by `config`.
    ///
    /// Progress lines go to standard output unless replaced with
    /// [`Coordinator::with_announcer`].
    pub fn new(config: TableConfig) -> Result<Self, DiningError> {
        config.validate()?;

        let chopsticks: Vec<Arc<Chopstick>> = (0..config.resource_count)
            .map(|i| Arc::new(Chopstick::new(i)))
            .collect();

        let philosophers = (0..config.actor_count)
            .map(|seat| {
                let (left, right) = config.ring_pair(seat);
                Arc::new(Philosopher::new(
                    seat + 1,
                    chopsticks[left].clone(),
                    chopsticks[right].clone(),
                ))
            })
            .collect();

        Ok(Self {
            gate: Arc::new(AdmissionGate::new(config.concurrency_limit)),
            finished: Arc::new(WaitGroup::new()),
            monitor: Arc::new(Monitor::new(
                config.actor_count,
                config.resource_count,
                config.concurrency_limit,
            )),
            announcer: Arc::new(StdoutAnnouncer),
            chopsticks,
            philosophers,
            config,
        })
    }

    /// Send progress lines somewhere other than standard output.
    pub fn with_announcer(mut self, announcer: Arc<dyn Announcer>) -> Self {
        self.announcer = announcer;
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// How every seat is wired, in philosopher id order.
    pub fn seating(&self) -> Vec<Seat> {
        self.philosophers
            .iter()
            .map(|p| Seat {
                philosopher: p.id(),
                left: p.left().index(),
                right: p.right().index(),
            })
            .collect()
    }

    pub fn chopsticks(&self) -> &[Arc<Chopstick>] {
        &self.chopsticks
    }

    pub fn philosophers(&self) -> &[Arc<Philosopher>] {
        &self.philosophers
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Live instrumentation, readable while [`Coordinator::run`] is in progress.
    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Run the dinner to completion.
    ///
    /// Philosophers are launched before the gate is loaded, so they all start
    /// out waiting for permission.
    pub async fn run(&self) -> Result<DiningReport, DiningError> {
        let context = TableContext {
            gate: self.gate.clone(),
            finished: self.finished.clone(),
            announcer: self.announcer.clone(),
            monitor: self.monitor.clone(),
            meal_duration: self.config.meal_duration,
            repeat_count: self.config.repeat_count,
            order: self.config.order,
            meal_policy: self.config.meal_policy,
        };

        tracing::info!(
            philosophers = self.config.actor_count,
            chopsticks = self.config.resource_count,
            meals = self.config.repeat_count,
            seats = self.config.concurrency_limit,
            order = %self.config.order,
            "dinner starting"
        );

        let start = Instant::now();
        self.finished.add(self.philosophers.len());

        for philosopher in &self.philosophers {
            let philosopher = philosopher.clone();
            let context = context.clone();
            tokio::spawn(async move {
                if let Err(e) = philosopher.dine(&context).await {
                    tracing::error!(philosopher = philosopher.id(), error = %e, "left the table");
                }
            });
        }

        self.gate.preload();
        self.finished.wait().await;

        let report = DiningReport {
            elapsed: start.elapsed(),
            states: self.philosophers.iter().map(|p| p.state()).collect(),
            monitor: self.monitor.snapshot(),
        };

        tracing::info!(
            elapsed_ms = report.elapsed.as_millis() as u64,
            meals = report.meals(),
            violations = report.monitor.violations,
            "dinner finished"
        );

        Ok(report)
    }
}
