// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use philo::prelude::*;` to get started quickly.

pub use crate::config::TableConfig;
pub use crate::coordinator::{Coordinator, DiningReport, Seat};
pub use crate::error::{ConfigError, DiningError, GateError};
pub use crate::sync::{AdmissionGate, Chopstick, Held, Permission, WaitGroup};
pub use crate::table::{
    AcquisitionOrder, ActorState, Announcement, AnnouncementKind, Announcer, MealPolicy,
    MemoryAnnouncer, Monitor, MonitorSnapshot, Philosopher, StdoutAnnouncer, TableContext,
};
