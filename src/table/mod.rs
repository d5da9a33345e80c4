// ABOUTME: The dining table - philosophers, their policies, and what they report.
// ABOUTME: Provides Philosopher, TableContext, the order/meal policies, Announcer and Monitor.

mod announce;
mod monitor;
mod philosopher;
mod policy;

pub use announce::{Announcement, AnnouncementKind, Announcer, MemoryAnnouncer, StdoutAnnouncer};
pub use monitor::{Monitor, MonitorSnapshot};
pub use philosopher::{ActorState, Philosopher, TableContext};
pub use policy::{AcquisitionOrder, MealPolicy, Side};

#[cfg(test)]
mod philosopher_test;
