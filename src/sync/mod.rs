// ABOUTME: Synchronization primitives for the dining table.
// ABOUTME: Chopstick locks, the admission gate, and the completion wait group.

mod chopstick;
mod gate;
mod wait_group;

pub use chopstick::{Chopstick, Held};
pub use gate::{AdmissionGate, Permission};
pub use wait_group::WaitGroup;
