// ABOUTME: Coordinator module - builds the table and drives a dining run.
// ABOUTME: Contains the Coordinator, seat wiring, and the final DiningReport.

mod coordinator;

pub use coordinator::{Coordinator, DiningReport, Seat};
