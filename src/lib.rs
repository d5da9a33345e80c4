// ABOUTME: Root module for philo - dining philosophers behind an admission gate.
// ABOUTME: Re-exports the public types from submodules.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod prelude;
pub mod sync;
pub mod table;

pub use config::TableConfig;
pub use coordinator::{Coordinator, DiningReport};
pub use error::DiningError;
