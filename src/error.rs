// ABOUTME: Defines all error types for the philo library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under DiningError.

/// Top-level error type for the philo library.
#[derive(Debug, thiserror::Error)]
pub enum DiningError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Admission gate error: {0}")]
    Gate(#[from] GateError),
}

/// Errors from validating a table configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one philosopher is required")]
    NoActors,

    #[error("at least two chopsticks are required, got {resource_count}")]
    TooFewResources { resource_count: usize },

    #[error("{actor_count} philosophers cannot be seated with {resource_count} chopsticks")]
    NotEnoughResources {
        actor_count: usize,
        resource_count: usize,
    },

    #[error("concurrency limit {limit} must be between 1 and {actor_count}")]
    InvalidConcurrencyLimit { limit: usize, actor_count: usize },
}

/// Errors from the admission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("admission gate is closed")]
    Closed,
}
