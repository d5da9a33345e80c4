// ABOUTME: Table configuration - counts, meal timing, and the two table policies.
// ABOUTME: Passed explicitly to the Coordinator; defaults reproduce the reference dinner.

use std::time::Duration;

use crate::error::ConfigError;
use crate::table::{AcquisitionOrder, MealPolicy};

/// Number of philosophers at the reference table.
pub const DEFAULT_ACTOR_COUNT: usize = 5;
/// Number of chopsticks at the reference table.
pub const DEFAULT_RESOURCE_COUNT: usize = 5;
/// Meals each philosopher eats once admitted.
pub const DEFAULT_REPEAT_COUNT: usize = 3;
/// Philosophers allowed past the admission gate at once.
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 2;
/// How long a single meal takes.
pub const DEFAULT_MEAL_DURATION: Duration = Duration::from_secs(2);

/// Configuration for a dining run.
///
/// ## Field semantics
/// - `actor_count`: philosophers seated, ids run from 1 to `actor_count`
/// - `resource_count`: chopsticks on the table; philosopher `i` (zero-based)
///   uses chopsticks `i` and `(i + 1) % resource_count`
/// - `repeat_count`: meals per philosopher, eaten back to back once admitted
/// - `concurrency_limit`: admission gate capacity; `actor_count` turns the gate
///   into a no-op, `1` serializes all eating
/// - `meal_duration`: length of one meal
/// - `order`: which chopstick is picked up first
/// - `meal_policy`: whether chopsticks are kept across meals
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub actor_count: usize,
    pub resource_count: usize,
    pub repeat_count: usize,
    pub concurrency_limit: usize,
    pub meal_duration: Duration,
    pub order: AcquisitionOrder,
    pub meal_policy: MealPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            actor_count: DEFAULT_ACTOR_COUNT,
            resource_count: DEFAULT_RESOURCE_COUNT,
            repeat_count: DEFAULT_REPEAT_COUNT,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            meal_duration: DEFAULT_MEAL_DURATION,
            order: AcquisitionOrder::default(),
            meal_policy: MealPolicy::default(),
        }
    }
}

impl TableConfig {
    /// A ring of `actor_count` philosophers and as many chopsticks.
    pub fn ring(actor_count: usize) -> Self {
        Self {
            actor_count,
            resource_count: actor_count,
            ..Self::default()
        }
    }

    pub fn with_resource_count(mut self, resource_count: usize) -> Self {
        self.resource_count = resource_count;
        self
    }

    pub fn with_repeat_count(mut self, repeat_count: usize) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    pub fn with_meal_duration(mut self, duration: Duration) -> Self {
        self.meal_duration = duration;
        self
    }

    pub fn with_order(mut self, order: AcquisitionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_meal_policy(mut self, policy: MealPolicy) -> Self {
        self.meal_policy = policy;
        self
    }

    /// Check that the counts describe a table that can be seated.
    ///
    /// Fewer than two chopsticks would hand a philosopher the same chopstick
    /// twice, and more philosophers than chopsticks would leave seats unwired.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actor_count == 0 {
            return Err(ConfigError::NoActors);
        }
        if self.resource_count < 2 {
            return Err(ConfigError::TooFewResources {
                resource_count: self.resource_count,
            });
        }
        if self.actor_count > self.resource_count {
            return Err(ConfigError::NotEnoughResources {
                actor_count: self.actor_count,
                resource_count: self.resource_count,
            });
        }
        if self.concurrency_limit == 0 || self.concurrency_limit > self.actor_count {
            return Err(ConfigError::InvalidConcurrencyLimit {
                limit: self.concurrency_limit,
                actor_count: self.actor_count,
            });
        }
        Ok(())
    }

    /// Chopstick indices `(left, right)` for the philosopher at zero-based `seat`.
    pub fn ring_pair(&self, seat: usize) -> (usize, usize) {
        (seat, (seat + 1) % self.resource_count)
    }
}
