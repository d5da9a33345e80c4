// ABOUTME: Named table policies - chopstick acquisition order and meal pacing.
// ABOUTME: LeftThenRight is the deadlock-prone default; LowerIndexFirst is the hierarchy fix.

/// One of the two chopsticks in front of a philosopher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Order in which a philosopher picks up its two chopsticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AcquisitionOrder {
    /// Always left first. Around a full ring this can leave every philosopher
    /// holding its left chopstick and waiting on its right one forever; only
    /// the admission gate keeps that from happening.
    #[default]
    LeftThenRight,

    /// Always the lower-indexed chopstick first. Breaks the wait cycle, so the
    /// table cannot deadlock regardless of the gate.
    LowerIndexFirst,
}

impl AcquisitionOrder {
    /// The sides in pick-up order for chopsticks at `left` and `right`.
    pub fn sequence(self, left: usize, right: usize) -> [Side; 2] {
        match self {
            AcquisitionOrder::LowerIndexFirst if right < left => [Side::Right, Side::Left],
            _ => [Side::Left, Side::Right],
        }
    }
}

impl std::fmt::Display for AcquisitionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionOrder::LeftThenRight => write!(f, "left-then-right"),
            AcquisitionOrder::LowerIndexFirst => write!(f, "lower-index-first"),
        }
    }
}

/// Whether chopsticks stay in hand between meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MealPolicy {
    /// Pick up once, eat every meal, put down after the last one.
    #[default]
    HoldThroughout,

    /// Pick up and put down around each meal, keeping the gate slot throughout.
    ReacquirePerMeal,
}
