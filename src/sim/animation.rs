//! Animation state machines for the poop and feeding sequences
//!
//! Both sequences mutate pet state after a delay. Their transitions are
//! scheduled on the orchestrator's [`Scheduler`](super::timer::Scheduler);
//! the phase doubles as the busy flag that stops a second sequence starting.

use serde::{Deserialize, Serialize};

/// Feeding: item flies in, pet chews, then settles
pub const FEED_MOVING_MS: f64 = 100.0;
pub const FEED_CHEWING_MS: f64 = 1_000.0;
pub const FEED_DONE_MS: f64 = 2_000.0;
pub const FEED_IDLE_MS: f64 = 2_500.0;

/// Poop sequence phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoopPhase {
    #[default]
    Idle,
    /// Pet is squatting, the pile lands when the timer fires
    Squatting,
    /// Pile has landed; behaves like idle for new rolls
    Resolved,
}

impl PoopPhase {
    pub fn is_busy(&self) -> bool {
        *self == PoopPhase::Squatting
    }
}

/// Feeding animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeedPhase {
    #[default]
    Idle,
    Spawned,
    Moving,
    /// Food is applied on entry to this phase
    Chewing,
    Done,
}

impl FeedPhase {
    /// Any phase other than idle blocks a new feeding
    pub fn is_active(&self) -> bool {
        *self != FeedPhase::Idle
    }

    /// Mouth is open while the food is on its way
    pub fn mouth_open(&self) -> bool {
        matches!(self, FeedPhase::Spawned | FeedPhase::Moving)
    }

    /// Pet has eaten and is pleased about it
    pub fn is_satisfied(&self) -> bool {
        matches!(self, FeedPhase::Chewing | FeedPhase::Done)
    }

    /// Phase transitions and their delay from the start of the feeding
    pub fn schedule() -> [(FeedPhase, f64); 4] {
        [
            (FeedPhase::Moving, FEED_MOVING_MS),
            (FeedPhase::Chewing, FEED_CHEWING_MS),
            (FeedPhase::Done, FEED_DONE_MS),
            (FeedPhase::Idle, FEED_IDLE_MS),
        ]
    }
}
