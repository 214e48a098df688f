//! Pet state and derived display values
//!
//! Everything persisted between sessions lives in [`PetStats`]. Mood, growth
//! and the status flags are always derived on demand and never stored.

use serde::{Deserialize, Serialize};

use super::animation::FeedPhase;
use crate::clamp_stat;
use crate::consts::*;

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Home,
    /// Obstacle flight minigame
    Work,
    Shop,
    Shower,
    Inventory,
    /// Catch minigame
    Play,
}

impl View {
    /// Views that suspend the decay engine
    pub fn is_minigame(&self) -> bool {
        matches!(self, View::Work | View::Play | View::Shower)
    }
}

/// Display mood, derived from stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Neutral,
    Excited,
}

/// Persistent pet stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetStats {
    /// 0 is starving
    pub hunger: f32,
    /// 0 is filthy
    pub hygiene: f32,
    pub happiness: f32,
    pub health: f32,
    pub money: u64,
    pub job_id: u32,
    /// Best work shift score
    pub high_score: u32,
    /// Unix timestamp (ms) of the last decay tick
    pub last_update: f64,
    /// Age in pet-years
    pub age: f32,
    /// Poop piles on the floor
    pub poops: u8,
}

impl Default for PetStats {
    fn default() -> Self {
        Self {
            hunger: 80.0,
            hygiene: 80.0,
            happiness: 80.0,
            health: 100.0,
            money: 100,
            job_id: 0,
            high_score: 0,
            last_update: 0.0,
            age: 0.0,
            poops: 0,
        }
    }
}

impl PetStats {
    /// Restore every invariant after a mutation
    pub fn clamp(&mut self) {
        self.hunger = clamp_stat(self.hunger);
        self.hygiene = clamp_stat(self.hygiene);
        self.happiness = clamp_stat(self.happiness);
        self.health = clamp_stat(self.health);
        if !self.age.is_finite() || self.age < 0.0 {
            self.age = 0.0;
        }
        self.poops = self.poops.min(MAX_POOPS);
    }

    /// Add a poop pile (saturating)
    pub fn add_poop(&mut self) {
        self.poops = (self.poops + 1).min(MAX_POOPS);
    }

    /// 0.0 for a newborn, 1.0 once fully grown
    pub fn growth_stage(&self) -> f32 {
        self.age.clamp(0.0, MAX_GROWTH_AGE) / MAX_GROWTH_AGE
    }

    /// Sprite scale used by the renderer
    pub fn render_scale(&self) -> f32 {
        0.6 + 0.4 * self.growth_stage()
    }

    pub fn is_dirty(&self) -> bool {
        self.hygiene < LOW_STAT_THRESHOLD
    }

    pub fn is_hungry(&self) -> bool {
        self.hunger < LOW_STAT_THRESHOLD
    }

    pub fn has_poop(&self) -> bool {
        self.poops > 0
    }

    /// Derive the current mood. First matching rule wins.
    pub fn mood(&self, feed: FeedPhase) -> Mood {
        if feed.is_satisfied() {
            Mood::Excited
        } else if self.has_poop() && self.is_dirty() {
            Mood::Sad
        } else if self.happiness < LOW_STAT_THRESHOLD {
            Mood::Sad
        } else if self.happiness > EXCITED_THRESHOLD {
            Mood::Excited
        } else if self.happiness > HAPPY_THRESHOLD {
            Mood::Happy
        } else {
            Mood::Neutral
        }
    }
}
