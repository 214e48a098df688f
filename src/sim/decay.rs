//! Ambient stat decay
//!
//! Runs on a fixed interval of simulated time while the pet is not in a
//! minigame. Each tick drains needs, ages the pet and may start a poop
//! sequence.

use rand::Rng;

use super::state::PetStats;
use crate::consts::MAX_POOPS;
use crate::tuning::Tuning;

/// Accumulates simulated time into whole decay ticks
#[derive(Debug, Clone, Default)]
pub struct DecayClock {
    accumulator_ms: f64,
}

impl DecayClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed time; returns how many ticks are due
    pub fn advance(&mut self, dt_ms: f64, tick_ms: f64) -> u32 {
        if tick_ms <= 0.0 {
            return 0;
        }
        self.accumulator_ms += dt_ms.max(0.0);
        let mut ticks = 0;
        while self.accumulator_ms >= tick_ms {
            self.accumulator_ms -= tick_ms;
            ticks += 1;
        }
        ticks
    }
}

/// Drain needs and age the pet by one tick. Health is left alone.
pub fn apply_tick(stats: &mut PetStats, tuning: &Tuning) {
    let (hygiene_factor, happiness_factor) = if stats.has_poop() {
        (tuning.poop_hygiene_factor, tuning.poop_happiness_factor)
    } else {
        (1.0, 1.0)
    };

    stats.hunger -= tuning.hunger_rate;
    stats.hygiene -= tuning.hygiene_rate * hygiene_factor;
    stats.happiness -= tuning.happiness_rate * happiness_factor;
    stats.age += tuning.age_increment;
    stats.clamp();
}

/// Roll for a poop. Never fires while a sequence is already in flight or the
/// floor is full.
pub fn roll_poop<R: Rng>(stats: &PetStats, busy: bool, tuning: &Tuning, rng: &mut R) -> bool {
    if busy || stats.poops >= MAX_POOPS {
        return false;
    }
    rng.random::<f32>() < tuning.poop_chance
}

/// Land a poop pile
pub fn resolve_poop(stats: &mut PetStats, tuning: &Tuning) {
    stats.add_poop();
    stats.hygiene -= tuning.poop_hygiene_penalty;
    stats.clamp();
}
