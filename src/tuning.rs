//! Data-driven game balance
//!
//! Every number here was picked by feel. They are kept in one serializable
//! struct so a build can ship a JSON override without touching the sim.

use serde::{Deserialize, Serialize};

use crate::persistence::merge_over_defaults;

/// Balance constants for the ambient simulation and reward functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Decay ===
    /// Simulated milliseconds between decay ticks
    pub decay_tick_ms: f64,
    pub hunger_rate: f32,
    pub hygiene_rate: f32,
    pub happiness_rate: f32,
    /// Hygiene decay multiplier while poop is on the floor
    pub poop_hygiene_factor: f32,
    /// Happiness decay multiplier while poop is on the floor
    pub poop_happiness_factor: f32,
    /// Age gained per tick (years)
    pub age_increment: f32,

    // === Poop ===
    /// Chance per decay tick to start a poop sequence
    pub poop_chance: f32,
    /// Delay between the squat and the pile appearing
    pub poop_delay_ms: f64,
    pub poop_hygiene_penalty: f32,

    // === Rewards ===
    /// Happiness lost after a work shift
    pub work_happiness_cost: f32,
    /// Hunger lost after a play session
    pub play_hunger_cost: f32,
    /// Cap on happiness gained from one play session
    pub play_happiness_cap: f32,
    /// Play score points per happiness point
    pub play_score_per_happiness: f32,
    pub shower_happiness_bonus: f32,
    pub eat_happiness_bonus: f32,
    /// Hunger restored by food that does not say otherwise
    pub default_hunger_restored: f32,

    // === Secret tap ===
    pub secret_tap_window_ms: f64,
    pub secret_tap_count: usize,
    pub secret_tap_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            decay_tick_ms: 10_000.0,
            hunger_rate: 0.2,
            hygiene_rate: 0.15,
            happiness_rate: 0.1,
            poop_hygiene_factor: 3.0,
            poop_happiness_factor: 2.0,
            age_increment: 0.005,

            poop_chance: 0.01,
            poop_delay_ms: 2_000.0,
            poop_hygiene_penalty: 20.0,

            work_happiness_cost: 10.0,
            play_hunger_cost: 5.0,
            play_happiness_cap: 30.0,
            play_score_per_happiness: 5.0,
            shower_happiness_bonus: 10.0,
            eat_happiness_bonus: 5.0,
            default_hunger_restored: 10.0,

            secret_tap_window_ms: 2_000.0,
            secret_tap_count: 5,
            secret_tap_bonus: 5_000,
        }
    }
}

impl Tuning {
    /// Parse a JSON override; unknown or malformed fields keep their defaults
    pub fn from_json(json: &str) -> Self {
        let mut tuning: Self = merge_over_defaults(json);
        if tuning.decay_tick_ms <= 0.0 {
            log::warn!("decay_tick_ms must be positive, using default");
            tuning.decay_tick_ms = Self::default().decay_tick_ms;
        }
        tuning.poop_chance = tuning.poop_chance.clamp(0.0, 1.0);
        tuning
    }

    /// Happiness gained from a play session score
    pub fn play_happiness_gain(&self, score: u32) -> f32 {
        let per_point = self.play_score_per_happiness.max(1.0);
        (score as f32 / per_point).ceil().min(self.play_happiness_cap)
    }
}
