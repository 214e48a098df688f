//! Pocket Pet - A virtual pet with needs, a job ladder and arcade minigames
//!
//! Core modules:
//! - `sim`: Pet simulation (decay, mood, shop, minigame physics, orchestration)
//! - `persistence`: Key-value save blobs with default-merge on load
//! - `platform`: Browser bindings (LocalStorage, wasm-bindgen handle)
//! - `audio`: Fire-and-forget sound cues
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use audio::{AudioSink, Cue};
pub use persistence::{MemoryStorage, Storage};
pub use sim::{Command, Mood, Orchestrator, View};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Upper bound for every bounded pet stat
    pub const MAX_STAT: f32 = 100.0;
    /// Maximum poop piles on the floor
    pub const MAX_POOPS: u8 = 3;
    /// Age (years) at which the pet is fully grown
    pub const MAX_GROWTH_AGE: f32 = 18.0;

    /// Stat thresholds used by mood and status flags
    pub const LOW_STAT_THRESHOLD: f32 = 40.0;
    pub const HAPPY_THRESHOLD: f32 = 50.0;
    pub const EXCITED_THRESHOLD: f32 = 80.0;

    /// Largest frame delta fed to a minigame (prevents spiral of death)
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Clamp a bounded stat to [0, MAX_STAT]
#[inline]
pub fn clamp_stat(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, consts::MAX_STAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_stat() {
        assert_eq!(clamp_stat(-5.0), 0.0);
        assert_eq!(clamp_stat(150.0), 100.0);
        assert_eq!(clamp_stat(42.5), 42.5);
        assert_eq!(clamp_stat(f32::NAN), 0.0);
    }
}
