//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time and seeding
//! - Storage (LocalStorage on web)
//! - The wasm-bindgen handle the web view drives

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{LocalStorage, PetHandle};

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn wall_clock_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn wall_clock_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a fresh simulation, taken from the clock
pub fn clock_seed() -> u64 {
    wall_clock_ms() as u64
}
