//! Pocket Pet entry point
//!
//! On the web the page constructs a `PetHandle` and drives it from
//! `requestAnimationFrame`. Natively this runs a scripted headless session
//! and logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    pocket_pet::platform::web::init_logging();
    log::info!("Pocket Pet starting...");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pocket Pet (native) starting...");

    // Optional balance override: `pocket-pet tuning.json`
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded tuning from {path}");
                pocket_pet::Tuning::from_json(&json)
            }
            Err(e) => {
                log::warn!("Failed to read {path}: {e}, using defaults");
                pocket_pet::Tuning::default()
            }
        },
        None => pocket_pet::Tuning::default(),
    };

    headless::run(tuning);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pocket_pet::audio::LogAudio;
    use pocket_pet::platform::{clock_seed, wall_clock_ms};
    use pocket_pet::sim::{FlightPhase, Orchestrator};
    use pocket_pet::{MemoryStorage, Tuning, View};

    /// One 60Hz frame
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(tuning: Tuning) {
        let mut pet = Orchestrator::new(
            Box::new(MemoryStorage::new()),
            Box::new(LogAudio),
            tuning,
            clock_seed(),
        );
        pet.set_epoch_ms(wall_clock_ms());

        // Shopping and a snack
        pet.open_view(View::Shop);
        pet.purchase_item("hf1");
        pet.purchase_item("ac_cap");
        pet.equip_toggle("ac_cap");
        pet.consume_item("hf1");
        run_frames(&mut pet, 180);
        report(&mut pet, "after lunch");

        // A work shift flapping every 24 frames until the first crash
        pet.open_view(View::Work);
        pet.start();
        for frame in 0..3_600 {
            if frame % 24 == 0 {
                pet.jump();
            }
            pet.advance(FRAME_MS);
            if pet.flight().is_some_and(|f| f.phase == FlightPhase::Ended) {
                break;
            }
        }
        pet.exit();
        report(&mut pet, "after work");

        // A play session that chases nothing
        pet.open_view(View::Play);
        for frame in 0..1_900 {
            if frame % 90 == 0 {
                pet.move_pet_left();
            } else if frame % 90 == 45 {
                pet.move_pet_right();
            }
            pet.advance(FRAME_MS);
        }
        pet.exit();
        report(&mut pet, "after play");

        // An idle afternoon
        for _ in 0..60 {
            pet.advance(10_000.0);
        }
        report(&mut pet, "after ten idle minutes");
    }

    fn run_frames(pet: &mut Orchestrator, frames: usize) {
        for _ in 0..frames {
            pet.advance(FRAME_MS);
        }
    }

    fn report(pet: &mut Orchestrator, label: &str) {
        for notice in pet.drain_notices() {
            log::info!("  notice: {notice}");
        }
        let stats = pet.stats();
        log::info!(
            "{label}: mood {:?}, money {}, job {}, hunger {:.1}, hygiene {:.1}, happiness {:.1}, health {:.1}, poops {}",
            pet.mood(),
            stats.money,
            pet.current_job().title,
            stats.hunger,
            stats.hygiene,
            stats.happiness,
            stats.health,
            stats.poops,
        );
    }
}
