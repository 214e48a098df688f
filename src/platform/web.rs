//! Browser bindings
//!
//! `PetHandle` is the only type the page talks to. It owns an orchestrator
//! wired to LocalStorage and Web Audio.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::persistence::Storage;
use crate::sim::{Command, Orchestrator, View};
use crate::tuning::Tuning;

/// LocalStorage-backed save slot. Every call degrades to a no-op when the
/// browser denies storage access.
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable - progress will not be saved");
        }
        Self { inner }
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.inner else { return };
        if storage.set_item(key, value).is_err() {
            log::warn!("Failed to write `{key}` to LocalStorage");
        }
    }
}

/// Install the panic hook and console logger (idempotent)
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// The pet, as seen from JavaScript
#[wasm_bindgen]
pub struct PetHandle {
    pet: Orchestrator,
}

#[wasm_bindgen]
impl PetHandle {
    /// Load the saved pet. `tuning_json` optionally overrides balance values.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> PetHandle {
        init_logging();
        let tuning = tuning_json
            .as_deref()
            .map(Tuning::from_json)
            .unwrap_or_default();

        let mut pet = Orchestrator::new(
            Box::new(LocalStorage::new()),
            Box::new(WebAudio::new()),
            tuning,
            super::clock_seed(),
        );
        pet.set_epoch_ms(super::wall_clock_ms());
        log::info!("Pocket Pet ready");
        PetHandle { pet }
    }

    /// Advance by one animation frame
    pub fn advance(&mut self, dt_ms: f64) {
        self.pet.advance(dt_ms);
    }

    /// Apply a JSON command such as `{"command":"purchaseItem","id":"ff1"}`
    pub fn command(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Command>(json) {
            Ok(command) => {
                self.pet.apply(command);
                true
            }
            Err(e) => {
                log::warn!("Ignoring malformed command {json}: {e}");
                false
            }
        }
    }

    pub fn start(&mut self) -> bool {
        self.pet.start()
    }

    pub fn retry(&mut self) -> bool {
        self.pet.retry()
    }

    pub fn exit(&mut self) {
        self.pet.exit();
    }

    pub fn jump(&mut self) -> bool {
        self.pet.jump()
    }

    #[wasm_bindgen(js_name = movePetLeft)]
    pub fn move_pet_left(&mut self) {
        self.pet.move_pet_left();
    }

    #[wasm_bindgen(js_name = movePetRight)]
    pub fn move_pet_right(&mut self) {
        self.pet.move_pet_right();
    }

    #[wasm_bindgen(js_name = consumeItem)]
    pub fn consume_item(&mut self, id: &str) {
        self.pet.consume_item(id);
    }

    #[wasm_bindgen(js_name = purchaseItem)]
    pub fn purchase_item(&mut self, id: &str) {
        self.pet.purchase_item(id);
    }

    #[wasm_bindgen(js_name = equipToggle)]
    pub fn equip_toggle(&mut self, id: &str) {
        self.pet.equip_toggle(id);
    }

    /// `view` is one of Home, Work, Shop, Shower, Inventory, Play
    #[wasm_bindgen(js_name = openView)]
    pub fn open_view(&mut self, view: &str) -> bool {
        let Ok(view) = serde_json::from_value::<View>(serde_json::Value::String(view.to_string()))
        else {
            log::warn!("Unknown view `{view}`");
            return false;
        };
        self.pet.open_view(view);
        true
    }

    #[wasm_bindgen(js_name = secretTap)]
    pub fn secret_tap(&mut self) -> bool {
        self.pet.secret_tap()
    }

    #[wasm_bindgen(js_name = finishShower)]
    pub fn finish_shower(&mut self) -> bool {
        self.pet.finish_shower()
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        self.pet.set_muted(muted);
    }

    /// Volume from 0.0 to 1.0
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f32) {
        self.pet.set_volume(volume);
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.pet.snapshot_json()
    }

    /// Queued notices, oldest first
    #[wasm_bindgen(js_name = drainNotices)]
    pub fn drain_notices(&mut self) -> js_sys::Array {
        self.pet
            .drain_notices()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }
}
