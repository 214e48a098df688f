//! Save/load persistence
//!
//! Features:
//! - Three independent JSON blobs (stats, inventory, appearance)
//! - Default-merge on load (missing fields fall back, unknown fields ignored)
//! - Storage capability trait so the sim never touches a backend directly

pub mod merge;

use std::collections::HashMap;

pub use merge::{decode_list, merge_over_defaults};

use crate::sim::{Appearance, Inventory, InventoryEntry, PetStats};

/// Storage key for pet stats
pub const STATS_KEY: &str = "pocket_pet_stats";
/// Storage key for the inventory list
pub const INVENTORY_KEY: &str = "pocket_pet_inventory";
/// Storage key for the appearance record
pub const APPEARANCE_KEY: &str = "pocket_pet_appearance";

/// Key-value storage surface (LocalStorage on web, a map elsewhere)
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory storage for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Everything that survives a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveData {
    pub stats: PetStats,
    pub inventory: Inventory,
    pub appearance: Appearance,
}

impl SaveData {
    /// Load all three blobs, merging each over its defaults
    pub fn load(storage: &dyn Storage) -> Self {
        let stats = match storage.get_item(STATS_KEY) {
            Some(json) => {
                let mut stats: PetStats = merge_over_defaults(&json);
                stats.clamp();
                log::info!("Loaded pet stats (age {:.2})", stats.age);
                stats
            }
            None => {
                log::info!("No saved stats found, starting fresh");
                PetStats::default()
            }
        };

        let inventory = storage
            .get_item(INVENTORY_KEY)
            .map(|json| Inventory::from_entries(decode_list::<InventoryEntry>(&json)))
            .unwrap_or_default();

        let appearance = storage
            .get_item(APPEARANCE_KEY)
            .map(|json| merge_over_defaults::<Appearance>(&json))
            .unwrap_or_default();

        Self {
            stats,
            inventory,
            appearance,
        }
    }

    /// Write all three blobs
    pub fn save(&self, storage: &mut dyn Storage) {
        save_blob(storage, STATS_KEY, &self.stats);
        save_blob(storage, INVENTORY_KEY, self.inventory.entries());
        save_blob(storage, APPEARANCE_KEY, &self.appearance);
    }
}

fn save_blob<T: serde::Serialize + ?Sized>(storage: &mut dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json),
        Err(e) => log::warn!("Failed to serialize `{key}`: {e}"),
    }
}
