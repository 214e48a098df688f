//! Owned items and what the pet is wearing

use serde::{Deserialize, Serialize};

use super::catalog::{self, ItemSlot, ShopItem};

/// One inventory line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: String,
    /// Always 1 for wearables
    pub quantity: u32,
}

/// Owned items in purchase order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved entries: unknown items are dropped, duplicate food
    /// lines are summed and duplicate wearables collapse to one
    pub fn from_entries(entries: Vec<InventoryEntry>) -> Self {
        let mut inventory = Self::new();
        for entry in entries {
            let Some(item) = catalog::item(&entry.id) else {
                log::warn!("Dropping unknown inventory item `{}`", entry.id);
                continue;
            };
            if entry.quantity == 0 {
                continue;
            }
            match inventory.entries.iter_mut().find(|e| e.id == item.id) {
                Some(existing) if item.is_food() => {
                    existing.quantity = existing.quantity.saturating_add(entry.quantity);
                }
                Some(_) => {}
                None => inventory.entries.push(InventoryEntry {
                    id: item.id.to_string(),
                    quantity: if item.is_food() { entry.quantity } else { 1 },
                }),
            }
        }
        inventory
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn quantity(&self, id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    /// Add one of an item. Food stacks; wearables are presence-only.
    /// Returns false for unknown items and wearables already owned.
    pub fn add(&mut self, id: &str) -> bool {
        let Some(item) = catalog::item(id) else {
            return false;
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if item.is_food() => {
                entry.quantity = entry.quantity.saturating_add(1);
                true
            }
            Some(_) => false,
            None => {
                self.entries.push(InventoryEntry {
                    id: item.id.to_string(),
                    quantity: 1,
                });
                true
            }
        }
    }

    /// Use up one of an item, removing the line at zero
    pub fn take_one(&mut self, id: &str) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        self.entries[pos].quantity = self.entries[pos].quantity.saturating_sub(1);
        if self.entries[pos].quantity == 0 {
            self.entries.remove(pos);
        }
        true
    }
}

/// The pet's cosmetic record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Body color as a CSS hex string
    pub color: String,
    pub hat: Option<String>,
    /// Shared by FACE and HAND items
    pub accessory: Option<String>,
    /// Shirt
    pub outfit: Option<String>,
    pub pants: Option<String>,
    pub shoes: Option<String>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: "#facc15".to_string(),
            hat: None,
            accessory: None,
            outfit: None,
            pants: None,
            shoes: None,
        }
    }
}

/// Result of toggling a wearable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    Equipped,
    Removed,
    NotOwned,
    NotWearable,
}

impl Appearance {
    fn slot_mut(&mut self, slot: ItemSlot) -> Option<&mut Option<String>> {
        match slot {
            ItemSlot::Hat => Some(&mut self.hat),
            ItemSlot::Body => Some(&mut self.outfit),
            ItemSlot::Face | ItemSlot::Hand => Some(&mut self.accessory),
            ItemSlot::Legs => Some(&mut self.pants),
            ItemSlot::Feet => Some(&mut self.shoes),
            ItemSlot::None => None,
        }
    }

    /// Wear the item, or take it off if it is already worn.
    /// Each slot holds one item; wearing replaces the current occupant.
    pub fn toggle(&mut self, item: &ShopItem) -> EquipOutcome {
        if item.is_food() {
            return EquipOutcome::NotWearable;
        }
        let Some(slot) = self.slot_mut(item.slot) else {
            return EquipOutcome::NotWearable;
        };
        if slot.as_deref() == Some(item.id) {
            *slot = None;
            EquipOutcome::Removed
        } else {
            *slot = Some(item.id.to_string());
            EquipOutcome::Equipped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32) -> InventoryEntry {
        InventoryEntry {
            id: id.into(),
            quantity,
        }
    }

    #[test]
    fn test_food_stacks() {
        let mut inv = Inventory::new();
        assert!(inv.add("ff1"));
        assert!(inv.add("ff1"));
        assert_eq!(inv.quantity("ff1"), 2);
        assert_eq!(inv.entries().len(), 1);
    }

    #[test]
    fn test_wearable_is_presence_only() {
        let mut inv = Inventory::new();
        assert!(inv.add("ac_cap"));
        assert!(!inv.add("ac_cap"));
        assert_eq!(inv.quantity("ac_cap"), 1);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let mut inv = Inventory::new();
        assert!(!inv.add("ghost"));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_take_one_removes_at_zero() {
        let mut inv = Inventory::new();
        inv.add("hf1");
        inv.add("hf1");
        assert!(inv.take_one("hf1"));
        assert_eq!(inv.quantity("hf1"), 1);
        assert!(inv.take_one("hf1"));
        assert!(!inv.contains("hf1"));
        assert!(!inv.take_one("hf1"));
    }

    #[test]
    fn test_from_entries_normalizes() {
        let inv = Inventory::from_entries(vec![
            line("ff2", 2),
            line("ff2", 1),
            line("bc2", 4),
            line("bc2", 1),
            line("hf3", 0),
        ]);
        assert_eq!(inv.quantity("ff2"), 3);
        assert_eq!(inv.quantity("bc2"), 1);
        assert!(!inv.contains("hf3"));
    }

    #[test]
    fn test_from_entries_huge_stacks_saturate() {
        let mut inv = Inventory::from_entries(vec![line("ff1", u32::MAX), line("ff1", 7)]);
        assert_eq!(inv.quantity("ff1"), u32::MAX);
        assert_eq!(inv.entries().len(), 1);

        // Buying more stays pinned at the ceiling
        assert!(inv.add("ff1"));
        assert_eq!(inv.quantity("ff1"), u32::MAX);
    }

    #[test]
    fn test_toggle_replaces_and_removes() {
        let mut look = Appearance::default();
        let blue = catalog::item("bc2").unwrap();
        let stripes = catalog::item("bc_stripe").unwrap();

        assert_eq!(look.toggle(blue), EquipOutcome::Equipped);
        assert_eq!(look.outfit.as_deref(), Some("bc2"));

        // Same slot, different item: replace
        assert_eq!(look.toggle(stripes), EquipOutcome::Equipped);
        assert_eq!(look.outfit.as_deref(), Some("bc_stripe"));

        assert_eq!(look.toggle(stripes), EquipOutcome::Removed);
        assert!(look.outfit.is_none());
    }

    #[test]
    fn test_food_is_not_wearable() {
        let mut look = Appearance::default();
        let burger = catalog::item("ff1").unwrap();
        assert_eq!(look.toggle(burger), EquipOutcome::NotWearable);
        assert_eq!(look, Appearance::default());
    }
}
