//! Shop catalog
//!
//! Static item data. Inventory and appearance records refer to items by id.

use serde::{Deserialize, Serialize};

/// Shop tab an item is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Food,
    ClothesBoy,
    ClothesGirl,
    Accessory,
}

impl ItemCategory {
    /// Everything that is not food is worn
    pub fn is_food(&self) -> bool {
        *self == ItemCategory::Food
    }
}

/// Where a wearable renders on the pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSlot {
    Hat,
    Face,
    Body,
    Hand,
    Legs,
    Feet,
    None,
}

/// What eating a food item does
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodEffect {
    pub hunger_restored: f32,
    /// Junk food is negative
    pub health_impact: f32,
}

/// A purchasable item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ItemCategory,
    pub slot: ItemSlot,
    pub cost: u64,
    pub food: Option<FoodEffect>,
}

impl ShopItem {
    pub fn is_food(&self) -> bool {
        self.category.is_food()
    }
}

const fn food(
    id: &'static str,
    name: &'static str,
    cost: u64,
    hunger_restored: f32,
    health_impact: f32,
) -> ShopItem {
    ShopItem {
        id,
        name,
        category: ItemCategory::Food,
        slot: ItemSlot::None,
        cost,
        food: Some(FoodEffect {
            hunger_restored,
            health_impact,
        }),
    }
}

const fn wearable(
    id: &'static str,
    name: &'static str,
    category: ItemCategory,
    slot: ItemSlot,
    cost: u64,
) -> ShopItem {
    ShopItem {
        id,
        name,
        category,
        slot,
        cost,
        food: None,
    }
}

/// Everything the shop sells
pub const CATALOG: &[ShopItem] = &[
    // Fast food
    food("ff1", "Burger", 15, 30.0, -5.0),
    food("ff2", "Pizza", 20, 40.0, -8.0),
    food("ff3", "Fries", 10, 15.0, -3.0),
    food("ff4", "Cola", 8, 10.0, -5.0),
    food("ff5", "Hotdog", 12, 25.0, -6.0),
    // Healthy food
    food("hf1", "Apple", 10, 15.0, 5.0),
    food("hf2", "Salad", 25, 35.0, 10.0),
    food("hf3", "Carrot", 8, 10.0, 4.0),
    food("hf4", "Broccoli", 12, 20.0, 8.0),
    food("hf5", "Water", 5, 5.0, 5.0),
    // Clothes
    wearable("bc2", "Blue Tee", ItemCategory::ClothesBoy, ItemSlot::Body, 50),
    wearable("bc_stripe", "Striped Tee", ItemCategory::ClothesBoy, ItemSlot::Body, 75),
    wearable("gc_tshirt", "Pink Tee", ItemCategory::ClothesGirl, ItemSlot::Body, 50),
    wearable("gc_stripe", "Striped Tee", ItemCategory::ClothesGirl, ItemSlot::Body, 75),
    // Accessories
    wearable("ac_cap", "Cap", ItemCategory::Accessory, ItemSlot::Hat, 50),
];

/// Find an item by id
pub fn item(id: &str) -> Option<&'static ShopItem> {
    CATALOG.iter().find(|i| i.id == id)
}
