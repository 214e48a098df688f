//! Pet simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches a browser
//! API directly:
//! - Time only moves through `advance(dt_ms)` calls
//! - Seeded RNG only (one generator per minigame session)
//! - Storage and audio arrive as trait objects

pub mod animation;
pub mod catalog;
pub mod catch;
pub mod collision;
pub mod decay;
pub mod flight;
pub mod inventory;
pub mod jobs;
pub mod orchestrator;
pub mod state;
pub mod timer;

pub use animation::{FeedPhase, PoopPhase};
pub use catalog::{CATALOG, FoodEffect, ItemCategory, ItemSlot, ShopItem};
pub use catch::{CatchEvent, CatchPhase, CatchSession, FallingKind, FallingObject};
pub use collision::Rect;
pub use decay::DecayClock;
pub use flight::{CrashCause, FlightEvent, FlightPhase, FlightSession, Obstacle};
pub use inventory::{Appearance, EquipOutcome, Inventory, InventoryEntry};
pub use jobs::{Job, JobLadder};
pub use orchestrator::{
    Command, ConsumeOutcome, Orchestrator, PurchaseOutcome, Snapshot, Timer, ViewChange,
};
pub use state::{Mood, PetStats, View};
pub use timer::Scheduler;
