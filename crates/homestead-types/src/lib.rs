//! Shared type definitions for the Homestead farm simulation.
//!
//! This crate is the single source of truth for types used across the
//! workspace. Types flow downstream to `TypeScript` via `ts-rs` for the
//! presentation layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for orders, deals, animals and pets
//! - [`enums`] -- Seasons, weather, item kinds, plot and achievement enums
//! - [`structs`] -- Plots, orders, deals, animals, pets, stats and rewards
//! - [`intents`] -- Player intents submitted to the core
//! - [`events`] -- Events the core emits in response

pub mod enums;
pub mod events;
pub mod ids;
pub mod intents;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AchievementCategory, AchievementId, AnimalProductType, AnimalType, CropType, Field, FoodType,
    GameMode, PetRarity, PetType, PlotSize, PlotState, ProductState, Requester, Season, StatKey,
    SupplyType, TimeOfDay, ToolType, Weather,
};
pub use events::FarmEvent;
pub use ids::{AnimalId, DealId, OrderId, PetId};
pub use intents::Intent;
pub use structs::{
    Animal, BarterDeal, ItemRef, ItemStack, LevelUpReward, MilestoneReward, Order, Pet, Plot,
    Stats,
};
