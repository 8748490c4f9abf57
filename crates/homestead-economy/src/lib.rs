//! Economy rules for the Homestead farm simulation.
//!
//! Everything that moves money, items or progression lives here. Each
//! operation validates before it mutates and returns an [`EconomyError`]
//! when refused, leaving its inputs untouched.
//!
//! # Modules
//!
//! - [`inventory`] -- Money helpers and the tagged item inventory
//! - [`orders`] -- Daily order generation and the active order
//! - [`barter`] -- Daily trade-post deals
//! - [`achievements`] -- Achievement table, unlocks and milestones
//! - [`leveling`] -- Experience thresholds and level-up rewards
//! - [`modifiers`] -- Pet effects and owned tools
//! - [`pets`] -- Pet roster and gacha pulls
//! - [`barn`] -- Barn animals and their products
//! - [`error`] -- Economy error types

pub mod achievements;
pub mod barn;
pub mod barter;
pub mod error;
pub mod inventory;
pub mod leveling;
pub mod modifiers;
pub mod orders;
pub mod pets;

pub use achievements::AchievementTracker;
pub use barn::Barn;
pub use barter::BarterBoard;
pub use error::EconomyError;
pub use inventory::Inventory;
pub use leveling::Progression;
pub use modifiers::{ActiveModifiers, DailyFind, Toolbox};
pub use orders::{OrderBoard, OrderProgress};
pub use pets::PetRoster;
