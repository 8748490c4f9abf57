//! Core entity structs shared by every crate in the workspace.
//!
//! These are plain data. Behavior lives in `homestead-world` (plots) and
//! `homestead-economy` (orders, deals, animals, pets, stats evaluation).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AnimalProductType, AnimalType, CropType, FoodType, PetType, PlotSize, PlotState,
    ProductState, Requester, StatKey, SupplyType,
};
use crate::ids::{AnimalId, DealId, OrderId, PetId};

// ---------------------------------------------------------------------------
// Plots
// ---------------------------------------------------------------------------

/// A single farmable cell.
///
/// Invariants maintained by the growth state machine:
/// - `Growing` implies `crop` and `growth_started_at_ms` are set.
/// - `Ready` additionally implies `size` is set.
/// - `Empty` implies `crop`, `growth_started_at_ms` and `size` are all unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Plot {
    /// Crop growing on this plot.
    pub crop: Option<CropType>,
    /// Lifecycle stage.
    pub state: PlotState,
    /// Wall-clock epoch milliseconds at which growth started. Back-dated by
    /// watering, rain and heat.
    pub growth_started_at_ms: Option<i64>,
    /// Whether the plot has been watered since planting.
    pub is_watered: bool,
    /// Whether golden fertilizer has been applied.
    pub is_fertilized: bool,
    /// Harvest size, set once the crop is ready.
    pub size: Option<PlotSize>,
}

impl Plot {
    /// An empty, unwatered plot.
    pub const fn empty() -> Self {
        Self {
            crop: None,
            state: PlotState::Empty,
            growth_started_at_ms: None,
            is_watered: false,
            is_fertilized: false,
            size: None,
        }
    }

    /// Check the state-dependent field invariants.
    pub const fn is_consistent(&self) -> bool {
        match self.state {
            PlotState::Empty => {
                self.crop.is_none() && self.growth_started_at_ms.is_none() && self.size.is_none()
            }
            PlotState::Growing => self.crop.is_some() && self.growth_started_at_ms.is_some(),
            PlotState::Ready => {
                self.crop.is_some() && self.growth_started_at_ms.is_some() && self.size.is_some()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A reference to one countable item kind.
///
/// Every inventory operation dispatches on this closed union, so adding an
/// item category is a compile error until each table handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "key", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ItemRef {
    /// Seeds of a crop.
    Seed(CropType),
    /// A food item.
    Food(FoodType),
    /// An animal product.
    AnimalProduct(AnimalProductType),
    /// A farm supply.
    Supply(SupplyType),
}

/// A quantity of one item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ItemStack {
    /// What is being counted.
    pub item: ItemRef,
    /// How many.
    pub quantity: u32,
}

impl ItemStack {
    /// Build a stack.
    pub const fn new(item: ItemRef, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

// ---------------------------------------------------------------------------
// Orders and deals
// ---------------------------------------------------------------------------

/// A delivery contract from the bulletin board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Crop the requester wants.
    pub crop: CropType,
    /// Units required to complete the order.
    pub quantity: u32,
    /// Units delivered so far. Never exceeds `quantity`.
    pub progress: u32,
    /// Money paid on completion.
    pub money_reward: u64,
    /// Experience paid on completion.
    pub xp_reward: u64,
    /// Who posted the order.
    pub requester: Requester,
}

/// A two-sided trade offer at the trading post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BarterDeal {
    /// Unique deal identifier.
    pub id: DealId,
    /// What the player hands over.
    pub give: ItemStack,
    /// What the player receives.
    pub get: ItemStack,
}

// ---------------------------------------------------------------------------
// Animals and pets
// ---------------------------------------------------------------------------

/// An animal living in the barn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Animal {
    /// Unique animal identifier.
    pub id: AnimalId,
    /// Species.
    pub animal_type: AnimalType,
    /// Whether the animal still needs feeding today.
    pub is_hungry: bool,
    /// Whether a product is waiting to be collected.
    pub product_state: ProductState,
}

/// An owned companion pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Pet {
    /// Unique pet identifier.
    pub id: PetId,
    /// Species.
    pub pet_type: PetType,
}

// ---------------------------------------------------------------------------
// Stats and rewards
// ---------------------------------------------------------------------------

/// Monotonic counters that drive achievement evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs, clippy::struct_excessive_bools)]
pub struct Stats {
    pub total_gold_earned: u64,
    pub total_crops_harvested: u64,
    pub farm_plots: u64,
    pub greenhouse_plots: u64,
    pub has_greenhouse: bool,
    pub level: u64,
    pub spring_crops_harvested: u64,
    pub summer_crops_harvested: u64,
    pub autumn_crops_harvested: u64,
    pub winter_crops_harvested: u64,
    pub food_eaten: u64,
    pub has_barn: bool,
    pub total_animals: u64,
    pub total_products_collected: u64,
}

impl Stats {
    /// Read one counter. Flags read as 0 or 1.
    pub const fn get(&self, key: StatKey) -> u64 {
        match key {
            StatKey::TotalGoldEarned => self.total_gold_earned,
            StatKey::TotalCropsHarvested => self.total_crops_harvested,
            StatKey::FarmPlots => self.farm_plots,
            StatKey::GreenhousePlots => self.greenhouse_plots,
            StatKey::HasGreenhouse => flag(self.has_greenhouse),
            StatKey::Level => self.level,
            StatKey::SpringCropsHarvested => self.spring_crops_harvested,
            StatKey::SummerCropsHarvested => self.summer_crops_harvested,
            StatKey::AutumnCropsHarvested => self.autumn_crops_harvested,
            StatKey::WinterCropsHarvested => self.winter_crops_harvested,
            StatKey::FoodEaten => self.food_eaten,
            StatKey::HasBarn => flag(self.has_barn),
            StatKey::TotalAnimals => self.total_animals,
            StatKey::TotalProductsCollected => self.total_products_collected,
        }
    }
}

const fn flag(value: bool) -> u64 {
    if value { 1 } else { 0 }
}

/// A level-up reward waiting to be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LevelUpReward {
    /// Highest level reached since the last claim.
    pub level: u32,
    /// Money paid on claim.
    pub money: u64,
}

/// What a milestone claim paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MilestoneReward {
    /// Milestone tier, starting at 1.
    pub milestone: u32,
    /// Money granted.
    pub money: u64,
    /// Seeds granted for every crop type.
    pub seeds_per_crop: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plot_is_consistent() {
        assert!(Plot::empty().is_consistent());
        assert_eq!(Plot::default(), Plot::empty());
    }

    #[test]
    fn growing_plot_without_timestamp_is_inconsistent() {
        let plot = Plot {
            crop: Some(CropType::Carrot),
            state: PlotState::Growing,
            ..Plot::empty()
        };
        assert!(!plot.is_consistent());
    }

    #[test]
    fn stats_flags_read_as_counts() {
        let stats = Stats {
            has_barn: true,
            ..Stats::default()
        };
        assert_eq!(stats.get(StatKey::HasBarn), 1);
        assert_eq!(stats.get(StatKey::HasGreenhouse), 0);
    }

    #[test]
    fn item_ref_is_tagged_on_the_wire() {
        let item = ItemRef::Seed(CropType::StardustSprout);
        let json = serde_json::to_value(item).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({"kind": "seed", "key": "stardust_sprout"})
        );
    }
}
