//! Player intents accepted by the simulation core.
//!
//! The presentation layer never computes economic outcomes. It submits one
//! of these intents and reacts to the [`FarmEvent`](crate::FarmEvent)s the
//! core returns. Illegal intents produce no events and leave state untouched.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AnimalType, CropType, Field, FoodType, SupplyType, ToolType};
use crate::ids::{AnimalId, DealId, OrderId, PetId};
use crate::structs::ItemRef;

/// A state-transition request from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Intent {
    /// Plant one seed on an empty plot.
    PlantSeed {
        /// Target plot collection.
        field: Field,
        /// Index within the collection.
        plot_index: usize,
        /// Crop to plant.
        crop: CropType,
    },
    /// Apply one golden fertilizer to a growing plot.
    ApplyFertilizer {
        /// Target plot collection.
        field: Field,
        /// Index within the collection.
        plot_index: usize,
    },
    /// Take an order from the bulletin board.
    AcceptOrder {
        /// The order to accept.
        order_id: OrderId,
    },
    /// Execute one of today's barter deals.
    ExecuteTrade {
        /// The deal to execute.
        deal_id: DealId,
    },
    /// Collect the pending level-up reward.
    ClaimLevelReward,
    /// Collect the next achievement milestone reward.
    ClaimMilestone,
    /// Buy seeds at today's market price.
    BuySeeds {
        /// Seed kind.
        crop: CropType,
        /// Number of seeds.
        quantity: u32,
    },
    /// Buy food from the shop.
    BuyFood {
        /// Food kind.
        food: FoodType,
        /// Number of portions.
        quantity: u32,
    },
    /// Buy farm supplies.
    BuySupplies {
        /// Supply kind.
        supply: SupplyType,
        /// Number of units.
        quantity: u32,
    },
    /// Buy animals for the barn.
    BuyAnimal {
        /// Species.
        animal: AnimalType,
        /// Head count.
        quantity: u32,
    },
    /// Buy a one-time tool.
    BuyTool {
        /// The tool.
        tool: ToolType,
    },
    /// Build the greenhouse.
    BuyGreenhouse,
    /// Build the barn.
    BuyBarn,
    /// Add one outdoor plot.
    ExpandFarm,
    /// Add one greenhouse plot.
    ExpandGreenhouse,
    /// Feed every hungry animal.
    FeedAnimals,
    /// Collect a ready product from one animal.
    CollectProduct {
        /// The animal to collect from.
        animal_id: AnimalId,
    },
    /// Sell food or animal products.
    SellItem {
        /// What to sell.
        item: ItemRef,
        /// How many.
        quantity: u32,
    },
    /// Eat one portion of food.
    EatFood {
        /// The food to eat.
        food: FoodType,
    },
    /// Cook one portion of a dish from its ingredients.
    Cook {
        /// The dish to make.
        recipe: FoodType,
    },
    /// Spend pet biscuits on the pet gacha.
    PullPets {
        /// 1 or 10.
        count: u32,
    },
    /// Choose the active companion.
    SetActivePet {
        /// An owned pet.
        pet_id: PetId,
    },
    /// Ask the whispering willow for today's advice.
    RequestAdvice,
}
