//! Events emitted by the simulation core.
//!
//! Every state transition reports what changed as a list of events. The
//! presentation layer renders toasts, floating numbers and modals from
//! these without recomputing anything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AchievementId, AnimalProductType, AnimalType, CropType, Field, FoodType, PlotSize, Season,
    ToolType, Weather,
};
use crate::ids::{AnimalId, DealId, OrderId, PetId};
use crate::structs::{ItemRef, MilestoneReward, Pet};

/// Something observable that happened to the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FarmEvent {
    /// A new calendar day began.
    DayAdvanced {
        /// The new day counter.
        total_days: u64,
        /// Season of the new day.
        season: Season,
    },
    /// The daily weather roll produced a different weather.
    WeatherChanged {
        /// Weather before the roll.
        previous: Weather,
        /// Weather after the roll.
        current: Weather,
        /// Pity counter after the roll.
        disaster_chance: u32,
    },
    /// Market multipliers were re-rolled.
    MarketUpdated,
    /// Orders and barter deals were replaced for the day.
    BoardsRefreshed {
        /// New order count.
        orders: usize,
        /// New deal count.
        deals: usize,
    },
    /// Plots were watered by sprinklers or rain.
    PlotsWatered {
        /// Which collection.
        field: Field,
        /// How many plots changed.
        count: usize,
    },
    /// A typhoon wiped out a crop.
    PlotDestroyed {
        /// Which collection.
        field: Field,
        /// Plot index.
        plot_index: usize,
        /// The lost crop.
        crop: CropType,
    },
    /// A seed was planted.
    CropPlanted {
        /// Which collection.
        field: Field,
        /// Plot index.
        plot_index: usize,
        /// The planted crop.
        crop: CropType,
    },
    /// Fertilizer was applied.
    PlotFertilized {
        /// Which collection.
        field: Field,
        /// Plot index.
        plot_index: usize,
    },
    /// A crop finished growing.
    CropReady {
        /// Which collection.
        field: Field,
        /// Plot index.
        plot_index: usize,
        /// The ripe crop.
        crop: CropType,
        /// Rolled size.
        size: PlotSize,
    },
    /// A ripe crop was harvested and the plot cleared.
    CropHarvested {
        /// Which collection.
        field: Field,
        /// Plot index.
        plot_index: usize,
        /// The harvested crop.
        crop: CropType,
        /// Size at harvest.
        size: PlotSize,
        /// Units harvested.
        yield_amount: u32,
    },
    /// The money balance changed.
    MoneyChanged {
        /// Signed change.
        delta: i64,
        /// Balance afterwards.
        balance: u64,
    },
    /// An item count changed.
    InventoryChanged {
        /// The item kind.
        item: ItemRef,
        /// Signed change.
        delta: i64,
        /// Count afterwards.
        balance: u32,
    },
    /// Experience was awarded.
    XpGained {
        /// Amount after multipliers.
        amount: u64,
        /// Cumulative experience.
        total: u64,
    },
    /// A new level was reached.
    LevelUp {
        /// The new level.
        level: u32,
    },
    /// The pending level-up reward was paid.
    LevelRewardClaimed {
        /// Level the reward was earned at.
        level: u32,
        /// Money paid.
        money: u64,
    },
    /// An order became active.
    OrderAccepted {
        /// The order.
        order_id: OrderId,
    },
    /// A harvest counted toward the active order.
    OrderProgressed {
        /// The order.
        order_id: OrderId,
        /// Units delivered.
        progress: u32,
        /// Units required.
        quantity: u32,
    },
    /// The active order was fulfilled and paid.
    OrderCompleted {
        /// The order.
        order_id: OrderId,
        /// Money paid.
        money: u64,
        /// Experience paid.
        xp: u64,
    },
    /// A barter deal was executed.
    TradeExecuted {
        /// The deal.
        deal_id: DealId,
    },
    /// An achievement was unlocked.
    AchievementUnlocked {
        /// The achievement.
        id: AchievementId,
    },
    /// A milestone reward was paid.
    MilestoneClaimed {
        /// What was granted.
        reward: MilestoneReward,
    },
    /// A tool was bought.
    ToolPurchased {
        /// The tool.
        tool: ToolType,
    },
    /// The greenhouse was built.
    GreenhouseBuilt,
    /// The barn was built.
    BarnBuilt,
    /// A plot collection grew by one.
    FieldExpanded {
        /// Which collection.
        field: Field,
        /// Plot count afterwards.
        plots: usize,
    },
    /// Animals were bought.
    AnimalsPurchased {
        /// Species.
        animal: AnimalType,
        /// Head count.
        quantity: u32,
    },
    /// Hungry animals were fed.
    AnimalsFed {
        /// How many were fed.
        count: usize,
    },
    /// Fed animals produced overnight.
    ProductsReady {
        /// How many animals have a product waiting.
        count: usize,
    },
    /// A product was collected.
    ProductCollected {
        /// Source animal.
        animal_id: AnimalId,
        /// Product kind.
        product: AnimalProductType,
    },
    /// The farm dog found feed.
    FeedFound {
        /// Units found.
        amount: u32,
    },
    /// The golden goose laid a golden egg.
    GoldenEggLaid,
    /// Pets were pulled from the gacha.
    PetsPulled {
        /// New pets, in pull order.
        pets: Vec<Pet>,
    },
    /// The active pet changed.
    ActivePetChanged {
        /// The new active pet.
        pet_id: PetId,
    },
    /// Food was eaten.
    FoodEaten {
        /// The food.
        food: FoodType,
        /// Hunger afterwards.
        hunger: u32,
    },
    /// A dish came out of the kitchen.
    DishCooked {
        /// The dish.
        food: FoodType,
    },
    /// Hunger drained.
    HungerChanged {
        /// Hunger afterwards.
        hunger: u32,
    },
    /// An advisory request was sent.
    AdviceRequested,
    /// The advisory message changed.
    AdviceReceived {
        /// Message text.
        message: String,
        /// Whether this is the fallback text after a failure.
        fallback: bool,
    },
}
