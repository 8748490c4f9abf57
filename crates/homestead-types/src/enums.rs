//! Enumeration types for the Homestead simulation.
//!
//! Item kinds (crops, foods, animal products, supplies, tools) are closed
//! enums so every lookup table in the workspace is exhaustively matched.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Calendar and environment
// ---------------------------------------------------------------------------

/// One of the four seasons of the farm year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Months 3, 4 and 5.
    Spring,
    /// Months 6, 7 and 8.
    Summer,
    /// Months 9, 10 and 11.
    Autumn,
    /// Months 12, 1 and 2.
    Winter,
}

impl Season {
    /// Every season in calendar order, starting with spring.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// Map a calendar month (1-12) to its season.
    ///
    /// Out-of-range months fall into winter, matching months 12, 1 and 2.
    pub const fn for_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    /// The first month of this season.
    pub const fn first_month(self) -> u32 {
        match self {
            Self::Spring => 3,
            Self::Summer => 6,
            Self::Autumn => 9,
            Self::Winter => 12,
        }
    }
}

/// Daily weather over the farm.
///
/// `Sunny`, `Cloudy` and `Rainy` are ordinary weather. The remaining four
/// are disasters rolled through the pity mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// Clear skies.
    Sunny,
    /// Overcast, no effect.
    Cloudy,
    /// Light rain: waters dry growing plots and speeds them up.
    Rainy,
    /// Disaster: torrential rain.
    HeavyRain,
    /// Disaster: speeds every growing plot and doubles hunger drain.
    Heatwave,
    /// Disaster: may destroy outdoor crops.
    Typhoon,
    /// Disaster: freezes outdoor plots.
    Blizzard,
}

impl Weather {
    /// Whether this weather is one of the disaster variants.
    pub const fn is_disaster(self) -> bool {
        matches!(
            self,
            Self::HeavyRain | Self::Heatwave | Self::Typhoon | Self::Blizzard
        )
    }
}

/// Phase of the current day, derived from day progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum TimeOfDay {
    /// First tenth of the day.
    Sunrise,
    /// Main working hours.
    Day,
    /// Dusk before the night window.
    Sunset,
    /// Outdoor growth is suspended.
    Night,
}

/// Game mode chosen at new-game time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum GameMode {
    /// Standard farming without hunger.
    #[default]
    Normal,
    /// Hunger drains over time and food must be eaten.
    Beta,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A plantable crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CropType {
    /// Quick spring and autumn staple.
    Carrot,
    /// Summer crop.
    Tomato,
    /// Spring and autumn root crop.
    Potato,
    /// Summer crop.
    Cucumber,
    /// Cool-weather crop.
    Broccoli,
    /// Spring berry.
    Strawberry,
    /// Long summer-to-autumn crop.
    Corn,
    /// Summer crop.
    BellPepper,
    /// Summer-to-autumn crop.
    Eggplant,
    /// Slow, valuable summer crop.
    Watermelon,
    /// Rare crop that grows in any season.
    StardustSprout,
}

impl CropType {
    /// Every crop, in catalog order.
    pub const ALL: [Self; 11] = [
        Self::Carrot,
        Self::Tomato,
        Self::Potato,
        Self::Cucumber,
        Self::Broccoli,
        Self::Strawberry,
        Self::Corn,
        Self::BellPepper,
        Self::Eggplant,
        Self::Watermelon,
        Self::StardustSprout,
    ];
}

/// A prepared food that restores hunger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum FoodType {
    Bread,
    Salad,
    Sandwich,
    Pizza,
    Steak,
    StrawberryCake,
    Bibimbap,
    ColdNoodles,
    ShavedIce,
    Samgyetang,
    RoastedSweetPotato,
    Persimmon,
    Jjinppang,
    Udon,
    VeggieStirFry,
    Omelette,
    TrufflePasta,
}

impl FoodType {
    /// Every food, in catalog order.
    pub const ALL: [Self; 17] = [
        Self::Bread,
        Self::Salad,
        Self::Sandwich,
        Self::Pizza,
        Self::Steak,
        Self::StrawberryCake,
        Self::Bibimbap,
        Self::ColdNoodles,
        Self::ShavedIce,
        Self::Samgyetang,
        Self::RoastedSweetPotato,
        Self::Persimmon,
        Self::Jjinppang,
        Self::Udon,
        Self::VeggieStirFry,
        Self::Omelette,
        Self::TrufflePasta,
    ];
}

/// A barn animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AnimalType {
    /// Lays eggs.
    Chicken,
    /// Gives milk.
    Cow,
    /// Digs up truffles.
    Pig,
}

impl AnimalType {
    /// Every animal, in shop order.
    pub const ALL: [Self; 3] = [Self::Chicken, Self::Cow, Self::Pig];
}

/// A product collected from animals (or laid by the golden goose).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum AnimalProductType {
    Egg,
    Milk,
    Truffle,
    GoldenEgg,
}

impl AnimalProductType {
    /// Every animal product.
    pub const ALL: [Self; 4] = [Self::Egg, Self::Milk, Self::Truffle, Self::GoldenEgg];
}

/// A consumable farm supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SupplyType {
    /// Feeds one hungry animal.
    Feed,
    /// Guarantees a large harvest on one plot.
    GoldenFertilizer,
    /// Currency for pet pulls.
    PetBiscuit,
}

impl SupplyType {
    /// Every supply.
    pub const ALL: [Self; 3] = [Self::Feed, Self::GoldenFertilizer, Self::PetBiscuit];
}

/// A one-time-purchase tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ToolType {
    /// Newly planted crops start half grown and watered.
    WateringCan,
    /// Every plot is watered at the start of each day.
    Sprinkler,
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

/// A companion pet species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PetType {
    /// Sometimes finds feed.
    FarmDog,
    /// Raises money earned.
    CalicoCat,
    /// Raises experience earned.
    WiseOwl,
    /// Sometimes lays a golden egg.
    GoldenGoose,
    /// Shortens growth time.
    MiniDragon,
}

impl PetType {
    /// Every pet species.
    pub const ALL: [Self; 5] = [
        Self::FarmDog,
        Self::CalicoCat,
        Self::WiseOwl,
        Self::GoldenGoose,
        Self::MiniDragon,
    ];
}

/// Gacha rarity tier. Ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum PetRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

// ---------------------------------------------------------------------------
// Plots, animals, orders
// ---------------------------------------------------------------------------

/// Lifecycle stage of a plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PlotState {
    /// Nothing planted.
    #[default]
    Empty,
    /// Crop planted and growing.
    Growing,
    /// Crop ripe, awaiting auto-harvest.
    Ready,
}

/// Size of a ripe crop, rolled when the plot becomes ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum PlotSize {
    Small,
    Medium,
    Large,
}

/// Which plot collection a plot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Field {
    /// Open-air plots, gated by season, weather and night.
    Outdoor,
    /// Sheltered plots that grow year-round.
    Greenhouse,
}

/// Whether an animal has a product waiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum ProductState {
    #[default]
    None,
    Ready,
}

/// Who posted an order on the bulletin board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum Requester {
    Restaurant,
    Mayor,
    School,
}

impl Requester {
    /// Every requester.
    pub const ALL: [Self; 3] = [Self::Restaurant, Self::Mayor, Self::School];
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// Grouping used when presenting achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum AchievementCategory {
    Money,
    Harvest,
    Level,
    Expansion,
    Greenhouse,
    Seasonal,
    Ranch,
    Beta,
}

/// Identifier of a static achievement definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum AchievementId {
    Money1,
    Money2,
    Money3,
    Money4,
    Harvest1,
    Harvest2,
    Harvest3,
    Harvest4,
    Level1,
    Level2,
    Level3,
    Expand1,
    Expand2,
    Expand3,
    Greenhouse1,
    Greenhouse2,
    Greenhouse3,
    SeasonalSpring,
    SeasonalSummer,
    SeasonalAutumn,
    SeasonalWinter,
    Foodie1,
    Foodie2,
    BuildBarn1,
    BuyChicken1,
    CollectEgg1,
    BuyCow1,
    CollectMilk1,
    BuyPig1,
    CollectTruffle1,
}

/// A key into the aggregate [`Stats`](crate::Stats) counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum StatKey {
    TotalGoldEarned,
    TotalCropsHarvested,
    FarmPlots,
    GreenhousePlots,
    HasGreenhouse,
    Level,
    SpringCropsHarvested,
    SummerCropsHarvested,
    AutumnCropsHarvested,
    WinterCropsHarvested,
    FoodEaten,
    HasBarn,
    TotalAnimals,
    TotalProductsCollected,
}
