//! Static item catalog: crops, foods, animals, supplies, tools and buildings.
//!
//! Every table is an exhaustive `match` over a closed enum, so a new item
//! kind cannot be added without pricing it here.
//!
//! | Crop            | Grow   | Sell | Seed | XP | Seasons                |
//! |-----------------|--------|------|------|----|------------------------|
//! | carrot          | 60s    | 10   | 5    | 5  | spring, autumn         |
//! | tomato          | 120s   | 25   | 12   | 10 | summer                 |
//! | potato          | 90s    | 18   | 8    | 8  | spring, autumn         |
//! | cucumber        | 100s   | 20   | 10   | 9  | summer                 |
//! | broccoli        | 150s   | 35   | 15   | 14 | spring, autumn         |
//! | strawberry      | 180s   | 45   | 20   | 18 | spring                 |
//! | corn            | 200s   | 50   | 22   | 20 | summer, autumn         |
//! | bell pepper     | 160s   | 40   | 18   | 16 | summer                 |
//! | eggplant        | 170s   | 42   | 19   | 17 | summer, autumn         |
//! | watermelon      | 300s   | 90   | 40   | 35 | summer                 |
//! | stardust sprout | 240s   | 150  | 100  | 50 | all                    |

use homestead_types::{
    AnimalProductType, AnimalType, CropType, FoodType, ItemRef, ItemStack, Season, SupplyType,
    ToolType,
};

// ---------------------------------------------------------------------------
// Farm layout and buildings
// ---------------------------------------------------------------------------

/// Outdoor plots on a new farm.
pub const INITIAL_FARM_SIZE: usize = 9;

/// Greenhouse plots available once the greenhouse is built.
pub const INITIAL_GREENHOUSE_SIZE: usize = 4;

/// Price of the greenhouse.
pub const GREENHOUSE_PRICE: u64 = 2_500;

/// Price of the barn.
pub const BARN_PRICE: u64 = 1_000;

/// Base step of the outdoor expansion price.
pub const FARM_EXPANSION_STEP: u64 = 20;

/// Base step of the greenhouse expansion price.
pub const GREENHOUSE_EXPANSION_STEP: u64 = 50;

/// Money on a new farm.
pub const STARTING_MONEY: u64 = 50;

/// Carrot seeds on a new farm.
pub const STARTING_CARROT_SEEDS: u32 = 3;

/// Price of the next outdoor plot given the current plot count.
///
/// The n-th plot beyond the starting layout costs `20 * n`.
pub fn farm_expansion_cost(current_plots: usize) -> u64 {
    expansion_cost(current_plots, INITIAL_FARM_SIZE, FARM_EXPANSION_STEP)
}

/// Price of the next greenhouse plot given the current plot count.
pub fn greenhouse_expansion_cost(current_plots: usize) -> u64 {
    expansion_cost(current_plots, INITIAL_GREENHOUSE_SIZE, GREENHOUSE_EXPANSION_STEP)
}

fn expansion_cost(current: usize, initial: usize, step: u64) -> u64 {
    let extra = current.saturating_sub(initial).saturating_add(1);
    let extra = u64::try_from(extra).unwrap_or(u64::MAX);
    step.saturating_mul(extra)
}

// ---------------------------------------------------------------------------
// Crops
// ---------------------------------------------------------------------------

/// Static properties of a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    /// Base growth duration in milliseconds.
    pub growth_time_ms: i64,
    /// Base sell price per unit.
    pub sell_price: u64,
    /// Base seed price.
    pub seed_price: u64,
    /// Experience per unit harvested.
    pub xp_yield: u64,
    /// Seasons the crop may be planted outdoors.
    pub seasons: &'static [Season],
}

const SPRING_AUTUMN: &[Season] = &[Season::Spring, Season::Autumn];
const SUMMER: &[Season] = &[Season::Summer];
const SUMMER_AUTUMN: &[Season] = &[Season::Summer, Season::Autumn];
const SPRING: &[Season] = &[Season::Spring];
const ALL_SEASONS: &[Season] = &Season::ALL;

/// Look up a crop's static properties.
pub const fn crop(crop: CropType) -> CropSpec {
    let (growth_time_ms, sell_price, seed_price, xp_yield, seasons) = match crop {
        CropType::Carrot => (60_000, 10, 5, 5, SPRING_AUTUMN),
        CropType::Tomato => (120_000, 25, 12, 10, SUMMER),
        CropType::Potato => (90_000, 18, 8, 8, SPRING_AUTUMN),
        CropType::Cucumber => (100_000, 20, 10, 9, SUMMER),
        CropType::Broccoli => (150_000, 35, 15, 14, SPRING_AUTUMN),
        CropType::Strawberry => (180_000, 45, 20, 18, SPRING),
        CropType::Corn => (200_000, 50, 22, 20, SUMMER_AUTUMN),
        CropType::BellPepper => (160_000, 40, 18, 16, SUMMER),
        CropType::Eggplant => (170_000, 42, 19, 17, SUMMER_AUTUMN),
        CropType::Watermelon => (300_000, 90, 40, 35, SUMMER),
        CropType::StardustSprout => (240_000, 150, 100, 50, ALL_SEASONS),
    };
    CropSpec {
        growth_time_ms,
        sell_price,
        seed_price,
        xp_yield,
        seasons,
    }
}

/// Whether the crop may be planted outdoors in the given season.
pub fn is_in_season(crop_type: CropType, season: Season) -> bool {
    crop(crop_type).seasons.contains(&season)
}

/// Crops plantable outdoors in the given season, in catalog order.
pub fn crops_in_season(season: Season) -> Vec<CropType> {
    CropType::ALL
        .into_iter()
        .filter(|c| is_in_season(*c, season))
        .collect()
}

// ---------------------------------------------------------------------------
// Foods
// ---------------------------------------------------------------------------

/// Static properties of a food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodSpec {
    /// Shop price.
    pub price: u64,
    /// Price paid when sold back. Same as the shop price.
    pub sell_price: u64,
    /// Hunger restored when eaten.
    pub hunger_restore: u32,
    /// Season the shop stocks it in, if seasonal.
    pub seasonality: Option<Season>,
}

/// Look up a food's static properties.
pub const fn food(food: FoodType) -> FoodSpec {
    let (price, hunger_restore, seasonality) = match food {
        FoodType::Bread => (20, 10, None),
        FoodType::Salad => (30, 15, None),
        FoodType::Sandwich => (45, 20, None),
        FoodType::Pizza => (80, 35, None),
        FoodType::Steak => (120, 50, None),
        FoodType::StrawberryCake => (100, 40, Some(Season::Spring)),
        FoodType::Bibimbap => (70, 30, None),
        FoodType::ColdNoodles => (60, 25, Some(Season::Summer)),
        FoodType::ShavedIce => (40, 15, Some(Season::Summer)),
        FoodType::Samgyetang => (110, 45, Some(Season::Summer)),
        FoodType::RoastedSweetPotato => (35, 20, Some(Season::Winter)),
        FoodType::Persimmon => (25, 10, Some(Season::Autumn)),
        FoodType::Jjinppang => (30, 15, Some(Season::Winter)),
        FoodType::Udon => (55, 25, None),
        FoodType::VeggieStirFry => (50, 25, None),
        FoodType::Omelette => (35, 18, None),
        FoodType::TrufflePasta => (150, 60, None),
    };
    FoodSpec {
        price,
        sell_price: price,
        hunger_restore,
        seasonality,
    }
}

/// Whether the shop sells this food in the given season.
pub fn food_on_sale(food_type: FoodType, season: Season) -> bool {
    food(food_type).seasonality.is_none_or(|s| s == season)
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// Experience for cooking one dish, before pet bonuses.
pub const COOKING_XP: u64 = 20;

/// Ingredients consumed by one cooking step. The dish comes out one portion
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeSpec {
    /// The dish produced.
    pub dish: FoodType,
    /// Everything consumed.
    pub ingredients: &'static [ItemStack],
}

const fn product(product: AnimalProductType, quantity: u32) -> ItemStack {
    ItemStack::new(ItemRef::AnimalProduct(product), quantity)
}

const fn dish(food: FoodType, quantity: u32) -> ItemStack {
    ItemStack::new(ItemRef::Food(food), quantity)
}

const OMELETTE: &[ItemStack] = &[
    product(AnimalProductType::Egg, 2),
    product(AnimalProductType::Milk, 1),
];
const SANDWICH: &[ItemStack] = &[
    dish(FoodType::Bread, 1),
    product(AnimalProductType::Egg, 1),
];
const PIZZA: &[ItemStack] = &[
    dish(FoodType::Bread, 1),
    product(AnimalProductType::Milk, 2),
];
const BIBIMBAP: &[ItemStack] = &[
    dish(FoodType::Salad, 1),
    product(AnimalProductType::Egg, 1),
];
const TRUFFLE_PASTA: &[ItemStack] = &[
    product(AnimalProductType::Truffle, 1),
    product(AnimalProductType::Egg, 1),
    product(AnimalProductType::Milk, 1),
];

/// Recipe for `food`, if the kitchen can make it.
pub const fn recipe(food: FoodType) -> Option<RecipeSpec> {
    let ingredients = match food {
        FoodType::Omelette => OMELETTE,
        FoodType::Sandwich => SANDWICH,
        FoodType::Pizza => PIZZA,
        FoodType::Bibimbap => BIBIMBAP,
        FoodType::TrufflePasta => TRUFFLE_PASTA,
        _ => return None,
    };
    Some(RecipeSpec {
        dish: food,
        ingredients,
    })
}

// ---------------------------------------------------------------------------
// Animals, products, supplies, tools
// ---------------------------------------------------------------------------

/// Static properties of a barn animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimalSpec {
    /// Purchase price per head.
    pub price: u64,
    /// What the animal produces when fed.
    pub product: AnimalProductType,
}

/// Look up an animal's static properties.
pub const fn animal(animal: AnimalType) -> AnimalSpec {
    match animal {
        AnimalType::Chicken => AnimalSpec {
            price: 100,
            product: AnimalProductType::Egg,
        },
        AnimalType::Cow => AnimalSpec {
            price: 300,
            product: AnimalProductType::Milk,
        },
        AnimalType::Pig => AnimalSpec {
            price: 500,
            product: AnimalProductType::Truffle,
        },
    }
}

/// Sell price of one animal product.
pub const fn product_sell_price(product: AnimalProductType) -> u64 {
    match product {
        AnimalProductType::Egg => 15,
        AnimalProductType::Milk => 30,
        AnimalProductType::Truffle => 80,
        AnimalProductType::GoldenEgg => 500,
    }
}

/// Shop price of one supply unit.
pub const fn supply_price(supply: SupplyType) -> u64 {
    match supply {
        SupplyType::Feed => 5,
        SupplyType::GoldenFertilizer => 200,
        SupplyType::PetBiscuit => 100,
    }
}

/// One-time price of a tool.
pub const fn tool_price(tool: ToolType) -> u64 {
    match tool {
        ToolType::WateringCan => 500,
        ToolType::Sprinkler => 2_000,
    }
}
