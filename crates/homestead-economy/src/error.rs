//! Error types for the homestead-economy crate.
//!
//! Every economy operation that can be refused returns an [`EconomyError`]
//! describing why. Callers in the simulation core turn these into silent
//! no-ops; they never reach the player as failures.

use homestead_types::{AnimalId, DealId, FoodType, ItemRef, OrderId, PetId, Season, ToolType};

/// Errors that can occur during economy operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    /// The player cannot afford the purchase.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// Price of the operation.
        required: u64,
        /// Current balance.
        available: u64,
    },

    /// The player does not hold enough of an item.
    #[error("insufficient {item:?}: wanted {requested}, have {available}")]
    InsufficientItem {
        /// The item kind.
        item: ItemRef,
        /// Quantity the operation needs.
        requested: u32,
        /// Quantity held.
        available: u32,
    },

    /// A quantity of zero was requested.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// An arithmetic overflow occurred.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// What was being computed.
        context: &'static str,
    },

    /// The order is not on the board.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order is already in progress.
    #[error("order {0} is already active")]
    OrderAlreadyActive(OrderId),

    /// The barter deal is not offered today.
    #[error("deal not found: {0}")]
    DealNotFound(DealId),

    /// There is no level-up reward to claim.
    #[error("no pending level-up reward")]
    NoPendingReward,

    /// Not enough achievements are unlocked for another milestone.
    #[error("no milestone available ({unlocked} unlocked, {claimed} claimed)")]
    NoMilestoneAvailable {
        /// Unlocked achievement count.
        unlocked: usize,
        /// Milestones already claimed.
        claimed: u32,
    },

    /// The tool is already owned.
    #[error("tool already owned: {0:?}")]
    ToolOwned(ToolType),

    /// The building already exists.
    #[error("{0} already built")]
    AlreadyBuilt(&'static str),

    /// The building the operation needs does not exist.
    #[error("{0} not built")]
    NotBuilt(&'static str),

    /// The animal is not in the barn.
    #[error("animal not found: {0}")]
    AnimalNotFound(AnimalId),

    /// The animal has nothing to collect.
    #[error("animal {0} has no product ready")]
    ProductNotReady(AnimalId),

    /// No animal is hungry.
    #[error("no hungry animals to feed")]
    NothingToFeed,

    /// The pet is not owned.
    #[error("pet not owned: {0}")]
    PetNotOwned(PetId),

    /// Pulls come in singles or tens.
    #[error("invalid pull count {0}; expected 1 or 10")]
    InvalidPullCount(u32),

    /// The item cannot be sold back.
    #[error("{0:?} cannot be sold")]
    NotSellable(ItemRef),

    /// The kitchen has no recipe for this food.
    #[error("no recipe makes {0:?}")]
    NoRecipe(FoodType),

    /// The shop does not stock this food in the current season.
    #[error("{food:?} is not sold in {season:?}")]
    FoodOutOfSeason {
        /// The food.
        food: FoodType,
        /// Current season.
        season: Season,
    },
}
