//! Trading-post barter deals.
//!
//! Two deals are posted per day. The first always comes from the normal
//! table; the second has a one-in-three chance of being a special deal and
//! otherwise is a different normal deal. Deals stay on the board all day and
//! may be executed repeatedly while the player can cover the give side.

use homestead_types::{
    AnimalProductType, BarterDeal, CropType, DealId, FoodType, ItemRef, ItemStack, SupplyType,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;
use crate::inventory::Inventory;

/// Probability that the second slot is a special deal.
pub const SPECIAL_DEAL_CHANCE: f64 = 0.33;

const EGG: ItemRef = ItemRef::AnimalProduct(AnimalProductType::Egg);
const MILK: ItemRef = ItemRef::AnimalProduct(AnimalProductType::Milk);
const TRUFFLE: ItemRef = ItemRef::AnimalProduct(AnimalProductType::Truffle);
const FEED: ItemRef = ItemRef::Supply(SupplyType::Feed);
const FERTILIZER: ItemRef = ItemRef::Supply(SupplyType::GoldenFertilizer);
const BREAD: ItemRef = ItemRef::Food(FoodType::Bread);
const PIZZA: ItemRef = ItemRef::Food(FoodType::Pizza);

/// A deal template: `(give, get)`.
pub type DealTemplate = (ItemStack, ItemStack);

/// Everyday deals.
pub const NORMAL_DEALS: [DealTemplate; 6] = [
    (ItemStack::new(EGG, 3), ItemStack::new(FEED, 5)),
    (ItemStack::new(MILK, 1), ItemStack::new(FEED, 6)),
    (
        ItemStack::new(EGG, 8),
        ItemStack::new(ItemRef::Seed(CropType::Carrot), 2),
    ),
    (
        ItemStack::new(MILK, 4),
        ItemStack::new(ItemRef::Seed(CropType::Tomato), 1),
    ),
    (ItemStack::new(EGG, 5), ItemStack::new(BREAD, 1)),
    (ItemStack::new(BREAD, 1), ItemStack::new(EGG, 4)),
];

/// Rare, high-value deals.
pub const SPECIAL_DEALS: [DealTemplate; 4] = [
    (ItemStack::new(TRUFFLE, 3), ItemStack::new(FERTILIZER, 1)),
    (
        ItemStack::new(MILK, 10),
        ItemStack::new(ItemRef::Seed(CropType::StardustSprout), 2),
    ),
    (ItemStack::new(PIZZA, 2), ItemStack::new(FERTILIZER, 1)),
    (
        ItemStack::new(EGG, 20),
        ItemStack::new(ItemRef::Seed(CropType::StardustSprout), 1),
    ),
];

fn instantiate((give, get): DealTemplate) -> BarterDeal {
    BarterDeal {
        id: DealId::new(),
        give,
        get,
    }
}

/// Draw today's two deals.
pub fn generate_deals(rng: &mut impl Rng) -> Vec<BarterDeal> {
    let picks: Vec<&DealTemplate> = NORMAL_DEALS.choose_multiple(rng, 2).collect();
    let mut deals = Vec::with_capacity(2);
    if let Some(first) = picks.first() {
        deals.push(instantiate(**first));
    }
    let special = rng.random_bool(SPECIAL_DEAL_CHANCE);
    let second = if special {
        SPECIAL_DEALS.choose(rng)
    } else {
        picks.get(1).copied()
    };
    if let Some(template) = second {
        deals.push(instantiate(*template));
    }
    deals
}

/// The deals posted today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarterBoard {
    deals: Vec<BarterDeal>,
}

impl BarterBoard {
    /// Restore a saved board.
    pub const fn from_deals(deals: Vec<BarterDeal>) -> Self {
        Self { deals }
    }

    /// Today's deals.
    pub fn deals(&self) -> &[BarterDeal] {
        &self.deals
    }

    /// Replace the board with fresh deals.
    pub fn refresh(&mut self, rng: &mut impl Rng) {
        self.deals = generate_deals(rng);
    }

    /// Trade through a posted deal. The deal stays on the board.
    pub fn execute(
        &self,
        deal_id: DealId,
        inventory: &mut Inventory,
    ) -> Result<BarterDeal, EconomyError> {
        let deal = self
            .deals
            .iter()
            .find(|d| d.id == deal_id)
            .copied()
            .ok_or(EconomyError::DealNotFound(deal_id))?;
        inventory.exchange(deal.give, deal.get)?;
        Ok(deal)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn same_terms(deal: &BarterDeal, template: &DealTemplate) -> bool {
        deal.give == template.0 && deal.get == template.1
    }

    #[test]
    fn two_deals_per_day() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(generate_deals(&mut rng).len(), 2);
        }
    }

    #[test]
    fn first_slot_is_normal_and_slots_differ() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..300 {
            let deals = generate_deals(&mut rng);
            assert!(NORMAL_DEALS.iter().any(|t| same_terms(&deals[0], t)));
            assert!(deals[0].give != deals[1].give || deals[0].get != deals[1].get);
        }
    }

    #[test]
    fn special_deals_appear_about_a_third_of_the_time() {
        let mut rng = SmallRng::seed_from_u64(99);
        let days = 3_000;
        let specials = (0..days)
            .filter(|_| {
                let deals = generate_deals(&mut rng);
                SPECIAL_DEALS.iter().any(|t| same_terms(&deals[1], t))
            })
            .count();
        assert!((800..1_200).contains(&specials), "{specials}");
    }

    #[test]
    fn short_inventory_is_a_no_op() {
        let template = SPECIAL_DEALS[0];
        let board = BarterBoard::from_deals(vec![instantiate(template)]);
        let id = board.deals()[0].id;
        let mut inv = Inventory::new();
        inv.credit(TRUFFLE, 2).unwrap();
        let before = inv.clone();

        assert!(board.execute(id, &mut inv).is_err());
        assert_eq!(inv, before);
    }

    #[test]
    fn executing_swaps_items_and_keeps_the_deal() {
        let board = BarterBoard::from_deals(vec![instantiate(NORMAL_DEALS[0])]);
        let id = board.deals()[0].id;
        let mut inv = Inventory::new();
        inv.credit(EGG, 6).unwrap();

        board.execute(id, &mut inv).unwrap();
        board.execute(id, &mut inv).unwrap();
        assert_eq!(inv.balance(EGG), 0);
        assert_eq!(inv.balance(FEED), 10);
        assert_eq!(board.deals().len(), 1);
    }

    #[test]
    fn unknown_deal_is_refused() {
        let board = BarterBoard::default();
        let mut inv = Inventory::new();
        let id = DealId::new();
        assert_eq!(
            board.execute(id, &mut inv),
            Err(EconomyError::DealNotFound(id))
        );
    }
}
