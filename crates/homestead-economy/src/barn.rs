//! Barn animals: purchase, daily hunger, feeding and product collection.
//!
//! Each day every animal turns hungry. An animal fed the previous day has a
//! product ready; one left hungry loses whatever it had.

use homestead_types::{
    Animal, AnimalId, AnimalProductType, AnimalType, ItemRef, ProductState, SupplyType,
};
use homestead_world::catalog;
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;
use crate::inventory::{self, Inventory};

const FEED: ItemRef = ItemRef::Supply(SupplyType::Feed);

/// The barn and its animals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Barn {
    /// Whether the barn has been built.
    pub built: bool,
    /// Animals living in it.
    pub animals: Vec<Animal>,
}

impl Barn {
    /// Build the barn out of `money`.
    pub fn build(&mut self, money: &mut u64) -> Result<u64, EconomyError> {
        if self.built {
            return Err(EconomyError::AlreadyBuilt("barn"));
        }
        inventory::spend(money, catalog::BARN_PRICE)?;
        self.built = true;
        Ok(catalog::BARN_PRICE)
    }

    /// Buy `quantity` animals. New animals arrive hungry.
    pub fn buy(
        &mut self,
        animal_type: AnimalType,
        quantity: u32,
        money: &mut u64,
    ) -> Result<u64, EconomyError> {
        if !self.built {
            return Err(EconomyError::NotBuilt("barn"));
        }
        let cost = inventory::total_price(catalog::animal(animal_type).price, quantity)?;
        inventory::spend(money, cost)?;
        self.animals.extend((0..quantity).map(|_| Animal {
            id: AnimalId::new(),
            animal_type,
            is_hungry: true,
            product_state: ProductState::None,
        }));
        Ok(cost)
    }

    /// Animals still waiting to be fed.
    pub fn hungry_count(&self) -> usize {
        self.animals.iter().filter(|a| a.is_hungry).count()
    }

    /// Feed every hungry animal, one feed each.
    ///
    /// Refused unless there is enough feed for all of them.
    pub fn feed_all(&mut self, inventory: &mut Inventory) -> Result<u32, EconomyError> {
        let hungry = u32::try_from(self.hungry_count()).unwrap_or(u32::MAX);
        if hungry == 0 {
            return Err(EconomyError::NothingToFeed);
        }
        inventory.try_debit(FEED, hungry)?;
        for animal in &mut self.animals {
            animal.is_hungry = false;
        }
        Ok(hungry)
    }

    /// Start a new day. Returns how many products became ready.
    pub fn daily_reset(&mut self) -> usize {
        let mut ready: usize = 0;
        for animal in &mut self.animals {
            if animal.is_hungry {
                animal.product_state = ProductState::None;
            } else {
                animal.product_state = ProductState::Ready;
                ready = ready.saturating_add(1);
            }
            animal.is_hungry = true;
        }
        ready
    }

    /// Collect a ready product into the inventory.
    pub fn collect(
        &mut self,
        animal_id: AnimalId,
        inventory: &mut Inventory,
    ) -> Result<AnimalProductType, EconomyError> {
        let animal = self
            .animals
            .iter_mut()
            .find(|a| a.id == animal_id)
            .ok_or(EconomyError::AnimalNotFound(animal_id))?;
        if animal.product_state != ProductState::Ready {
            return Err(EconomyError::ProductNotReady(animal_id));
        }
        let product = catalog::animal(animal.animal_type).product;
        inventory.credit(ItemRef::AnimalProduct(product), 1)?;
        animal.product_state = ProductState::None;
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn built_barn_with(animal: AnimalType, n: u32) -> Barn {
        let mut barn = Barn::default();
        let mut money = 100_000;
        barn.build(&mut money).unwrap();
        barn.buy(animal, n, &mut money).unwrap();
        barn
    }

    #[test]
    fn animals_need_a_barn() {
        let mut barn = Barn::default();
        let mut money = 1_000;
        assert_eq!(
            barn.buy(AnimalType::Chicken, 1, &mut money),
            Err(EconomyError::NotBuilt("barn"))
        );
        assert_eq!(money, 1_000);
    }

    #[test]
    fn barn_is_built_once() {
        let mut barn = Barn::default();
        let mut money = 5_000;
        assert_eq!(barn.build(&mut money), Ok(1_000));
        assert_eq!(barn.build(&mut money), Err(EconomyError::AlreadyBuilt("barn")));
        assert_eq!(money, 4_000);
    }

    #[test]
    fn buying_charges_per_head() {
        let mut barn = Barn::default();
        let mut money = 2_000;
        barn.build(&mut money).unwrap();
        assert_eq!(barn.buy(AnimalType::Cow, 2, &mut money), Ok(600));
        assert_eq!(money, 400);
        assert_eq!(barn.animals.len(), 2);
        assert!(barn.buy(AnimalType::Pig, 1, &mut money).is_err());
        assert_eq!(barn.animals.len(), 2);
    }

    #[test]
    fn feeding_needs_enough_feed() {
        let mut barn = built_barn_with(AnimalType::Chicken, 3);
        let mut inv = Inventory::new();
        inv.credit(FEED, 2).unwrap();
        assert!(barn.feed_all(&mut inv).is_err());
        assert_eq!(barn.hungry_count(), 3);

        inv.credit(FEED, 1).unwrap();
        assert_eq!(barn.feed_all(&mut inv), Ok(3));
        assert_eq!(inv.balance(FEED), 0);
        assert_eq!(barn.feed_all(&mut inv), Err(EconomyError::NothingToFeed));
    }

    #[test]
    fn fed_animals_produce_next_day() {
        let mut barn = built_barn_with(AnimalType::Chicken, 2);
        let mut inv = Inventory::new();
        inv.credit(FEED, 2).unwrap();
        barn.feed_all(&mut inv).unwrap();

        assert_eq!(barn.daily_reset(), 2);
        assert_eq!(barn.hungry_count(), 2);

        let id = barn.animals[0].id;
        assert_eq!(barn.collect(id, &mut inv), Ok(AnimalProductType::Egg));
        assert_eq!(inv.balance(ItemRef::AnimalProduct(AnimalProductType::Egg)), 1);
        assert_eq!(barn.collect(id, &mut inv), Err(EconomyError::ProductNotReady(id)));
    }

    #[test]
    fn hungry_animals_lose_their_product() {
        let mut barn = built_barn_with(AnimalType::Cow, 1);
        let mut inv = Inventory::new();
        inv.credit(FEED, 1).unwrap();
        barn.feed_all(&mut inv).unwrap();
        barn.daily_reset();
        assert_eq!(barn.animals[0].product_state, ProductState::Ready);

        assert_eq!(barn.daily_reset(), 0);
        assert_eq!(barn.animals[0].product_state, ProductState::None);
    }
}
