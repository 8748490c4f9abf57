//! Money and item inventory.
//!
//! Items are addressed through the closed [`ItemRef`] union. Every item kind
//! shares the same capabilities ([`Inventory::balance`],
//! [`Inventory::try_debit`], [`Inventory::credit`]), so callers never branch
//! on the category themselves. All arithmetic is checked; a failed debit
//! leaves the inventory untouched.

use std::collections::BTreeMap;

use homestead_types::{AnimalProductType, CropType, FoodType, ItemRef, ItemStack, SupplyType};
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Check that `balance` covers `cost`.
pub const fn can_afford(balance: u64, cost: u64) -> bool {
    balance >= cost
}

/// Remove `cost` from `balance`.
pub fn spend(balance: &mut u64, cost: u64) -> Result<(), EconomyError> {
    *balance = balance
        .checked_sub(cost)
        .ok_or(EconomyError::InsufficientFunds {
            required: cost,
            available: *balance,
        })?;
    Ok(())
}

/// Add `amount` to `balance`, saturating at `u64::MAX`.
pub const fn earn(balance: &mut u64, amount: u64) {
    *balance = balance.saturating_add(amount);
}

/// Multiply a unit price by a quantity.
pub fn total_price(unit: u64, quantity: u32) -> Result<u64, EconomyError> {
    if quantity == 0 {
        return Err(EconomyError::ZeroQuantity);
    }
    unit.checked_mul(u64::from(quantity))
        .ok_or(EconomyError::ArithmeticOverflow {
            context: "price times quantity",
        })
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Countable items held by the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inventory {
    /// Seed packets per crop.
    pub seeds: BTreeMap<CropType, u32>,
    /// Food portions.
    pub food: BTreeMap<FoodType, u32>,
    /// Collected animal products.
    pub animal_products: BTreeMap<AnimalProductType, u32>,
    /// Farm supplies.
    pub supplies: BTreeMap<SupplyType, u32>,
}

impl Inventory {
    /// An empty inventory.
    pub const fn new() -> Self {
        Self {
            seeds: BTreeMap::new(),
            food: BTreeMap::new(),
            animal_products: BTreeMap::new(),
            supplies: BTreeMap::new(),
        }
    }

    /// How many of `item` are held.
    pub fn balance(&self, item: ItemRef) -> u32 {
        let held = match item {
            ItemRef::Seed(crop) => self.seeds.get(&crop),
            ItemRef::Food(food) => self.food.get(&food),
            ItemRef::AnimalProduct(product) => self.animal_products.get(&product),
            ItemRef::Supply(supply) => self.supplies.get(&supply),
        };
        held.copied().unwrap_or(0)
    }

    /// Whether at least `quantity` of `item` is held.
    pub fn has(&self, item: ItemRef, quantity: u32) -> bool {
        self.balance(item) >= quantity
    }

    /// Remove `quantity` of `item`. Returns the remaining count.
    pub fn try_debit(&mut self, item: ItemRef, quantity: u32) -> Result<u32, EconomyError> {
        let available = self.balance(item);
        let remaining = available
            .checked_sub(quantity)
            .ok_or(EconomyError::InsufficientItem {
                item,
                requested: quantity,
                available,
            })?;
        *self.slot_mut(item) = remaining;
        Ok(remaining)
    }

    /// Add `quantity` of `item`. Returns the new count.
    pub fn credit(&mut self, item: ItemRef, quantity: u32) -> Result<u32, EconomyError> {
        let next = self
            .balance(item)
            .checked_add(quantity)
            .ok_or(EconomyError::ArithmeticOverflow {
                context: "item count",
            })?;
        *self.slot_mut(item) = next;
        Ok(next)
    }

    /// Swap `give` for `get` as one step.
    ///
    /// Both sides are validated before either is applied, so a refused
    /// exchange changes nothing.
    pub fn exchange(&mut self, give: ItemStack, get: ItemStack) -> Result<(), EconomyError> {
        let give_left = self
            .balance(give.item)
            .checked_sub(give.quantity)
            .ok_or(EconomyError::InsufficientItem {
                item: give.item,
                requested: give.quantity,
                available: self.balance(give.item),
            })?;
        // Account for give and get naming the same item.
        let get_base = if give.item == get.item {
            give_left
        } else {
            self.balance(get.item)
        };
        let get_total = get_base
            .checked_add(get.quantity)
            .ok_or(EconomyError::ArithmeticOverflow {
                context: "item count",
            })?;
        *self.slot_mut(give.item) = give_left;
        *self.slot_mut(get.item) = get_total;
        Ok(())
    }

    /// Swap several stacks for one as a single step.
    ///
    /// Works on a scratch copy and commits only when every debit and the
    /// credit succeed, so a refused exchange changes nothing.
    pub fn exchange_many(
        &mut self,
        give: &[ItemStack],
        get: ItemStack,
    ) -> Result<(), EconomyError> {
        let mut next = self.clone();
        for stack in give {
            next.try_debit(stack.item, stack.quantity)?;
        }
        next.credit(get.item, get.quantity)?;
        *self = next;
        Ok(())
    }

    /// Add `quantity` seeds of every crop.
    pub fn credit_every_seed(&mut self, quantity: u32) {
        for crop in CropType::ALL {
            let slot = self.seeds.entry(crop).or_insert(0);
            *slot = slot.saturating_add(quantity);
        }
    }

    fn slot_mut(&mut self, item: ItemRef) -> &mut u32 {
        match item {
            ItemRef::Seed(crop) => self.seeds.entry(crop).or_insert(0),
            ItemRef::Food(food) => self.food.entry(food).or_insert(0),
            ItemRef::AnimalProduct(product) => self.animal_products.entry(product).or_insert(0),
            ItemRef::Supply(supply) => self.supplies.entry(supply).or_insert(0),
        }
    }
}
