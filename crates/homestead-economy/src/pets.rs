//! Pet collection and the biscuit-paid gacha.

use homestead_types::{ItemRef, Pet, PetId, PetRarity, PetType, SupplyType};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;
use crate::inventory::Inventory;
use crate::modifiers::{self, ActiveModifiers};

/// Biscuits paid for a single pull.
pub const SINGLE_PULL_COST: u32 = 1;

/// Biscuits paid for a ten-pull.
pub const TEN_PULL_COST: u32 = 9;

/// Rarity weights in percent: legendary, epic, rare, common.
pub const RARITY_WEIGHTS: [(PetRarity, u32); 4] = [
    (PetRarity::Legendary, 2),
    (PetRarity::Epic, 8),
    (PetRarity::Rare, 25),
    (PetRarity::Common, 65),
];

const BISCUIT: ItemRef = ItemRef::Supply(SupplyType::PetBiscuit);

/// Biscuit cost of a pull batch.
pub const fn pull_cost(count: u32) -> Result<u32, EconomyError> {
    match count {
        1 => Ok(SINGLE_PULL_COST),
        10 => Ok(TEN_PULL_COST),
        other => Err(EconomyError::InvalidPullCount(other)),
    }
}

/// Roll a rarity, never below `floor`.
pub fn roll_rarity(floor: PetRarity, rng: &mut impl Rng) -> PetRarity {
    let eligible: Vec<_> = RARITY_WEIGHTS
        .iter()
        .filter(|(rarity, _)| *rarity >= floor)
        .collect();
    let total: u32 = eligible.iter().map(|(_, w)| *w).sum();
    let mut roll = rng.random_range(0..total.max(1));
    for (rarity, weight) in &eligible {
        if roll < *weight {
            return *rarity;
        }
        roll = roll.saturating_sub(*weight);
    }
    floor
}

/// Pick a species of the given rarity uniformly.
pub fn roll_species(rarity: PetRarity, rng: &mut impl Rng) -> PetType {
    let pool: Vec<PetType> = PetType::ALL
        .into_iter()
        .filter(|p| modifiers::pet(*p).rarity == rarity)
        .collect();
    pool.choose(rng).copied().unwrap_or(PetType::FarmDog)
}

/// Draw `count` pets. A ten-pull rerolls its last slot at rare or better
/// when every slot came up common.
pub fn draw(count: u32, rng: &mut impl Rng) -> Vec<PetType> {
    let mut rarities: Vec<PetRarity> = (0..count)
        .map(|_| roll_rarity(PetRarity::Common, rng))
        .collect();
    let all_common = rarities.iter().all(|r| *r == PetRarity::Common);
    match rarities.last_mut() {
        Some(last) if count == 10 && all_common => *last = roll_rarity(PetRarity::Rare, rng),
        _ => {}
    }
    rarities
        .into_iter()
        .map(|rarity| roll_species(rarity, rng))
        .collect()
}

/// Owned pets and the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetRoster {
    /// Every pet pulled, duplicates included.
    pub owned: Vec<Pet>,
    /// The pet whose modifiers are in force.
    pub active: Option<PetId>,
}

impl PetRoster {
    /// Type of the active pet.
    pub fn active_type(&self) -> Option<PetType> {
        let id = self.active?;
        self.owned.iter().find(|p| p.id == id).map(|p| p.pet_type)
    }

    /// Modifiers in force.
    pub fn modifiers(&self) -> ActiveModifiers {
        ActiveModifiers::for_pet(self.active_type())
    }

    /// Pay biscuits and add newly drawn pets. The active pet is unchanged.
    pub fn pull(
        &mut self,
        count: u32,
        inventory: &mut Inventory,
        rng: &mut impl Rng,
    ) -> Result<Vec<Pet>, EconomyError> {
        let cost = pull_cost(count)?;
        inventory.try_debit(BISCUIT, cost)?;
        let pulled: Vec<Pet> = draw(count, rng)
            .into_iter()
            .map(|pet_type| Pet {
                id: PetId::new(),
                pet_type,
            })
            .collect();
        self.owned.extend(pulled.iter().copied());
        Ok(pulled)
    }

    /// Switch the active pet.
    pub fn set_active(&mut self, pet_id: PetId) -> Result<(), EconomyError> {
        if !self.owned.iter().any(|p| p.id == pet_id) {
            return Err(EconomyError::PetNotOwned(pet_id));
        }
        self.active = Some(pet_id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn pull_counts_are_fixed() {
        assert_eq!(pull_cost(1), Ok(1));
        assert_eq!(pull_cost(10), Ok(9));
        assert_eq!(pull_cost(3), Err(EconomyError::InvalidPullCount(3)));
    }

    #[test]
    fn every_rarity_has_a_species() {
        let mut rng = SmallRng::seed_from_u64(42);
        for (rarity, _) in RARITY_WEIGHTS {
            let species = roll_species(rarity, &mut rng);
            assert_eq!(modifiers::pet(species).rarity, rarity);
        }
    }

    #[test]
    fn rarity_floor_is_respected() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..1_000 {
            assert!(roll_rarity(PetRarity::Rare, &mut rng) >= PetRarity::Rare);
        }
    }

    #[test]
    fn ten_pull_always_has_rare_or_better() {
        let mut rng = SmallRng::seed_from_u64(77);
        for _ in 0..500 {
            let pets = draw(10, &mut rng);
            assert_eq!(pets.len(), 10);
            assert!(
                pets.iter()
                    .any(|p| modifiers::pet(*p).rarity >= PetRarity::Rare)
            );
        }
    }

    #[test]
    fn commons_dominate_single_pulls() {
        let mut rng = SmallRng::seed_from_u64(5);
        let commons = (0..4_000)
            .filter(|_| roll_rarity(PetRarity::Common, &mut rng) == PetRarity::Common)
            .count();
        assert!((2_400..2_800).contains(&commons), "{commons}");
    }

    #[test]
    fn pull_adds_pets_without_activating() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut inv = Inventory::new();
        inv.credit(BISCUIT, 10).unwrap();
        let mut roster = PetRoster::default();

        let pulled = roster.pull(1, &mut inv, &mut rng).unwrap();
        assert_eq!(pulled.len(), 1);
        assert!(roster.active.is_none());
        assert_eq!(inv.balance(BISCUIT), 9);

        roster.set_active(pulled[0].id).unwrap();
        let more = roster.pull(10, &mut inv, &mut rng).unwrap();
        assert_eq!(more.len(), 10);
        assert_eq!(roster.active, Some(pulled[0].id));
        assert_eq!(roster.owned.len(), 11);
        assert_eq!(inv.balance(BISCUIT), 0);
    }

    #[test]
    fn pull_without_biscuits_changes_nothing() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut inv = Inventory::new();
        let mut roster = PetRoster::default();
        assert!(roster.pull(1, &mut inv, &mut rng).is_err());
        assert!(roster.owned.is_empty());
        assert!(roster.active.is_none());
    }

    #[test]
    fn set_active_requires_ownership() {
        let mut roster = PetRoster::default();
        let stranger = PetId::new();
        assert_eq!(
            roster.set_active(stranger),
            Err(EconomyError::PetNotOwned(stranger))
        );

        let pet = Pet {
            id: PetId::new(),
            pet_type: PetType::CalicoCat,
        };
        roster.owned.push(pet);
        roster.set_active(pet.id).unwrap();
        assert_eq!(roster.active_type(), Some(PetType::CalicoCat));
        assert_eq!(roster.modifiers().scale_money(100), 110);
    }
}
