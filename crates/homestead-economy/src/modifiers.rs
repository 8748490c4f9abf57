//! Pet and tool modifiers.
//!
//! The active pet's type maps to a fixed [`PetSpec`]; nothing about a pet is
//! stored beyond its type. Tools are one-time purchases recorded as flags.

use std::collections::BTreeSet;

use homestead_types::{PetRarity, PetType, ToolType};
use homestead_world::catalog;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;
use crate::inventory;

// ---------------------------------------------------------------------------
// Pet table
// ---------------------------------------------------------------------------

/// Static effect of a pet species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetSpec {
    /// Gacha rarity.
    pub rarity: PetRarity,
    /// Multiplier on experience earned from harvests.
    pub xp_multiplier: f64,
    /// Multiplier on money earned from harvests and sales.
    pub money_multiplier: f64,
    /// Fraction of growth time removed.
    pub growth_reduction: f64,
    /// Daily chance to find feed.
    pub feed_find_chance: f64,
    /// Daily chance of a golden egg.
    pub golden_egg_chance: f64,
}

const NEUTRAL: PetSpec = PetSpec {
    rarity: PetRarity::Common,
    xp_multiplier: 1.0,
    money_multiplier: 1.0,
    growth_reduction: 0.0,
    feed_find_chance: 0.0,
    golden_egg_chance: 0.0,
};

/// Look up a pet's effect.
pub const fn pet(pet_type: PetType) -> PetSpec {
    match pet_type {
        PetType::FarmDog => PetSpec {
            feed_find_chance: 0.3,
            ..NEUTRAL
        },
        PetType::CalicoCat => PetSpec {
            rarity: PetRarity::Rare,
            money_multiplier: 1.1,
            ..NEUTRAL
        },
        PetType::WiseOwl => PetSpec {
            rarity: PetRarity::Rare,
            xp_multiplier: 1.15,
            ..NEUTRAL
        },
        PetType::GoldenGoose => PetSpec {
            rarity: PetRarity::Epic,
            golden_egg_chance: 0.2,
            ..NEUTRAL
        },
        PetType::MiniDragon => PetSpec {
            rarity: PetRarity::Legendary,
            growth_reduction: 0.2,
            ..NEUTRAL
        },
    }
}

/// Feed found by the farm dog: between these bounds, inclusive.
pub const FEED_FIND_RANGE: (u32, u32) = (1, 3);

/// Modifiers in force for the current active pet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveModifiers {
    spec: PetSpec,
}

impl Default for ActiveModifiers {
    fn default() -> Self {
        Self { spec: NEUTRAL }
    }
}

impl ActiveModifiers {
    /// Modifiers for an optional active pet.
    pub const fn for_pet(active: Option<PetType>) -> Self {
        match active {
            Some(p) => Self { spec: pet(p) },
            None => Self { spec: NEUTRAL },
        }
    }

    /// Experience multiplier.
    pub const fn xp_multiplier(&self) -> f64 {
        self.spec.xp_multiplier
    }

    /// Money multiplier.
    pub const fn money_multiplier(&self) -> f64 {
        self.spec.money_multiplier
    }

    /// Growth-time reduction fraction.
    pub const fn growth_reduction(&self) -> f64 {
        self.spec.growth_reduction
    }

    /// Apply the money multiplier and round.
    pub fn scale_money(&self, amount: u64) -> u64 {
        scale_rounded(amount, self.spec.money_multiplier)
    }

    /// Apply the experience multiplier and round.
    pub fn scale_xp(&self, amount: u64) -> u64 {
        scale_rounded(amount, self.spec.xp_multiplier)
    }

    /// Roll the once-per-day passives.
    pub fn roll_daily(&self, rng: &mut impl Rng) -> Vec<DailyFind> {
        let mut finds = Vec::new();
        if self.spec.feed_find_chance > 0.0 && rng.random_bool(self.spec.feed_find_chance) {
            let amount = rng.random_range(FEED_FIND_RANGE.0..=FEED_FIND_RANGE.1);
            finds.push(DailyFind::Feed(amount));
        }
        if self.spec.golden_egg_chance > 0.0 && rng.random_bool(self.spec.golden_egg_chance) {
            finds.push(DailyFind::GoldenEgg);
        }
        finds
    }
}

/// Something the active pet brought in at day start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyFind {
    /// Units of feed.
    Feed(u32),
    /// One golden egg.
    GoldenEgg,
}

/// Multiply and round half away from zero.
pub fn scale_rounded(amount: u64, factor: f64) -> u64 {
    #[allow(clippy::cast_precision_loss)]
    // Game amounts are far below 2^52.
    let scaled = (amount as f64 * factor).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let out = scaled.max(0.0) as u64;
    out
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Owned one-time tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Toolbox {
    owned: BTreeSet<ToolType>,
}

impl Toolbox {
    /// Whether `tool` is owned.
    pub fn has(&self, tool: ToolType) -> bool {
        self.owned.contains(&tool)
    }

    /// Buy `tool` out of `money`.
    pub fn buy(&mut self, tool: ToolType, money: &mut u64) -> Result<u64, EconomyError> {
        if self.has(tool) {
            return Err(EconomyError::ToolOwned(tool));
        }
        let price = catalog::tool_price(tool);
        inventory::spend(money, price)?;
        self.owned.insert(tool);
        Ok(price)
    }

    /// Owned tools in order.
    pub fn iter(&self) -> impl Iterator<Item = ToolType> + '_ {
        self.owned.iter().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn no_pet_is_neutral() {
        let m = ActiveModifiers::for_pet(None);
        assert_eq!(m.scale_money(37), 37);
        assert_eq!(m.scale_xp(11), 11);
        assert!(m.growth_reduction().abs() < f64::EPSILON);
    }

    #[test]
    fn cat_and_owl_scale_rewards() {
        assert_eq!(ActiveModifiers::for_pet(Some(PetType::CalicoCat)).scale_money(25), 28);
        assert_eq!(ActiveModifiers::for_pet(Some(PetType::WiseOwl)).scale_xp(20), 23);
    }

    #[test]
    fn dragon_shortens_growth() {
        let m = ActiveModifiers::for_pet(Some(PetType::MiniDragon));
        assert!((m.growth_reduction() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn dog_finds_feed_about_thirty_percent_of_days() {
        let mut rng = SmallRng::seed_from_u64(42);
        let m = ActiveModifiers::for_pet(Some(PetType::FarmDog));
        let mut days_with_feed = 0;
        for _ in 0..2_000 {
            for find in m.roll_daily(&mut rng) {
                match find {
                    DailyFind::Feed(n) => {
                        assert!((1..=3).contains(&n));
                        days_with_feed += 1;
                    }
                    DailyFind::GoldenEgg => panic!("dogs do not lay eggs"),
                }
            }
        }
        assert!((480..720).contains(&days_with_feed), "{days_with_feed}");
    }

    #[test]
    fn neutral_pets_never_find_anything() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = ActiveModifiers::for_pet(Some(PetType::WiseOwl));
        assert!((0..500).all(|_| m.roll_daily(&mut rng).is_empty()));
    }

    #[test]
    fn tools_are_bought_once() {
        let mut tools = Toolbox::default();
        let mut money = 3_000;
        assert_eq!(tools.buy(ToolType::WateringCan, &mut money).unwrap(), 500);
        assert_eq!(money, 2_500);
        assert_eq!(
            tools.buy(ToolType::WateringCan, &mut money),
            Err(EconomyError::ToolOwned(ToolType::WateringCan))
        );
        assert_eq!(money, 2_500);
        assert!(tools.has(ToolType::WateringCan));
    }

    #[test]
    fn unaffordable_tool_is_refused() {
        let mut tools = Toolbox::default();
        let mut money = 100;
        assert!(tools.buy(ToolType::Sprinkler, &mut money).is_err());
        assert_eq!(money, 100);
        assert!(!tools.has(ToolType::Sprinkler));
    }
}
