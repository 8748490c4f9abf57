//! Achievement unlocks and milestone rewards.
//!
//! Achievements are static threshold checks over [`Stats`]. The unlocked set
//! only grows. Every five unlocks open one milestone tier, claimed in order.

use std::collections::BTreeSet;

use homestead_types::{AchievementCategory, AchievementId, MilestoneReward, StatKey, Stats};
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;

/// Unlocks needed per milestone tier.
pub const ACHIEVEMENTS_PER_MILESTONE: usize = 5;

/// Money paid by the first milestone. Doubles every tier.
pub const MILESTONE_BASE_MONEY: u64 = 1_000;

/// Seeds of every crop paid per milestone tier.
pub const MILESTONE_SEEDS_PER_TIER: u32 = 5;

/// A static achievement definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementSpec {
    /// Identifier.
    pub id: AchievementId,
    /// Presentation group.
    pub category: AchievementCategory,
    /// Tier within its group, starting at 1.
    pub tier: u32,
    /// Counter checked.
    pub stat: StatKey,
    /// Value the counter must reach.
    pub threshold: u64,
}

const fn spec(
    id: AchievementId,
    category: AchievementCategory,
    tier: u32,
    stat: StatKey,
    threshold: u64,
) -> AchievementSpec {
    AchievementSpec {
        id,
        category,
        tier,
        stat,
        threshold,
    }
}

use AchievementCategory as C;
use AchievementId as A;
use StatKey as S;

/// Every achievement, grouped by category.
pub const ACHIEVEMENTS: [AchievementSpec; 30] = [
    spec(A::Money1, C::Money, 1, S::TotalGoldEarned, 100),
    spec(A::Money2, C::Money, 2, S::TotalGoldEarned, 1_000),
    spec(A::Money3, C::Money, 3, S::TotalGoldEarned, 10_000),
    spec(A::Money4, C::Money, 4, S::TotalGoldEarned, 100_000),
    spec(A::Harvest1, C::Harvest, 1, S::TotalCropsHarvested, 10),
    spec(A::Harvest2, C::Harvest, 2, S::TotalCropsHarvested, 100),
    spec(A::Harvest3, C::Harvest, 3, S::TotalCropsHarvested, 500),
    spec(A::Harvest4, C::Harvest, 4, S::TotalCropsHarvested, 2_000),
    spec(A::Level1, C::Level, 1, S::Level, 5),
    spec(A::Level2, C::Level, 2, S::Level, 10),
    spec(A::Level3, C::Level, 3, S::Level, 15),
    spec(A::Expand1, C::Expansion, 1, S::FarmPlots, 12),
    spec(A::Expand2, C::Expansion, 2, S::FarmPlots, 16),
    spec(A::Expand3, C::Expansion, 3, S::FarmPlots, 20),
    spec(A::Greenhouse1, C::Greenhouse, 1, S::HasGreenhouse, 1),
    spec(A::Greenhouse2, C::Greenhouse, 2, S::GreenhousePlots, 6),
    spec(A::Greenhouse3, C::Greenhouse, 3, S::GreenhousePlots, 9),
    spec(A::SeasonalSpring, C::Seasonal, 1, S::SpringCropsHarvested, 50),
    spec(A::SeasonalSummer, C::Seasonal, 1, S::SummerCropsHarvested, 50),
    spec(A::SeasonalAutumn, C::Seasonal, 1, S::AutumnCropsHarvested, 50),
    spec(A::SeasonalWinter, C::Seasonal, 1, S::WinterCropsHarvested, 50),
    spec(A::Foodie1, C::Beta, 1, S::FoodEaten, 10),
    spec(A::Foodie2, C::Beta, 2, S::FoodEaten, 50),
    spec(A::BuildBarn1, C::Ranch, 1, S::HasBarn, 1),
    spec(A::BuyChicken1, C::Ranch, 2, S::TotalAnimals, 1),
    spec(A::CollectEgg1, C::Ranch, 3, S::TotalProductsCollected, 1),
    spec(A::BuyCow1, C::Ranch, 4, S::TotalAnimals, 5),
    spec(A::CollectMilk1, C::Ranch, 5, S::TotalProductsCollected, 20),
    spec(A::BuyPig1, C::Ranch, 6, S::TotalAnimals, 10),
    spec(A::CollectTruffle1, C::Ranch, 7, S::TotalProductsCollected, 50),
];

/// Look up an achievement definition.
pub fn achievement(id: AchievementId) -> Option<&'static AchievementSpec> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Reward for milestone tier `tier` (1-based).
pub fn milestone_reward(tier: u32) -> MilestoneReward {
    let shift = tier.saturating_sub(1);
    let money = 1_u64
        .checked_shl(shift)
        .and_then(|factor| MILESTONE_BASE_MONEY.checked_mul(factor))
        .unwrap_or(u64::MAX);
    MilestoneReward {
        milestone: tier,
        money,
        seeds_per_crop: MILESTONE_SEEDS_PER_TIER.saturating_mul(tier),
    }
}

/// Unlocked achievements and claimed milestone tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementTracker {
    /// Unlocked achievements. Serialized as an ordered list.
    pub unlocked: BTreeSet<AchievementId>,
    /// Milestone tiers already claimed.
    pub claimed_milestones: u32,
}

impl AchievementTracker {
    /// Unlock every locked achievement whose threshold is met.
    ///
    /// Returns the newly unlocked IDs in table order.
    pub fn evaluate(&mut self, stats: &Stats) -> Vec<AchievementId> {
        let mut fresh = Vec::new();
        for spec in &ACHIEVEMENTS {
            if self.unlocked.contains(&spec.id) {
                continue;
            }
            if stats.get(spec.stat) >= spec.threshold {
                self.unlocked.insert(spec.id);
                fresh.push(spec.id);
            }
        }
        fresh
    }

    /// Whether `id` is unlocked.
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Milestone tiers earned so far, claimed or not.
    pub fn milestones_earned(&self) -> u32 {
        u32::try_from(self.unlocked.len() / ACHIEVEMENTS_PER_MILESTONE).unwrap_or(u32::MAX)
    }

    /// Whether an unclaimed milestone tier exists.
    pub fn milestone_available(&self) -> bool {
        self.milestones_earned() > self.claimed_milestones
    }

    /// Claim the next milestone tier.
    ///
    /// The caller pays out the returned reward.
    pub fn claim_milestone(&mut self) -> Result<MilestoneReward, EconomyError> {
        if !self.milestone_available() {
            return Err(EconomyError::NoMilestoneAvailable {
                unlocked: self.unlocked.len(),
                claimed: self.claimed_milestones,
            });
        }
        self.claimed_milestones = self.claimed_milestones.saturating_add(1);
        Ok(milestone_reward(self.claimed_milestones))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn table_has_unique_ids() {
        let ids: BTreeSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
        assert_eq!(
            achievement(AchievementId::Money2).map(|a| a.threshold),
            Some(1_000)
        );
    }

    #[test]
    fn evaluate_unlocks_once() {
        let mut tracker = AchievementTracker::default();
        let stats = Stats {
            total_gold_earned: 1_500,
            ..Stats::default()
        };
        let first = tracker.evaluate(&stats);
        assert_eq!(first, vec![AchievementId::Money1, AchievementId::Money2]);
        assert!(tracker.evaluate(&stats).is_empty());
    }

    #[test]
    fn unlocked_set_never_shrinks() {
        let mut tracker = AchievementTracker::default();
        tracker.evaluate(&Stats {
            has_barn: true,
            ..Stats::default()
        });
        let before = tracker.unlocked.clone();
        tracker.evaluate(&Stats::default());
        assert!(before.is_subset(&tracker.unlocked));
    }

    #[test]
    fn milestone_rewards_double() {
        assert_eq!(milestone_reward(1).money, 1_000);
        assert_eq!(milestone_reward(2).money, 2_000);
        assert_eq!(milestone_reward(3).money, 4_000);
        assert_eq!(milestone_reward(3).seeds_per_crop, 15);
    }

    #[test]
    fn claim_requires_five_new_unlocks() {
        let mut tracker = AchievementTracker::default();
        tracker.evaluate(&Stats {
            total_gold_earned: 100_000,
            total_crops_harvested: 10,
            ..Stats::default()
        });
        assert_eq!(tracker.unlocked.len(), 5);

        let reward = tracker.claim_milestone().unwrap();
        assert_eq!(reward.milestone, 1);
        assert_eq!(reward.money, 1_000);
        assert_eq!(reward.seeds_per_crop, 5);
        assert_eq!(tracker.claimed_milestones, 1);

        assert!(tracker.claim_milestone().is_err());
        assert_eq!(tracker.claimed_milestones, 1);
    }

    #[test]
    fn unlocked_set_serializes_as_list() {
        let mut tracker = AchievementTracker::default();
        tracker.unlocked.insert(AchievementId::Money1);
        let json = serde_json::to_value(&tracker).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"unlocked": ["money1"], "claimedMilestones": 0})
        );
    }
}
