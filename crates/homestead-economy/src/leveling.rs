//! Experience and level progression.
//!
//! Experience is cumulative. Reaching `XP_THRESHOLDS[level - 1]` moves the
//! player to the next level. A single award may cross several thresholds;
//! all of them resolve in the same pass and fold into the one claimable
//! reward.

use homestead_types::LevelUpReward;
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;

/// Money per level granted by a level-up reward.
pub const REWARD_PER_LEVEL: u64 = 50;

/// Cumulative experience needed to leave each level, starting at level 1.
pub const XP_THRESHOLDS: [u64; 20] = [
    100, 250, 500, 900, 1_400, 2_000, 2_800, 3_800, 5_000, 6_500, 8_300, 10_400, 12_800, 15_600,
    18_800, 22_500, 26_700, 31_500, 37_000, 43_200,
];

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 21;

/// Experience needed to leave `level`, or `None` at the cap.
pub fn threshold_for(level: u32) -> Option<u64> {
    let index = usize::try_from(level.checked_sub(1)?).ok()?;
    XP_THRESHOLDS.get(index).copied()
}

/// Current level, experience and the pending reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progression {
    /// Current level, starting at 1.
    pub level: u32,
    /// Cumulative experience.
    pub xp: u64,
    /// Reward waiting to be claimed.
    pub pending_reward: Option<LevelUpReward>,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            pending_reward: None,
        }
    }
}

impl Progression {
    /// Add experience and resolve every threshold it crosses.
    ///
    /// Returns the levels reached, lowest first.
    pub fn award(&mut self, amount: u64) -> Vec<u32> {
        self.xp = self.xp.saturating_add(amount);
        let mut reached = Vec::new();
        while let Some(needed) = threshold_for(self.level) {
            if self.xp < needed {
                break;
            }
            self.level = self.level.saturating_add(1);
            reached.push(self.level);
            self.queue_reward(self.level);
        }
        if !reached.is_empty() {
            tracing::debug!(level = self.level, xp = self.xp, "level up");
        }
        reached
    }

    /// Experience still needed for the next level.
    pub fn xp_to_next(&self) -> Option<u64> {
        threshold_for(self.level).map(|t| t.saturating_sub(self.xp))
    }

    /// Take the pending reward. The caller pays out its money.
    pub fn claim(&mut self) -> Result<LevelUpReward, EconomyError> {
        self.pending_reward.take().ok_or(EconomyError::NoPendingReward)
    }

    fn queue_reward(&mut self, level: u32) {
        let money = REWARD_PER_LEVEL.saturating_mul(u64::from(level));
        let carried = self.pending_reward.map_or(0, |r| r.money);
        self.pending_reward = Some(LevelUpReward {
            level,
            money: carried.saturating_add(money),
        });
    }
}
