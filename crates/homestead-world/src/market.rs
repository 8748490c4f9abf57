//! Daily bounded random walk over per-crop price multipliers.

use std::collections::BTreeMap;

use homestead_types::CropType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog;

/// Lowest multiplier the market can reach.
pub const MIN_MULTIPLIER: f64 = 0.5;

/// Highest multiplier the market can reach.
pub const MAX_MULTIPLIER: f64 = 2.5;

/// Largest single-day move in either direction.
pub const DAILY_SWING: f64 = 0.25;

/// Per-crop price multipliers.
///
/// Crops missing from the table (e.g. from an older snapshot) trade at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketPrices {
    multipliers: BTreeMap<CropType, f64>,
}

impl Default for MarketPrices {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketPrices {
    /// Every crop at multiplier 1.0.
    pub fn new() -> Self {
        Self {
            multipliers: CropType::ALL.into_iter().map(|c| (c, 1.0)).collect(),
        }
    }

    /// Restore a saved table, clamping every entry into range.
    pub fn from_map(multipliers: BTreeMap<CropType, f64>) -> Self {
        let multipliers = multipliers
            .into_iter()
            .map(|(crop, m)| (crop, sanitize(m)))
            .collect();
        Self { multipliers }
    }

    /// Today's multiplier for a crop.
    pub fn multiplier(&self, crop: CropType) -> f64 {
        self.multipliers.get(&crop).copied().unwrap_or(1.0)
    }

    /// Iterate over every crop with its multiplier.
    pub fn iter(&self) -> impl Iterator<Item = (CropType, f64)> + '_ {
        CropType::ALL.into_iter().map(|c| (c, self.multiplier(c)))
    }

    /// Seed price at today's multiplier, rounded down.
    pub fn seed_price(&self, crop: CropType) -> u64 {
        let base = catalog::crop(crop).seed_price;
        #[allow(clippy::cast_precision_loss)]
        // Catalog prices are small integers.
        let scaled = (base as f64 * self.multiplier(crop)).floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // Non-negative and bounded by 2.5x a catalog price.
        let price = scaled.max(0.0) as u64;
        price
    }

    /// Crop with the highest multiplier today.
    pub fn highest(&self) -> Option<(CropType, f64)> {
        self.iter().max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Crop with the lowest multiplier today.
    pub fn lowest(&self) -> Option<(CropType, f64)> {
        self.iter().min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Move every multiplier by an independent uniform step.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for crop in CropType::ALL {
            let change = (rng.random::<f64>() - 0.5) * (DAILY_SWING * 2.0);
            let next = sanitize(self.multiplier(crop) + change);
            self.multipliers.insert(crop, next);
        }
        debug!(
            highest = ?self.highest(),
            lowest = ?self.lowest(),
            "Market prices updated"
        );
    }
}

/// Clamp into range and round to two decimals.
fn sanitize(value: f64) -> f64 {
    if !value.is_finite() {
        return 1.0;
    }
    round2(value.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
