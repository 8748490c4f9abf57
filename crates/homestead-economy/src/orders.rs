//! Bulletin-board orders.
//!
//! Each day the board is replaced with [`ORDERS_PER_DAY`] fresh candidates.
//! The player may accept one at a time; the active order then advances only
//! through harvests of its crop and pays out once when it fills.

use homestead_types::{CropType, Order, OrderId, Requester, Season};
use homestead_world::catalog;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::EconomyError;

/// Candidate orders posted each day.
pub const ORDERS_PER_DAY: usize = 2;

/// Smallest quantity an order asks for.
pub const MIN_ORDER_QUANTITY: u32 = 5;

/// Spread above the minimum quantity (exclusive).
pub const ORDER_QUANTITY_SPREAD: u32 = 10;

/// Bounds of the money premium over the base sell price.
pub const MONEY_PREMIUM: (f64, f64) = (1.2, 1.5);

/// Experience premium over the base crop yield.
pub const XP_PREMIUM: f64 = 1.2;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Draw one order for a crop plantable in `season`.
pub fn generate_order(season: Season, rng: &mut impl Rng) -> Option<Order> {
    let crops = catalog::crops_in_season(season);
    let crop = *crops.choose(rng)?;
    let spec = catalog::crop(crop);
    let quantity = MIN_ORDER_QUANTITY.saturating_add(rng.random_range(0..ORDER_QUANTITY_SPREAD));
    let premium = rng.random_range(MONEY_PREMIUM.0..MONEY_PREMIUM.1);
    let requester = *Requester::ALL.choose(rng)?;

    #[allow(clippy::cast_precision_loss)]
    // Catalog prices times a two-digit quantity.
    let base_money = spec.sell_price.saturating_mul(u64::from(quantity)) as f64;
    #[allow(clippy::cast_precision_loss)]
    let base_xp = spec.xp_yield.saturating_mul(u64::from(quantity)) as f64;

    Some(Order {
        id: OrderId::new(),
        crop,
        quantity,
        progress: 0,
        money_reward: floor_to_u64(base_money * premium),
        xp_reward: floor_to_u64(base_xp * XP_PREMIUM),
        requester,
    })
}

/// Draw a full day's worth of orders.
pub fn generate_orders(season: Season, rng: &mut impl Rng) -> Vec<Order> {
    (0..ORDERS_PER_DAY)
        .filter_map(|_| generate_order(season, rng))
        .collect()
}

fn floor_to_u64(value: f64) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Rewards are small and non-negative.
    let out = value.floor().max(0.0) as u64;
    out
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Outcome of feeding a harvest into the active order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderProgress {
    /// Progress advanced but the order is still open.
    Progressed {
        /// The order.
        order_id: OrderId,
        /// Units delivered so far.
        progress: u32,
        /// Units required.
        quantity: u32,
    },
    /// The order filled and was cleared. Pay its rewards.
    Completed(Order),
}

/// Today's candidates plus the single active order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderBoard {
    /// Orders that may still be accepted today.
    pub available: Vec<Order>,
    /// The order in progress, if any.
    pub active: Option<Order>,
}

impl OrderBoard {
    /// Replace the candidates. The active order survives.
    pub fn refresh(&mut self, season: Season, rng: &mut impl Rng) {
        self.available = generate_orders(season, rng);
    }

    /// Move a candidate into the active slot.
    pub fn accept(&mut self, order_id: OrderId) -> Result<&Order, EconomyError> {
        if let Some(active) = &self.active {
            return Err(EconomyError::OrderAlreadyActive(active.id));
        }
        let index = self
            .available
            .iter()
            .position(|o| o.id == order_id)
            .ok_or(EconomyError::OrderNotFound(order_id))?;
        let order = self.available.remove(index);
        Ok(self.active.insert(order))
    }

    /// Whether the active order wants this crop.
    pub fn wants(&self, crop: CropType) -> bool {
        self.active.as_ref().is_some_and(|o| o.crop == crop)
    }

    /// Deliver harvested units to the active order.
    ///
    /// Returns `None` when no active order matches the crop; the caller then
    /// sells the harvest normally.
    pub fn record_harvest(&mut self, crop: CropType, amount: u32) -> Option<OrderProgress> {
        let order = self.active.as_mut().filter(|o| o.crop == crop)?;
        order.progress = order.progress.saturating_add(amount).min(order.quantity);
        if order.progress < order.quantity {
            return Some(OrderProgress::Progressed {
                order_id: order.id,
                progress: order.progress,
                quantity: order.quantity,
            });
        }
        self.active.take().map(OrderProgress::Completed)
    }
}
