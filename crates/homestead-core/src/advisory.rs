//! Advisory source trait and stub implementation.
//!
//! Once per farm day the player may ask the willow for advice. The
//! [`AdvisorySource`] trait abstracts where that text comes from: an LLM
//! backend, a scripted responder, or a test stub. The call runs off the
//! simulation loop and never touches economy state; its only effect is the
//! advisory message and the day marker in [`AdvisoryState`].

use std::collections::BTreeMap;

use futures::future::BoxFuture;
use homestead_types::{CropType, Order, Season, Weather};
use serde::{Deserialize, Serialize};

/// Message shown when the advisory call fails or times out.
pub const FALLBACK_MESSAGE: &str = "The willow's whispers are lost in the wind today...";

/// Errors that can occur while fetching advice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisoryError {
    /// The call did not finish in time.
    #[error("advisory call timed out after {timeout_ms}ms")]
    Timeout {
        /// The deadline in milliseconds.
        timeout_ms: u64,
    },

    /// The backend failed.
    #[error("advisory backend error: {message}")]
    Backend {
        /// Description of the error.
        message: String,
    },
}

/// Read-only farm summary handed to the advisory source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryContext {
    /// Current season.
    pub season: Season,
    /// Day of the month, 1-28.
    pub day_of_month: u32,
    /// Current balance.
    pub money: u64,
    /// Today's weather.
    pub weather: Weather,
    /// Today's market multipliers.
    pub market_prices: BTreeMap<CropType, f64>,
    /// Crop with the best multiplier today.
    pub best_crop: Option<CropType>,
    /// Crop with the worst multiplier today.
    pub worst_crop: Option<CropType>,
    /// Seeds held, by crop. Crops with no seeds are omitted.
    pub seeds: BTreeMap<CropType, u32>,
    /// The order in progress, if any.
    pub active_order: Option<Order>,
}

/// A source of daily advice.
///
/// The returned future must be `'static` so the scheduler can spawn it
/// without holding the farm state.
pub trait AdvisorySource: Send + Sync {
    /// Produce advice for the given farm summary.
    fn advise(&self, context: AdvisoryContext) -> BoxFuture<'static, Result<String, AdvisoryError>>;
}

/// A stub advisory source that answers from the context alone.
#[derive(Debug, Clone, Default)]
pub struct StubAdvisor;

impl StubAdvisor {
    /// Create a new stub advisor.
    pub const fn new() -> Self {
        Self
    }
}

impl AdvisorySource for StubAdvisor {
    fn advise(&self, context: AdvisoryContext) -> BoxFuture<'static, Result<String, AdvisoryError>> {
        let message = match context.best_crop {
            Some(crop) => format!("The market favors {crop:?} today. Tend it well."),
            None => "Patience. The soil remembers every kindness.".to_owned(),
        };
        Box::pin(async move { Ok(message) })
    }
}

/// Advisory bookkeeping stored in the farm state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisoryState {
    /// Day of the last successful advice. Zero means never.
    pub last_advice_day: u64,
    /// Latest message, fallback included.
    pub message: Option<String>,
    /// Whether a request is outstanding. Not persisted.
    #[serde(skip)]
    pub in_flight: bool,
}

impl AdvisoryState {
    /// Whether a new request may start on `total_days`.
    pub const fn can_request(&self, total_days: u64) -> bool {
        !self.in_flight && total_days > self.last_advice_day
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn context() -> AdvisoryContext {
        AdvisoryContext {
            season: Season::Spring,
            day_of_month: 3,
            money: 120,
            weather: Weather::Sunny,
            market_prices: BTreeMap::new(),
            best_crop: Some(CropType::Strawberry),
            worst_crop: None,
            seeds: BTreeMap::new(),
            active_order: None,
        }
    }

    #[tokio::test]
    async fn stub_mentions_best_crop() {
        let advice = StubAdvisor::new().advise(context()).await.unwrap();
        assert!(advice.contains("Strawberry"));
    }

    #[test]
    fn gate_is_once_per_day() {
        let mut state = AdvisoryState::default();
        assert!(state.can_request(57));
        state.in_flight = true;
        assert!(!state.can_request(57));
        state.in_flight = false;
        state.last_advice_day = 57;
        assert!(!state.can_request(57));
        assert!(state.can_request(58));
    }

    #[test]
    fn in_flight_is_not_persisted() {
        let state = AdvisoryState {
            last_advice_day: 4,
            message: Some("hi".to_owned()),
            in_flight: true,
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: AdvisoryState = serde_json::from_str(&json).unwrap();
        assert!(!back.in_flight);
        assert_eq!(back.last_advice_day, 4);
    }
}
