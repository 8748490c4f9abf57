//! Crop catalog, weather, market prices and plot growth for the Homestead
//! farm simulation.
//!
//! This crate models the physical farm. It knows nothing about money,
//! orders or progression; callers in `homestead-core` combine its outputs
//! with the economy crate.
//!
//! # Modules
//!
//! - [`catalog`] -- Static crop, food, animal, supply, tool and building
//!   tables.
//! - [`error`] -- Error types for plot operations.
//! - [`farming`] -- Plot growth state machine: plant, fertilize, ripen,
//!   harvest, and growth-time arithmetic.
//! - [`market`] -- Daily bounded random walk over crop price multipliers.
//! - [`weather`] -- Daily weather roll with disaster pity and one-time
//!   weather effects on outdoor plots.

pub mod catalog;
pub mod error;
pub mod farming;
pub mod market;
pub mod weather;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use farming::{Harvest, HarvestTerms, harvest_terms};
pub use market::MarketPrices;
pub use weather::{WeatherEffects, WeatherRoll, WeatherSystem, apply_weather_effects};
