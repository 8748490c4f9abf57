//! Daily weather roll with an escalating disaster "pity" counter.
//!
//! Each day the engine rolls a disaster with probability
//! `disaster_chance / 100`. A disaster picks uniformly from a season pool
//! and resets the counter to [`DISASTER_CHANCE_RESET`]. Ordinary weather
//! raises the counter by 5 to 10 points, capped at [`DISASTER_CHANCE_CAP`].
//!
//! | Weather | Chance (no disaster) |
//! |---------|----------------------|
//! | Sunny   | 50%                  |
//! | Cloudy  | 30%                  |
//! | Rainy   | 20%                  |
//!
//! When the weather changes, [`apply_weather_effects`] runs once over the
//! outdoor plots. The greenhouse is sheltered.

use homestead_types::{CropType, Plot, PlotState, Season, Weather};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::farming;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Pity counter on a new farm.
pub const INITIAL_DISASTER_CHANCE: u32 = 15;

/// Pity counter after a disaster.
pub const DISASTER_CHANCE_RESET: u32 = 5;

/// Upper bound of the pity counter while it escalates.
pub const DISASTER_CHANCE_CAP: u32 = 75;

/// Fraction of remaining growth skipped by rain and heat.
pub const GROWTH_BOOST_FRACTION: f64 = 0.25;

/// Chance that a typhoon destroys each planted outdoor plot.
pub const TYPHOON_DESTROY_CHANCE: f64 = 0.3;

const SUMMER_POOL: &[Weather] = &[Weather::HeavyRain, Weather::Heatwave, Weather::Typhoon];
const WINTER_POOL: &[Weather] = &[Weather::HeavyRain, Weather::Blizzard, Weather::Typhoon];
const FULL_POOL: &[Weather] = &[
    Weather::HeavyRain,
    Weather::Heatwave,
    Weather::Typhoon,
    Weather::Blizzard,
];

/// Disasters that can strike in a season.
pub const fn disaster_pool(season: Season) -> &'static [Weather] {
    match season {
        Season::Summer => SUMMER_POOL,
        Season::Winter => WINTER_POOL,
        Season::Spring | Season::Autumn => FULL_POOL,
    }
}

// ---------------------------------------------------------------------------
// WeatherSystem
// ---------------------------------------------------------------------------

/// Current weather plus the disaster pity counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherSystem {
    /// Today's weather.
    pub current: Weather,
    /// Percent chance of a disaster on the next roll.
    pub disaster_chance: u32,
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one daily roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherRoll {
    /// Weather before the roll.
    pub previous: Weather,
    /// Weather after the roll.
    pub current: Weather,
    /// Whether a disaster was rolled.
    pub disaster: bool,
}

impl WeatherRoll {
    /// Whether the weather differs from yesterday.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

impl WeatherSystem {
    /// Sunny weather with the starting pity counter.
    pub const fn new() -> Self {
        Self {
            current: Weather::Sunny,
            disaster_chance: INITIAL_DISASTER_CHANCE,
        }
    }

    /// Restore from saved parts. The counter is clamped to 0..=100.
    pub fn from_parts(current: Weather, disaster_chance: u32) -> Self {
        Self {
            current,
            disaster_chance: disaster_chance.min(100),
        }
    }

    /// Roll tomorrow's weather.
    pub fn roll(&mut self, season: Season, rng: &mut impl Rng) -> WeatherRoll {
        let roll: f64 = rng.random::<f64>() * 100.0;
        let disaster = roll < f64::from(self.disaster_chance);
        let previous = self.current;
        let current = self.resolve(season, disaster, rng);
        if disaster {
            info!(?season, ?previous, ?current, "Disaster weather rolled");
        } else {
            debug!(
                ?previous,
                ?current,
                disaster_chance = self.disaster_chance,
                "Weather rolled"
            );
        }
        WeatherRoll {
            previous,
            current,
            disaster,
        }
    }

    /// Apply a roll whose disaster outcome is already known.
    pub fn resolve(&mut self, season: Season, disaster: bool, rng: &mut impl Rng) -> Weather {
        if disaster {
            let pool = disaster_pool(season);
            let idx = rng.random_range(0..pool.len());
            self.current = pool.get(idx).copied().unwrap_or(Weather::HeavyRain);
            self.disaster_chance = DISASTER_CHANCE_RESET;
        } else {
            let roll: f64 = rng.random();
            self.current = if roll < 0.5 {
                Weather::Sunny
            } else if roll < 0.8 {
                Weather::Cloudy
            } else {
                Weather::Rainy
            };
            let bump = rng.random_range(5..=10_u32);
            self.disaster_chance = self
                .disaster_chance
                .saturating_add(bump)
                .min(DISASTER_CHANCE_CAP);
        }
        self.current
    }
}

// ---------------------------------------------------------------------------
// One-time effects
// ---------------------------------------------------------------------------

/// What a weather change did to a plot collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherEffects {
    /// Plots that rain watered.
    pub watered: usize,
    /// Plots whose growth was pushed forward.
    pub accelerated: usize,
    /// Plots wiped out by a typhoon, with the crop they held.
    pub destroyed: Vec<(usize, CropType)>,
}

/// Apply the one-time effect of a newly arrived weather to outdoor plots.
///
/// `growth_ms` gives the effective growth time for a crop.
pub fn apply_weather_effects(
    weather: Weather,
    plots: &mut [Plot],
    now_ms: i64,
    growth_ms: impl Fn(CropType) -> i64,
    rng: &mut impl Rng,
) -> WeatherEffects {
    let mut effects = WeatherEffects::default();
    match weather {
        Weather::Rainy => {
            for plot in plots.iter_mut() {
                if plot.state != PlotState::Growing || plot.is_watered {
                    continue;
                }
                plot.is_watered = true;
                effects.watered = effects.watered.saturating_add(1);
                let Some(crop) = plot.crop else { continue };
                if farming::advance_by_remaining_fraction(
                    plot,
                    now_ms,
                    growth_ms(crop),
                    GROWTH_BOOST_FRACTION,
                ) {
                    effects.accelerated = effects.accelerated.saturating_add(1);
                }
            }
        }
        Weather::Heatwave => {
            for plot in plots.iter_mut() {
                let Some(crop) = plot.crop else { continue };
                if farming::advance_by_remaining_fraction(
                    plot,
                    now_ms,
                    growth_ms(crop),
                    GROWTH_BOOST_FRACTION,
                ) {
                    effects.accelerated = effects.accelerated.saturating_add(1);
                }
            }
        }
        Weather::Typhoon => {
            for (index, plot) in plots.iter_mut().enumerate() {
                if plot.state == PlotState::Empty {
                    continue;
                }
                if rng.random::<f64>() < TYPHOON_DESTROY_CHANCE {
                    if let Some(crop) = plot.crop {
                        info!(plot_index = index, ?crop, "Typhoon destroyed a plot");
                        effects.destroyed.push((index, crop));
                    }
                    *plot = Plot::empty();
                }
            }
        }
        Weather::Sunny | Weather::Cloudy | Weather::HeavyRain | Weather::Blizzard => {}
    }
    debug!(
        ?weather,
        watered = effects.watered,
        accelerated = effects.accelerated,
        destroyed = effects.destroyed.len(),
        "Weather effects applied"
    );
    effects
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn growing(crop: CropType, started: i64) -> Plot {
        let mut plot = Plot::empty();
        farming::plant(&mut plot, crop, started, 60_000, false).unwrap();
        plot
    }

    #[test]
    fn summer_disaster_draws_from_summer_pool() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let mut weather = WeatherSystem::from_parts(Weather::Sunny, 75);
            let result = weather.resolve(Season::Summer, true, &mut rng);
            assert!(
                matches!(
                    result,
                    Weather::HeavyRain | Weather::Heatwave | Weather::Typhoon
                ),
                "{result:?}"
            );
            assert_eq!(weather.disaster_chance, DISASTER_CHANCE_RESET);
        }
    }

    #[test]
    fn winter_pool_never_has_heatwave() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..100 {
            let mut weather = WeatherSystem::new();
            let result = weather.resolve(Season::Winter, true, &mut rng);
            assert_ne!(result, Weather::Heatwave);
        }
    }

    #[test]
    fn calm_days_escalate_pity_up_to_cap() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut weather = WeatherSystem::new();
        let mut last = weather.disaster_chance;
        for _ in 0..30 {
            weather.resolve(Season::Spring, false, &mut rng);
            assert!(!weather.current.is_disaster());
            assert!(weather.disaster_chance <= DISASTER_CHANCE_CAP);
            if last < DISASTER_CHANCE_CAP {
                let bump = weather.disaster_chance - last;
                assert!((5..=10).contains(&bump) || weather.disaster_chance == DISASTER_CHANCE_CAP);
            }
            last = weather.disaster_chance;
        }
        assert_eq!(weather.disaster_chance, DISASTER_CHANCE_CAP);
    }

    #[test]
    fn zero_chance_never_rolls_disaster() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut weather = WeatherSystem::from_parts(Weather::Sunny, 0);
        let roll = weather.roll(Season::Summer, &mut rng);
        assert!(!roll.disaster);
    }

    #[test]
    fn full_chance_always_rolls_disaster() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut weather = WeatherSystem::from_parts(Weather::Sunny, 100);
        let roll = weather.roll(Season::Autumn, &mut rng);
        assert!(roll.disaster);
        assert!(roll.current.is_disaster());
        assert!(roll.changed());
    }

    #[test]
    fn rain_waters_dry_growing_plots_and_backdates() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut plots = vec![growing(CropType::Carrot, 0), Plot::empty()];
        let effects =
            apply_weather_effects(Weather::Rainy, &mut plots, 20_000, |_| 60_000, &mut rng);
        assert_eq!(effects.watered, 1);
        assert!(plots[0].is_watered);
        assert_eq!(plots[0].growth_started_at_ms, Some(-10_000));
        assert!(!plots[1].is_watered);
    }

    #[test]
    fn rain_skips_already_watered_plots() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut plots = vec![growing(CropType::Carrot, 0)];
        plots[0].is_watered = true;
        let effects =
            apply_weather_effects(Weather::Rainy, &mut plots, 20_000, |_| 60_000, &mut rng);
        assert_eq!(effects.watered, 0);
        assert_eq!(plots[0].growth_started_at_ms, Some(0));
    }

    #[test]
    fn heatwave_backdates_every_growing_plot() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut plots = vec![growing(CropType::Carrot, 0), growing(CropType::Potato, 0)];
        plots[1].is_watered = true;
        let effects =
            apply_weather_effects(Weather::Heatwave, &mut plots, 0, |_| 60_000, &mut rng);
        assert_eq!(effects.accelerated, 2);
        assert_eq!(plots[1].growth_started_at_ms, Some(-15_000));
    }

    #[test]
    fn typhoon_destroys_roughly_thirty_percent() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut destroyed = 0_usize;
        for _ in 0..100 {
            let mut plots: Vec<Plot> = (0..10).map(|_| growing(CropType::Carrot, 0)).collect();
            let effects =
                apply_weather_effects(Weather::Typhoon, &mut plots, 0, |_| 60_000, &mut rng);
            destroyed += effects.destroyed.len();
            let empty = plots.iter().filter(|p| p.state == PlotState::Empty).count();
            assert_eq!(empty, effects.destroyed.len());
        }
        // Expected 300 of 1000.
        assert!((230..370).contains(&destroyed), "{destroyed}");
    }

    #[test]
    fn calm_weather_has_no_effect() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut plots = vec![growing(CropType::Carrot, 0)];
        let before = plots.clone();
        apply_weather_effects(Weather::Cloudy, &mut plots, 30_000, |_| 60_000, &mut rng);
        assert_eq!(plots, before);
    }
}
