//! Plot growth state machine: planting, fertilizing, ripening and harvest.
//!
//! A plot moves `Empty -> Growing -> Ready -> Empty`. Growth is measured in
//! wall-clock milliseconds from `growth_started_at_ms`; watering, rain and
//! heat push that timestamp backwards instead of tracking a separate
//! progress value, so remaining time is always derivable from the plot
//! alone.
//!
//! The growth and harvest passes are split so a caller can ripen every plot
//! first and then harvest. Both passes are idempotent: an already-Ready plot
//! is never re-rolled and an Empty plot never pays.

use homestead_types::{CropType, Plot, PlotSize, PlotState, Season, Weather};
use rand::Rng;

use crate::catalog;
use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Roll below this is a small crop.
pub const SMALL_SIZE_CUTOFF: f64 = 0.25;

/// Roll below this (and at or above [`SMALL_SIZE_CUTOFF`]) is a medium crop.
pub const MEDIUM_SIZE_CUTOFF: f64 = 0.75;

// ---------------------------------------------------------------------------
// Growth timing
// ---------------------------------------------------------------------------

/// Growth time of `crop` after a fractional speed bonus.
///
/// `growth_reduction` is clamped to `[0, 1)`; zero means no bonus.
pub fn effective_growth_ms(crop: CropType, growth_reduction: f64) -> i64 {
    let base = catalog::crop(crop).growth_time_ms;
    let factor = 1.0 - growth_reduction.clamp(0.0, 0.95);
    scale_ms(base, factor)
}

/// Multiply a millisecond duration by a non-negative factor, rounding.
pub fn scale_ms(ms: i64, factor: f64) -> i64 {
    #[allow(clippy::cast_precision_loss)]
    // Durations are far below 2^52, so the conversion is exact.
    let scaled = (ms as f64 * factor).round();
    #[allow(clippy::cast_possible_truncation)]
    // Rounded and bounded by the input magnitude.
    let result = scaled as i64;
    result
}

/// Milliseconds left before a growing plot ripens, floored at zero.
///
/// Returns `None` for plots that are not growing.
pub fn remaining_ms(plot: &Plot, now_ms: i64, effective_ms: i64) -> Option<i64> {
    if plot.state != PlotState::Growing {
        return None;
    }
    let started = plot.growth_started_at_ms?;
    let elapsed = now_ms.saturating_sub(started);
    Some(effective_ms.saturating_sub(elapsed).max(0))
}

/// Move a growing plot's start time earlier by `fraction` of its remaining
/// growth. Returns whether the timestamp changed.
pub fn advance_by_remaining_fraction(
    plot: &mut Plot,
    now_ms: i64,
    effective_ms: i64,
    fraction: f64,
) -> bool {
    let Some(remaining) = remaining_ms(plot, now_ms, effective_ms) else {
        return false;
    };
    let shift = scale_ms(remaining, fraction);
    match plot.growth_started_at_ms {
        Some(started) if shift > 0 => {
            plot.growth_started_at_ms = Some(started.saturating_sub(shift));
            true
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Plot transitions
// ---------------------------------------------------------------------------

/// Check the outdoor-only planting rules.
///
/// Outdoor plots refuse work in winter and during a blizzard, and only
/// accept crops that are in season.
pub fn check_outdoor_planting(
    crop: CropType,
    season: Season,
    weather: Weather,
) -> Result<(), WorldError> {
    if season == Season::Winter {
        return Err(WorldError::FrozenGround);
    }
    if weather == Weather::Blizzard {
        return Err(WorldError::Blizzard);
    }
    if !catalog::is_in_season(crop, season) {
        return Err(WorldError::OutOfSeason { crop, season });
    }
    Ok(())
}

/// Plant `crop` on an empty plot.
///
/// With the watering can the plot starts watered and half grown.
pub fn plant(
    plot: &mut Plot,
    crop: CropType,
    now_ms: i64,
    effective_ms: i64,
    watering_can: bool,
) -> Result<(), WorldError> {
    if plot.state != PlotState::Empty {
        return Err(WorldError::WrongPlotState {
            expected: PlotState::Empty,
            actual: plot.state,
        });
    }
    let started = if watering_can {
        now_ms
            .checked_sub(effective_ms / 2)
            .ok_or(WorldError::ArithmeticOverflow)?
    } else {
        now_ms
    };
    *plot = Plot {
        crop: Some(crop),
        state: PlotState::Growing,
        growth_started_at_ms: Some(started),
        is_watered: watering_can,
        is_fertilized: false,
        size: None,
    };
    Ok(())
}

/// Mark a growing plot as fertilized.
pub fn fertilize(plot: &mut Plot) -> Result<(), WorldError> {
    if plot.state != PlotState::Growing {
        return Err(WorldError::WrongPlotState {
            expected: PlotState::Growing,
            actual: plot.state,
        });
    }
    if plot.is_fertilized {
        return Err(WorldError::AlreadyFertilized);
    }
    plot.is_fertilized = true;
    Ok(())
}

/// Roll the harvest size. Fertilized plots are always large.
pub fn roll_size(fertilized: bool, rng: &mut impl Rng) -> PlotSize {
    if fertilized {
        return PlotSize::Large;
    }
    let roll: f64 = rng.random();
    if roll < SMALL_SIZE_CUTOFF {
        PlotSize::Small
    } else if roll < MEDIUM_SIZE_CUTOFF {
        PlotSize::Medium
    } else {
        PlotSize::Large
    }
}

/// Transition a growing plot to ready if its growth time has elapsed.
///
/// Returns the rolled size when the plot ripened on this call.
pub fn ripen_if_due(
    plot: &mut Plot,
    now_ms: i64,
    effective_ms: i64,
    rng: &mut impl Rng,
) -> Option<PlotSize> {
    if plot.state != PlotState::Growing {
        return None;
    }
    let started = plot.growth_started_at_ms?;
    if now_ms.saturating_sub(started) < effective_ms {
        return None;
    }
    let size = roll_size(plot.is_fertilized, rng);
    plot.state = PlotState::Ready;
    plot.size = Some(size);
    Some(size)
}

/// A crop taken off a ready plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harvest {
    /// What was harvested.
    pub crop: CropType,
    /// Size rolled at ripening.
    pub size: PlotSize,
}

/// Harvest a ready plot and reset it to empty.
///
/// Returns `None` without touching the plot if it is not ready.
pub fn take_harvest(plot: &mut Plot) -> Option<Harvest> {
    if plot.state != PlotState::Ready {
        return None;
    }
    let harvest = Harvest {
        crop: plot.crop?,
        size: plot.size?,
    };
    *plot = Plot::empty();
    Some(harvest)
}

/// Payout terms derived from the harvest size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarvestTerms {
    /// Units harvested.
    pub yield_amount: u32,
    /// Multiplier on the crop's experience yield.
    pub xp_multiplier: f64,
    /// Multiplier on the crop's sell price.
    pub price_multiplier: f64,
}

/// Look up payout terms for a size.
pub const fn harvest_terms(size: PlotSize) -> HarvestTerms {
    match size {
        PlotSize::Small => HarvestTerms {
            yield_amount: 1,
            xp_multiplier: 0.8,
            price_multiplier: 0.8,
        },
        PlotSize::Medium => HarvestTerms {
            yield_amount: 1,
            xp_multiplier: 1.0,
            price_multiplier: 1.0,
        },
        PlotSize::Large => HarvestTerms {
            yield_amount: 2,
            xp_multiplier: 1.5,
            price_multiplier: 2.0,
        },
    }
}

/// Water every plot in a collection. Returns how many were dry.
pub fn water_all(plots: &mut [Plot]) -> usize {
    let mut watered = 0_usize;
    for plot in plots.iter_mut().filter(|p| !p.is_watered) {
        plot.is_watered = true;
        watered = watered.saturating_add(1);
    }
    watered
}

/// Fetch a plot by index.
pub fn plot_mut(plots: &mut [Plot], index: usize) -> Result<&mut Plot, WorldError> {
    let len = plots.len();
    plots
        .get_mut(index)
        .ok_or(WorldError::PlotNotFound { index, len })
}
