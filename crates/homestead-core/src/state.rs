//! The farm state aggregate.
//!
//! [`FarmState`] owns every entity in the simulation. Nothing is shared or
//! aliased: subsystems receive borrows of the parts they need, and every
//! mutation goes through one of the operations on this type:
//!
//! - [`FarmState::advance_day`] (in [`crate::day`])
//! - [`FarmState::growth_tick`] and [`FarmState::hunger_tick`] (in
//!   [`crate::tick`])
//! - [`FarmState::apply_intent`] (in [`crate::intents`])
//! - [`FarmState::complete_advice`] (below)
//!
//! Each returns the [`FarmEvent`]s describing what changed.

use std::collections::BTreeMap;

use homestead_economy::{
    AchievementTracker, ActiveModifiers, Barn, BarterBoard, Inventory, OrderBoard, PetRoster,
    Progression, Toolbox,
};
use homestead_types::{
    CropType, FarmEvent, Field, GameMode, ItemRef, Plot, Season, Stats, TimeOfDay,
};
use homestead_world::{MarketPrices, WeatherSystem, catalog, farming};
use serde::{Deserialize, Serialize};

use crate::advisory::{AdvisoryContext, AdvisoryError, AdvisoryState, FALLBACK_MESSAGE};
use crate::calendar::Calendar;
use crate::config::TimingConfig;

/// Hunger on a new farm and the cap when eating.
pub const MAX_HUNGER: u32 = 100;

/// Every entity of one farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmState {
    /// Farm name.
    pub farm_name: String,
    /// Normal or beta mode.
    pub game_mode: GameMode,
    /// Day counter and day start.
    pub calendar: Calendar,
    /// Weather and disaster pity counter.
    pub weather: WeatherSystem,
    /// Per-crop price multipliers.
    pub market: MarketPrices,
    /// Outdoor plots.
    pub outdoor_plots: Vec<Plot>,
    /// Greenhouse plots. Unusable until the greenhouse is built.
    pub greenhouse_plots: Vec<Plot>,
    /// Whether the greenhouse has been bought.
    pub greenhouse_built: bool,
    /// Current balance.
    pub money: u64,
    /// Seeds, food, animal products and supplies.
    pub inventory: Inventory,
    /// Owned tools.
    pub tools: Toolbox,
    /// Barn and animals.
    pub barn: Barn,
    /// Owned pets and the active pet.
    pub pets: PetRoster,
    /// Order candidates and the active order.
    pub orders: OrderBoard,
    /// Today's barter deals.
    pub barter: BarterBoard,
    /// Monotonic counters.
    pub stats: Stats,
    /// Unlocked achievements and claimed milestones.
    pub achievements: AchievementTracker,
    /// Level, experience and pending reward.
    pub progression: Progression,
    /// Hunger in beta mode, 0-100.
    pub hunger: u32,
    /// Advisory marker and message.
    pub advisory: AdvisoryState,
}

impl Default for FarmState {
    fn default() -> Self {
        Self::new_game("Homestead", GameMode::Normal, Season::Spring, 0)
    }
}

impl FarmState {
    /// A fresh farm on the first day of `season`.
    pub fn new_game(name: &str, game_mode: GameMode, season: Season, now_ms: i64) -> Self {
        let mut inventory = Inventory::new();
        inventory
            .seeds
            .insert(CropType::Carrot, catalog::STARTING_CARROT_SEEDS);
        let stats = Stats {
            farm_plots: count(catalog::INITIAL_FARM_SIZE),
            greenhouse_plots: count(catalog::INITIAL_GREENHOUSE_SIZE),
            level: 1,
            ..Stats::default()
        };
        Self {
            farm_name: name.to_owned(),
            game_mode,
            calendar: Calendar::starting_in(season, now_ms),
            weather: WeatherSystem::new(),
            market: MarketPrices::new(),
            outdoor_plots: vec![Plot::empty(); catalog::INITIAL_FARM_SIZE],
            greenhouse_plots: vec![Plot::empty(); catalog::INITIAL_GREENHOUSE_SIZE],
            greenhouse_built: false,
            money: catalog::STARTING_MONEY,
            inventory,
            tools: Toolbox::default(),
            barn: Barn::default(),
            pets: PetRoster::default(),
            orders: OrderBoard::default(),
            barter: BarterBoard::default(),
            stats,
            achievements: AchievementTracker::default(),
            progression: Progression::default(),
            hunger: MAX_HUNGER,
            advisory: AdvisoryState::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current season.
    pub fn season(&self) -> Season {
        self.calendar.season()
    }

    /// Plots of one collection.
    pub fn plots(&self, field: Field) -> &[Plot] {
        match field {
            Field::Outdoor => &self.outdoor_plots,
            Field::Greenhouse => &self.greenhouse_plots,
        }
    }

    pub(crate) fn plots_mut(&mut self, field: Field) -> &mut Vec<Plot> {
        match field {
            Field::Outdoor => &mut self.outdoor_plots,
            Field::Greenhouse => &mut self.greenhouse_plots,
        }
    }

    /// Modifiers of the active pet.
    pub fn modifiers(&self) -> ActiveModifiers {
        self.pets.modifiers()
    }

    /// Growth time of `crop` under the active pet.
    pub fn effective_growth_ms(&self, crop: CropType) -> i64 {
        farming::effective_growth_ms(crop, self.modifiers().growth_reduction())
    }

    /// Milliseconds until a growing plot ripens.
    ///
    /// `None` for plots that are not growing or do not exist.
    pub fn remaining_growth_ms(&self, field: Field, index: usize, now_ms: i64) -> Option<i64> {
        let plot = self.plots(field).get(index)?;
        let crop = plot.crop?;
        farming::remaining_ms(plot, now_ms, self.effective_growth_ms(crop))
    }

    /// Today's seed price.
    pub fn seed_price(&self, crop: CropType) -> u64 {
        self.market.seed_price(crop)
    }

    /// Phase of the current day.
    pub fn time_of_day(&self, now_ms: i64, timing: &TimingConfig) -> TimeOfDay {
        self.calendar.time_of_day(
            now_ms,
            timing.day_duration_i64(),
            timing.night_start_fraction,
        )
    }

    /// Whether a milestone can be claimed.
    pub fn milestone_available(&self) -> bool {
        self.achievements.milestone_available()
    }

    /// Farm summary for the advisory source.
    pub fn advisory_context(&self) -> AdvisoryContext {
        AdvisoryContext {
            season: self.season(),
            day_of_month: self.calendar.day_of_month(),
            money: self.money,
            weather: self.weather.current,
            market_prices: self.market.iter().collect(),
            best_crop: self.market.highest().map(|(crop, _)| crop),
            worst_crop: self.market.lowest().map(|(crop, _)| crop),
            seeds: self
                .inventory
                .seeds
                .iter()
                .filter(|(_, n)| **n > 0)
                .map(|(c, n)| (*c, *n))
                .collect::<BTreeMap<_, _>>(),
            active_order: self.orders.active.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Advisory
    // -----------------------------------------------------------------------

    /// Record the outcome of an advisory call.
    ///
    /// Success stores the message and marks the day. Failure stores the
    /// fallback and leaves the day marker alone.
    pub fn complete_advice(&mut self, outcome: Result<String, AdvisoryError>) -> Vec<FarmEvent> {
        self.advisory.in_flight = false;
        let (message, fallback) = match outcome {
            Ok(message) => {
                self.advisory.last_advice_day = self.calendar.total_days();
                (message, false)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Advisory call failed, using fallback");
                (FALLBACK_MESSAGE.to_owned(), true)
            }
        };
        self.advisory.message = Some(message.clone());
        vec![FarmEvent::AdviceReceived { message, fallback }]
    }

    // -----------------------------------------------------------------------
    // Shared mutation helpers
    // -----------------------------------------------------------------------

    /// Add money and report it.
    pub(crate) fn earn(&mut self, amount: u64, events: &mut Vec<FarmEvent>) {
        if amount == 0 {
            return;
        }
        homestead_economy::inventory::earn(&mut self.money, amount);
        events.push(FarmEvent::MoneyChanged {
            delta: signed(amount),
            balance: self.money,
        });
    }

    /// Report a completed spend.
    pub(crate) fn report_spend(&self, amount: u64, events: &mut Vec<FarmEvent>) {
        events.push(FarmEvent::MoneyChanged {
            delta: 0_i64.saturating_sub(signed(amount)),
            balance: self.money,
        });
    }

    /// Report an inventory movement.
    pub(crate) fn report_item(&self, item: ItemRef, delta: i64, events: &mut Vec<FarmEvent>) {
        events.push(FarmEvent::InventoryChanged {
            item,
            delta,
            balance: self.inventory.balance(item),
        });
    }

    /// Award experience after the active pet's bonus, resolve level-ups and
    /// report both. Every experience source goes through here.
    pub(crate) fn award_xp(&mut self, base: u64, events: &mut Vec<FarmEvent>) {
        let amount = self.modifiers().scale_xp(base);
        if amount == 0 {
            return;
        }
        let reached = self.progression.award(amount);
        events.push(FarmEvent::XpGained {
            amount,
            total: self.progression.xp,
        });
        for level in reached {
            tracing::info!(level, "Level up");
            events.push(FarmEvent::LevelUp { level });
        }
        self.stats.level = u64::from(self.progression.level);
    }

    /// Unlock achievements for the current stats and report them.
    pub(crate) fn refresh_achievements(&mut self, events: &mut Vec<FarmEvent>) {
        for id in self.achievements.evaluate(&self.stats) {
            tracing::info!(achievement = ?id, "Achievement unlocked");
            events.push(FarmEvent::AchievementUnlocked { id });
        }
    }

    /// Bring derived and bounded fields back in line after a restore.
    pub(crate) fn normalize(&mut self) {
        self.calendar = Calendar::from_parts(
            self.calendar.total_days(),
            self.calendar.day_start_ms(),
        );
        self.weather = WeatherSystem::from_parts(self.weather.current, self.weather.disaster_chance);
        self.market = MarketPrices::from_map(self.market.iter().collect());
        if self.outdoor_plots.len() < catalog::INITIAL_FARM_SIZE {
            self.outdoor_plots
                .resize(catalog::INITIAL_FARM_SIZE, Plot::empty());
        }
        if self.greenhouse_plots.len() < catalog::INITIAL_GREENHOUSE_SIZE {
            self.greenhouse_plots
                .resize(catalog::INITIAL_GREENHOUSE_SIZE, Plot::empty());
        }
        for plot in self
            .outdoor_plots
            .iter_mut()
            .chain(self.greenhouse_plots.iter_mut())
        {
            if !plot.is_consistent() {
                tracing::warn!(?plot, "Resetting inconsistent plot");
                *plot = Plot::empty();
            }
        }
        self.hunger = self.hunger.min(MAX_HUNGER);
        self.progression.level = self.progression.level.max(1);
        self.stats.level = self.stats.level.max(u64::from(self.progression.level));
        self.stats.farm_plots = self.stats.farm_plots.max(count(self.outdoor_plots.len()));
        self.stats.greenhouse_plots = self
            .stats
            .greenhouse_plots
            .max(count(self.greenhouse_plots.len()));
        self.stats.has_greenhouse |= self.greenhouse_built;
        self.stats.has_barn |= self.barn.built;
        self.advisory.in_flight = false;
    }
}

/// Widen a collection length into a stats counter.
pub(crate) fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// Convert an unsigned amount to a signed delta, saturating.
pub(crate) fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}
