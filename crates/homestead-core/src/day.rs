//! Day advance: the cascade that runs at every day boundary.
//!
//! Phases, in order:
//!
//! 1. **Calendar** -- bump the day counter and stamp the new day start.
//! 2. **Sprinkler** -- if owned, water every plot (greenhouse too once built).
//! 3. **Pet passives** -- roll the active pet's daily finds.
//! 4. **Barn** -- fed animals produce, every animal gets hungry again.
//! 5. **Market** -- random-walk every crop multiplier.
//! 6. **Boards** -- replace the order candidates and barter deals.
//! 7. **Weather** -- roll tomorrow's weather and, on a change, apply its
//!    one-time effect to outdoor plots.
//!
//! The scheduler reschedules the next boundary from
//! [`Calendar::remaining_until_next_day`](crate::calendar::Calendar::remaining_until_next_day).

use homestead_economy::DailyFind;
use homestead_types::{AnimalProductType, FarmEvent, Field, ItemRef, SupplyType, ToolType};
use homestead_world::{apply_weather_effects, farming};
use rand::Rng;
use tracing::{debug, info};

use crate::calendar::CalendarError;
use crate::state::FarmState;

impl FarmState {
    /// Run every day-boundary phase at `now_ms`.
    pub fn advance_day(
        &mut self,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Result<Vec<FarmEvent>, CalendarError> {
        let mut events = Vec::new();

        // Phase 1: Calendar
        let total_days = self.calendar.advance(now_ms)?;
        let season = self.season();
        info!(total_days, season = ?season, "Day advanced");
        events.push(FarmEvent::DayAdvanced { total_days, season });

        // Phase 2: Sprinkler
        if self.tools.has(ToolType::Sprinkler) {
            self.sprinkle(&mut events);
        }

        // Phase 3: Pet passives
        self.collect_daily_finds(rng, &mut events);

        // Phase 4: Barn
        if !self.barn.animals.is_empty() {
            let count = self.barn.daily_reset();
            events.push(FarmEvent::ProductsReady { count });
        }

        // Phase 5: Market
        self.market.update(rng);
        events.push(FarmEvent::MarketUpdated);

        // Phase 6: Boards
        self.orders.refresh(season, rng);
        self.barter.refresh(rng);
        events.push(FarmEvent::BoardsRefreshed {
            orders: self.orders.available.len(),
            deals: self.barter.deals().len(),
        });

        // Phase 7: Weather
        self.roll_weather(now_ms, rng, &mut events);

        Ok(events)
    }

    fn sprinkle(&mut self, events: &mut Vec<FarmEvent>) {
        let mut fields = vec![Field::Outdoor];
        if self.greenhouse_built {
            fields.push(Field::Greenhouse);
        }
        for field in fields {
            let count = farming::water_all(self.plots_mut(field));
            if count > 0 {
                events.push(FarmEvent::PlotsWatered { field, count });
            }
        }
    }

    fn collect_daily_finds(&mut self, rng: &mut impl Rng, events: &mut Vec<FarmEvent>) {
        for find in self.modifiers().roll_daily(rng) {
            let (item, amount) = match find {
                DailyFind::Feed(amount) => (ItemRef::Supply(SupplyType::Feed), amount),
                DailyFind::GoldenEgg => (ItemRef::AnimalProduct(AnimalProductType::GoldenEgg), 1),
            };
            if let Err(e) = self.inventory.credit(item, amount) {
                debug!(error = %e, "Dropping daily find");
                continue;
            }
            events.push(match find {
                DailyFind::Feed(amount) => FarmEvent::FeedFound { amount },
                DailyFind::GoldenEgg => FarmEvent::GoldenEggLaid,
            });
            self.report_item(item, i64::from(amount), events);
        }
    }

    fn roll_weather(&mut self, now_ms: i64, rng: &mut impl Rng, events: &mut Vec<FarmEvent>) {
        let roll = self.weather.roll(self.season(), rng);
        if !roll.changed() {
            return;
        }
        info!(
            previous = ?roll.previous,
            current = ?roll.current,
            disaster = roll.disaster,
            "Weather changed"
        );
        events.push(FarmEvent::WeatherChanged {
            previous: roll.previous,
            current: roll.current,
            disaster_chance: self.weather.disaster_chance,
        });

        let reduction = self.modifiers().growth_reduction();
        let effects = apply_weather_effects(
            roll.current,
            &mut self.outdoor_plots,
            now_ms,
            |crop| farming::effective_growth_ms(crop, reduction),
            rng,
        );
        if effects.watered > 0 {
            events.push(FarmEvent::PlotsWatered {
                field: Field::Outdoor,
                count: effects.watered,
            });
        }
        for (plot_index, crop) in effects.destroyed {
            events.push(FarmEvent::PlotDestroyed {
                field: Field::Outdoor,
                plot_index,
                crop,
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_types::{Animal, AnimalId, AnimalType, GameMode, ProductState, Season};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn advance_day_runs_every_phase() {
        let mut farm = FarmState::new_game("T", GameMode::Normal, Season::Spring, 0);
        let mut rng = SmallRng::seed_from_u64(1);
        let events = farm.advance_day(15_000, &mut rng).unwrap();

        assert_eq!(farm.calendar.total_days(), 58);
        assert_eq!(farm.calendar.day_start_ms(), 15_000);
        assert_eq!(
            events.first(),
            Some(&FarmEvent::DayAdvanced {
                total_days: 58,
                season: Season::Spring
            })
        );
        assert!(events.contains(&FarmEvent::MarketUpdated));
        assert_eq!(farm.orders.available.len(), 2);
        assert_eq!(farm.barter.deals().len(), 2);
        for (_, m) in farm.market.iter() {
            assert!((0.5..=2.5).contains(&m));
        }
    }

    #[test]
    fn sprinkler_waters_greenhouse_only_when_built() {
        let mut farm = FarmState::default();
        farm.money = 10_000;
        farm.tools.buy(ToolType::Sprinkler, &mut farm.money).unwrap();
        let mut rng = SmallRng::seed_from_u64(2);
        farm.advance_day(1, &mut rng).unwrap();
        assert!(farm.outdoor_plots.iter().all(|p| p.is_watered));
        assert!(farm.greenhouse_plots.iter().all(|p| !p.is_watered));

        farm.greenhouse_built = true;
        farm.advance_day(2, &mut rng).unwrap();
        assert!(farm.greenhouse_plots.iter().all(|p| p.is_watered));
    }

    #[test]
    fn barn_reset_follows_feeding() {
        let mut farm = FarmState::default();
        farm.barn.built = true;
        let fed = AnimalId::new();
        let hungry = AnimalId::new();
        farm.barn.animals = vec![
            Animal {
                id: fed,
                animal_type: AnimalType::Chicken,
                is_hungry: false,
                product_state: ProductState::None,
            },
            Animal {
                id: hungry,
                animal_type: AnimalType::Cow,
                is_hungry: true,
                product_state: ProductState::Ready,
            },
        ];
        let mut rng = SmallRng::seed_from_u64(3);
        let events = farm.advance_day(1, &mut rng).unwrap();
        assert!(events.contains(&FarmEvent::ProductsReady { count: 1 }));
        let by_id = |id| farm.barn.animals.iter().find(|a| a.id == id).unwrap();
        assert_eq!(by_id(fed).product_state, ProductState::Ready);
        assert_eq!(by_id(hungry).product_state, ProductState::None);
        assert!(farm.barn.animals.iter().all(|a| a.is_hungry));
    }

    #[test]
    fn weather_change_is_reported_with_counter() {
        let mut farm = FarmState::default();
        let mut rng = SmallRng::seed_from_u64(4);
        for day in 1..60_i64 {
            let before = farm.weather.current;
            let events = farm.advance_day(day, &mut rng).unwrap();
            let changed = events
                .iter()
                .any(|e| matches!(e, FarmEvent::WeatherChanged { .. }));
            assert_eq!(changed, before != farm.weather.current);
            assert!(farm.weather.disaster_chance <= 75);
        }
    }
}
