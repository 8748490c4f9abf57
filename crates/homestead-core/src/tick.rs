//! Fixed-cadence drivers: plot growth with auto-harvest, and hunger drain.
//!
//! The growth tick runs two passes per plot collection. Plots that were
//! already Ready when the tick began are harvested after the growth pass;
//! plots that ripen during this tick are harvested on the next one. A plot
//! therefore always shows Ready for at least one tick, and a skipped tick
//! never pays twice because harvest empties the plot.
//!
//! Outdoor plots sit out entirely in winter, during a blizzard and at night.
//! The greenhouse is evaluated whenever it has been built.

use homestead_economy::OrderProgress;
use homestead_economy::modifiers::scale_rounded;
use homestead_types::{CropType, FarmEvent, Field, GameMode, PlotState, Season, Weather};
use homestead_world::{HarvestTerms, catalog, farming, harvest_terms};
use rand::Rng;
use tracing::debug;

use crate::config::TimingConfig;
use crate::state::FarmState;

impl FarmState {
    /// Evaluate growth and auto-harvest at `now_ms`.
    pub fn growth_tick(
        &mut self,
        now_ms: i64,
        timing: &TimingConfig,
        rng: &mut impl Rng,
    ) -> Vec<FarmEvent> {
        let mut events = Vec::new();
        for field in self.active_fields(now_ms, timing) {
            let ready: Vec<usize> = self
                .plots(field)
                .iter()
                .enumerate()
                .filter(|(_, p)| p.state == PlotState::Ready)
                .map(|(i, _)| i)
                .collect();
            self.grow_field(field, now_ms, rng, &mut events);
            for plot_index in ready {
                self.harvest_plot(field, plot_index, &mut events);
            }
        }
        events
    }

    /// Collections evaluated on this tick.
    pub fn active_fields(&self, now_ms: i64, timing: &TimingConfig) -> Vec<Field> {
        let mut fields = Vec::with_capacity(2);
        let outdoor_frozen = self.season() == Season::Winter
            || self.weather.current == Weather::Blizzard
            || self.calendar.is_night(
                now_ms,
                timing.day_duration_i64(),
                timing.night_start_fraction,
            );
        if !outdoor_frozen {
            fields.push(Field::Outdoor);
        }
        if self.greenhouse_built {
            fields.push(Field::Greenhouse);
        }
        fields
    }

    fn grow_field(
        &mut self,
        field: Field,
        now_ms: i64,
        rng: &mut impl Rng,
        events: &mut Vec<FarmEvent>,
    ) {
        let reduction = self.modifiers().growth_reduction();
        for (plot_index, plot) in self.plots_mut(field).iter_mut().enumerate() {
            let Some(crop) = plot.crop else { continue };
            let effective = farming::effective_growth_ms(crop, reduction);
            if let Some(size) = farming::ripen_if_due(plot, now_ms, effective, rng) {
                events.push(FarmEvent::CropReady {
                    field,
                    plot_index,
                    crop,
                    size,
                });
            }
        }
    }

    fn harvest_plot(&mut self, field: Field, plot_index: usize, events: &mut Vec<FarmEvent>) {
        let Some(plot) = self.plots_mut(field).get_mut(plot_index) else {
            return;
        };
        let Some(harvest) = farming::take_harvest(plot) else {
            return;
        };
        let terms = harvest_terms(harvest.size);
        let yield_amount = terms.yield_amount;
        debug!(?field, plot_index, crop = ?harvest.crop, size = ?harvest.size, "Harvested");
        events.push(FarmEvent::CropHarvested {
            field,
            plot_index,
            crop: harvest.crop,
            size: harvest.size,
            yield_amount,
        });
        self.record_harvest_stats(yield_amount);

        match self.orders.record_harvest(harvest.crop, yield_amount) {
            Some(OrderProgress::Progressed {
                order_id,
                progress,
                quantity,
            }) => {
                events.push(FarmEvent::OrderProgressed {
                    order_id,
                    progress,
                    quantity,
                });
            }
            Some(OrderProgress::Completed(order)) => {
                tracing::info!(order_id = %order.id, "Order completed");
                events.push(FarmEvent::OrderCompleted {
                    order_id: order.id,
                    money: order.money_reward,
                    xp: order.xp_reward,
                });
                self.earn(order.money_reward, events);
                self.award_xp(order.xp_reward, events);
            }
            None => self.pay_harvest(harvest.crop, terms, events),
        }
        self.refresh_achievements(events);
    }

    fn record_harvest_stats(&mut self, yield_amount: u32) {
        let amount = u64::from(yield_amount);
        let stats = &mut self.stats;
        stats.total_crops_harvested = stats.total_crops_harvested.saturating_add(amount);
        let bucket = match self.calendar.season() {
            Season::Spring => &mut stats.spring_crops_harvested,
            Season::Summer => &mut stats.summer_crops_harvested,
            Season::Autumn => &mut stats.autumn_crops_harvested,
            Season::Winter => &mut stats.winter_crops_harvested,
        };
        *bucket = bucket.saturating_add(amount);
    }

    fn pay_harvest(
        &mut self,
        crop: CropType,
        terms: HarvestTerms,
        events: &mut Vec<FarmEvent>,
    ) {
        let spec = catalog::crop(crop);
        let modifiers = self.modifiers();
        let yield_amount = u64::from(terms.yield_amount);

        let unit = scale_rounded(
            spec.sell_price,
            terms.price_multiplier * self.market.multiplier(crop),
        );
        let money = modifiers.scale_money(unit.saturating_mul(yield_amount));
        let xp = scale_rounded(
            spec.xp_yield.saturating_mul(yield_amount),
            terms.xp_multiplier,
        );

        self.stats.total_gold_earned = self.stats.total_gold_earned.saturating_add(money);
        self.earn(money, events);
        self.award_xp(xp, events);
    }

    /// Drain one point of hunger. Beta mode only.
    pub fn hunger_tick(&mut self) -> Vec<FarmEvent> {
        if self.game_mode != GameMode::Beta || self.hunger == 0 {
            return Vec::new();
        }
        self.hunger = self.hunger.saturating_sub(1);
        vec![FarmEvent::HungerChanged {
            hunger: self.hunger,
        }]
    }

    /// Current hunger cadence in milliseconds. Heatwaves drain faster.
    pub fn hunger_interval_ms(&self, timing: &TimingConfig) -> u64 {
        if self.weather.current == Weather::Heatwave {
            timing.heatwave_hunger_tick_ms
        } else {
            timing.hunger_tick_ms
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_types::{Order, OrderId, Pet, PetId, PetType, Plot, PlotSize, Requester};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    const DAY: u64 = 1_000_000;

    fn timing() -> TimingConfig {
        TimingConfig {
            day_duration_ms: DAY,
            ..TimingConfig::default()
        }
    }

    fn growing(crop: CropType, started: i64, fertilized: bool) -> Plot {
        Plot {
            crop: Some(crop),
            state: PlotState::Growing,
            growth_started_at_ms: Some(started),
            is_watered: false,
            is_fertilized: fertilized,
            size: None,
        }
    }

    #[test]
    fn carrot_ripens_then_harvests_on_next_tick() {
        let mut farm = FarmState::default();
        let mut rng = SmallRng::seed_from_u64(7);
        farm.outdoor_plots[0] = growing(CropType::Carrot, 0, true);

        let events = farm.growth_tick(60_001, &timing(), &mut rng);
        assert_eq!(farm.outdoor_plots[0].state, PlotState::Ready);
        assert_eq!(farm.outdoor_plots[0].size, Some(PlotSize::Large));
        assert!(matches!(events.as_slice(), [FarmEvent::CropReady { .. }]));
        assert_eq!(farm.money, 50);

        farm.growth_tick(61_000, &timing(), &mut rng);
        assert_eq!(farm.outdoor_plots[0], Plot::empty());
        // Large: round(10 * 2.0 * 1.0) * 2
        assert_eq!(farm.money, 90);
        assert_eq!(farm.stats.total_crops_harvested, 2);
        assert_eq!(farm.stats.spring_crops_harvested, 2);
        assert_eq!(farm.stats.total_gold_earned, 40);
        // round(5 * 1.5 * 2)
        assert_eq!(farm.progression.xp, 15);
    }

    #[test]
    fn unripe_plot_stays_growing() {
        let mut farm = FarmState::default();
        let mut rng = SmallRng::seed_from_u64(7);
        farm.outdoor_plots[0] = growing(CropType::Carrot, 0, false);
        let events = farm.growth_tick(59_999, &timing(), &mut rng);
        assert!(events.is_empty());
        assert_eq!(farm.outdoor_plots[0].state, PlotState::Growing);
    }

    #[test]
    fn outdoor_frozen_in_winter_but_greenhouse_grows() {
        let mut farm = FarmState::new_game("T", GameMode::Normal, Season::Winter, 0);
        let mut rng = SmallRng::seed_from_u64(7);
        farm.greenhouse_built = true;
        farm.outdoor_plots[0] = growing(CropType::Carrot, 0, false);
        farm.greenhouse_plots[0] = growing(CropType::Carrot, 0, false);
        farm.growth_tick(60_001, &timing(), &mut rng);
        assert_eq!(farm.outdoor_plots[0].state, PlotState::Growing);
        assert_eq!(farm.greenhouse_plots[0].state, PlotState::Ready);

        farm.growth_tick(60_002, &timing(), &mut rng);
        assert!(farm.stats.total_crops_harvested >= 1);
        assert_eq!(
            farm.stats.winter_crops_harvested,
            farm.stats.total_crops_harvested
        );
    }

    #[test]
    fn night_and_blizzard_suspend_outdoor_growth() {
        let mut farm = FarmState::default();
        let t = timing();
        assert_eq!(farm.active_fields(0, &t), vec![Field::Outdoor]);
        assert!(farm.active_fields(900_000, &t).is_empty());
        farm.weather.current = Weather::Blizzard;
        assert!(farm.active_fields(0, &t).is_empty());
    }

    #[test]
    fn matching_order_absorbs_harvest_and_pays_once() {
        let mut farm = FarmState::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let order_id = OrderId::new();
        farm.orders.active = Some(Order {
            id: order_id,
            crop: CropType::Carrot,
            quantity: 3,
            progress: 0,
            money_reward: 200,
            xp_reward: 40,
            requester: Requester::ALL[0],
        });
        farm.outdoor_plots[0] = growing(CropType::Carrot, 0, true);
        farm.outdoor_plots[1] = growing(CropType::Carrot, 0, true);

        farm.growth_tick(60_001, &timing(), &mut rng);
        let events = farm.growth_tick(60_002, &timing(), &mut rng);

        assert!(events.contains(&FarmEvent::OrderProgressed {
            order_id,
            progress: 2,
            quantity: 3
        }));
        assert!(events.contains(&FarmEvent::OrderCompleted {
            order_id,
            money: 200,
            xp: 40
        }));
        assert!(farm.orders.active.is_none());
        assert_eq!(farm.money, 250);
        assert_eq!(farm.progression.xp, 40);
        assert_eq!(farm.stats.total_gold_earned, 0);
        assert_eq!(farm.stats.total_crops_harvested, 4);
    }

    #[test]
    fn wise_owl_boosts_order_experience() {
        let mut farm = FarmState::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let owl = Pet {
            id: PetId::new(),
            pet_type: PetType::WiseOwl,
        };
        farm.pets.owned.push(owl);
        farm.pets.active = Some(owl.id);
        let order_id = OrderId::new();
        farm.orders.active = Some(Order {
            id: order_id,
            crop: CropType::Carrot,
            quantity: 3,
            progress: 0,
            money_reward: 200,
            xp_reward: 40,
            requester: Requester::ALL[0],
        });
        farm.outdoor_plots[0] = growing(CropType::Carrot, 0, true);
        farm.outdoor_plots[1] = growing(CropType::Carrot, 0, true);

        farm.growth_tick(60_001, &timing(), &mut rng);
        let events = farm.growth_tick(60_002, &timing(), &mut rng);

        assert!(events.contains(&FarmEvent::XpGained { amount: 46, total: 46 }));
        // round(40 * 1.15)
        assert_eq!(farm.progression.xp, 46);
        assert_eq!(farm.money, 250);
    }

    #[test]
    fn wise_owl_boosts_harvest_experience_once() {
        let mut farm = FarmState::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let owl = Pet {
            id: PetId::new(),
            pet_type: PetType::WiseOwl,
        };
        farm.pets.owned.push(owl);
        farm.pets.active = Some(owl.id);
        farm.outdoor_plots[0] = growing(CropType::Carrot, 0, true);

        farm.growth_tick(60_001, &timing(), &mut rng);
        farm.growth_tick(61_000, &timing(), &mut rng);
        // round(round(5 * 1.5 * 2) * 1.15)
        assert_eq!(farm.progression.xp, 17);
    }

    #[test]
    fn hunger_drains_only_in_beta() {
        let mut normal = FarmState::default();
        assert!(normal.hunger_tick().is_empty());
        assert_eq!(normal.hunger, 100);

        let mut beta = FarmState::new_game("B", GameMode::Beta, Season::Spring, 0);
        beta.hunger = 1;
        assert_eq!(beta.hunger_tick(), vec![FarmEvent::HungerChanged { hunger: 0 }]);
        assert!(beta.hunger_tick().is_empty());
        assert_eq!(beta.hunger, 0);
    }

    #[test]
    fn heatwave_speeds_hunger() {
        let mut farm = FarmState::default();
        let t = TimingConfig::default();
        assert_eq!(farm.hunger_interval_ms(&t), 5_000);
        farm.weather.current = Weather::Heatwave;
        assert_eq!(farm.hunger_interval_ms(&t), 2_500);
    }
}
