//! Intent dispatch: player commands turned into state transitions.
//!
//! [`FarmState::apply_intent`] is the only way the presentation layer
//! changes the farm. Each handler checks every precondition before it
//! mutates anything, so a refused intent leaves the state exactly as it
//! was. Refusals are logged at debug level and yield no events.

use homestead_economy::inventory;
use homestead_economy::{EconomyError, pets};
use homestead_types::{
    AnimalType, CropType, DealId, FarmEvent, Field, FoodType, GameMode, Intent, ItemRef,
    ItemStack, OrderId, Plot, PetId, Season, SupplyType, ToolType, Weather,
};
use homestead_world::{WorldError, catalog, farming};
use rand::Rng;
use tracing::{debug, info};

use crate::state::{FarmState, MAX_HUNGER, count};

const FERTILIZER: ItemRef = ItemRef::Supply(SupplyType::GoldenFertilizer);
const FEED: ItemRef = ItemRef::Supply(SupplyType::Feed);
const BISCUIT: ItemRef = ItemRef::Supply(SupplyType::PetBiscuit);

/// Why an intent was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    /// A plot rule refused the action.
    #[error("world rule: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An economy rule refused the action.
    #[error("economy rule: {source}")]
    Economy {
        /// The underlying economy error.
        #[from]
        source: EconomyError,
    },

    /// Greenhouse plots were targeted before the greenhouse exists.
    #[error("the greenhouse has not been built")]
    GreenhouseMissing,

    /// The intent belongs to another game mode.
    #[error("intent requires {required:?} mode")]
    WrongGameMode {
        /// Mode the intent needs.
        required: GameMode,
    },

    /// Advice was already given today or a request is outstanding.
    #[error("advice is not available until tomorrow")]
    AdviceUnavailable,
}

impl FarmState {
    /// Apply one intent at `now_ms`.
    ///
    /// Returns the events it produced. A refused intent returns an empty
    /// list and leaves the state untouched.
    pub fn apply_intent(
        &mut self,
        intent: Intent,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Vec<FarmEvent> {
        let mut events = Vec::new();
        match self.dispatch(intent, now_ms, rng, &mut events) {
            Ok(()) => events,
            Err(e) => {
                debug!(?intent, error = %e, "Intent refused");
                Vec::new()
            }
        }
    }

    /// Apply one intent, reporting why it was refused.
    pub fn try_apply_intent(
        &mut self,
        intent: Intent,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Result<Vec<FarmEvent>, IntentError> {
        let mut events = Vec::new();
        self.dispatch(intent, now_ms, rng, &mut events)?;
        Ok(events)
    }

    fn dispatch(
        &mut self,
        intent: Intent,
        now_ms: i64,
        rng: &mut impl Rng,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        match intent {
            Intent::PlantSeed {
                field,
                plot_index,
                crop,
            } => self.plant_seed(field, plot_index, crop, now_ms, events),
            Intent::ApplyFertilizer { field, plot_index } => {
                self.apply_fertilizer(field, plot_index, events)
            }
            Intent::AcceptOrder { order_id } => self.accept_order(order_id, events),
            Intent::ExecuteTrade { deal_id } => self.execute_trade(deal_id, events),
            Intent::ClaimLevelReward => self.claim_level_reward(events),
            Intent::ClaimMilestone => self.claim_milestone(events),
            Intent::BuySeeds { crop, quantity } => {
                let price = self.seed_price(crop);
                self.buy_item(ItemRef::Seed(crop), price, quantity, events)
            }
            Intent::BuyFood { food, quantity } => self.buy_food(food, quantity, events),
            Intent::BuySupplies { supply, quantity } => self.buy_item(
                ItemRef::Supply(supply),
                catalog::supply_price(supply),
                quantity,
                events,
            ),
            Intent::BuyAnimal { animal, quantity } => self.buy_animal(animal, quantity, events),
            Intent::BuyTool { tool } => self.buy_tool(tool, events),
            Intent::BuyGreenhouse => self.buy_greenhouse(events),
            Intent::BuyBarn => self.buy_barn(events),
            Intent::ExpandFarm => self.expand(Field::Outdoor, events),
            Intent::ExpandGreenhouse => self.expand(Field::Greenhouse, events),
            Intent::FeedAnimals => self.feed_animals(events),
            Intent::CollectProduct { animal_id } => {
                let product = self.barn.collect(animal_id, &mut self.inventory)?;
                self.stats.total_products_collected =
                    self.stats.total_products_collected.saturating_add(1);
                events.push(FarmEvent::ProductCollected { animal_id, product });
                self.report_item(ItemRef::AnimalProduct(product), 1, events);
                self.refresh_achievements(events);
                Ok(())
            }
            Intent::SellItem { item, quantity } => self.sell_item(item, quantity, events),
            Intent::EatFood { food } => self.eat_food(food, events),
            Intent::Cook { recipe } => self.cook(recipe, events),
            Intent::PullPets { count } => self.pull_pets(count, rng, events),
            Intent::SetActivePet { pet_id } => self.set_active_pet(pet_id, events),
            Intent::RequestAdvice => {
                if !self.advisory.can_request(self.calendar.total_days()) {
                    return Err(IntentError::AdviceUnavailable);
                }
                self.advisory.in_flight = true;
                events.push(FarmEvent::AdviceRequested);
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Plots
    // -----------------------------------------------------------------------

    fn require_field(&self, field: Field) -> Result<(), IntentError> {
        match field {
            Field::Greenhouse if !self.greenhouse_built => Err(IntentError::GreenhouseMissing),
            _ => Ok(()),
        }
    }

    fn plot_copy(&self, field: Field, plot_index: usize) -> Result<Plot, WorldError> {
        let plots = self.plots(field);
        plots
            .get(plot_index)
            .cloned()
            .ok_or(WorldError::PlotNotFound {
                index: plot_index,
                len: plots.len(),
            })
    }

    fn plant_seed(
        &mut self,
        field: Field,
        plot_index: usize,
        crop: CropType,
        now_ms: i64,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        self.require_field(field)?;
        if field == Field::Outdoor {
            farming::check_outdoor_planting(crop, self.season(), self.weather.current)?;
        }
        let seed = ItemRef::Seed(crop);
        if !self.inventory.has(seed, 1) {
            return Err(EconomyError::InsufficientItem {
                item: seed,
                requested: 1,
                available: self.inventory.balance(seed),
            }
            .into());
        }

        let mut planted = self.plot_copy(field, plot_index)?;
        farming::plant(
            &mut planted,
            crop,
            now_ms,
            self.effective_growth_ms(crop),
            self.tools.has(ToolType::WateringCan),
        )?;
        self.inventory.try_debit(seed, 1)?;
        *farming::plot_mut(self.plots_mut(field), plot_index)? = planted;

        events.push(FarmEvent::CropPlanted {
            field,
            plot_index,
            crop,
        });
        self.report_item(seed, -1, events);
        Ok(())
    }

    fn apply_fertilizer(
        &mut self,
        field: Field,
        plot_index: usize,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        self.require_field(field)?;
        if field == Field::Outdoor {
            if self.season() == Season::Winter {
                return Err(WorldError::FrozenGround.into());
            }
            if self.weather.current == Weather::Blizzard {
                return Err(WorldError::Blizzard.into());
            }
        }
        if !self.inventory.has(FERTILIZER, 1) {
            return Err(EconomyError::InsufficientItem {
                item: FERTILIZER,
                requested: 1,
                available: self.inventory.balance(FERTILIZER),
            }
            .into());
        }

        let mut fertilized = self.plot_copy(field, plot_index)?;
        farming::fertilize(&mut fertilized)?;
        self.inventory.try_debit(FERTILIZER, 1)?;
        *farming::plot_mut(self.plots_mut(field), plot_index)? = fertilized;

        events.push(FarmEvent::PlotFertilized { field, plot_index });
        self.report_item(FERTILIZER, -1, events);
        Ok(())
    }

    fn expand(&mut self, field: Field, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        self.require_field(field)?;
        let len = self.plots(field).len();
        let cost = match field {
            Field::Outdoor => catalog::farm_expansion_cost(len),
            Field::Greenhouse => catalog::greenhouse_expansion_cost(len),
        };
        inventory::spend(&mut self.money, cost)?;
        self.report_spend(cost, events);

        let plots = self.plots_mut(field);
        plots.push(Plot::empty());
        let new_len = plots.len();
        let counter = match field {
            Field::Outdoor => &mut self.stats.farm_plots,
            Field::Greenhouse => &mut self.stats.greenhouse_plots,
        };
        *counter = (*counter).max(count(new_len));

        info!(?field, plots = new_len, "Field expanded");
        events.push(FarmEvent::FieldExpanded {
            field,
            plots: new_len,
        });
        self.refresh_achievements(events);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Orders, trades and rewards
    // -----------------------------------------------------------------------

    fn accept_order(
        &mut self,
        order_id: OrderId,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        self.orders.accept(order_id)?;
        events.push(FarmEvent::OrderAccepted { order_id });
        Ok(())
    }

    fn execute_trade(
        &mut self,
        deal_id: DealId,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        let deal = self.barter.execute(deal_id, &mut self.inventory)?;
        events.push(FarmEvent::TradeExecuted { deal_id });
        self.report_item(deal.give.item, i64::from(deal.give.quantity).saturating_neg(), events);
        self.report_item(deal.get.item, i64::from(deal.get.quantity), events);
        Ok(())
    }

    fn claim_level_reward(&mut self, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        let reward = self.progression.claim()?;
        events.push(FarmEvent::LevelRewardClaimed {
            level: reward.level,
            money: reward.money,
        });
        self.earn(reward.money, events);
        Ok(())
    }

    fn claim_milestone(&mut self, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        let reward = self.achievements.claim_milestone()?;
        info!(
            milestone = reward.milestone,
            money = reward.money,
            seeds = reward.seeds_per_crop,
            "Milestone claimed"
        );
        self.inventory.credit_every_seed(reward.seeds_per_crop);
        events.push(FarmEvent::MilestoneClaimed { reward });
        self.earn(reward.money, events);
        for crop in CropType::ALL {
            self.report_item(
                ItemRef::Seed(crop),
                i64::from(reward.seeds_per_crop),
                events,
            );
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Shop
    // -----------------------------------------------------------------------

    fn buy_item(
        &mut self,
        item: ItemRef,
        unit_price: u64,
        quantity: u32,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        let cost = inventory::total_price(unit_price, quantity)?;
        if self.inventory.balance(item).checked_add(quantity).is_none() {
            return Err(EconomyError::ArithmeticOverflow {
                context: "inventory balance",
            }
            .into());
        }
        inventory::spend(&mut self.money, cost)?;
        self.inventory.credit(item, quantity)?;
        self.report_spend(cost, events);
        self.report_item(item, i64::from(quantity), events);
        Ok(())
    }

    fn buy_food(
        &mut self,
        food: FoodType,
        quantity: u32,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        let season = self.season();
        if !catalog::food_on_sale(food, season) {
            return Err(EconomyError::FoodOutOfSeason { food, season }.into());
        }
        self.buy_item(ItemRef::Food(food), catalog::food(food).price, quantity, events)
    }

    fn buy_animal(
        &mut self,
        animal: AnimalType,
        quantity: u32,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        let cost = self.barn.buy(animal, quantity, &mut self.money)?;
        self.report_spend(cost, events);
        self.stats.total_animals = self.stats.total_animals.saturating_add(u64::from(quantity));
        events.push(FarmEvent::AnimalsPurchased { animal, quantity });
        self.refresh_achievements(events);
        Ok(())
    }

    fn buy_tool(&mut self, tool: ToolType, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        let cost = self.tools.buy(tool, &mut self.money)?;
        self.report_spend(cost, events);
        events.push(FarmEvent::ToolPurchased { tool });
        Ok(())
    }

    fn buy_greenhouse(&mut self, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        if self.greenhouse_built {
            return Err(EconomyError::AlreadyBuilt("greenhouse").into());
        }
        inventory::spend(&mut self.money, catalog::GREENHOUSE_PRICE)?;
        self.greenhouse_built = true;
        self.stats.has_greenhouse = true;
        self.report_spend(catalog::GREENHOUSE_PRICE, events);
        info!("Greenhouse built");
        events.push(FarmEvent::GreenhouseBuilt);
        self.refresh_achievements(events);
        Ok(())
    }

    fn buy_barn(&mut self, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        let cost = self.barn.build(&mut self.money)?;
        self.stats.has_barn = true;
        self.report_spend(cost, events);
        info!("Barn built");
        events.push(FarmEvent::BarnBuilt);
        self.refresh_achievements(events);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Barn, selling and food
    // -----------------------------------------------------------------------

    fn feed_animals(&mut self, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        let fed = self.barn.feed_all(&mut self.inventory)?;
        events.push(FarmEvent::AnimalsFed {
            count: usize::try_from(fed).unwrap_or(usize::MAX),
        });
        self.report_item(FEED, i64::from(fed).saturating_neg(), events);
        Ok(())
    }

    fn sell_item(
        &mut self,
        item: ItemRef,
        quantity: u32,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        let unit = match item {
            ItemRef::AnimalProduct(product) => catalog::product_sell_price(product),
            ItemRef::Food(food) => catalog::food(food).sell_price,
            ItemRef::Seed(_) | ItemRef::Supply(_) => {
                return Err(EconomyError::NotSellable(item).into());
            }
        };
        let gross = inventory::total_price(unit, quantity)?;
        self.inventory.try_debit(item, quantity)?;
        let payout = self.modifiers().scale_money(gross);
        self.stats.total_gold_earned = self.stats.total_gold_earned.saturating_add(payout);
        self.report_item(item, i64::from(quantity).saturating_neg(), events);
        self.earn(payout, events);
        self.refresh_achievements(events);
        Ok(())
    }

    fn eat_food(&mut self, food: FoodType, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        if self.game_mode != GameMode::Beta {
            return Err(IntentError::WrongGameMode {
                required: GameMode::Beta,
            });
        }
        let item = ItemRef::Food(food);
        self.inventory.try_debit(item, 1)?;
        self.hunger = self
            .hunger
            .saturating_add(catalog::food(food).hunger_restore)
            .min(MAX_HUNGER);
        self.stats.food_eaten = self.stats.food_eaten.saturating_add(1);
        events.push(FarmEvent::FoodEaten {
            food,
            hunger: self.hunger,
        });
        self.report_item(item, -1, events);
        self.refresh_achievements(events);
        Ok(())
    }

    fn cook(&mut self, dish: FoodType, events: &mut Vec<FarmEvent>) -> Result<(), IntentError> {
        let recipe = catalog::recipe(dish).ok_or(EconomyError::NoRecipe(dish))?;
        let output = ItemRef::Food(dish);
        self.inventory
            .exchange_many(recipe.ingredients, ItemStack::new(output, 1))?;
        info!(?dish, "Dish cooked");
        events.push(FarmEvent::DishCooked { food: dish });
        for stack in recipe.ingredients {
            self.report_item(stack.item, i64::from(stack.quantity).saturating_neg(), events);
        }
        self.report_item(output, 1, events);
        self.award_xp(catalog::COOKING_XP, events);
        self.refresh_achievements(events);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Pets
    // -----------------------------------------------------------------------

    fn pull_pets(
        &mut self,
        count: u32,
        rng: &mut impl Rng,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        let cost = pets::pull_cost(count)?;
        let pulled = self.pets.pull(count, &mut self.inventory, rng)?;
        info!(count, "Pets pulled");
        events.push(FarmEvent::PetsPulled { pets: pulled });
        self.report_item(BISCUIT, i64::from(cost).saturating_neg(), events);
        Ok(())
    }

    fn set_active_pet(
        &mut self,
        pet_id: PetId,
        events: &mut Vec<FarmEvent>,
    ) -> Result<(), IntentError> {
        self.pets.set_active(pet_id)?;
        events.push(FarmEvent::ActivePetChanged { pet_id });
        Ok(())
    }
}
