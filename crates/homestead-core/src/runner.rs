//! Farm scheduler: drives the day boundary, growth tick, hunger drain,
//! player intents and advisory replies on one task.
//!
//! [`FarmRunner::run`] owns the [`FarmState`] for the length of the run,
//! so every mutation happens on a single logical thread and check-then-act
//! sequences need no locks. Work arrives through one `select!`:
//!
//! - **Day boundary** -- a sleep recomputed from the calendar each turn, so
//!   downtime and pauses are honored without skipping or repeating a day
//! - **Growth tick** -- fixed cadence, missed ticks skipped
//! - **Hunger tick** -- beta mode only, faster during a heatwave
//! - **Intents** -- from an mpsc channel
//! - **Advice** -- replies from spawned advisory calls
//! - **Autosave** -- hands the state to the callback on a cadence
//! - **Play state** -- pausing drops every timer until resumed
//!
//! The advisory call runs on its own task under a timeout and never
//! blocks the loop.

use std::sync::Arc;
use std::time::Duration;

use homestead_types::{FarmEvent, GameMode, Intent};
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::advisory::{AdvisoryError, AdvisorySource};
use crate::calendar::CalendarError;
use crate::clock::Clock;
use crate::config::FarmConfig;
use crate::operator::{PlayControl, PlayState};
use crate::state::FarmState;

/// Errors that can end a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The calendar could not advance.
    #[error("calendar error: {source}")]
    Calendar {
        /// The underlying calendar error.
        #[from]
        source: CalendarError,
    },
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The play control requested a stop.
    Stopped,
    /// Every intent sender was dropped.
    InputClosed,
}

/// Final state and counters of a run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The farm as it stood when the run ended.
    pub state: FarmState,
    /// Why the run ended.
    pub reason: EndReason,
    /// Day boundaries crossed.
    pub days_advanced: u64,
    /// Growth ticks evaluated.
    pub growth_ticks: u64,
    /// Intents received, accepted or not.
    pub intents_received: u64,
}

/// Receives what the scheduler produces.
pub trait FarmCallback: Send {
    /// Called with the events of one step and the state after it.
    fn on_events(&mut self, events: &[FarmEvent], state: &FarmState);

    /// Called on the autosave cadence.
    fn on_autosave(&mut self, _state: &FarmState) {}
}

/// A callback that ignores everything.
pub struct NoOpCallback;

impl FarmCallback for NoOpCallback {
    fn on_events(&mut self, _events: &[FarmEvent], _state: &FarmState) {}
}

/// How a playing stretch ended.
enum Flow {
    Pause,
    Stop(EndReason),
}

/// The farm scheduler.
pub struct FarmRunner<R> {
    state: FarmState,
    config: FarmConfig,
    rng: R,
    clock: Arc<dyn Clock>,
    advisor: Arc<dyn AdvisorySource>,
    control: Arc<PlayControl>,
    days_advanced: u64,
    growth_ticks: u64,
    intents_received: u64,
}

impl<R: Rng + Send> FarmRunner<R> {
    /// Assemble a runner around a restored or new farm.
    pub fn new(
        state: FarmState,
        config: FarmConfig,
        rng: R,
        clock: Arc<dyn Clock>,
        advisor: Arc<dyn AdvisorySource>,
        control: Arc<PlayControl>,
    ) -> Self {
        Self {
            state,
            config,
            rng,
            clock,
            advisor,
            control,
            days_advanced: 0,
            growth_ticks: 0,
            intents_received: 0,
        }
    }

    /// Run until stopped or until the intent channel closes.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the day counter overflows.
    pub async fn run(
        mut self,
        mut intents: mpsc::Receiver<Intent>,
        callback: &mut dyn FarmCallback,
    ) -> Result<RunOutcome, RunnerError> {
        let mut control = self.control.subscribe();
        let (advice_tx, mut advice_rx) = mpsc::channel(4);

        info!(
            farm = %self.state.farm_name,
            total_days = self.state.calendar.total_days(),
            mode = ?self.state.game_mode,
            "Farm starting"
        );

        let reason = loop {
            let current = *control.borrow_and_update();
            match current {
                PlayState::Stopped => break EndReason::Stopped,
                PlayState::Paused => {
                    info!("Farm paused");
                    tokio::select! {
                        changed = control.changed() => {
                            if changed.is_err() {
                                break EndReason::Stopped;
                            }
                        }
                        Some(outcome) = advice_rx.recv() => {
                            self.finish_advice(outcome, callback);
                        }
                    }
                }
                PlayState::Playing => {
                    let flow = self
                        .play(&mut control, &mut intents, &advice_tx, &mut advice_rx, callback)
                        .await?;
                    match flow {
                        Flow::Pause => {}
                        Flow::Stop(reason) => break reason,
                    }
                }
            }
        };

        info!(
            reason = ?reason,
            days_advanced = self.days_advanced,
            growth_ticks = self.growth_ticks,
            intents = self.intents_received,
            uptime_seconds = self.control.elapsed_seconds(),
            "Farm stopped"
        );
        Ok(RunOutcome {
            state: self.state,
            reason,
            days_advanced: self.days_advanced,
            growth_ticks: self.growth_ticks,
            intents_received: self.intents_received,
        })
    }

    async fn play(
        &mut self,
        control: &mut watch::Receiver<PlayState>,
        intents: &mut mpsc::Receiver<Intent>,
        advice_tx: &mpsc::Sender<Result<String, AdvisoryError>>,
        advice_rx: &mut mpsc::Receiver<Result<String, AdvisoryError>>,
        callback: &mut dyn FarmCallback,
    ) -> Result<Flow, RunnerError> {
        let timing = self.config.timing.clone();
        let growth_period = Duration::from_millis(timing.growth_tick_ms.max(1));
        let mut growth = tokio::time::interval_at(deadline_after(growth_period), growth_period);
        growth.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let autosave_ms = self.config.persistence.autosave_interval_ms;
        let autosave_period = Duration::from_millis(autosave_ms.max(1));
        let mut autosave = tokio::time::interval_at(deadline_after(autosave_period), autosave_period);
        autosave.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut next_hunger = self.next_hunger_deadline();

        loop {
            let now_ms = self.clock.now_ms();
            let until_day = self
                .state
                .calendar
                .remaining_until_next_day(now_ms, timing.day_duration_i64());
            let day_sleep = Duration::from_millis(u64::try_from(until_day).unwrap_or(0));
            let beta = self.state.game_mode == GameMode::Beta;

            tokio::select! {
                biased;

                changed = control.changed() => {
                    if changed.is_err() {
                        return Ok(Flow::Stop(EndReason::Stopped));
                    }
                    match *control.borrow() {
                        PlayState::Playing => {}
                        PlayState::Paused => return Ok(Flow::Pause),
                        PlayState::Stopped => return Ok(Flow::Stop(EndReason::Stopped)),
                    }
                }

                () = tokio::time::sleep(day_sleep) => {
                    let events = self.state.advance_day(self.clock.now_ms(), &mut self.rng)?;
                    self.days_advanced = self.days_advanced.saturating_add(1);
                    next_hunger = self.next_hunger_deadline();
                    callback.on_events(&events, &self.state);
                }

                _ = growth.tick() => {
                    self.growth_ticks = self.growth_ticks.saturating_add(1);
                    let events = self.state.growth_tick(self.clock.now_ms(), &timing, &mut self.rng);
                    if !events.is_empty() {
                        callback.on_events(&events, &self.state);
                    }
                }

                () = tokio::time::sleep_until(next_hunger), if beta => {
                    let events = self.state.hunger_tick();
                    next_hunger = self.next_hunger_deadline();
                    if !events.is_empty() {
                        callback.on_events(&events, &self.state);
                    }
                }

                Some(outcome) = advice_rx.recv() => {
                    self.finish_advice(outcome, callback);
                }

                received = intents.recv() => {
                    let Some(intent) = received else {
                        return Ok(Flow::Stop(EndReason::InputClosed));
                    };
                    self.handle_intent(intent, advice_tx, callback);
                }

                _ = autosave.tick(), if autosave_ms > 0 => {
                    debug!(total_days = self.state.calendar.total_days(), "Autosave");
                    callback.on_autosave(&self.state);
                }
            }
        }
    }

    fn next_hunger_deadline(&self) -> Instant {
        let interval = self.state.hunger_interval_ms(&self.config.timing).max(1);
        deadline_after(Duration::from_millis(interval))
    }

    fn handle_intent(
        &mut self,
        intent: Intent,
        advice_tx: &mpsc::Sender<Result<String, AdvisoryError>>,
        callback: &mut dyn FarmCallback,
    ) {
        self.intents_received = self.intents_received.saturating_add(1);
        let events = self
            .state
            .apply_intent(intent, self.clock.now_ms(), &mut self.rng);
        if events.is_empty() {
            return;
        }
        callback.on_events(&events, &self.state);
        if events.contains(&FarmEvent::AdviceRequested) {
            self.spawn_advice(advice_tx, callback);
        }
    }

    fn spawn_advice(
        &mut self,
        advice_tx: &mpsc::Sender<Result<String, AdvisoryError>>,
        callback: &mut dyn FarmCallback,
    ) {
        if !self.config.advisory.enabled {
            let outcome = Err(AdvisoryError::Backend {
                message: "advisory is disabled".to_owned(),
            });
            self.finish_advice(outcome, callback);
            return;
        }
        let timeout_ms = self.config.advisory.timeout_ms;
        let call = self.advisor.advise(self.state.advisory_context());
        let tx = advice_tx.clone();
        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(Duration::from_millis(timeout_ms), call).await
            {
                Ok(result) => result,
                Err(_elapsed) => Err(AdvisoryError::Timeout { timeout_ms }),
            };
            if tx.send(outcome).await.is_err() {
                debug!("Advice arrived after the farm stopped");
            }
        });
    }

    fn finish_advice(
        &mut self,
        outcome: Result<String, AdvisoryError>,
        callback: &mut dyn FarmCallback,
    ) {
        let events = self.state.complete_advice(outcome);
        callback.on_events(&events, &self.state);
    }
}

/// The instant `delay` from now, saturating at now.
fn deadline_after(delay: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(delay).unwrap_or(now)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_types::{CropType, Field, PlotState, Season};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::advisory::StubAdvisor;
    use crate::clock::TokioClock;

    #[derive(Default)]
    struct Recorder {
        events: Vec<FarmEvent>,
        saves: usize,
    }

    impl FarmCallback for Recorder {
        fn on_events(&mut self, events: &[FarmEvent], _state: &FarmState) {
            self.events.extend_from_slice(events);
        }

        fn on_autosave(&mut self, _state: &FarmState) {
            self.saves = self.saves.saturating_add(1);
        }
    }

    fn config() -> FarmConfig {
        let mut config = FarmConfig::default();
        config.timing.day_duration_ms = 10_000;
        config.timing.growth_tick_ms = 1_000;
        config.persistence.autosave_interval_ms = 5_000;
        config
    }

    fn runner(state: FarmState, control: Arc<PlayControl>) -> FarmRunner<SmallRng> {
        FarmRunner::new(
            state,
            config(),
            SmallRng::seed_from_u64(5),
            Arc::new(TokioClock::starting_at(0)),
            Arc::new(StubAdvisor::new()),
            control,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn days_advance_on_schedule() {
        let control = Arc::new(PlayControl::new());
        let (tx, rx) = mpsc::channel(8);
        let run = runner(FarmState::default(), Arc::clone(&control));
        let stopper = Arc::clone(&control);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(35_500)).await;
            stopper.request_stop();
        });
        let mut recorder = Recorder::default();
        let outcome = run.run(rx, &mut recorder).await.unwrap();
        drop(tx);

        assert_eq!(outcome.reason, EndReason::Stopped);
        assert_eq!(outcome.days_advanced, 3);
        assert_eq!(outcome.state.calendar.total_days(), 60);
        assert_eq!(recorder.saves, 7);
        assert!(outcome.growth_ticks >= 30);
    }

    #[tokio::test(start_paused = true)]
    async fn planted_crop_is_harvested_by_ticks() {
        let control = Arc::new(PlayControl::new());
        let (tx, rx) = mpsc::channel(8);
        let mut farm = FarmState::default();
        farm.greenhouse_built = true;
        let mut config = config();
        config.timing.day_duration_ms = 1_000_000;
        let run = FarmRunner::new(
            farm,
            config,
            SmallRng::seed_from_u64(5),
            Arc::new(TokioClock::starting_at(0)),
            Arc::new(StubAdvisor::new()),
            Arc::clone(&control),
        );
        tx.send(Intent::PlantSeed {
            field: Field::Greenhouse,
            plot_index: 0,
            crop: CropType::Carrot,
        })
        .await
        .unwrap();
        let stopper = Arc::clone(&control);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(63_500)).await;
            stopper.request_stop();
        });
        let mut recorder = Recorder::default();
        let outcome = run.run(rx, &mut recorder).await.unwrap();

        assert_eq!(outcome.state.greenhouse_plots[0].state, PlotState::Empty);
        assert!(outcome.state.money > 50);
        assert!(
            recorder
                .events
                .iter()
                .any(|e| matches!(e, FarmEvent::CropHarvested { .. }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_day_timer() {
        let control = Arc::new(PlayControl::new());
        let (_tx, rx) = mpsc::channel(8);
        let run = runner(FarmState::default(), Arc::clone(&control));
        let driver = Arc::clone(&control);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5_000)).await;
            driver.pause();
            tokio::time::sleep(Duration::from_millis(60_000)).await;
            driver.request_stop();
        });
        let outcome = run.run(rx, &mut NoOpCallback).await.unwrap();
        assert_eq!(outcome.days_advanced, 0);
        assert!(outcome.growth_ticks <= 5);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_ends_run() {
        let control = Arc::new(PlayControl::new());
        let (tx, rx) = mpsc::channel(1);
        drop(tx);
        let outcome = runner(FarmState::default(), control)
            .run(rx, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(outcome.reason, EndReason::InputClosed);
    }

    #[tokio::test(start_paused = true)]
    async fn advice_round_trip_sets_marker() {
        let control = Arc::new(PlayControl::new());
        let (tx, rx) = mpsc::channel(8);
        let run = runner(
            FarmState::new_game("A", GameMode::Normal, Season::Spring, 0),
            Arc::clone(&control),
        );
        tx.send(Intent::RequestAdvice).await.unwrap();
        let stopper = Arc::clone(&control);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            stopper.request_stop();
        });
        let mut recorder = Recorder::default();
        let outcome = run.run(rx, &mut recorder).await.unwrap();

        assert_eq!(outcome.state.advisory.last_advice_day, 57);
        assert!(outcome.state.advisory.message.is_some());
        assert!(recorder.events.iter().any(|e| matches!(
            e,
            FarmEvent::AdviceReceived {
                fallback: false,
                ..
            }
        )));
    }
}
