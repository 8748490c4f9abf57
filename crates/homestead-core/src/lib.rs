//! Calendar, farm state, day and growth cycles, and scheduling for the
//! Homestead farm simulation.
//!
//! This crate owns the [`FarmState`] aggregate and every operation that
//! mutates it. Each operation returns the [`FarmEvent`]s it produced; the
//! presentation layer renders from those and never computes outcomes.
//!
//! # Modules
//!
//! - [`advisory`] -- [`AdvisorySource`] trait, [`StubAdvisor`] and the
//!   once-per-day gate.
//! - [`calendar`] -- Day counter, derived year/month/season, time of day.
//! - [`clock`] -- Wall-clock sources for the scheduler.
//! - [`config`] -- Configuration loading from `homestead-config.yaml`.
//! - [`day`] -- The day-boundary cascade.
//! - [`intents`] -- Intent dispatch and refusal reasons.
//! - [`operator`] -- Play/pause/stop control.
//! - [`runner`] -- The async scheduler.
//! - [`snapshot`] -- Snapshot encoding, migrations and fallback.
//! - [`state`] -- The farm state aggregate.
//! - [`tick`] -- Growth tick with auto-harvest, and hunger drain.
//!
//! [`FarmEvent`]: homestead_types::FarmEvent
//! [`AdvisorySource`]: advisory::AdvisorySource
//! [`StubAdvisor`]: advisory::StubAdvisor

pub mod advisory;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod day;
pub mod intents;
pub mod operator;
pub mod runner;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use state::FarmState;

// Re-export primary types at crate root.
pub use advisory::{AdvisoryContext, AdvisoryError, AdvisorySource, StubAdvisor, FALLBACK_MESSAGE};
pub use calendar::{Calendar, CalendarError};
pub use clock::{Clock, SystemClock, TokioClock};
pub use config::{ConfigError, FarmConfig, LogFormat};
pub use intents::IntentError;
pub use operator::{PlayControl, PlayState};
pub use runner::{EndReason, FarmCallback, FarmRunner, NoOpCallback, RunOutcome, RunnerError};
pub use snapshot::SnapshotError;
