//! Headless engine for the Homestead farm simulation.
//!
//! Wires the farm scheduler to the outside world: intents arrive as JSON
//! lines on stdin, events leave as JSON lines on stdout, logs go to stderr,
//! and the farm is saved to a snapshot file on a cadence and at shutdown.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `homestead-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Restore the farm from its snapshot, or start a new game
//! 4. Seed the random source
//! 5. Pick the advisory source (LLM or stub)
//! 6. Start the stdin reader and the Ctrl-C handler
//! 7. Run the scheduler until stopped or input closes
//! 8. Save the final snapshot

mod error;
mod input;
mod persist;
mod sink;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use homestead_advisor::AdvisorConfig;
use homestead_core::config::LogFormat;
use homestead_core::{
    Clock, FarmConfig, FarmRunner, FarmState, PlayControl, SystemClock, snapshot,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::sink::EventSink;

/// Configuration file read from the working directory.
const CONFIG_PATH: &str = "homestead-config.yaml";

/// Intents buffered between the stdin reader and the scheduler.
const INTENT_BUFFER: usize = 256;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if startup, the run, or the final save fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config = load_config().context("loading configuration")?;

    // 2. Initialize structured logging.
    init_logging(&config);
    info!("homestead-engine starting");
    info!(
        farm_name = %config.farm.name,
        seed = ?config.farm.seed,
        game_mode = ?config.farm.game_mode,
        day_duration_ms = config.timing.day_duration_ms,
        growth_tick_ms = config.timing.growth_tick_ms,
        snapshot_path = %config.persistence.snapshot_path.display(),
        "Configuration loaded"
    );

    if let Err(e) = run(config).await {
        error!(error = %e, "homestead-engine failed");
        return Err(e);
    }
    Ok(())
}

async fn run(config: FarmConfig) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let snapshot_path = config.persistence.snapshot_path.clone();

    // 3. Restore or create the farm.
    let state = restore_farm(&config, clock.now_ms()).context("restoring the farm")?;
    info!(
        farm_name = %state.farm_name,
        total_days = state.calendar.total_days(),
        season = ?state.season(),
        money = state.money,
        "Farm ready"
    );

    // 4. Seed the random source.
    let rng = match config.farm.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // 5. Pick the advisory source.
    let advisor_config = AdvisorConfig::from_env().map_err(EngineError::from)?;
    let advisor =
        homestead_advisor::build_advisor(advisor_config.as_ref()).map_err(EngineError::from)?;

    // 6. Input and shutdown wiring.
    let control = Arc::new(PlayControl::new());
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
    let reader_control = Arc::clone(&control);
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            input::forward_lines(std::io::stdin().lock(), &reader_control, &intent_tx);
        })
        .context("failed to spawn the input reader")?;
    let stopper = Arc::clone(&control);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping");
            stopper.request_stop();
        }
    });

    // 7. Run the scheduler.
    let runner = FarmRunner::new(state, config, rng, clock, advisor, Arc::clone(&control));
    let mut sink = EventSink::new(std::io::stdout(), snapshot_path.clone());
    let outcome = runner.run(intent_rx, &mut sink).await.map_err(EngineError::from)?;

    // 8. Save the final snapshot.
    persist::write_snapshot(&snapshot_path, &outcome.state)?;
    info!(
        end_reason = ?outcome.reason,
        days_advanced = outcome.days_advanced,
        growth_ticks = outcome.growth_ticks,
        intents_received = outcome.intents_received,
        events_written = sink.events_written(),
        uptime_seconds = control.elapsed_seconds(),
        "homestead-engine shutdown complete"
    );
    Ok(())
}

/// Load `homestead-config.yaml`, falling back to defaults when absent.
fn load_config() -> Result<FarmConfig, EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok(FarmConfig::from_file(path)?)
    } else {
        let mut config = FarmConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// Install the tracing subscriber on stderr. `RUST_LOG` wins over the
/// configured level.
fn init_logging(config: &FarmConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Decode the snapshot on disk, or start a new game from the config.
fn restore_farm(config: &FarmConfig, now_ms: i64) -> Result<FarmState, EngineError> {
    let json = persist::read_snapshot(&config.persistence.snapshot_path)?;
    if json.is_none() {
        info!("No snapshot found, starting a new farm");
    }
    Ok(snapshot::load_or_default(json.as_deref(), || {
        FarmState::new_game(
            &config.farm.name,
            config.farm.game_mode,
            config.farm.starting_season,
            now_ms,
        )
    }))
}
