//! Configuration loading and typed config structures for the Homestead farm.
//!
//! The canonical configuration lives in `homestead-config.yaml` next to the
//! binary. Every field has a default, so an empty file (or no file at all)
//! yields a playable farm.

use std::path::{Path, PathBuf};

use homestead_types::{GameMode, Season};
use serde::Deserialize;

use crate::calendar::DEFAULT_NIGHT_START;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level farm configuration.
///
/// Mirrors the structure of `homestead-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FarmConfig {
    /// New-game settings.
    #[serde(default)]
    pub farm: FarmSection,

    /// Timer cadences.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Snapshot location and autosave cadence.
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Advisory collaborator toggles.
    #[serde(default)]
    pub advisory: AdvisoryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FarmConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `HOMESTEAD_SNAPSHOT_PATH` overrides `persistence.snapshot_path`
    /// - `HOMESTEAD_SEED` overrides `farm.seed`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("HOMESTEAD_SNAPSHOT_PATH") {
            self.persistence.snapshot_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("HOMESTEAD_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.farm.seed = Some(seed),
                Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring invalid HOMESTEAD_SEED"),
            }
        }
    }
}

/// New-game settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FarmSection {
    /// Farm name shown to the player.
    #[serde(default = "default_farm_name")]
    pub name: String,

    /// RNG seed. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Normal or beta (hunger) mode.
    #[serde(default)]
    pub game_mode: GameMode,

    /// Season a new farm starts in.
    #[serde(default = "default_starting_season")]
    pub starting_season: Season,
}

impl Default for FarmSection {
    fn default() -> Self {
        Self {
            name: default_farm_name(),
            seed: None,
            game_mode: GameMode::default(),
            starting_season: default_starting_season(),
        }
    }
}

/// Timer cadences, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimingConfig {
    /// Real time per farm day.
    #[serde(default = "default_day_duration_ms")]
    pub day_duration_ms: u64,

    /// Plot growth evaluation interval.
    #[serde(default = "default_growth_tick_ms")]
    pub growth_tick_ms: u64,

    /// Hunger drain interval in beta mode.
    #[serde(default = "default_hunger_tick_ms")]
    pub hunger_tick_ms: u64,

    /// Hunger drain interval during a heatwave.
    #[serde(default = "default_heatwave_hunger_tick_ms")]
    pub heatwave_hunger_tick_ms: u64,

    /// Day progress at which night begins.
    #[serde(default = "default_night_start_fraction")]
    pub night_start_fraction: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            day_duration_ms: default_day_duration_ms(),
            growth_tick_ms: default_growth_tick_ms(),
            hunger_tick_ms: default_hunger_tick_ms(),
            heatwave_hunger_tick_ms: default_heatwave_hunger_tick_ms(),
            night_start_fraction: default_night_start_fraction(),
        }
    }
}

impl TimingConfig {
    /// Day duration as signed milliseconds for timestamp math.
    pub fn day_duration_i64(&self) -> i64 {
        i64::try_from(self.day_duration_ms).unwrap_or(i64::MAX)
    }
}

/// Snapshot persistence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Where the snapshot is read and written.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Autosave interval. Zero disables autosave.
    #[serde(default = "default_autosave_interval_ms")]
    pub autosave_interval_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            autosave_interval_ms: default_autosave_interval_ms(),
        }
    }
}

/// Advisory collaborator settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdvisoryConfig {
    /// Whether advice requests are served at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Upper bound on one advisory call.
    #[serde(default = "default_advisory_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: default_advisory_timeout_ms(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_farm_name() -> String {
    "Willow Creek".to_owned()
}

const fn default_starting_season() -> Season {
    Season::Spring
}

const fn default_day_duration_ms() -> u64 {
    15_000
}

const fn default_growth_tick_ms() -> u64 {
    1_000
}

const fn default_hunger_tick_ms() -> u64 {
    5_000
}

const fn default_heatwave_hunger_tick_ms() -> u64 {
    2_500
}

const fn default_night_start_fraction() -> f64 {
    DEFAULT_NIGHT_START
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("homestead-save.json")
}

const fn default_autosave_interval_ms() -> u64 {
    10_000
}

const fn default_true() -> bool {
    true
}

const fn default_advisory_timeout_ms() -> u64 {
    20_000
}

fn default_log_level() -> String {
    "info".to_owned()
}
