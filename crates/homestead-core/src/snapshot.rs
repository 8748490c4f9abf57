//! Snapshot contract: the persisted form of [`FarmState`].
//!
//! Snapshots are camelCase JSON. Sets are written as ordered lists and read
//! back into sets. Decoding runs three steps:
//!
//! 1. **Migrate** the raw JSON: the retired `"storm"` weather becomes
//!    `"heavyRain"`, and a legacy `day` counter becomes `calendar.totalDays`
//!    when the calendar has none.
//! 2. **Decode** into [`FarmState`]; missing fields take new-game defaults.
//! 3. **Normalize** bounded fields (market range, pity counter, plot
//!    invariants, minimum plot counts).

use serde_json::{Map, Value};
use tracing::warn;

use crate::state::FarmState;

/// Errors that can occur while encoding or decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot is not valid JSON or does not fit the state shape.
    #[error("malformed snapshot: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an object.
    #[error("snapshot root must be an object")]
    NotAnObject,
}

/// Serialize the farm to snapshot JSON.
pub fn encode(state: &FarmState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Decode snapshot JSON, applying migrations and normalization.
pub fn decode(json: &str) -> Result<FarmState, SnapshotError> {
    let mut value: Value = serde_json::from_str(json)?;
    let root = value.as_object_mut().ok_or(SnapshotError::NotAnObject)?;
    migrate(root);
    let mut state: FarmState = serde_json::from_value(value)?;
    state.normalize();
    Ok(state)
}

/// Restore a farm, falling back to `fallback` when there is no snapshot or
/// it cannot be decoded.
pub fn load_or_default(json: Option<&str>, fallback: impl FnOnce() -> FarmState) -> FarmState {
    let Some(json) = json else {
        return fallback();
    };
    match decode(json) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "Snapshot is corrupt, starting a new farm");
            fallback()
        }
    }
}

// ---------------------------------------------------------------------------
// Migrations
// ---------------------------------------------------------------------------

const LEGACY_STORM: &str = "storm";
const HEAVY_RAIN: &str = "heavyRain";

fn migrate(root: &mut Map<String, Value>) {
    migrate_weather(root);
    migrate_day_counter(root);
}

fn migrate_weather(root: &mut Map<String, Value>) {
    let Some(weather) = root.get_mut("weather") else {
        return;
    };
    // Older saves stored the weather as a bare string.
    if weather.is_string() {
        let current = weather.take();
        let mut object = Map::new();
        object.insert("current".to_owned(), current);
        *weather = Value::Object(object);
    }
    let current = weather.get_mut("current");
    if let Some(current) = current.filter(|c| c.as_str() == Some(LEGACY_STORM)) {
        *current = Value::String(HEAVY_RAIN.to_owned());
    }
}

fn migrate_day_counter(root: &mut Map<String, Value>) {
    let Some(day) = root.remove("day") else {
        return;
    };
    let calendar = root
        .entry("calendar")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(calendar) = calendar.as_object_mut() {
        calendar.entry("totalDays").or_insert(day);
    }
}
