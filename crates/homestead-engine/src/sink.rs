//! Scheduler callback: events out as JSON lines, autosaves to disk.

use std::io::Write;
use std::path::PathBuf;

use homestead_core::{FarmCallback, FarmState};
use homestead_types::FarmEvent;
use tracing::warn;

use crate::persist;

/// Writes every event as one JSON line and saves on the autosave cadence.
pub struct EventSink<W> {
    out: W,
    snapshot_path: PathBuf,
    events_written: u64,
}

impl<W: Write> EventSink<W> {
    /// Create a sink writing events to `out` and snapshots to
    /// `snapshot_path`.
    pub const fn new(out: W, snapshot_path: PathBuf) -> Self {
        Self {
            out,
            snapshot_path,
            events_written: 0,
        }
    }

    /// Number of events written so far.
    pub const fn events_written(&self) -> u64 {
        self.events_written
    }

    fn write_events(&mut self, events: &[FarmEvent]) -> std::io::Result<()> {
        for event in events {
            serde_json::to_writer(&mut self.out, event)?;
            self.out.write_all(b"\n")?;
            self.events_written = self.events_written.saturating_add(1);
        }
        self.out.flush()
    }
}

impl<W: Write + Send> FarmCallback for EventSink<W> {
    fn on_events(&mut self, events: &[FarmEvent], _state: &FarmState) {
        if let Err(e) = self.write_events(events) {
            warn!(error = %e, "Failed to write events");
        }
    }

    fn on_autosave(&mut self, state: &FarmState) {
        if let Err(e) = persist::write_snapshot(&self.snapshot_path, state) {
            warn!(error = %e, "Autosave failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use homestead_types::{GameMode, Season};

    use super::*;

    #[test]
    fn events_are_written_one_per_line() {
        let mut sink = EventSink::new(Vec::new(), PathBuf::from("unused.json"));
        let farm = FarmState::new_game("Sink", GameMode::Normal, Season::Spring, 0);
        sink.on_events(
            &[
                FarmEvent::MarketUpdated,
                FarmEvent::HungerChanged { hunger: 99 },
            ],
            &farm,
        );
        assert_eq!(sink.events_written(), 2);

        let text = String::from_utf8(sink.out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "hunger_changed");
        assert_eq!(second["hunger"], 99);
    }

    #[test]
    fn autosave_writes_the_snapshot() {
        let dir = std::env::temp_dir().join(format!(
            "homestead_sink_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("auto.json");
        let mut sink = EventSink::new(std::io::sink(), path.clone());
        let farm = FarmState::new_game("Auto", GameMode::Beta, Season::Winter, 0);

        sink.on_autosave(&farm);
        let json = persist::read_snapshot(&path).unwrap().unwrap();
        assert_eq!(homestead_core::snapshot::decode(&json).unwrap(), farm);

        std::fs::remove_dir_all(&dir).ok();
    }
}
