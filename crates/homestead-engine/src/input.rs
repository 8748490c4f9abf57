//! JSON-lines input from stdin.
//!
//! Each line is either a play-control command (`{"type":"pause"}`,
//! `{"type":"resume"}`, `{"type":"stop"}`) or an [`Intent`]. Controls act on
//! the [`PlayControl`] directly; intents are forwarded to the scheduler.
//! End of input drops the sender, which ends the run.
//!
//! The reader runs on a plain thread: a blocking read on stdin cannot be
//! cancelled, and a detached thread does not hold the process open.

use std::io::BufRead;

use homestead_core::PlayControl;
use homestead_types::Intent;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A play-control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Stop the run.
    Stop,
}

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InputLine {
    /// A play-control command.
    Control(Control),
    /// A player intent.
    Intent(Intent),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Result<InputLine, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Read lines until end of input or until the scheduler goes away.
///
/// Blocks the calling thread; must not run on an async worker.
pub fn forward_lines<R: BufRead>(
    reader: R,
    control: &PlayControl,
    intents: &mpsc::Sender<Intent>,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read input, closing");
                return;
            }
        };
        match parse_line(&line) {
            None => {}
            Some(Ok(InputLine::Control(command))) => {
                debug!(?command, "Control command");
                match command {
                    Control::Pause => control.pause(),
                    Control::Resume => control.resume(),
                    Control::Stop => control.request_stop(),
                }
            }
            Some(Ok(InputLine::Intent(intent))) => {
                if intents.blocking_send(intent).is_err() {
                    return;
                }
            }
            Some(Err(e)) => warn!(error = %e, line = %line, "Ignoring unreadable input line"),
        }
    }
    info!("Input closed");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_core::PlayState;
    use homestead_types::{CropType, Field};

    use super::*;

    #[test]
    fn control_and_intent_lines_parse() {
        assert_eq!(
            parse_line(r#"{"type":"pause"}"#).unwrap().unwrap(),
            InputLine::Control(Control::Pause)
        );
        assert_eq!(
            parse_line(r#" {"type":"buy_greenhouse"} "#).unwrap().unwrap(),
            InputLine::Intent(Intent::BuyGreenhouse)
        );
        let plant = parse_line(
            r#"{"type":"plant_seed","field":"outdoor","plot_index":4,"crop":"carrot"}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            plant,
            InputLine::Intent(Intent::PlantSeed {
                field: Field::Outdoor,
                plot_index: 4,
                crop: CropType::Carrot,
            })
        );
    }

    #[test]
    fn blank_and_garbage_lines() {
        assert!(parse_line("   ").is_none());
        assert!(parse_line("plant everything").unwrap().is_err());
        assert!(parse_line(r#"{"type":"dance"}"#).unwrap().is_err());
    }

    #[test]
    fn lines_are_routed_until_end_of_input() {
        let control = PlayControl::new();
        let (tx, mut rx) = mpsc::channel(8);
        let input = b"{\"type\":\"pause\"}\n\n{\"type\":\"expand_farm\"}\nnonsense\n{\"type\":\"resume\"}\n";
        forward_lines(&input[..], &control, &tx);
        drop(tx);

        assert_eq!(rx.blocking_recv(), Some(Intent::ExpandFarm));
        assert_eq!(rx.blocking_recv(), None);
        assert_eq!(control.state(), PlayState::Playing);
    }

    #[test]
    fn stop_line_requests_stop() {
        let control = PlayControl::new();
        let (tx, _rx) = mpsc::channel(1);
        forward_lines(&b"{\"type\":\"stop\"}\n"[..], &control, &tx);
        assert!(control.is_stop_requested());
    }

    #[test]
    fn closed_scheduler_ends_reading() {
        let control = PlayControl::new();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let input = b"{\"type\":\"expand_farm\"}\n{\"type\":\"stop\"}\n";
        forward_lines(&input[..], &control, &tx);
        assert!(!control.is_stop_requested());
    }
}
