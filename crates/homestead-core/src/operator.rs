//! Play-state control shared between the scheduler and its driver.
//!
//! The engine binary (or a test) holds a [`PlayControl`] handle and flips
//! the farm between playing, paused and stopped. The scheduler subscribes
//! to changes: pausing cancels the pending day boundary and halts the
//! growth and hunger timers; stopping ends the run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Whether the simulation is advancing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    /// Timers are running.
    #[default]
    Playing,
    /// Timers are cancelled until resumed.
    Paused,
    /// The run is over. Terminal.
    Stopped,
}

/// Shared play-state handle.
#[derive(Debug)]
pub struct PlayControl {
    state: watch::Sender<PlayState>,
    started_at: DateTime<Utc>,
}

impl Default for PlayControl {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayControl {
    /// A control in the playing state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(PlayState::Playing);
        Self {
            state,
            started_at: Utc::now(),
        }
    }

    /// Current play state.
    pub fn state(&self) -> PlayState {
        *self.state.borrow()
    }

    /// Whether the simulation is paused.
    pub fn is_paused(&self) -> bool {
        self.state() == PlayState::Paused
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.state() == PlayState::Stopped
    }

    /// Pause. Ignored once stopped.
    pub fn pause(&self) {
        self.transition(PlayState::Paused);
    }

    /// Resume. Ignored once stopped.
    pub fn resume(&self) {
        self.transition(PlayState::Playing);
    }

    /// Request a clean stop.
    pub fn request_stop(&self) {
        self.state.send_replace(PlayState::Stopped);
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<PlayState> {
        self.state.subscribe()
    }

    /// Wall-clock time the control was created.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds since the control was created.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    fn transition(&self, next: PlayState) {
        self.state.send_if_modified(|current| {
            if *current == PlayState::Stopped || *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_playing() {
        let control = PlayControl::new();
        assert_eq!(control.state(), PlayState::Playing);
        assert!(!control.is_paused());
        assert!(!control.is_stop_requested());
    }

    #[test]
    fn pause_and_resume() {
        let control = PlayControl::new();
        control.pause();
        assert!(control.is_paused());
        control.resume();
        assert_eq!(control.state(), PlayState::Playing);
    }

    #[test]
    fn stop_is_terminal() {
        let control = PlayControl::new();
        control.request_stop();
        control.resume();
        control.pause();
        assert!(control.is_stop_requested());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let control = PlayControl::new();
        let mut rx = control.subscribe();
        control.pause();
        rx.changed().await.ok();
        assert_eq!(*rx.borrow(), PlayState::Paused);
    }

    #[test]
    fn redundant_transition_does_not_notify() {
        let control = PlayControl::new();
        let rx = control.subscribe();
        control.resume();
        assert!(!rx.has_changed().unwrap_or(true));
    }
}
