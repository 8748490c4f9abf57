//! Wall-clock sources for the scheduler.
//!
//! Farm time is epoch milliseconds. Production reads the system clock;
//! tests anchor an epoch to the tokio clock so paused virtual time drives
//! growth and day boundaries.

use chrono::Utc;
use tokio::time::Instant;

/// A source of epoch milliseconds.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Epoch milliseconds advanced by the tokio clock.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin_ms: i64,
    anchor: Instant,
}

impl TokioClock {
    /// Start counting from `origin_ms` now.
    pub fn starting_at(origin_ms: i64) -> Self {
        Self {
            origin_ms,
            anchor: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> i64 {
        let elapsed = i64::try_from(self.anchor.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.origin_ms.saturating_add(elapsed)
    }
}
