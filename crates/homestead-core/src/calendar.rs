//! Farm calendar and day-boundary timing.
//!
//! The calendar is the single source of truth for simulated time. It stores
//! only the monotonic day counter and the wall-clock instant the current day
//! began; year, month, day of month, season and time of day are all derived.
//!
//! A year has 12 months of 28 days (336 days). Seasons follow the month:
//! spring is months 3-5, summer 6-8, autumn 9-11, winter 12, 1 and 2.

use homestead_types::{Season, TimeOfDay};
use serde::{Deserialize, Serialize};

/// Days in one calendar month.
pub const DAYS_PER_MONTH: u64 = 28;

/// Months in one calendar year.
pub const MONTHS_PER_YEAR: u64 = 12;

/// Days in one calendar year.
pub const DAYS_PER_YEAR: u64 = DAYS_PER_MONTH.saturating_mul(MONTHS_PER_YEAR);

/// Day progress before which it is sunrise.
pub const SUNRISE_END: f64 = 0.10;

/// Day progress before which it is full day.
pub const DAY_END: f64 = 0.75;

/// Default day progress at which night begins.
pub const DEFAULT_NIGHT_START: f64 = 0.85;

/// Errors that can occur during calendar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u64::MAX")]
    DayOverflow,
}

/// Day counter plus the start of the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Calendar {
    /// Days since the farm began, starting at 1.
    total_days: u64,
    /// Wall-clock epoch milliseconds when the current day began.
    day_start_ms: i64,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::starting_in(Season::Spring, 0)
    }
}

impl Calendar {
    /// A calendar on the first day of `season`'s first month.
    pub const fn starting_in(season: Season, now_ms: i64) -> Self {
        // First day of months 3, 6, 9 and 12.
        let total_days = match season {
            Season::Spring => 57,
            Season::Summer => 141,
            Season::Autumn => 225,
            Season::Winter => 309,
        };
        Self {
            total_days,
            day_start_ms: now_ms,
        }
    }

    /// Restore from saved parts. A zero day counter is raised to 1.
    pub fn from_parts(total_days: u64, day_start_ms: i64) -> Self {
        Self {
            total_days: total_days.max(1),
            day_start_ms,
        }
    }

    /// Start the next day at `now_ms`. Returns the new day counter.
    pub fn advance(&mut self, now_ms: i64) -> Result<u64, CalendarError> {
        self.total_days = self
            .total_days
            .checked_add(1)
            .ok_or(CalendarError::DayOverflow)?;
        self.day_start_ms = now_ms;
        Ok(self.total_days)
    }

    /// Days since the farm began.
    pub const fn total_days(&self) -> u64 {
        self.total_days
    }

    /// Wall-clock start of the current day.
    pub const fn day_start_ms(&self) -> i64 {
        self.day_start_ms
    }

    const fn day_index(&self) -> u64 {
        self.total_days.saturating_sub(1)
    }

    /// Calendar year, starting at 1.
    pub fn year(&self) -> u64 {
        self.day_index()
            .checked_div(DAYS_PER_YEAR)
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Month of the year, 1-12.
    pub fn month(&self) -> u32 {
        let within_year = self.day_index().checked_rem(DAYS_PER_YEAR).unwrap_or(0);
        let month = within_year
            .checked_div(DAYS_PER_MONTH)
            .unwrap_or(0)
            .saturating_add(1);
        u32::try_from(month).unwrap_or(1)
    }

    /// Day of the month, 1-28.
    pub fn day_of_month(&self) -> u32 {
        let day = self
            .day_index()
            .checked_rem(DAYS_PER_MONTH)
            .unwrap_or(0)
            .saturating_add(1);
        u32::try_from(day).unwrap_or(1)
    }

    /// Season of the current month.
    pub fn season(&self) -> Season {
        Season::for_month(self.month())
    }

    /// Fraction of the current day elapsed, clamped to `[0, 1]`.
    pub fn day_progress(&self, now_ms: i64, day_duration_ms: i64) -> f64 {
        if day_duration_ms <= 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.day_start_ms).max(0);
        #[allow(clippy::cast_precision_loss)]
        // Millisecond spans within a day are far below 2^52.
        let progress = elapsed as f64 / day_duration_ms as f64;
        progress.clamp(0.0, 1.0)
    }

    /// Phase of the day.
    pub fn time_of_day(&self, now_ms: i64, day_duration_ms: i64, night_start: f64) -> TimeOfDay {
        let p = self.day_progress(now_ms, day_duration_ms);
        if p < SUNRISE_END {
            TimeOfDay::Sunrise
        } else if p < DAY_END {
            TimeOfDay::Day
        } else if p < night_start {
            TimeOfDay::Sunset
        } else {
            TimeOfDay::Night
        }
    }

    /// Whether outdoor growth is suspended for the night.
    pub fn is_night(&self, now_ms: i64, day_duration_ms: i64, night_start: f64) -> bool {
        self.time_of_day(now_ms, day_duration_ms, night_start) == TimeOfDay::Night
    }

    /// Milliseconds until the next day should begin, floored at zero.
    ///
    /// Time that passed while the process was not running counts, so a
    /// resumed farm neither skips nor repeats a day.
    pub fn remaining_until_next_day(&self, now_ms: i64, day_duration_ms: i64) -> i64 {
        let elapsed = now_ms.saturating_sub(self.day_start_ms);
        day_duration_ms.saturating_sub(elapsed).max(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn season_starts_on_first_day_of_first_month() {
        assert_eq!(Calendar::starting_in(Season::Spring, 0).total_days(), 57);
        assert_eq!(Calendar::starting_in(Season::Summer, 0).total_days(), 141);
        assert_eq!(Calendar::starting_in(Season::Autumn, 0).total_days(), 225);
        assert_eq!(Calendar::starting_in(Season::Winter, 0).total_days(), 309);
        for season in Season::ALL {
            let cal = Calendar::starting_in(season, 0);
            assert_eq!(cal.season(), season);
            assert_eq!(cal.day_of_month(), 1);
            assert_eq!(cal.year(), 1);
        }
    }

    #[test]
    fn day_one_is_january_first() {
        let cal = Calendar::from_parts(1, 0);
        assert_eq!(cal.year(), 1);
        assert_eq!(cal.month(), 1);
        assert_eq!(cal.day_of_month(), 1);
        assert_eq!(cal.season(), Season::Winter);
    }

    #[test]
    fn year_rolls_over_after_336_days() {
        let cal = Calendar::from_parts(336, 0);
        assert_eq!(cal.year(), 1);
        assert_eq!(cal.month(), 12);
        assert_eq!(cal.day_of_month(), 28);

        let next = Calendar::from_parts(337, 0);
        assert_eq!(next.year(), 2);
        assert_eq!(next.month(), 1);
        assert_eq!(next.day_of_month(), 1);
    }

    #[test]
    fn zero_day_is_raised() {
        assert_eq!(Calendar::from_parts(0, 0).total_days(), 1);
    }

    #[test]
    fn advance_moves_day_and_start() {
        let mut cal = Calendar::from_parts(84, 1_000);
        assert_eq!(cal.season(), Season::Spring);
        assert_eq!(cal.advance(16_000).unwrap(), 85);
        assert_eq!(cal.day_start_ms(), 16_000);
        assert_eq!(cal.month(), 4);
    }

    #[test]
    fn advance_overflow_is_reported() {
        let mut cal = Calendar::from_parts(u64::MAX, 0);
        assert_eq!(cal.advance(1), Err(CalendarError::DayOverflow));
    }

    #[test]
    fn time_of_day_phases() {
        let cal = Calendar::from_parts(57, 0);
        let d = 10_000;
        assert_eq!(cal.time_of_day(500, d, DEFAULT_NIGHT_START), TimeOfDay::Sunrise);
        assert_eq!(cal.time_of_day(5_000, d, DEFAULT_NIGHT_START), TimeOfDay::Day);
        assert_eq!(cal.time_of_day(8_000, d, DEFAULT_NIGHT_START), TimeOfDay::Sunset);
        assert_eq!(cal.time_of_day(9_000, d, DEFAULT_NIGHT_START), TimeOfDay::Night);
        assert!(cal.is_night(20_000, d, DEFAULT_NIGHT_START));
    }

    #[test]
    fn remaining_time_honors_downtime() {
        let cal = Calendar::from_parts(57, 1_000);
        assert_eq!(cal.remaining_until_next_day(6_000, 15_000), 10_000);
        assert_eq!(cal.remaining_until_next_day(100_000, 15_000), 0);
    }
}
