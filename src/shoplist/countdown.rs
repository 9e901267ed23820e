//! # Recurring Countdown
//!
//! A single recurring chore: each time it is done a completion stamp is
//! recorded, and the next due time is the latest completion plus a fixed
//! frequency. Before the first completion the chore is due immediately.

use crate::model::next_timestamp;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted history of completions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    #[serde(default)]
    pub completed_at_timestamps: Vec<i64>,
}

impl CountdownState {
    pub fn last_completed(&self) -> Option<i64> {
        self.completed_at_timestamps.first().copied()
    }

    /// Record a completion at `now` and return the stamp that was stored.
    pub fn mark_done(&mut self, now: i64) -> i64 {
        let stamp = next_timestamp(now, self.last_completed());
        self.completed_at_timestamps.insert(0, stamp);
        stamp
    }
}

/// Absolute interval between now and the due time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Distance {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Distance {
    fn from_millis(millis: i64) -> Self {
        let total = (millis.unsigned_abs() / 1000) as i64;
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownStatus {
    pub is_overdue: bool,
    pub due_at: i64,
    pub distance: Distance,
}

impl CountdownStatus {
    pub fn due_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.due_at)
    }
}

/// Where the countdown stands at `now` for a chore repeating every `frequency`.
pub fn status(state: &CountdownState, frequency: TimeDelta, now: i64) -> CountdownStatus {
    let due_at = match state.last_completed() {
        Some(last) => last.saturating_add(frequency.num_milliseconds()),
        None => now,
    };
    CountdownStatus {
        is_overdue: due_at < now,
        due_at,
        distance: Distance::from_millis(due_at.saturating_sub(now)),
    }
}
