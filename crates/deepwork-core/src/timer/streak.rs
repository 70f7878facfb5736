//! Day-continuity streak.
//!
//! The streak counts consecutive calendar days with at least one credited
//! work session. It is credited at most once per day and never decremented on
//! a missed day: a gap is only noticed on the next credited day, or by the
//! staleness check when the tracker starts.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDay;
use crate::sessions::SessionLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub count: u32,
    /// Day of the most recent session that credited the streak.
    pub last_credited: Option<CalendarDay>,
}

impl StreakState {
    pub fn new(count: u32, last_credited: Option<CalendarDay>) -> Self {
        Self {
            count,
            last_credited,
        }
    }

    /// Credit `today` if it has a session and has not been credited yet.
    ///
    /// Returns the new state, or `None` when nothing changes (no session
    /// today, or today already credited).
    pub fn credit(&self, log: &SessionLog, today: CalendarDay) -> Option<StreakState> {
        if !log.has_session_on(today) {
            return None;
        }
        if self.last_credited == Some(today) {
            return None;
        }

        let count = if log.has_session_on(today.pred()) || self.count == 0 {
            self.count.saturating_add(1)
        } else {
            1
        };
        Some(StreakState {
            count,
            last_credited: Some(today),
        })
    }

    /// Streak as it should be shown on `today`: zero once more than one day
    /// has passed since the last credit, or when no credit was ever recorded.
    pub fn refreshed(&self, today: CalendarDay) -> StreakState {
        match self.last_credited {
            Some(last) if today.days_since(last) <= 1 => *self,
            _ => StreakState {
                count: 0,
                last_credited: self.last_credited,
            },
        }
    }
}
