use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDay;
use crate::timer::{TimerKind, TimerPhase};

/// Every state change in the tracker produces an Event.
/// Front-ends print or render them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        timer: TimerKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        timer: TimerKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        timer: TimerKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Early termination. `remaining_secs` is what was left when stopped.
    TimerStopped {
        timer: TimerKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        timer: TimerKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        date: CalendarDay,
        minutes: u32,
        at: DateTime<Utc>,
    },
    StreakCredited {
        count: u32,
        date: CalendarDay,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        timer: TimerKind,
        phase: TimerPhase,
        remaining_secs: u64,
        total_secs: u64,
        remaining_fraction: f64,
        display: String,
        at: DateTime<Utc>,
    },
}
