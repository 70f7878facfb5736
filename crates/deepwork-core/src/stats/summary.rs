use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDay;
use crate::sessions::SessionLog;
use crate::timer::{ClockDuration, StreakState};

/// Headline numbers for the statistics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_minutes: u64,
    /// `2h 5m`, or `45m` under an hour.
    pub total_label: String,
    pub session_count: usize,
    pub today_minutes: u64,
    /// Today's minutes against the daily goal. Not capped at 100.
    pub goal_progress_pct: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

pub fn summary(
    log: &SessionLog,
    streak: &StreakState,
    today: CalendarDay,
    daily_goal: ClockDuration,
) -> Summary {
    let total_minutes = log.total_minutes();
    let today_minutes = log.minutes_on(today);
    Summary {
        total_minutes,
        total_label: format_total(total_minutes),
        session_count: log.len(),
        today_minutes,
        goal_progress_pct: goal_progress_pct(today_minutes, daily_goal),
        current_streak: streak.refreshed(today).count,
        longest_streak: longest_streak(log),
    }
}

pub fn format_total(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}

/// A zero goal counts as met.
pub fn goal_progress_pct(minutes: u64, goal: ClockDuration) -> u32 {
    let goal_secs = goal.total_secs();
    if goal_secs == 0 {
        return 100;
    }
    let pct = minutes.saturating_mul(60).saturating_mul(100) / goal_secs;
    u32::try_from(pct).unwrap_or(u32::MAX)
}

/// Longest run of consecutive calendar days that each have a session.
pub fn longest_streak(log: &SessionLog) -> u32 {
    let mut days: Vec<CalendarDay> = log.iter().map(|s| s.date).collect();
    days.sort();
    days.dedup();

    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev: Option<CalendarDay> = None;
    for day in days {
        run = match prev {
            Some(p) if day.days_since(p) == 1 => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}
