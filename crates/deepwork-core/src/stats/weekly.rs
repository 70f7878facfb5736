//! Monday-first week view.
//!
//! The week start is `today - weekday(today) + 1 + 7 * offset` with Sunday
//! counted as 0. On a Sunday that lands on the following Monday; the formula
//! is kept as-is because stored history and existing users rely on it.

use serde::{Deserialize, Serialize};

use super::tiers::{Tier, TierBounds, WEEK_TIERS};
use crate::calendar::CalendarDay;
use crate::sessions::SessionLog;

const DAY_LETTERS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: String,
    pub date: CalendarDay,
    pub total_minutes: u64,
    pub session_count: usize,
    pub short_minutes: u64,
    pub medium_minutes: u64,
    pub long_minutes: u64,
    pub has_activity: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub start: CalendarDay,
    pub end: CalendarDay,
    /// e.g. `Jan 6, 2025 - Jan 12, 2025`
    pub label: String,
    pub days: Vec<DaySummary>,
}

impl WeekView {
    pub fn total_minutes(&self) -> u64 {
        self.days.iter().map(|d| d.total_minutes).sum()
    }

    /// Upper bound for a bar chart of this week: the largest day total, the
    /// daily goal, or 1, whichever is largest.
    pub fn scale_max(&self, daily_goal_min: u32) -> u64 {
        self.days
            .iter()
            .map(|d| d.total_minutes)
            .max()
            .unwrap_or(0)
            .max(daily_goal_min as u64)
            .max(1)
    }
}

/// Saturates at the ends of the date range for extreme offsets.
pub fn week_start(today: CalendarDay, offset: i64) -> CalendarDay {
    let to_monday = 1 - today.weekday_from_sunday();
    today.add_days(to_monday.saturating_add(offset.saturating_mul(7)))
}

/// Week view with the default tier bounds (medium up to 60 minutes).
pub fn week_view(log: &SessionLog, offset: i64, today: CalendarDay) -> WeekView {
    week_view_with(log, offset, today, WEEK_TIERS)
}

pub fn week_view_with(
    log: &SessionLog,
    offset: i64,
    today: CalendarDay,
    tiers: TierBounds,
) -> WeekView {
    let start = week_start(today, offset);
    let end = start.add_days(6);

    let days = DAY_LETTERS
        .iter()
        .enumerate()
        .map(|(i, letter)| {
            let date = start.add_days(i as i64);
            let mut summary = DaySummary {
                day: (*letter).to_string(),
                date,
                total_minutes: 0,
                session_count: 0,
                short_minutes: 0,
                medium_minutes: 0,
                long_minutes: 0,
                has_activity: false,
            };
            for session in log.on_day(date) {
                let minutes = session.minutes as u64;
                summary.total_minutes += minutes;
                summary.session_count += 1;
                match tiers.classify(session.minutes) {
                    Tier::Short => summary.short_minutes += minutes,
                    Tier::Medium => summary.medium_minutes += minutes,
                    Tier::Long => summary.long_minutes += minutes,
                }
            }
            summary.has_activity = summary.total_minutes > 0;
            summary
        })
        .collect();

    WeekView {
        start,
        end,
        label: format!("{} - {}", start.short_label(), end.short_label()),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::Session;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    #[test]
    fn week_starts_on_monday_midweek() {
        // Wednesday 2025-01-08 -> Monday 2025-01-06
        assert_eq!(week_start(day("2025-01-08"), 0), day("2025-01-06"));
        assert_eq!(week_start(day("2025-01-06"), 0), day("2025-01-06"));
        assert_eq!(week_start(day("2025-01-11"), 0), day("2025-01-06"));
    }

    #[test]
    fn sunday_rolls_forward() {
        // Sunday 2025-01-12 -> following Monday 2025-01-13
        assert_eq!(week_start(day("2025-01-12"), 0), day("2025-01-13"));
        assert_eq!(week_start(day("2025-01-12"), -1), day("2025-01-06"));
    }

    #[test]
    fn offsets_move_whole_weeks() {
        let today = day("2025-01-08");
        assert_eq!(week_start(today, -1), day("2024-12-30"));
        assert_eq!(week_start(today, 2), day("2025-01-20"));
    }

    #[test]
    fn extreme_offsets_saturate() {
        let today = day("2025-01-08");
        let log: SessionLog = vec![Session::new(today, 25)].into_iter().collect();

        let far = week_view(&log, 100_000_000, today);
        assert_eq!(far.days.len(), 7);
        assert_eq!(far.total_minutes(), 0);

        assert_eq!(week_start(today, i64::MAX).date(), chrono::NaiveDate::MAX);
        assert_eq!(week_start(today, i64::MIN).date(), chrono::NaiveDate::MIN);
        assert_eq!(week_view(&log, i64::MIN, today).total_minutes(), 0);
    }

    #[test]
    fn partitions_minutes_by_tier() {
        let wed = day("2025-01-08");
        let log: SessionLog = vec![
            Session::new(wed, 25),
            Session::new(wed, 45),
            Session::new(wed, 61),
            Session::new(wed, 90),
            Session::new(day("2025-01-13"), 500),
        ]
        .into_iter()
        .collect();
        let view = week_view(&log, 0, wed);
        assert_eq!(view.days.len(), 7);
        let wednesday = &view.days[2];
        assert_eq!(wednesday.day, "W");
        assert_eq!(wednesday.date, wed);
        assert_eq!(wednesday.session_count, 4);
        assert_eq!(wednesday.total_minutes, 221);
        assert_eq!(wednesday.short_minutes, 25);
        assert_eq!(wednesday.medium_minutes, 45);
        assert_eq!(wednesday.long_minutes, 151);
        assert!(wednesday.has_activity);
        assert!(!view.days[0].has_activity);
        assert_eq!(view.total_minutes(), 221);
    }

    #[test]
    fn custom_tiers_change_partition() {
        let wed = day("2025-01-08");
        let log: SessionLog = vec![Session::new(wed, 75)].into_iter().collect();
        let tiers = TierBounds {
            short_max: 30,
            medium_max: 90,
        };
        let view = week_view_with(&log, 0, wed, tiers);
        assert_eq!(view.days[2].medium_minutes, 75);
        assert_eq!(view.days[2].long_minutes, 0);
    }

    #[test]
    fn label_and_scale() {
        let wed = day("2025-01-08");
        let log: SessionLog = vec![Session::new(wed, 150)].into_iter().collect();
        let view = week_view(&log, 0, wed);
        assert_eq!(view.label, "Jan 6, 2025 - Jan 12, 2025");
        assert_eq!(view.scale_max(120), 150);
        assert_eq!(view.scale_max(200), 200);
        assert_eq!(week_view(&SessionLog::new(), 0, wed).scale_max(0), 1);
    }
}
