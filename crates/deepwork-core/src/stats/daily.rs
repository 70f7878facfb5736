//! Per-day totals and the recent-activity trend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDay;
use crate::sessions::SessionLog;

/// Default length of the trend view, in active days.
pub const TREND_DAYS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: CalendarDay,
    pub total_minutes: u64,
}

/// Sum of minutes per day that has at least one session, date ascending.
pub fn daily_totals(log: &SessionLog) -> Vec<DayTotal> {
    let mut totals: BTreeMap<CalendarDay, u64> = BTreeMap::new();
    for session in log.iter() {
        *totals.entry(session.date).or_insert(0) += session.minutes as u64;
    }
    totals
        .into_iter()
        .map(|(date, total_minutes)| DayTotal {
            date,
            total_minutes,
        })
        .collect()
}

/// The most recent `days` entries of [`daily_totals`]. Days without sessions
/// do not occupy a slot.
pub fn trend(log: &SessionLog, days: usize) -> Vec<DayTotal> {
    let mut totals = daily_totals(log);
    let skip = totals.len().saturating_sub(days);
    totals.drain(..skip);
    totals
}

pub fn trend_total(trend: &[DayTotal]) -> u64 {
    trend.iter().map(|d| d.total_minutes).sum()
}
