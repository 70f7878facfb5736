//! Distribution of sessions across length tiers.

use serde::{Deserialize, Serialize};

use super::tiers::{Tier, TierBounds, HISTOGRAM_TIERS};
use crate::sessions::SessionLog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub name: String,
    /// `None` only for the placeholder bucket of an empty log.
    pub tier: Option<Tier>,
    pub count: usize,
    /// Share of all sessions, rounded to a whole percent.
    pub percentage: u32,
}

/// Histogram with the default bounds (short ≤30, medium 31-90, long >90).
pub fn session_length_histogram(log: &SessionLog) -> Vec<HistogramBucket> {
    session_length_histogram_with(log, HISTOGRAM_TIERS)
}

/// Three buckets in short, medium, long order. An empty log yields a single
/// "No Sessions" bucket at 100% so a pie chart still draws a full circle.
pub fn session_length_histogram_with(log: &SessionLog, tiers: TierBounds) -> Vec<HistogramBucket> {
    let total = log.len();
    if total == 0 {
        return vec![HistogramBucket {
            name: "No Sessions".to_string(),
            tier: None,
            count: 0,
            percentage: 100,
        }];
    }

    [Tier::Short, Tier::Medium, Tier::Long]
        .into_iter()
        .map(|tier| {
            let count = log
                .iter()
                .filter(|s| tiers.classify(s.minutes) == tier)
                .count();
            HistogramBucket {
                name: tiers.label(tier),
                tier: Some(tier),
                count,
                percentage: (count as f64 * 100.0 / total as f64).round() as u32,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDay;
    use crate::sessions::Session;

    fn log_of(minutes: &[u32]) -> SessionLog {
        let day: CalendarDay = "2025-05-05".parse().unwrap();
        minutes.iter().map(|m| Session::new(day, *m)).collect()
    }

    #[test]
    fn one_per_tier() {
        let buckets = session_length_histogram(&log_of(&[10, 45, 120]));
        let counts: Vec<_> = buckets.iter().map(|b| b.count).collect();
        let pcts: Vec<_> = buckets.iter().map(|b| b.percentage).collect();
        assert_eq!(counts, vec![1, 1, 1]);
        assert_eq!(pcts, vec![33, 33, 33]);
        assert_eq!(buckets[1].tier, Some(Tier::Medium));
    }

    #[test]
    fn empty_log_is_single_placeholder() {
        let buckets = session_length_histogram(&SessionLog::new());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].name, "No Sessions");
        assert_eq!(buckets[0].tier, None);
        assert_eq!(buckets[0].percentage, 100);
    }

    #[test]
    fn rounds_half_up() {
        // 1 of 8 = 12.5% -> 13
        let buckets = session_length_histogram(&log_of(&[10, 40, 40, 40, 40, 40, 40, 40]));
        assert_eq!(buckets[0].percentage, 13);
        assert_eq!(buckets[1].percentage, 88);
        assert_eq!(buckets[2].percentage, 0);
    }

    #[test]
    fn boundary_minutes() {
        let buckets = session_length_histogram(&log_of(&[30, 31, 90, 91]));
        let counts: Vec<_> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 1]);
    }
}
