use clap::Subcommand;
use deepwork_core::stats::{
    session_length_histogram_with, trend, trend_total, week_view_with, DayTotal, TierBounds,
    WeekView, HISTOGRAM_TIERS, WEEK_TIERS,
};
use deepwork_core::{Config, SilentCue};
use serde::Serialize;

/// Roughly two centuries either way.
const MAX_WEEK_OFFSET: i64 = 10_000;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Totals, today's goal progress and streaks
    Summary,
    /// Per-day totals for the most recent active days
    Trend {
        /// Number of active days (defaults to `stats.trend_days`)
        #[arg(long)]
        days: Option<usize>,
    },
    /// Monday-first week view
    Week {
        /// Weeks relative to the current one (-1 is last week)
        #[arg(
            long,
            default_value = "0",
            allow_hyphen_values = true,
            value_parser = clap::value_parser!(i64).range(-MAX_WEEK_OFFSET..=MAX_WEEK_OFFSET)
        )]
        offset: i64,
    },
    /// Session count by length tier
    Histogram,
}

#[derive(Serialize)]
struct TrendReport {
    days: Vec<DayTotal>,
    total_minutes: u64,
}

#[derive(Serialize)]
struct WeekReport {
    #[serde(flatten)]
    week: WeekView,
    total_minutes: u64,
    scale_max: u64,
}

pub fn run(action: StatsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = super::open_tracker(config, SilentCue);
    let log = tracker.log();

    match action {
        StatsAction::Summary => super::print_json(&tracker.summary())?,
        StatsAction::Trend { days } => {
            let days = trend(log, days.unwrap_or(config.stats.trend_days));
            let total_minutes = trend_total(&days);
            super::print_json(&TrendReport {
                days,
                total_minutes,
            })?;
        }
        StatsAction::Week { offset } => {
            let tiers = TierBounds {
                medium_max: config.stats.week_medium_max_min,
                ..WEEK_TIERS
            };
            let week = week_view_with(log, offset, tracker.today(), tiers);
            let total_minutes = week.total_minutes();
            let scale_max = week.scale_max(tracker.config().daily_goal.minutes);
            super::print_json(&WeekReport {
                week,
                total_minutes,
                scale_max,
            })?;
        }
        StatsAction::Histogram => {
            let tiers = TierBounds {
                medium_max: config.stats.histogram_medium_max_min,
                ..HISTOGRAM_TIERS
            };
            super::print_json(&session_length_histogram_with(log, tiers))?;
        }
    }
    Ok(())
}
