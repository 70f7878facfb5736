//! Statistics derived from the session log.
//!
//! Every function here is a pure function of the log and a calendar window.
//! Nothing is cached and nothing mutates the log, so they are safe to call on
//! every render.

mod daily;
mod histogram;
mod summary;
mod tiers;
mod weekly;

pub use daily::{daily_totals, trend, trend_total, DayTotal, TREND_DAYS};
pub use histogram::{session_length_histogram, session_length_histogram_with, HistogramBucket};
pub use summary::{format_total, goal_progress_pct, longest_streak, summary, Summary};
pub use tiers::{Tier, TierBounds, HISTOGRAM_TIERS, WEEK_TIERS};
pub use weekly::{week_start, week_view, week_view_with, DaySummary, WeekView};
