//! Calendar days and the injected clock.
//!
//! Sessions and streaks are keyed by a [`CalendarDay`], a date with no time
//! component. The notion of "today" always comes from a [`Clock`] so tests can
//! pin it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// A date with no time component, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Shift by a signed number of days, saturating at the ends of the
    /// supported date range.
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = if days >= 0 {
            self.0
                .checked_add_days(Days::new(days.unsigned_abs()))
                .unwrap_or(NaiveDate::MAX)
        } else {
            self.0
                .checked_sub_days(Days::new(days.unsigned_abs()))
                .unwrap_or(NaiveDate::MIN)
        };
        Self(shifted)
    }

    pub fn pred(&self) -> Self {
        self.add_days(-1)
    }

    /// Whole days from `earlier` to `self` (negative if `earlier` is later).
    pub fn days_since(&self, earlier: CalendarDay) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// Day of week with Sunday = 0 .. Saturday = 6.
    pub fn weekday_from_sunday(&self) -> i64 {
        self.0.weekday().num_days_from_sunday() as i64
    }

    /// Short label such as `Jan 5, 2025`.
    pub fn short_label(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for CalendarDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDay(s.to_string()))
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Source of wall-clock time and the current calendar day.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> CalendarDay;
}

/// Real system clock. "Today" is the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> CalendarDay {
        CalendarDay(Local::now().date_naive())
    }
}

/// A clock pinned to a settable day. Clones share the same day, so a test can
/// hand one copy to a tracker and keep another to move time forward.
#[derive(Debug, Clone)]
pub struct FixedClock {
    day: Rc<Cell<CalendarDay>>,
}

impl FixedClock {
    pub fn new(day: CalendarDay) -> Self {
        Self {
            day: Rc::new(Cell::new(day)),
        }
    }

    pub fn set(&self, day: CalendarDay) {
        self.day.set(day);
    }

    pub fn advance_days(&self, days: i64) {
        self.day.set(self.day.get().add_days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.day
            .get()
            .date()
            .and_hms_opt(12, 0, 0)
            .unwrap_or_default()
            .and_utc()
    }

    fn today(&self) -> CalendarDay {
        self.day.get()
    }
}
