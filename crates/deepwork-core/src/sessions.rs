//! Append-only log of completed work sessions.
//!
//! The log is the source of truth for every derived statistic. Entries are
//! kept in completion order, which is not necessarily date order.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDay;

/// One completed work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub date: CalendarDay,
    pub minutes: u32,
}

impl Session {
    pub fn new(date: CalendarDay, minutes: u32) -> Self {
        Self { date, minutes }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLog {
    sessions: Vec<Session>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, session: Session) {
        self.sessions.push(session);
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn has_session_on(&self, day: CalendarDay) -> bool {
        self.sessions.iter().any(|s| s.date == day)
    }

    pub fn on_day(&self, day: CalendarDay) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(move |s| s.date == day)
    }

    pub fn minutes_on(&self, day: CalendarDay) -> u64 {
        self.on_day(day).map(|s| s.minutes as u64).sum()
    }

    pub fn total_minutes(&self) -> u64 {
        self.sessions.iter().map(|s| s.minutes as u64).sum()
    }

    /// Serialize as the persisted JSON array of `{date, minutes}`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.sessions).unwrap_or_else(|_| "[]".to_string())
    }

    /// Parse the persisted JSON array.
    ///
    /// Malformed input yields an empty log. Individual entries that do not
    /// parse (bad date, negative or fractional minutes) are dropped and the
    /// rest are kept.
    pub fn from_json(raw: &str) -> Self {
        let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "stored session log is not a JSON array; starting empty"
                );
                return Self::new();
            }
        };

        let mut sessions = Vec::with_capacity(values.len());
        for value in values {
            match serde_json::from_value::<Session>(value) {
                Ok(session) => sessions.push(session),
                Err(e) => tracing::warn!(error = %e, "dropping malformed session entry"),
            }
        }
        Self { sessions }
    }
}

impl FromIterator<Session> for SessionLog {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        Self {
            sessions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    #[test]
    fn append_keeps_completion_order() {
        let mut log = SessionLog::new();
        log.append(Session::new(day("2025-02-02"), 25));
        log.append(Session::new(day("2025-02-01"), 50));
        assert_eq!(log.len(), 2);
        assert_eq!(log.sessions()[0].date, day("2025-02-02"));
        assert_eq!(log.total_minutes(), 75);
    }

    #[test]
    fn json_matches_stored_shape() {
        let log: SessionLog = vec![Session::new(day("2025-02-01"), 25)].into_iter().collect();
        assert_eq!(log.to_json(), r#"[{"date":"2025-02-01","minutes":25}]"#);
        assert_eq!(SessionLog::from_json(&log.to_json()), log);
    }

    #[test]
    fn malformed_json_is_empty() {
        assert!(SessionLog::from_json("not json").is_empty());
        assert!(SessionLog::from_json("{\"date\":1}").is_empty());
        assert!(SessionLog::from_json("").is_empty());
    }

    #[test]
    fn bad_entries_are_dropped() {
        let raw = r#"[
            {"date":"2025-02-01","minutes":25},
            {"date":"yesterday","minutes":10},
            {"date":"2025-02-01","minutes":-5},
            {"date":"2025-02-02"},
            {"date":"2025-02-03","minutes":45}
        ]"#;
        let log = SessionLog::from_json(raw);
        assert_eq!(log.len(), 2);
        assert_eq!(log.total_minutes(), 70);
    }

    #[test]
    fn per_day_queries() {
        let log: SessionLog = vec![
            Session::new(day("2025-02-01"), 25),
            Session::new(day("2025-02-02"), 30),
            Session::new(day("2025-02-01"), 15),
        ]
        .into_iter()
        .collect();
        assert!(log.has_session_on(day("2025-02-01")));
        assert!(!log.has_session_on(day("2025-02-03")));
        assert_eq!(log.minutes_on(day("2025-02-01")), 40);
        assert_eq!(log.on_day(day("2025-02-01")).count(), 2);
    }
}
