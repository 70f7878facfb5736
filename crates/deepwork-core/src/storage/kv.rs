//! String-keyed, string-valued persistence adapter.
//!
//! The tracker only ever sees this trait. Writes are fire-and-forget:
//! implementations log failures instead of returning them, and reads report
//! any failure as an absent key.

use std::collections::HashMap;
use std::str::FromStr;

/// Persisted key names. These match the layout existing installs already
/// have on disk, so they must not change.
pub mod keys {
    pub const SESSIONS: &str = "deepWorkSessions";
    pub const DAILY_GOAL: &str = "dailyGoal";
    pub const GOAL_SECONDS: &str = "goalSeconds";
    pub const STREAK: &str = "streak";
    pub const LAST_STREAK_DATE: &str = "lastStreakDate";
    pub const BREAK_MINUTES: &str = "pauseMinutes";
    pub const BREAK_SECONDS: &str = "pauseSeconds";
    pub const WORK_MINUTES: &str = "workMinutes";
    pub const WORK_SECONDS: &str = "workSeconds";
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);
}

/// In-process store. Used by tests and as the fallback when the on-disk
/// store cannot be opened.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// Read and parse a value, treating absent or unparsable values as `None`.
pub fn read_parsed<T: FromStr>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring malformed stored value");
            None
        }
    }
}

/// Read an integer, falling back to `default` when absent or malformed.
pub fn read_u32_or(store: &dyn KeyValueStore, key: &str, default: u32) -> u32 {
    read_parsed(store, key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert!(store.get("test").is_none());
        store.set("test", "hello");
        assert_eq!(store.get("test").as_deref(), Some("hello"));
        store.set("test", "again");
        assert_eq!(store.get("test").as_deref(), Some("again"));
    }

    #[test]
    fn read_u32_falls_back_on_garbage() {
        let store = MemoryStore::with_entries([
            ("a", "42"),
            ("b", "forty"),
            ("c", "-3"),
            ("d", " 7 "),
        ]);
        assert_eq!(read_u32_or(&store, "a", 1), 42);
        assert_eq!(read_u32_or(&store, "b", 1), 1);
        assert_eq!(read_u32_or(&store, "c", 1), 1);
        assert_eq!(read_u32_or(&store, "d", 1), 7);
        assert_eq!(read_u32_or(&store, "missing", 9), 9);
    }

    #[test]
    fn boxed_store_forwards() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set(keys::STREAK, "3");
        assert_eq!(read_u32_or(&store, keys::STREAK, 0), 3);
    }
}
