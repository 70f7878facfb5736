use serde::{Deserialize, Serialize};

use crate::storage::kv::{keys, read_u32_or, KeyValueStore};

pub const MAX_WORK_MINUTES: u32 = 999;
pub const MAX_BREAK_MINUTES: u32 = 60;
pub const MAX_GOAL_MINUTES: u32 = 480;
pub const MAX_SECONDS: u32 = 59;

/// A minutes + seconds pair as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockDuration {
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockDuration {
    pub const fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Clamp minutes to `0..=max_minutes` and seconds to `0..=59`.
    pub fn clamped(minutes: u32, seconds: u32, max_minutes: u32) -> Self {
        Self {
            minutes: minutes.min(max_minutes),
            seconds: seconds.min(MAX_SECONDS),
        }
    }

    /// Uses saturating arithmetic so stored garbage cannot overflow.
    pub fn total_secs(&self) -> u64 {
        (self.minutes as u64)
            .saturating_mul(60)
            .saturating_add(self.seconds as u64)
    }
}

/// User-editable durations. Independent of any running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_duration: ClockDuration,
    pub break_duration: ClockDuration,
    pub daily_goal: ClockDuration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration: ClockDuration::new(25, 0),
            break_duration: ClockDuration::new(5, 0),
            daily_goal: ClockDuration::new(120, 0),
        }
    }
}

impl TimerConfig {
    /// Load from the store. Each absent or malformed key falls back to its
    /// own default.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            work_duration: ClockDuration::new(
                read_u32_or(store, keys::WORK_MINUTES, defaults.work_duration.minutes),
                read_u32_or(store, keys::WORK_SECONDS, defaults.work_duration.seconds),
            ),
            break_duration: ClockDuration::new(
                read_u32_or(store, keys::BREAK_MINUTES, defaults.break_duration.minutes),
                read_u32_or(store, keys::BREAK_SECONDS, defaults.break_duration.seconds),
            ),
            daily_goal: ClockDuration::new(
                read_u32_or(store, keys::DAILY_GOAL, defaults.daily_goal.minutes),
                read_u32_or(store, keys::GOAL_SECONDS, defaults.daily_goal.seconds),
            ),
        }
    }

    pub fn save_work(&self, store: &mut dyn KeyValueStore) {
        store.set(keys::WORK_MINUTES, &self.work_duration.minutes.to_string());
        store.set(keys::WORK_SECONDS, &self.work_duration.seconds.to_string());
    }

    pub fn save_break(&self, store: &mut dyn KeyValueStore) {
        store.set(keys::BREAK_MINUTES, &self.break_duration.minutes.to_string());
        store.set(keys::BREAK_SECONDS, &self.break_duration.seconds.to_string());
    }

    pub fn save_goal(&self, store: &mut dyn KeyValueStore) {
        store.set(keys::DAILY_GOAL, &self.daily_goal.minutes.to_string());
        store.set(keys::GOAL_SECONDS, &self.daily_goal.seconds.to_string());
    }
}
