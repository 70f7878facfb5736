//! # Deep Work Core Library
//!
//! This library provides the core logic for the Deep Work Tracker: a focus
//! timer that records completed sessions, keeps a day-continuity streak and
//! derives weekly statistics from the session history. Front-ends (the CLI
//! binary, or any GUI) are thin layers over the same [`Tracker`].
//!
//! ## Architecture
//!
//! - **Timer**: two instances of one countdown state machine (work and
//!   break). The caller delivers one `tick()` per elapsed second
//! - **Session log**: append-only record of completed work sessions
//! - **Streak**: credited once per day from the log
//! - **Stats**: pure aggregations (daily totals, week view, histogram)
//! - **Storage**: a string key-value store (SQLite or in-memory) plus a TOML
//!   application config
//!
//! ## Key Components
//!
//! - [`Tracker`]: owns all state and wires timer completion to the log
//! - [`CountdownTimer`]: the timer state machine
//! - [`KeyValueStore`]: persistence seam
//! - [`Clock`]: source of "today"

pub mod calendar;
pub mod cue;
pub mod error;
pub mod events;
pub mod sessions;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod tracker;

pub use calendar::{CalendarDay, Clock, FixedClock, SystemClock};
pub use cue::{CompletionCue, SilentCue};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use sessions::{Session, SessionLog};
pub use storage::{Config, Database, KeyValueStore, MemoryStore, StopPolicy};
pub use timer::{
    ClockDuration, CountdownTimer, StreakState, TickSource, TimerConfig, TimerKind, TimerPhase,
};
pub use tracker::{ActiveTimer, Tracker, TrackerState};
