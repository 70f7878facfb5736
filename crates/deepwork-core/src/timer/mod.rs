mod countdown;
mod settings;
mod streak;

pub use countdown::{
    elapsed_minutes, format_clock, CountdownTimer, TickSource, TimerKind, TimerPhase,
};
pub use settings::{
    ClockDuration, TimerConfig, MAX_BREAK_MINUTES, MAX_GOAL_MINUTES, MAX_SECONDS,
    MAX_WORK_MINUTES,
};
pub use streak::StreakState;
