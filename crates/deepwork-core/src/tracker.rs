//! The tracker: single owner of all tracker state.
//!
//! [`Tracker::init`] loads the persisted durations, session log and streak
//! from the key-value store. From then on every mutation goes through the
//! tracker, which writes the affected keys back immediately. There is no
//! teardown; state is simply dropped on exit.
//!
//! Only one of the two timers may be active at a time. Starting either while
//! the other is running or paused is a no-op.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDay, Clock};
use crate::cue::CompletionCue;
use crate::events::Event;
use crate::sessions::{Session, SessionLog};
use crate::stats::{self, Summary};
use crate::storage::kv::{keys, read_parsed, KeyValueStore};
use crate::storage::StopPolicy;
use crate::timer::{
    elapsed_minutes, ClockDuration, CountdownTimer, StreakState, TickSource, TimerConfig,
    TimerKind, TimerPhase, MAX_BREAK_MINUTES, MAX_GOAL_MINUTES, MAX_WORK_MINUTES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTimer {
    None,
    Work,
    Break,
}

/// Everything the tracker persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub config: TimerConfig,
    pub log: SessionLog,
    pub streak: StreakState,
}

impl TrackerState {
    /// Read state from the store. Absent or malformed values become defaults,
    /// and a streak whose last credit is more than a day before `today` is
    /// shown as zero.
    pub fn load(store: &dyn KeyValueStore, today: CalendarDay) -> Self {
        let config = TimerConfig::load(store);
        let log = store
            .get(keys::SESSIONS)
            .map(|raw| SessionLog::from_json(&raw))
            .unwrap_or_default();
        let count = read_parsed::<u32>(store, keys::STREAK).unwrap_or(0);
        let last_credited = read_parsed::<CalendarDay>(store, keys::LAST_STREAK_DATE);
        let streak = StreakState::new(count, last_credited).refreshed(today);

        Self {
            config,
            log,
            streak,
        }
    }
}

pub struct Tracker {
    state: TrackerState,
    work: CountdownTimer,
    rest: CountdownTimer,
    stop_policy: StopPolicy,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    cue: Box<dyn CompletionCue>,
}

impl Tracker {
    pub fn init(
        store: impl KeyValueStore + 'static,
        clock: impl Clock + 'static,
        cue: impl CompletionCue + 'static,
    ) -> Self {
        let today = clock.today();
        let state = TrackerState::load(&store, today);
        tracing::debug!(
            sessions = state.log.len(),
            streak = state.streak.count,
            %today,
            "tracker initialized"
        );
        Self {
            state,
            work: CountdownTimer::new(TimerKind::Work),
            rest: CountdownTimer::new(TimerKind::Break),
            stop_policy: StopPolicy::default(),
            store: Box::new(store),
            clock: Box::new(clock),
            cue: Box::new(cue),
        }
    }

    pub fn with_stop_policy(mut self, policy: StopPolicy) -> Self {
        self.stop_policy = policy;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn config(&self) -> &TimerConfig {
        &self.state.config
    }

    pub fn log(&self) -> &SessionLog {
        &self.state.log
    }

    pub fn streak(&self) -> &StreakState {
        &self.state.streak
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn today(&self) -> CalendarDay {
        self.clock.today()
    }

    pub fn timer(&self, kind: TimerKind) -> &CountdownTimer {
        match kind {
            TimerKind::Work => &self.work,
            TimerKind::Break => &self.rest,
        }
    }

    pub fn active_timer(&self) -> ActiveTimer {
        if self.work.is_active() {
            ActiveTimer::Work
        } else if self.rest.is_active() {
            ActiveTimer::Break
        } else {
            ActiveTimer::None
        }
    }

    /// Tick sources that should currently be delivering ticks.
    pub fn tick_sources(&self) -> Vec<TickSource> {
        [&self.work, &self.rest]
            .into_iter()
            .filter(|t| t.phase() == TimerPhase::Running)
            .filter_map(|t| t.tick_source())
            .collect()
    }

    pub fn snapshot(&self, kind: TimerKind) -> Event {
        self.timer(kind).snapshot()
    }

    pub fn summary(&self) -> Summary {
        stats::summary(
            &self.state.log,
            &self.state.streak,
            self.clock.today(),
            self.state.config.daily_goal,
        )
    }

    // ── Timer commands ───────────────────────────────────────────────

    pub fn start_work(&mut self) -> Option<Event> {
        if self.rest.is_active() {
            tracing::debug!("start work ignored: break timer active");
            return None;
        }
        self.work.start(self.state.config.work_duration.total_secs())
    }

    pub fn start_break(&mut self) -> Option<Event> {
        if self.work.is_active() {
            tracing::debug!("start break ignored: work timer active");
            return None;
        }
        self.rest.start(self.state.config.break_duration.total_secs())
    }

    pub fn pause(&mut self, kind: TimerKind) -> Option<Event> {
        self.timer_mut(kind).pause()
    }

    pub fn resume(&mut self, kind: TimerKind) -> Option<Event> {
        self.timer_mut(kind).resume()
    }

    /// Terminate a timer early. Under [`StopPolicy::CreditElapsed`] a work
    /// run that covered at least one rounded minute is recorded. The break
    /// is never auto-started after a stop.
    pub fn stop(&mut self, kind: TimerKind) -> Vec<Event> {
        let total_secs = self.timer(kind).total_secs();
        let Some(stopped) = self.timer_mut(kind).stop() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let credit = match (&stopped, kind, self.stop_policy) {
            (
                Event::TimerStopped { remaining_secs, .. },
                TimerKind::Work,
                StopPolicy::CreditElapsed,
            ) => Some(elapsed_minutes(total_secs, *remaining_secs)),
            _ => None,
        };
        events.push(stopped);
        if let Some(minutes) = credit.filter(|m| *m > 0) {
            events.extend(self.record_session(minutes));
        }
        events
    }

    /// Deliver one elapsed second from `source`.
    ///
    /// When the work timer completes this records the session, credits the
    /// streak, plays the cue and starts the break timer, in that order.
    pub fn tick(&mut self, source: TickSource) -> Vec<Event> {
        let kind = source.timer();
        let Some(completed) = self.timer_mut(kind).tick(source) else {
            return Vec::new();
        };

        let mut events = vec![completed];
        match kind {
            TimerKind::Work => {
                let minutes = elapsed_minutes(self.work.total_secs(), self.work.remaining_secs());
                events.extend(self.record_session(minutes));
                self.cue.play(TimerKind::Work);
                events.extend(self.start_break());
            }
            TimerKind::Break => {
                self.cue.play(TimerKind::Break);
            }
        }
        events
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Set the work duration, clamped to 0..=999 min and 0..=59 s.
    /// A running timer keeps its current run.
    pub fn set_work_duration(&mut self, minutes: u32, seconds: u32) -> ClockDuration {
        let value = ClockDuration::clamped(minutes, seconds, MAX_WORK_MINUTES);
        self.state.config.work_duration = value;
        self.state.config.save_work(self.store.as_mut());
        value
    }

    /// Set the break duration, clamped to 0..=60 min and 0..=59 s.
    pub fn set_break_duration(&mut self, minutes: u32, seconds: u32) -> ClockDuration {
        let value = ClockDuration::clamped(minutes, seconds, MAX_BREAK_MINUTES);
        self.state.config.break_duration = value;
        self.state.config.save_break(self.store.as_mut());
        value
    }

    /// Set the daily goal, clamped to 0..=480 min and 0..=59 s.
    pub fn set_daily_goal(&mut self, minutes: u32, seconds: u32) -> ClockDuration {
        let value = ClockDuration::clamped(minutes, seconds, MAX_GOAL_MINUTES);
        self.state.config.daily_goal = value;
        self.state.config.save_goal(self.store.as_mut());
        value
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn timer_mut(&mut self, kind: TimerKind) -> &mut CountdownTimer {
        match kind {
            TimerKind::Work => &mut self.work,
            TimerKind::Break => &mut self.rest,
        }
    }

    /// Append a session for today, persist the log, then credit the streak.
    fn record_session(&mut self, minutes: u32) -> Vec<Event> {
        let today = self.clock.today();
        let at = self.clock.now();
        let mut events = Vec::with_capacity(2);

        self.state.log.append(Session::new(today, minutes));
        self.store.set(keys::SESSIONS, &self.state.log.to_json());
        tracing::info!(%today, minutes, "session recorded");
        events.push(Event::SessionRecorded {
            date: today,
            minutes,
            at,
        });

        if let Some(next) = self.state.streak.credit(&self.state.log, today) {
            self.state.streak = next;
            self.store.set(keys::STREAK, &next.count.to_string());
            self.store.set(keys::LAST_STREAK_DATE, &today.to_string());
            tracing::info!(count = next.count, %today, "streak credited");
            events.push(Event::StreakCredited {
                count: next.count,
                date: today,
                at,
            });
        }
        events
    }
}
