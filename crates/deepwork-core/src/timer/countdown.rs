//! Countdown timer state machine.
//!
//! One type serves both the work timer and the break timer. Like the rest of
//! the core it owns no thread: an external tick source calls [`CountdownTimer::tick`]
//! once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused <-> Running) -> Idle
//!            \__________ completed / stopped __/
//! ```
//!
//! Every `start` issues a fresh [`TickSource`]. Ticks carrying any other source
//! (one from an earlier run, or one that was cancelled by `stop`) are ignored,
//! so a leaked interval can never decrement the new run.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = CountdownTimer::new(TimerKind::Work);
//! timer.start(1500);
//! let source = timer.tick_source().unwrap();
//! // Once per second:
//! timer.tick(source); // Returns Some(Event::TimerCompleted) at zero
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Work,
    Break,
}

impl TimerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TimerKind::Work => "Deep Work Time",
            TimerKind::Break => "Break Time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

/// Identity of the tick source that drives one run of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickSource {
    timer: TimerKind,
    generation: u64,
}

impl TickSource {
    pub fn timer(&self) -> TimerKind {
        self.timer
    }
}

/// Countdown timer with one-second resolution.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    kind: TimerKind,
    phase: TimerPhase,
    remaining_secs: u64,
    /// Duration of the current (or last) run.
    total_secs: u64,
    generation: u64,
    tick_source: Option<TickSource>,
}

impl CountdownTimer {
    /// Create an idle timer of the given kind.
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            phase: TimerPhase::Idle,
            remaining_secs: 0,
            total_secs: 0,
            generation: 0,
            tick_source: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// Running or paused.
    pub fn is_active(&self) -> bool {
        self.phase != TimerPhase::Idle
    }

    /// The tick source currently allowed to drive this timer, if any.
    /// Stays valid while paused; cleared by stop and completion.
    pub fn tick_source(&self) -> Option<TickSource> {
        self.tick_source
    }

    /// 1.0 .. 0.0 share of the run still left. 0.0 when idle.
    pub fn remaining_fraction(&self) -> f64 {
        if !self.is_active() || self.total_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / self.total_secs as f64
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            timer: self.kind,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            remaining_fraction: self.remaining_fraction(),
            display: self.display(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a fresh countdown. No-op unless idle and `duration_secs > 0`.
    pub fn start(&mut self, duration_secs: u64) -> Option<Event> {
        if self.phase != TimerPhase::Idle {
            tracing::debug!(
                timer = ?self.kind,
                phase = ?self.phase,
                "start ignored: timer not idle"
            );
            return None;
        }
        if duration_secs == 0 {
            tracing::debug!(timer = ?self.kind, "start ignored: zero duration");
            return None;
        }
        self.generation += 1;
        self.tick_source = Some(TickSource {
            timer: self.kind,
            generation: self.generation,
        });
        self.remaining_secs = duration_secs;
        self.total_secs = duration_secs;
        self.phase = TimerPhase::Running;
        tracing::debug!(timer = ?self.kind, duration_secs, "timer started");
        Some(Event::TimerStarted {
            timer: self.kind,
            duration_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Running => {
                self.phase = TimerPhase::Paused;
                Some(Event::TimerPaused {
                    timer: self.kind,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                Some(Event::TimerResumed {
                    timer: self.kind,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Terminate early. Cancels the tick source and discards remaining time.
    /// The returned event carries what was left at the moment of stopping.
    pub fn stop(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Running | TimerPhase::Paused => {
                let remaining_secs = self.remaining_secs;
                self.phase = TimerPhase::Idle;
                self.remaining_secs = 0;
                self.tick_source = None;
                tracing::debug!(timer = ?self.kind, remaining_secs, "timer stopped");
                Some(Event::TimerStopped {
                    timer: self.kind,
                    remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerPhase::Idle => None,
        }
    }

    /// Deliver one elapsed second. Returns `Some(Event::TimerCompleted)`
    /// exactly once, on the tick that reaches zero; the timer is then idle.
    pub fn tick(&mut self, source: TickSource) -> Option<Event> {
        if self.tick_source != Some(source) {
            tracing::trace!(timer = ?self.kind, "tick from stale source dropped");
            return None;
        }
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.phase = TimerPhase::Idle;
        self.tick_source = None;
        tracing::debug!(timer = ?self.kind, duration_secs = self.total_secs, "timer completed");
        Some(Event::TimerCompleted {
            timer: self.kind,
            duration_secs: self.total_secs,
            at: Utc::now(),
        })
    }
}

/// Format seconds as zero-padded `mm:ss`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Whole minutes covered by a run of `total_secs` that stopped with
/// `remaining_secs` left, rounded half up.
pub fn elapsed_minutes(total_secs: u64, remaining_secs: u64) -> u32 {
    let elapsed = total_secs.saturating_sub(remaining_secs);
    u32::try_from((elapsed + 30) / 60).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut CountdownTimer, n: u64) -> Vec<Event> {
        let source = timer.tick_source().unwrap();
        (0..n).filter_map(|_| timer.tick(source)).collect()
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = CountdownTimer::new(TimerKind::Work);
        assert_eq!(timer.phase(), TimerPhase::Idle);

        assert!(timer.start(60).is_some());
        assert_eq!(timer.phase(), TimerPhase::Running);

        assert!(timer.pause().is_some());
        assert_eq!(timer.phase(), TimerPhase::Paused);

        assert!(timer.resume().is_some());
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn start_requires_positive_duration() {
        let mut timer = CountdownTimer::new(TimerKind::Break);
        assert!(timer.start(0).is_none());
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert!(timer.tick_source().is_none());
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut timer = CountdownTimer::new(TimerKind::Work);
        timer.start(10);
        run_ticks(&mut timer, 3);
        let source = timer.tick_source();

        assert!(timer.start(99).is_none());
        assert_eq!(timer.remaining_secs(), 7);
        assert_eq!(timer.total_secs(), 10);
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.tick_source(), source);
    }

    #[test]
    fn completes_exactly_once() {
        let mut timer = CountdownTimer::new(TimerKind::Work);
        timer.start(5);
        let source = timer.tick_source().unwrap();
        let events: Vec<_> = (0..10).filter_map(|_| timer.tick(source)).collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::TimerCompleted { timer: TimerKind::Work, duration_secs: 5, .. }
        ));
        assert_eq!(timer.remaining_secs(), 0);
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn ticks_while_paused_are_ignored() {
        let mut timer = CountdownTimer::new(TimerKind::Break);
        timer.start(30);
        let source = timer.tick_source().unwrap();
        timer.tick(source);
        timer.pause();
        for _ in 0..100 {
            assert!(timer.tick(source).is_none());
        }
        assert_eq!(timer.remaining_secs(), 29);
        timer.resume();
        timer.tick(source);
        assert_eq!(timer.remaining_secs(), 28);
    }

    #[test]
    fn stop_cancels_tick_source() {
        let mut timer = CountdownTimer::new(TimerKind::Work);
        timer.start(30);
        let old = timer.tick_source().unwrap();
        timer.tick(old);

        match timer.stop() {
            Some(Event::TimerStopped { remaining_secs, .. }) => assert_eq!(remaining_secs, 29),
            other => panic!("expected TimerStopped, got {other:?}"),
        }
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.tick_source().is_none());
        assert!(timer.stop().is_none());

        // A new run gets a new source; the old one no longer decrements.
        timer.start(30);
        let fresh = timer.tick_source().unwrap();
        assert_ne!(old, fresh);
        assert!(timer.tick(old).is_none());
        assert_eq!(timer.remaining_secs(), 30);
        timer.tick(fresh);
        assert_eq!(timer.remaining_secs(), 29);
    }

    #[test]
    fn sources_are_per_instance() {
        let mut work = CountdownTimer::new(TimerKind::Work);
        let mut rest = CountdownTimer::new(TimerKind::Break);
        work.start(10);
        rest.start(10);
        let work_source = work.tick_source().unwrap();
        assert!(rest.tick(work_source).is_none());
        assert_eq!(rest.remaining_secs(), 10);
    }

    #[test]
    fn pause_and_resume_reject_wrong_phase() {
        let mut timer = CountdownTimer::new(TimerKind::Work);
        assert!(timer.pause().is_none());
        assert!(timer.resume().is_none());
        timer.start(10);
        assert!(timer.resume().is_none());
        timer.pause();
        assert!(timer.pause().is_none());
    }

    #[test]
    fn remaining_fraction_tracks_progress() {
        let mut timer = CountdownTimer::new(TimerKind::Work);
        assert_eq!(timer.remaining_fraction(), 0.0);
        timer.start(4);
        assert_eq!(timer.remaining_fraction(), 1.0);
        run_ticks(&mut timer, 1);
        assert_eq!(timer.remaining_fraction(), 0.75);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let mut timer = CountdownTimer::new(TimerKind::Break);
        timer.start(300);
        match timer.snapshot() {
            Event::StateSnapshot {
                timer: kind,
                phase,
                remaining_secs,
                display,
                ..
            } => {
                assert_eq!(kind, TimerKind::Break);
                assert_eq!(phase, TimerPhase::Running);
                assert_eq!(remaining_secs, 300);
                assert_eq!(display, "05:00");
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn format_clock_pads_and_keeps_minutes() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn elapsed_minutes_rounds_half_up() {
        assert_eq!(elapsed_minutes(1500, 0), 25);
        assert_eq!(elapsed_minutes(1500, 1500), 0);
        assert_eq!(elapsed_minutes(1500, 1470), 1);
        assert_eq!(elapsed_minutes(1500, 1471), 0);
        assert_eq!(elapsed_minutes(30, 0), 1);
    }
}
