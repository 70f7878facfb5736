//! Integration tests for the tracker.
//!
//! Drives full work/break cycles through the public API with a fixed clock,
//! and checks what ends up in the key-value store across restarts.

use std::cell::RefCell;
use std::rc::Rc;

use deepwork_core::storage::keys;
use deepwork_core::{
    ActiveTimer, CalendarDay, CompletionCue, Database, Event, FixedClock, KeyValueStore,
    MemoryStore, SilentCue, TimerKind, TimerPhase, Tracker,
};

#[derive(Clone, Default)]
struct RecordingCue {
    played: Rc<RefCell<Vec<TimerKind>>>,
}

impl CompletionCue for RecordingCue {
    fn play(&mut self, timer: TimerKind) {
        self.played.borrow_mut().push(timer);
    }
}

fn day(s: &str) -> CalendarDay {
    s.parse().unwrap()
}

/// Tick whatever is running until nothing is, returning every event.
fn run_to_idle(tracker: &mut Tracker) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(source) = tracker.tick_sources().first().copied() {
        events.extend(tracker.tick(source));
    }
    events
}

fn credited(events: &[Event]) -> Option<u32> {
    events.iter().find_map(|e| match e {
        Event::StreakCredited { count, .. } => Some(*count),
        _ => None,
    })
}

#[test]
fn test_default_work_run_completes_after_1500_ticks() {
    let cue = RecordingCue::default();
    let mut tracker = Tracker::init(
        MemoryStore::new(),
        FixedClock::new(day("2025-03-04")),
        cue.clone(),
    );

    tracker.start_work();
    let source = tracker.tick_sources()[0];
    assert_eq!(tracker.timer(TimerKind::Work).display(), "25:00");

    for _ in 0..1499 {
        assert!(tracker.tick(source).is_empty());
    }
    assert_eq!(tracker.timer(TimerKind::Work).display(), "00:01");
    assert!(cue.played.borrow().is_empty());

    let events = tracker.tick(source);
    assert!(matches!(
        events[0],
        Event::TimerCompleted { timer: TimerKind::Work, duration_secs: 1500, .. }
    ));
    assert_eq!(tracker.log().len(), 1);
    assert_eq!(tracker.log().sessions()[0].minutes, 25);
    assert_eq!(tracker.log().sessions()[0].date, day("2025-03-04"));
    assert_eq!(*cue.played.borrow(), vec![TimerKind::Work]);
    assert_eq!(tracker.streak().count, 1);

    // Break auto-started at 5:00.
    assert_eq!(tracker.active_timer(), ActiveTimer::Break);
    assert_eq!(tracker.timer(TimerKind::Break).display(), "05:00");

    // Old work source is dead.
    assert!(tracker.tick(source).is_empty());
    assert_eq!(tracker.log().len(), 1);
}

#[test]
fn test_full_cycle_plays_cue_once_per_completion() {
    let cue = RecordingCue::default();
    let mut tracker = Tracker::init(
        MemoryStore::new(),
        FixedClock::new(day("2025-03-04")),
        cue.clone(),
    );
    tracker.set_work_duration(0, 40);
    tracker.set_break_duration(0, 10);

    tracker.start_work();
    let events = run_to_idle(&mut tracker);

    let completions = events
        .iter()
        .filter(|e| matches!(e, Event::TimerCompleted { .. }))
        .count();
    assert_eq!(completions, 2);
    assert_eq!(
        *cue.played.borrow(),
        vec![TimerKind::Work, TimerKind::Break]
    );
    assert_eq!(tracker.active_timer(), ActiveTimer::None);
    assert_eq!(tracker.timer(TimerKind::Break).phase(), TimerPhase::Idle);
    // 40 s rounds to one minute.
    assert_eq!(tracker.log().sessions()[0].minutes, 1);
}

#[test]
fn test_pause_holds_remaining_time() {
    let mut tracker = Tracker::init(
        MemoryStore::new(),
        FixedClock::new(day("2025-03-04")),
        SilentCue,
    );
    tracker.start_work();
    let source = tracker.tick_sources()[0];
    for _ in 0..100 {
        tracker.tick(source);
    }
    tracker.pause(TimerKind::Work);
    for _ in 0..500 {
        tracker.tick(source);
    }
    assert_eq!(tracker.timer(TimerKind::Work).remaining_secs(), 1400);

    tracker.resume(TimerKind::Work);
    let resumed = tracker.tick_sources()[0];
    tracker.tick(resumed);
    assert_eq!(tracker.timer(TimerKind::Work).remaining_secs(), 1399);
}

#[test]
fn test_restart_rearms_tick_source() {
    let mut tracker = Tracker::init(
        MemoryStore::new(),
        FixedClock::new(day("2025-03-04")),
        SilentCue,
    );
    tracker.start_work();
    let first = tracker.tick_sources()[0];
    tracker.stop(TimerKind::Work);
    tracker.start_work();
    let second = tracker.tick_sources()[0];
    assert_ne!(first, second);

    tracker.tick(first);
    assert_eq!(tracker.timer(TimerKind::Work).remaining_secs(), 1500);
    tracker.tick(second);
    assert_eq!(tracker.timer(TimerKind::Work).remaining_secs(), 1499);
}

#[test]
fn test_streak_across_days() {
    let clock = FixedClock::new(day("2025-03-03"));
    let mut tracker = Tracker::init(MemoryStore::new(), clock.clone(), SilentCue);
    tracker.set_work_duration(0, 30);
    tracker.set_break_duration(0, 0);

    let complete_one = |tracker: &mut Tracker| {
        tracker.start_work();
        run_to_idle(tracker)
    };

    // Day 1: first session credits, second does not.
    let first = complete_one(&mut tracker);
    assert_eq!(credited(&first), Some(1));
    let second = complete_one(&mut tracker);
    assert_eq!(credited(&second), None);
    assert_eq!(tracker.streak().count, 1);

    // Day 2: continues.
    clock.advance_days(1);
    complete_one(&mut tracker);
    assert_eq!(tracker.streak().count, 2);

    // Day 7 after a gap: restarts at one.
    clock.advance_days(5);
    complete_one(&mut tracker);
    assert_eq!(tracker.streak().count, 1);
    assert_eq!(
        tracker.store().get(keys::LAST_STREAK_DATE).as_deref(),
        Some("2025-03-09")
    );
}

#[test]
fn test_state_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deepwork.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut tracker = Tracker::init(db, FixedClock::new(day("2025-03-04")), SilentCue);
        tracker.set_work_duration(0, 45);
        tracker.set_break_duration(2, 30);
        tracker.set_daily_goal(90, 0);
        tracker.start_work();
        run_to_idle(&mut tracker);
        assert_eq!(tracker.log().len(), 1);
    }

    let db = Database::open_at(&path).unwrap();
    let tracker = Tracker::init(db, FixedClock::new(day("2025-03-05")), SilentCue);
    assert_eq!(tracker.log().len(), 1);
    assert_eq!(tracker.log().sessions()[0].date, day("2025-03-04"));
    assert_eq!(tracker.streak().count, 1);
    assert_eq!(tracker.config().work_duration.total_secs(), 45);
    assert_eq!(tracker.config().break_duration.total_secs(), 150);
    assert_eq!(tracker.config().daily_goal.minutes, 90);
}

#[test]
fn test_stale_streak_is_reported_as_zero_after_restart() {
    let store = MemoryStore::with_entries([
        (keys::SESSIONS, r#"[{"date":"2025-03-01","minutes":50}]"#),
        (keys::STREAK, "6"),
        (keys::LAST_STREAK_DATE, "2025-03-01"),
    ]);
    let tracker = Tracker::init(store, FixedClock::new(day("2025-03-04")), SilentCue);
    assert_eq!(tracker.streak().count, 0);
    assert_eq!(tracker.summary().current_streak, 0);
    assert_eq!(tracker.summary().total_minutes, 50);
}

#[test]
fn test_summary_tracks_goal_progress() {
    let mut tracker = Tracker::init(
        MemoryStore::new(),
        FixedClock::new(day("2025-03-04")),
        SilentCue,
    );
    tracker.set_daily_goal(2, 0);
    tracker.set_work_duration(1, 0);
    tracker.set_break_duration(0, 0);

    tracker.start_work();
    run_to_idle(&mut tracker);
    assert_eq!(tracker.summary().goal_progress_pct, 50);

    tracker.start_work();
    run_to_idle(&mut tracker);
    let summary = tracker.summary();
    assert_eq!(summary.goal_progress_pct, 100);
    assert_eq!(summary.today_minutes, 2);
    assert_eq!(summary.session_count, 2);
}
