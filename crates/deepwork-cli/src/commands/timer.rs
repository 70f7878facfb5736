use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::Subcommand;
use deepwork_core::{CompletionCue, Config, Event, TimerKind, Tracker};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a work session in the foreground, followed by a break
    Run {
        /// Exit when the work timer completes instead of starting the break
        #[arg(long)]
        no_break: bool,
    },
    /// Run only a break in the foreground
    Break,
}

/// Rings the terminal bell on stderr.
struct BellCue;

impl CompletionCue for BellCue {
    fn play(&mut self, timer: TimerKind) {
        let mut err = std::io::stderr();
        let _ = write!(err, "\x07");
        let _ = err.flush();
        tracing::debug!(timer = timer.label(), "completion cue");
    }
}

pub async fn run(action: TimerAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = super::open_tracker(config, BellCue);

    match action {
        TimerAction::Run { no_break } => {
            match tracker.start_work() {
                Some(event) => emit(&event)?,
                None => return Err("work duration is zero; set one with `settings work`".into()),
            }
            drive(&mut tracker, no_break).await?;
        }
        TimerAction::Break => {
            match tracker.start_break() {
                Some(event) => emit(&event)?,
                None => return Err("break duration is zero; set one with `settings break`".into()),
            }
            drive(&mut tracker, false).await?;
        }
    }
    Ok(())
}

/// Deliver one tick per second to whichever timer is running until both are
/// idle. Ctrl-C stops the running timer.
async fn drive(tracker: &mut Tracker, no_break: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately.
    interval.tick().await;

    let show_progress = std::io::stderr().is_terminal();

    // Installed once so a Ctrl-C between two selects is still seen.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let Some(source) = tracker.tick_sources().first().copied() else {
            break;
        };
        let kind = source.timer();
        if show_progress {
            render_progress(tracker, kind);
        }

        tokio::select! {
            _ = interval.tick() => {
                let events = tracker.tick(source);
                let work_done = events
                    .iter()
                    .any(|e| matches!(e, Event::TimerCompleted { timer: TimerKind::Work, .. }));
                if work_done && no_break {
                    for event in events.iter().filter(|e| !is_auto_break(e)) {
                        emit(event)?;
                    }
                    // Drop the auto-started break quietly.
                    let _ = tracker.stop(TimerKind::Break);
                    break;
                }
                for event in &events {
                    emit(event)?;
                }
            }
            _ = &mut ctrl_c => {
                for event in tracker.stop(kind) {
                    emit(&event)?;
                }
                break;
            }
        }
    }

    if show_progress {
        eprintln!();
    }
    Ok(())
}

fn render_progress(tracker: &Tracker, kind: TimerKind) {
    let timer = tracker.timer(kind);
    let width = 20usize;
    let filled = ((1.0 - timer.remaining_fraction()) * width as f64).round() as usize;
    let bar: String = "#".repeat(filled.min(width)) + &"-".repeat(width - filled.min(width));
    let mut err = std::io::stderr();
    let _ = write!(err, "\r{:<14} [{bar}] {}", kind.label(), timer.display());
    let _ = err.flush();
}

/// One event per line on stdout.
fn emit(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

fn is_auto_break(event: &Event) -> bool {
    matches!(event, Event::TimerStarted { timer: TimerKind::Break, .. })
}
