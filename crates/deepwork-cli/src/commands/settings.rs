use clap::Subcommand;
use deepwork_core::{Config, SilentCue};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show work, break and daily goal durations
    Show,
    /// Set the work duration (0-999 min)
    Work {
        minutes: u32,
        #[arg(default_value = "0")]
        seconds: u32,
    },
    /// Set the break duration (0-60 min)
    Break {
        minutes: u32,
        #[arg(default_value = "0")]
        seconds: u32,
    },
    /// Set the daily goal (0-480 min)
    Goal {
        minutes: u32,
        #[arg(default_value = "0")]
        seconds: u32,
    },
}

pub fn run(action: SettingsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = super::open_tracker(config, SilentCue);

    // Out-of-range values are clamped, so print what was actually stored.
    match action {
        SettingsAction::Show => super::print_json(tracker.config())?,
        SettingsAction::Work { minutes, seconds } => {
            super::print_json(&tracker.set_work_duration(minutes, seconds))?
        }
        SettingsAction::Break { minutes, seconds } => {
            super::print_json(&tracker.set_break_duration(minutes, seconds))?
        }
        SettingsAction::Goal { minutes, seconds } => {
            super::print_json(&tracker.set_daily_goal(minutes, seconds))?
        }
    }
    Ok(())
}
