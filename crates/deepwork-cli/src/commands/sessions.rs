use clap::Subcommand;
use deepwork_core::{CalendarDay, Config, Session, SilentCue};

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List recorded sessions in completion order
    List {
        /// Only sessions on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<CalendarDay>,
    },
}

pub fn run(action: SessionsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = super::open_tracker(config, SilentCue);

    match action {
        SessionsAction::List { date } => {
            let sessions: Vec<Session> = match date {
                Some(day) => tracker.log().on_day(day).copied().collect(),
                None => tracker.log().sessions().to_vec(),
            };
            super::print_json(&sessions)?;
        }
    }
    Ok(())
}
