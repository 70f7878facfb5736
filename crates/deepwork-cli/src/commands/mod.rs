pub mod config;
pub mod sessions;
pub mod settings;
pub mod stats;
pub mod timer;

use deepwork_core::{
    CompletionCue, Config, Database, KeyValueStore, MemoryStore, SystemClock, Tracker,
};

/// Open the on-disk store, or fall back to an in-memory one so read-only
/// commands still work when the database is unavailable.
pub fn open_store() -> Box<dyn KeyValueStore> {
    match Database::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable; changes will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

pub fn open_tracker(config: &Config, cue: impl CompletionCue + 'static) -> Tracker {
    Tracker::init(open_store(), SystemClock, cue).with_stop_policy(config.timer.stop_policy)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
