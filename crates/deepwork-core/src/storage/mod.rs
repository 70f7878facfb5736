mod config;
pub mod database;
pub mod kv;

pub use config::{Config, LoggingConfig, StatsConfig, StopPolicy, TimerSection};
pub use database::Database;
pub use kv::{keys, KeyValueStore, MemoryStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory.
///
/// `DEEPWORK_HOME` overrides the location outright. Otherwise this is
/// `~/.config/deepwork[-dev]/`, with the `-dev` suffix when `DEEPWORK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("DEEPWORK_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DEEPWORK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("deepwork-dev")
            } else {
                base_dir.join("deepwork")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
