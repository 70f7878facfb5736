use clap::{Parser, Subcommand};
use deepwork_core::storage::LoggingConfig;
use deepwork_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "deepwork", version, about = "Deep Work Tracker CLI")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (defaults to `logging.level`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Work, break and daily goal durations
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Recorded sessions
    Sessions {
        #[command(subcommand)]
        action: commands::sessions::SessionsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let loaded = Config::load();
    let level = match (&cli.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.clone(),
        (None, Err(_)) => LoggingConfig::default().level,
    };
    init_tracing(&level);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable; using defaults");
        Config::default()
    });

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action, &config).await,
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Stats { action } => commands::stats::run(action, &config),
        Commands::Sessions { action } => commands::sessions::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
