use std::path::PathBuf;

use clap::Parser;

mod platform;

use platform::logging::{self, LogDestination};
use platform::settings;

#[derive(Parser)]
#[command(name = "ide-mentor-bot")]
#[command(version, about = "Ask the IDE mentor backend about a zipped project", long_about = None)]
struct Cli {
    /// Settings file (RON)
    #[arg(short, long, value_name = "FILE", default_value = settings::DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Where log lines go; overrides the settings file
    #[arg(long, value_enum, value_name = "DEST")]
    log: Option<LogDestination>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is not up yet, so settings problems are held until it is.
    let loaded = settings::load(&cli.settings);
    let (app_settings, settings_error) = match loaded {
        Ok(app_settings) => (app_settings, None),
        Err(err) => (settings::AppSettings::default(), Some(err)),
    };

    logging::initialize(cli.log.unwrap_or(app_settings.log_destination));
    if let Some(err) = settings_error {
        mentor_logging::mentor_warn!("{}; using defaults", err);
        eprintln!("Warning: {err}; using defaults");
    }

    platform::run_app(app_settings.backend)
}
