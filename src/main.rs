use std::{env, path::PathBuf};

use anyhow::Result;

use boxeq::{
    config::{DEFAULT_SETTINGS_PATH, Settings},
    logging::{self, DEFAULT_LOG_FILE},
    ui,
};

fn main() -> Result<()> {
    let log_path = env::var_os("BOXEQ_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    logging::init(&log_path)?;

    // Optional first argument: settings file
    let settings_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

    let settings = Settings::load_or_default(&settings_path)?;
    log::info!("settings loaded from {}", settings_path.display());

    if let Err(e) = ui::run(settings, &settings_path) {
        log::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
