// src/logging.rs
//! File logging. The terminal belongs to the UI, so log records go to a file.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use env_logger::{Env, Target};

/// Log file used when `BOXEQ_LOG_FILE` is not set.
pub const DEFAULT_LOG_FILE: &str = "boxeq.log";

/// Route `log` records to `path`. The level comes from `RUST_LOG`, `info` by
/// default.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialised")?;

    log::info!("boxeq {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
