//! Log setup
//!
//! The TUI owns stdout/stderr while a game runs, so records go to a file.
//! The level follows `RUST_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "snake.log";

/// Route `log` records to `path`, appending
pub fn init_file_logger(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;

    Ok(())
}
