//! File logging.
//!
//! The terminal is in raw alternate-screen mode while the game runs, so log
//! records go to ~/.mole-panic/mole-panic.log instead of stderr.

use super::persistence::save_path;
use crate::core::constants::{LOG_ENV_VAR, LOG_FILE};
use std::fs::OpenOptions;
use std::io;

/// Initialize `env_logger` writing to the game's log file.
///
/// The filter is read from `MOLE_PANIC_LOG` and defaults to `info`.
pub fn init() -> io::Result<()> {
    let path = save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV_VAR, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    log::info!("logging to {}", path.display());
    Ok(())
}
