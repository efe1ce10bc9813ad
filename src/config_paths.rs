//! Where cellgrid keeps its files
//!
//! ```text
//! <config dir>/cellgrid/
//! ├── config.yaml          GridConfig (layout metrics)
//! └── logs/
//!     └── cellgrid.log.*   daily debug logs
//! ```
//!
//! `<config dir>` is `$XDG_CONFIG_HOME` or `~/.config` on Unix and macOS,
//! `%APPDATA%` on Windows.

use std::{env, fs, path::PathBuf};

const APP_DIR: &str = "cellgrid";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_SUBDIR: &str = "logs";

/// Root of the cellgrid directory, if the platform has a config location
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|dir| dir.join(APP_DIR))
}

/// The persisted [`GridConfig`](crate::config::GridConfig)
pub fn config_file() -> Option<PathBuf> {
    Some(config_dir()?.join(CONFIG_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    Some(config_dir()?.join(LOGS_SUBDIR))
}

/// Create the logs directory on first use
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or("no config directory on this platform")?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("cannot create {}: {}", logs.display(), e))?;
    Ok(logs)
}
