//! Runtime configuration resolved by the binary before the core starts.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Data file used when no path is given.
pub const DEFAULT_DATA_FILE: &str = "clipboard.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file holding the roster snapshot.
    pub data_path: PathBuf,
    /// Rolling log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}
