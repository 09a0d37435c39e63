mod init;

pub use init::{init_logging, parse_rotation};

use crate::config::default_log_dir;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Name of the rolling log file inside the log directory.
pub const LOG_FILENAME: &str = "linkshelf.log";

/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Used when `RUST_LOG` is not set.
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}
