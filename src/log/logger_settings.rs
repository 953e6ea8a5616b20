use std::path::PathBuf;

use crate::config::ConfigStore;
use crate::log::log_level::LogLevel;

/// File used when no destination is configured.
pub const DEFAULT_LOG_FILE: &str = "test.log";

pub const KEY_LOG_FILE: &str = "log.file";
pub const KEY_LOG_DEBUG: &str = "log.debug";
pub const KEY_LOG_LEVEL: &str = "log.level";
pub const KEY_LOG_SIMPLE_CLASS_NAME: &str = "log.simple_class_name";

/// Where a [`FileLogger`](crate::log::FileLogger) writes and how it tags lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettings {
    pub destination: PathBuf,
    pub debug_enabled: bool,
    pub simple_class_name: bool,
}

impl LoggerSettings {
    #[must_use]
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            debug_enabled: false,
            simple_class_name: false,
        }
    }

    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_simple_class_name(mut self, simple: bool) -> Self {
        self.simple_class_name = simple;
        self
    }

    /// Reads `log.file`, `log.debug`, `log.level` and `log.simple_class_name`.
    ///
    /// A valid `log.level` takes precedence over `log.debug`: DEBUG output is
    /// on only when the level is `DEBUG`. An unknown level is ignored.
    #[must_use]
    pub fn from_config(config: &ConfigStore) -> Self {
        let destination = config
            .get_non_empty(KEY_LOG_FILE)
            .unwrap_or(DEFAULT_LOG_FILE);
        let debug = match config.get(KEY_LOG_LEVEL).parse::<LogLevel>() {
            Ok(level) => level == LogLevel::Debug,
            Err(_) => config.get_bool(KEY_LOG_DEBUG),
        };
        Self::new(destination)
            .with_debug(debug)
            .with_simple_class_name(config.get_bool(KEY_LOG_SIMPLE_CLASS_NAME))
    }
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}
