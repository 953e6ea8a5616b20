use std::env;
use std::sync::Arc;

use rustylog::config::{Accessor, ConfigSource, ConfigStore};
use rustylog::log::logger_settings::{KEY_LOG_DEBUG, KEY_LOG_FILE, KEY_LOG_SIMPLE_CLASS_NAME};
use rustylog::log::{LogSink, LoggerSettings, NoopLogSink, log_bridge, registry};
use rustylog::{logger_debug, logger_error, logger_info};

const KEY_RUNS: &str = "demo.runs";

/// State the demo persists between runs.
struct DemoState {
    settings: LoggerSettings,
    runs: i64,
}

impl ConfigSource for DemoState {
    fn accessors(&self) -> Vec<(&'static str, Accessor<'_>)> {
        vec![
            (
                KEY_LOG_FILE,
                Box::new(|| self.settings.destination.display().to_string()) as Accessor<'_>,
            ),
            (
                KEY_LOG_DEBUG,
                Box::new(|| self.settings.debug_enabled.to_string()) as Accessor<'_>,
            ),
            (
                KEY_LOG_SIMPLE_CLASS_NAME,
                Box::new(|| self.settings.simple_class_name.to_string()) as Accessor<'_>,
            ),
            (KEY_RUNS, Box::new(|| self.runs.to_string()) as Accessor<'_>),
        ]
    }
}

fn main() {
    // Supported:
    //   cargo run                    -> reads ./conf.config
    //   cargo run -- path/to/conf    -> reads the given file
    let args: Vec<String> = env::args().collect();
    let config_path = args
        .get(1)
        .map_or(ConfigStore::DEFAULT_PATH, String::as_str);

    // --- Load configuration (no logger yet) --------------------------------
    let mut config = ConfigStore::load(
        config_path,
        &[KEY_LOG_FILE, KEY_LOG_DEBUG, KEY_LOG_SIMPLE_CLASS_NAME, KEY_RUNS],
        Arc::new(NoopLogSink),
    );
    let settings = LoggerSettings::from_config(&config);

    // --- Start process logger ----------------------------------------------
    let logger = registry::get_or_create_with(&settings);
    if logger.is_console_fallback() {
        eprintln!(
            "[rustylog] {} is not writable, logging to stdout",
            settings.destination.display()
        );
    }
    let log_sink: Arc<dyn LogSink> = logger.clone();
    config.set_log(Arc::clone(&log_sink));
    if let Err(e) = log_bridge::install(Arc::clone(&logger)) {
        logger_error!(log_sink, cause = e, "log facade already taken");
    }

    // --- Demo run -----------------------------------------------------------
    let runs = config.get_long(KEY_RUNS).max(0) + 1;
    logger_info!(log_sink, "start (run #{runs})");
    logger_debug!(log_sink, "settings: {settings:?}");
    ::log::info!("messages from the log facade land in the same file");

    let missing = std::fs::read_to_string("does-not-exist.txt");
    if let Err(e) = missing {
        logger.error_with("demo read failed", &e);
    }

    let state = DemoState { settings, runs };
    if let Err(e) = config.save(&state) {
        logger_error!(log_sink, cause = e, "could not save {}", config.path().display());
    }

    registry::dispose();
}
