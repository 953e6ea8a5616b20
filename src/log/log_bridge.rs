use std::sync::Arc;

use ::log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::log::{caller::Caller, log_level::LogLevel, logger::FileLogger};

/// Routes records from the `log` facade into a [`FileLogger`].
///
/// Records are attributed to their module path (or target) and line, so a
/// dependency's `log::warn!` shows up as `[some_dep::pool#88][WARN] ...`.
pub struct LogBridge {
    logger: Arc<FileLogger>,
}

impl LogBridge {
    #[must_use]
    pub fn new(logger: Arc<FileLogger>) -> Self {
        Self { logger }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let class = record.module_path().unwrap_or_else(|| record.target());
        let method = record.line().map(|l| l.to_string()).unwrap_or_default();
        let caller = Caller::new(class, method);
        let level = LogLevel::from(record.level());
        self.logger
            .log(level, &record.args().to_string(), Some(&caller));
    }

    // Every line is flushed as it is written.
    fn flush(&self) {}
}

/// Installs a [`LogBridge`] as the global `log` logger.
///
/// # Errors
///
/// Fails if a global `log` logger was already installed.
pub fn install(logger: Arc<FileLogger>) -> Result<(), SetLoggerError> {
    ::log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    ::log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{logger_settings::LoggerSettings, test_support::SharedBuf};

    fn bridge() -> (LogBridge, Arc<FileLogger>, SharedBuf) {
        let buf = SharedBuf::default();
        let logger = Arc::new(FileLogger::with_writer(
            buf.clone(),
            &LoggerSettings::new("bridge.log"),
        ));
        (LogBridge::new(Arc::clone(&logger)), logger, buf)
    }

    #[test]
    fn records_are_attributed_to_module_and_line() {
        let (bridge, _logger, buf) = bridge();
        bridge.log(
            &Record::builder()
                .args(format_args!("pool exhausted"))
                .level(::log::Level::Warn)
                .target("dep")
                .module_path(Some("dep::pool"))
                .line(Some(88))
                .build(),
        );
        assert!(buf.contents().contains("[dep::pool#88][WARN] pool exhausted"));
    }

    #[test]
    fn target_is_used_without_module_path() {
        let (bridge, _logger, buf) = bridge();
        bridge.log(
            &Record::builder()
                .args(format_args!("hello"))
                .level(::log::Level::Info)
                .target("events")
                .build(),
        );
        assert!(buf.contents().contains("[events][INFO] hello"));
    }

    #[test]
    fn debug_and_trace_follow_the_logger_flag() {
        let (bridge, logger, buf) = bridge();
        let trace = Metadata::builder().level(::log::Level::Trace).build();
        assert!(!bridge.enabled(&trace));

        logger.set_debug_enabled(true);
        assert!(bridge.enabled(&trace));
        bridge.log(
            &Record::builder()
                .args(format_args!("fine detail"))
                .level(::log::Level::Trace)
                .target("dep")
                .build(),
        );
        assert!(buf.contents().contains("[DEBUG] fine detail"));
    }
}
