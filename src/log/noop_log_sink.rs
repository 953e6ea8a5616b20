use crate::log::{caller::Caller, log_level::LogLevel, log_sink::LogSink};

#[derive(Debug, Clone, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    #[inline]
    fn log(&self, _level: LogLevel, _msg: &str, _caller: Option<&Caller>) {}

    #[inline]
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}
