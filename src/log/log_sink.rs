use std::sync::Arc;

use crate::log::{caller::Caller, log_level::LogLevel};

/// Anything that accepts leveled, attributed log messages.
///
/// Collaborators take a `LogSink` instead of a concrete logger so tests can
/// hand them a [`NoopLogSink`](crate::log::NoopLogSink) or a capture buffer.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, caller: Option<&Caller>);

    /// Whether a message at `level` would be emitted. Callers use this to
    /// skip formatting work for suppressed levels.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str, caller: Option<&Caller>) {
        (**self).log(level, msg, caller);
    }

    #[inline]
    fn enabled(&self, level: LogLevel) -> bool {
        (**self).enabled(level)
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str, caller: Option<&Caller>) {
        (**self).log(level, msg, caller);
    }

    #[inline]
    fn enabled(&self, level: LogLevel) -> bool {
        (**self).enabled(level)
    }
}
