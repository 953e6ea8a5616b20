use std::fmt;

use chrono::{DateTime, Local};

use crate::log::log_level::LogLevel;

/// Timestamp layout used on every line, e.g. `16-10-2026T09:14:03.512042`.
pub const TIME_FORMAT: &str = "%d-%m-%YT%H:%M:%S%.6f";

/// Line terminator of the host platform.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// One formatted log entry.
///
/// Renders as `[<timestamp>][<caller>][<LEVEL>] <text>`; the caller bracket is
/// left out entirely when there is no attribution. The terminator is not part
/// of the rendering, the sink appends [`LINE_ENDING`].
#[derive(Debug, Clone)]
pub struct LogLine<'a> {
    /// The severity level of the entry.
    pub level: LogLevel,
    /// Local wall-clock time the entry was emitted at.
    pub timestamp: DateTime<Local>,
    /// Rendered `Class#method` tag, if the call site could be resolved.
    pub caller: Option<String>,
    /// The message body, written verbatim.
    pub text: &'a str,
}

impl<'a> LogLine<'a> {
    pub fn new(
        level: LogLevel,
        timestamp: DateTime<Local>,
        caller: Option<String>,
        text: &'a str,
    ) -> Self {
        Self {
            level,
            timestamp,
            caller,
            text,
        }
    }
}

impl fmt::Display for LogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.timestamp.format(TIME_FORMAT))?;
        if let Some(caller) = &self.caller {
            write!(f, "[{caller}]")?;
        }
        write!(f, "[{}] {}", self.level, self.text)
    }
}
