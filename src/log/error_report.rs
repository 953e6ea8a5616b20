//! Renders an error value, its `source()` chain and the backtrace of the
//! logging call as the body of an ERROR line.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write;

use crate::log::log_line::LINE_ENDING;

/// Multi-line report: the error, one `Caused by:` line per source, then the
/// backtrace of the logging call. The backtrace is captured regardless of
/// `RUST_BACKTRACE`; it is only missing where the platform cannot unwind.
#[must_use]
pub fn render_error(err: &dyn Error) -> String {
    render_with_backtrace(err, &Backtrace::force_capture())
}

/// `message`, a line break, then the report for `err`.
#[must_use]
pub fn with_context(message: &str, err: &dyn Error) -> String {
    format!("{message}{LINE_ENDING}{}", render_error(err))
}

fn render_with_backtrace(err: &dyn Error, backtrace: &Backtrace) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "{LINE_ENDING}Caused by: {cause}");
        source = cause.source();
    }
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(out, "{LINE_ENDING}stack backtrace:{LINE_ENDING}{backtrace}");
    }
    out
}
