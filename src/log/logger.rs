use crate::log::{
    caller::Caller,
    error_report,
    log_level::LogLevel,
    log_line::{LINE_ENDING, LogLine},
    log_sink::LogSink,
    logger_settings::LoggerSettings,
};

use chrono::Local;
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, BufWriter, Write},
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

type Output = Box<dyn Write + Send>;

/// Synchronous, line-atomic logger bound to a single output handle.
///
/// The handle is the log file named in [`LoggerSettings`] or, when that file
/// cannot be opened, the process's stdout. It never changes afterwards.
///
/// # Guarantees
///
/// 1. **Atomic lines**: timestamping, formatting, write and flush all happen
///    under one lock, so concurrent callers never interleave partial lines.
/// 2. **Never throws**: open, write and flush failures are reported on stderr
///    and counted; the calling code never sees them.
/// 3. **Dispose drops**: after [`dispose`](Self::dispose) every emission is
///    discarded and counted in [`dropped_after_dispose`](Self::dropped_after_dispose).
///
/// # Caller tags
///
/// The level methods (`info`, `warn`, `error`, ...) tag lines with the
/// `file#line` of the call. For `Class#method` tags use the
/// [`logger_info!`](crate::logger_info) family of macros instead:
///
/// ```rust,ignore
/// logger.info("x");            // [..][src/net.rs#42][INFO] x
/// logger_info!(logger, "x");   // [..][app::net::Session#open][INFO] x
/// ```
pub struct FileLogger {
    out: Mutex<Option<Output>>,
    destination: PathBuf,
    console_fallback: bool,
    debug_enabled: AtomicBool,
    simple_class_name: AtomicBool,
    write_failures: AtomicU64,
    dropped_after_dispose: AtomicU64,
}

impl FileLogger {
    /// Opens `settings.destination` for append, creating it if needed.
    ///
    /// If the file cannot be opened the logger writes to stdout instead
    /// ([`is_console_fallback`](Self::is_console_fallback) reports it).
    #[must_use]
    pub fn open(settings: &LoggerSettings) -> Self {
        let opened = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.destination);

        match opened {
            Ok(file) => Self::build(Box::new(BufWriter::new(file)), settings, false),
            Err(e) => {
                eprintln!(
                    "(logger) cannot open {}: {e}; logging to stdout",
                    settings.destination.display()
                );
                Self::build(Box::new(io::stdout()), settings, true)
            }
        }
    }

    /// Builds a logger over an arbitrary writer.
    ///
    /// Used to inject the logger explicitly instead of going through the
    /// process registry, and by tests that capture output in memory.
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W, settings: &LoggerSettings) -> Self {
        Self::build(Box::new(writer), settings, false)
    }

    fn build(out: Output, settings: &LoggerSettings, console_fallback: bool) -> Self {
        Self {
            out: Mutex::new(Some(out)),
            destination: settings.destination.clone(),
            console_fallback,
            debug_enabled: AtomicBool::new(settings.debug_enabled),
            simple_class_name: AtomicBool::new(settings.simple_class_name),
            write_failures: AtomicU64::new(0),
            dropped_after_dispose: AtomicU64::new(0),
        }
    }

    /// Emits one line, unless `level` is DEBUG and debug output is off.
    ///
    /// Errors while writing are swallowed here: reported on stderr and
    /// counted in [`write_failures`](Self::write_failures).
    pub fn log(&self, level: LogLevel, message: &str, caller: Option<&Caller>) {
        if !self.is_enabled(level) {
            return;
        }

        let mut guard = self.lock_output();
        let Some(out) = guard.as_mut() else {
            self.dropped_after_dispose.fetch_add(1, Ordering::Relaxed);
            return;
        };

        let tag = caller.map(|c| c.render(self.uses_simple_class_name()));
        let line = LogLine::new(level, Local::now(), tag, message);
        let rendered = format!("{line}{LINE_ENDING}");

        if let Err(e) = out.write_all(rendered.as_bytes()).and_then(|()| out.flush()) {
            self.write_failures.fetch_add(1, Ordering::Relaxed);
            eprintln!("(logger) failed to write log line: {e}");
        }
    }

    /// Tagged `file#line`; see the type docs for `Class#method` tags.
    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log_at(LogLevel::Debug, message, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log_at(LogLevel::Info, message, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.log_at(LogLevel::Warn, message, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log_at(LogLevel::Error, message, Location::caller());
    }

    /// Logs `err`, its cause chain and the backtrace of this call at ERROR.
    #[track_caller]
    pub fn error_cause(&self, err: &dyn Error) {
        let location = Location::caller();
        self.log_at(LogLevel::Error, &error_report::render_error(err), location);
    }

    /// Logs `message` followed by the report for `err` at ERROR.
    #[track_caller]
    pub fn error_with(&self, message: &str, err: &dyn Error) {
        let location = Location::caller();
        self.log_at(
            LogLevel::Error,
            &error_report::with_context(message, err),
            location,
        );
    }

    fn log_at(&self, level: LogLevel, message: &str, location: &Location<'_>) {
        if self.is_enabled(level) {
            self.log(level, message, Some(&Caller::from_location(location)));
        }
    }

    /// Flushes and closes the handle. Idempotent; later emissions are dropped.
    pub fn dispose(&self) {
        let Some(mut out) = self.lock_output().take() else {
            return;
        };
        if let Err(e) = out.flush() {
            self.write_failures.fetch_add(1, Ordering::Relaxed);
            eprintln!("(logger) failed to flush on dispose: {e}");
        }
    }

    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Debug || self.is_debug_enabled()
    }

    #[must_use]
    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled.load(Ordering::Relaxed)
    }

    pub fn set_debug_enabled(&self, enabled: bool) {
        self.debug_enabled.store(enabled, Ordering::Relaxed);
    }

    #[must_use]
    pub fn uses_simple_class_name(&self) -> bool {
        self.simple_class_name.load(Ordering::Relaxed)
    }

    pub fn set_simple_class_name(&self, simple: bool) {
        self.simple_class_name.store(simple, Ordering::Relaxed);
    }

    /// The destination this logger was created for, even when it fell back
    /// to stdout.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    #[must_use]
    pub fn is_console_fallback(&self) -> bool {
        self.console_fallback
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lock_output().is_none()
    }

    /// Number of lines lost to write or flush errors.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Number of lines discarded because the logger was disposed.
    #[must_use]
    pub fn dropped_after_dispose(&self) -> u64 {
        self.dropped_after_dispose.load(Ordering::Relaxed)
    }

    // A panic while holding the lock leaves the writer itself usable.
    fn lock_output(&self) -> MutexGuard<'_, Option<Output>> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for FileLogger {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str, caller: Option<&Caller>) {
        FileLogger::log(self, level, msg, caller);
    }

    #[inline]
    fn enabled(&self, level: LogLevel) -> bool {
        self.is_enabled(level)
    }
}
