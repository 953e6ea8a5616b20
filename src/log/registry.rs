//! Process-wide logger slot.
//!
//! The first successful call binds the destination for the rest of the
//! process (or until [`reset`]). Later calls only update the debug and
//! simple-class-name flags. Applications that wire their logger explicitly
//! build a [`FileLogger`] directly and never touch this module.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::log::{log_target::LogTarget, logger::FileLogger, logger_settings::LoggerSettings};

static LOGGER: Mutex<Option<Arc<FileLogger>>> = Mutex::new(None);

/// Options for [`create_logger`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggerOptions {
    /// Append `.log` to file targets that lack it.
    pub append_suffix: bool,
    pub debug_enabled: bool,
    pub simple_class_name: bool,
}

fn slot() -> MutexGuard<'static, Option<Arc<FileLogger>>> {
    LOGGER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the process logger, opening `destination` if there is none yet.
///
/// The open happens while the slot is locked, so racing first calls open
/// exactly one handle. An existing logger keeps its destination but takes
/// over `debug_enabled` and `simple_class_name`.
pub fn get_or_create(
    destination: impl AsRef<Path>,
    debug_enabled: bool,
    simple_class_name: bool,
) -> Arc<FileLogger> {
    let mut slot = slot();
    let logger = slot.get_or_insert_with(|| {
        Arc::new(FileLogger::open(&LoggerSettings::new(destination.as_ref())))
    });
    logger.set_debug_enabled(debug_enabled);
    logger.set_simple_class_name(simple_class_name);
    Arc::clone(logger)
}

/// [`get_or_create`] driven by a full [`LoggerSettings`].
pub fn get_or_create_with(settings: &LoggerSettings) -> Arc<FileLogger> {
    get_or_create(
        &settings.destination,
        settings.debug_enabled,
        settings.simple_class_name,
    )
}

/// Resolves `target` to a file name and binds the process logger to it.
///
/// ```rust,ignore
/// struct MyLogger;
/// let logger = create_logger(LogTarget::of::<MyLogger>(), LoggerOptions::default());
/// // -> my-logger.log
/// ```
pub fn create_logger(target: impl Into<LogTarget>, options: LoggerOptions) -> Arc<FileLogger> {
    let file_name = target.into().file_name(options.append_suffix);
    get_or_create(file_name, options.debug_enabled, options.simple_class_name)
}

/// The process logger, if one has been created.
#[must_use]
pub fn current() -> Option<Arc<FileLogger>> {
    slot().clone()
}

/// Forgets the process logger and closes its handle.
///
/// Clones of the old `Arc` stay valid but are disposed, so at most one
/// handle is open at a time; the next [`get_or_create`] opens a fresh one.
pub fn reset() {
    if let Some(previous) = slot().take() {
        previous.dispose();
    }
}

/// Disposes the process logger but keeps it bound, so later calls get the
/// same (silent) instance until [`reset`].
pub fn dispose() {
    if let Some(logger) = current() {
        logger.dispose();
    }
}
