//! Leveled logging macros that tag each line with the calling function.
//!
//! Every macro takes anything implementing
//! [`LogSink`](crate::log::log_sink::LogSink) (a `FileLogger`, an
//! `Arc<dyn LogSink>`, a reference to either) followed by `format!`
//! arguments. The message is only formatted when the sink would emit it, so
//! a suppressed `logger_debug!` costs one flag check.

// ============================================================================
// 1. CALL-SITE CAPTURE
// ============================================================================

/// Resolves the enclosing function as a [`Caller`](crate::log::Caller).
///
/// Expands to an `Option<Caller>`; `None` when expanded outside a function
/// body.
#[macro_export]
macro_rules! caller {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::log::caller::Caller::resolve(module_path!(), __type_name_of(__here))
    }};
}

// ============================================================================
// 2. GENERIC WORKER
// ============================================================================

#[macro_export]
macro_rules! logger_log {
    ($logger:expr, $lvl:expr, $($arg:tt)*) => {{
        let __logger = &$logger;
        let __lvl = $lvl;
        if $crate::log::log_sink::LogSink::enabled(__logger, __lvl) {
            let __msg = format!($($arg)*);
            $crate::log::log_sink::LogSink::log(
                __logger,
                __lvl,
                &__msg,
                $crate::caller!().as_ref(),
            );
        }
    }};
}

// ============================================================================
// 3. LEVEL-SPECIFIC MACROS
// ============================================================================

#[macro_export]
macro_rules! logger_debug { ($logger:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $crate::log::log_level::LogLevel::Debug, $($arg)*) } }

#[macro_export]
macro_rules! logger_info { ($logger:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $crate::log::log_level::LogLevel::Info, $($arg)*) } }

#[macro_export]
macro_rules! logger_warn { ($logger:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $crate::log::log_level::LogLevel::Warn, $($arg)*) } }

/// ERROR line; `cause = err` appends the error report of `err` (its
/// `source()` chain and a backtrace when captured) to the message.
#[macro_export]
macro_rules! logger_error {
    ($logger:expr, cause = $err:expr) => {
        $crate::logger_log!(
            $logger,
            $crate::log::log_level::LogLevel::Error,
            "{}",
            $crate::log::error_report::render_error(&$err)
        )
    };
    ($logger:expr, cause = $err:expr, $($arg:tt)*) => {
        $crate::logger_log!(
            $logger,
            $crate::log::log_level::LogLevel::Error,
            "{}",
            $crate::log::error_report::with_context(&format!($($arg)*), &$err)
        )
    };
    ($logger:expr, $($arg:tt)*) => {
        $crate::logger_log!($logger, $crate::log::log_level::LogLevel::Error, $($arg)*)
    };
}
