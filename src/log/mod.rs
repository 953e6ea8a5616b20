pub mod caller;
pub mod error_report;
pub mod log_bridge;
pub mod log_level;
pub mod log_line;
pub mod log_macros;
pub mod log_sink;
pub mod log_target;
pub mod logger;
pub mod logger_settings;
pub mod noop_log_sink;
pub mod registry;
#[cfg(test)]
pub(crate) mod test_support;

pub use caller::Caller;
pub use log_level::LogLevel;
pub use log_sink::LogSink;
pub use log_target::LogTarget;
pub use logger::FileLogger;
pub use logger_settings::LoggerSettings;
pub use noop_log_sink::NoopLogSink;
pub use registry::LoggerOptions;
