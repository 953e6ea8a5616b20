//! rustylog is a small synchronous logging facility.
//!
//! Each call writes one line of the form
//! `[timestamp][Class#method][LEVEL] message` to a single destination: a log
//! file, or stdout when the file cannot be opened. Lines from concurrent
//! threads never interleave, and nothing in the facility ever returns an
//! error or panics into the calling code.
//!
//! The crate is structured into two modules:
//! - [`log`]: the logger, caller attribution, macros and the process-wide
//!   registry.
//! - [`config`]: a properties-file store the logger can read its settings from.

/// Properties-backed configuration store.
pub mod config;
/// Logging facility: sinks, caller attribution, macros and registry.
pub mod log;
