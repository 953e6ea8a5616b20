use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use thiserror::Error;

use crate::log::LogSink;
use crate::log::log_line::LINE_ENDING;
use crate::{logger_debug, logger_info, logger_warn};

/// Values accepted as `true` by [`ConfigStore::get_bool`], compared
/// case-insensitively.
const TRUE_VALUES: [&str; 4] = ["Y", "YES", "TRUE", "T"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error writing file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads a value out of the host object for one configuration key.
pub type Accessor<'a> = Box<dyn Fn() -> String + 'a>;

/// An object whose state can be saved into a [`ConfigStore`].
///
/// The object lists, per key, how to read the current value; the store
/// decides which keys get saved.
pub trait ConfigSource {
    fn accessors(&self) -> Vec<(&'static str, Accessor<'_>)>;
}

/// Flat `key=value` properties store backed by one file.
pub struct ConfigStore {
    path: PathBuf,
    keys: Vec<String>,
    values: BTreeMap<String, String>,
    log: Arc<dyn LogSink>,
}

impl ConfigStore {
    pub const DEFAULT_PATH: &'static str = "./conf.config";

    /// Loads `path`. `keys` is the fixed list [`save`](Self::save) writes.
    ///
    /// A missing or unreadable file gives an empty store; the problem is
    /// logged, not returned.
    pub fn load(path: impl Into<PathBuf>, keys: &[&str], log: Arc<dyn LogSink>) -> Self {
        let path = path.into();
        logger_info!(log, "Loading properties from path: {}", path.display());

        let values = match read_properties(&path) {
            Ok(values) => values,
            Err(e) => {
                logger_warn!(log, "{e}; starting with empty configuration");
                BTreeMap::new()
            }
        };
        logger_debug!(log, "Loaded {} properties", values.len());

        Self {
            path,
            keys: keys.iter().map(|k| (*k).to_owned()).collect(),
            values,
            log,
        }
    }

    pub fn empty(log: Arc<dyn LogSink>) -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_PATH),
            keys: Vec::new(),
            values: BTreeMap::new(),
            log,
        }
    }

    /// Replaces the sink used for the store's own diagnostics.
    pub fn set_log(&mut self, log: Arc<dyn LogSink>) {
        self.log = log;
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The raw value, or `""` when the key is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    #[must_use]
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        Some(self.get(name)).filter(|s| !s.is_empty())
    }

    /// `true` for `Y`, `YES`, `TRUE` or `T` in any case; `false` otherwise,
    /// including when the key is absent.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        let value = self.get(name).trim();
        TRUE_VALUES.iter().any(|t| value.eq_ignore_ascii_case(t))
    }

    /// The value as `i32`, or `-1` when absent or not a number.
    #[must_use]
    pub fn get_int(&self, name: &str) -> i32 {
        self.get(name).trim().parse().unwrap_or(-1)
    }

    /// The value as `i64`, or `-1` when absent or not a number.
    #[must_use]
    pub fn get_long(&self, name: &str) -> i64 {
        self.get(name).trim().parse().unwrap_or(-1)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Rebuilds the store from `source` and writes it to the load path.
    ///
    /// Only the configured keys are saved. A key the source has no accessor
    /// for is logged and left out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the file cannot be written.
    pub fn save<S: ConfigSource + ?Sized>(&mut self, source: &S) -> Result<(), ConfigError> {
        logger_info!(self.log, "Saving properties at {}", self.path.display());

        let accessors: BTreeMap<&str, Accessor<'_>> = source.accessors().into_iter().collect();
        self.values.clear();
        for key in &self.keys {
            match accessors.get(key.as_str()) {
                Some(read) => {
                    self.values.insert(key.clone(), read());
                }
                None => logger_warn!(self.log, "No accessor for config key: {key}"),
            }
        }
        logger_debug!(self.log, "Config is {:?}", self.values);

        fs::write(&self.path, self.render()).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn render(&self) -> String {
        let mut out = format!("#{}{LINE_ENDING}", Local::now().to_rfc2822());
        for (key, value) in &self.values {
            let _ = write!(out, "{key}={value}{LINE_ENDING}");
        }
        out
    }
}

fn read_properties(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_properties(&content))
}

/// Parses `key=value` / `key:value` lines. `#` and `!` start comments,
/// blank lines are skipped, surrounding quotes are stripped from values.
fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        if let Some(pos) = line.find(['=', ':']) {
            let key = line[..pos].trim().to_string();
            let value = line[pos + 1..].trim().trim_matches('"').to_string();
            values.insert(key, value);
        } else {
            values.insert(line.to_string(), String::new());
        }
    }
    values
}
