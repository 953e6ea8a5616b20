use crate::log::caller::simple_name;
use crate::log::logger_settings::DEFAULT_LOG_FILE;

const LOG_SUFFIX: &str = ".log";

/// What a logger is created for: a type (named after it) or an explicit file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A type path as produced by `std::any::type_name`.
    Type(&'static str),
    /// A file name, used as given.
    File(String),
}

impl LogTarget {
    /// Target named after `T`, e.g. `MyLogger` becomes `my-logger.log`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        LogTarget::Type(std::any::type_name::<T>())
    }

    /// Resolves the file name to open.
    ///
    /// Type targets always get the `.log` suffix. File targets get it only
    /// when `append_suffix` is set and it is missing; an empty file name
    /// falls back to [`DEFAULT_LOG_FILE`].
    #[must_use]
    pub fn file_name(&self, append_suffix: bool) -> String {
        match self {
            LogTarget::Type(path) => format!("{}{LOG_SUFFIX}", kebab_case(type_simple_name(path))),
            LogTarget::File(name) if name.trim().is_empty() => DEFAULT_LOG_FILE.to_owned(),
            LogTarget::File(name) if append_suffix && !name.ends_with(LOG_SUFFIX) => {
                format!("{name}{LOG_SUFFIX}")
            }
            LogTarget::File(name) => name.clone(),
        }
    }
}

impl From<&str> for LogTarget {
    fn from(name: &str) -> Self {
        LogTarget::File(name.to_owned())
    }
}

impl From<String> for LogTarget {
    fn from(name: String) -> Self {
        LogTarget::File(name)
    }
}

/// Last path segment of a type name, without generic arguments.
fn type_simple_name(path: &str) -> &str {
    let bare = path.split('<').next().unwrap_or(path);
    simple_name(bare)
}

/// `MyLogger` -> `my-logger`. Every upper-case letter except the first one
/// starts a new dash-separated word; a lower-case prefix does not count, so
/// `lowerCase` -> `lowercase`.
#[must_use]
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut capitals = 0usize;
    for c in name.chars() {
        if c.is_uppercase() {
            if capitals > 0 {
                out.push('-');
            }
            capitals += 1;
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
