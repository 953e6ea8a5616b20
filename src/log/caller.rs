//! Caller attribution for log lines.
//!
//! A log line is tagged with `Class#method`. The tag is captured at the call
//! site by [`caller!`](crate::caller) (module path plus the type path of a
//! helper fn item declared inside the calling function) or, for the plain
//! `logger.info(..)` style methods, from `#[track_caller]` locations.

use std::fmt;
use std::panic::Location;

/// Name of the fn item `caller!()` declares at the call site.
pub const HELPER_FRAME: &str = "__here";

const CLOSURE_FRAME: &str = "{{closure}}";
const PATH_SEP: &str = "::";

/// Who issued a log call.
///
/// `class` is the owning type path (or the module path for free functions,
/// or a source file for location-based tags); `method` is the function name
/// (or the line number).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller {
    class: String,
    method: String,
}

impl Caller {
    pub fn new(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            method: method.into(),
        }
    }

    /// Resolves the calling function from the type path of the helper item
    /// declared by `caller!()`.
    ///
    /// `fn_path` looks like `krate::module::Type::method::__here`, possibly
    /// with `{{closure}}` segments before the helper. Those trailing frames
    /// belong to the logging facility (or to closures/async blocks around the
    /// call) and are skipped; what remains is split into class and method.
    ///
    /// Returns `None` when the path does not name a function below
    /// `module_path`, e.g. when the macro was expanded in a const context.
    #[must_use]
    pub fn resolve(module_path: &str, fn_path: &str) -> Option<Self> {
        let mut path = fn_path
            .strip_suffix(HELPER_FRAME)
            .and_then(|p| p.strip_suffix(PATH_SEP))?;

        while let Some(rest) = path
            .strip_suffix(CLOSURE_FRAME)
            .and_then(|p| p.strip_suffix(PATH_SEP))
        {
            path = rest;
        }

        if path.is_empty() || path == module_path {
            return None;
        }

        let (class, method) = split_last_segment(path)?;
        let class = self_type(class);
        if class.is_empty() || method.is_empty() {
            return None;
        }
        Some(Self::new(class, method))
    }

    /// Builds a `file#line` tag from a tracked call location.
    #[must_use]
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line().to_string())
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Renders `Class#method`; with `simple` the class is cut down to its
    /// last path segment. An empty method renders the class alone.
    #[must_use]
    pub fn render(&self, simple: bool) -> String {
        let class = if simple {
            simple_name(&self.class)
        } else {
            self.class.as_str()
        };
        if self.method.is_empty() {
            class.to_owned()
        } else {
            format!("{class}#{}", self.method)
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Strips everything up to and including the last qualifier separator
/// (`::`, `/` or `\`) that is not nested inside generic brackets.
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    match last_separator(qualified) {
        Some((_, end)) => &qualified[end..],
        None => qualified,
    }
}

/// The implementing type of a trait-impl path.
///
/// `<app::Svc as app::Greeter>` and `app::<impl app::Greeter for app::Svc>`
/// both give `app::Svc`; any other path is returned unchanged.
fn self_type(class: &str) -> &str {
    const AS: &str = " as ";
    const FOR: &str = " for ";

    let qualified = class
        .strip_prefix('<')
        .and_then(|c| c.strip_suffix('>'))
        .and_then(|inner| find_top_level(inner, AS).map(|pos| &inner[..pos]));
    if let Some(ty) = qualified {
        return ty;
    }

    let tail_start = last_separator(class).map_or(0, |(_, end)| end);
    class[tail_start..]
        .strip_prefix("<impl ")
        .and_then(|t| t.strip_suffix('>'))
        .and_then(|inner| find_top_level(inner, FOR).map(|pos| &inner[pos + FOR.len()..]))
        .unwrap_or(class)
}

/// Byte offset of the first `needle` in `s` outside generic brackets.
fn find_top_level(s: &str, needle: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(needle.as_bytes()) => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_last_segment(path: &str) -> Option<(&str, &str)> {
    let (start, end) = last_separator(path)?;
    Some((&path[..start], &path[end..]))
}

/// Byte range of the last top-level separator in `s`.
fn last_separator(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut found = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                found = Some((i, i + 2));
                i += 2;
                continue;
            }
            b'/' | b'\\' if depth == 0 => found = Some((i, i + 1)),
            _ => {}
        }
        i += 1;
    }
    found
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn resolves_free_function_to_module_and_name() {
        let c = Caller::resolve("app::net", "app::net::connect::__here").unwrap();
        assert_eq!(c.class(), "app::net");
        assert_eq!(c.method(), "connect");
        assert_eq!(c.render(false), "app::net#connect");
        assert_eq!(c.render(true), "net#connect");
    }

    #[test]
    fn resolves_method_to_owning_type() {
        let c = Caller::resolve("app::net", "app::net::Session::open::__here").unwrap();
        assert_eq!(c.render(false), "app::net::Session#open");
        assert_eq!(c.render(true), "Session#open");
    }

    #[test]
    fn skips_closure_frames() {
        let c = Caller::resolve(
            "app::jobs",
            "app::jobs::Worker::run::{{closure}}::{{closure}}::__here",
        )
        .unwrap();
        assert_eq!(c.render(true), "Worker#run");
    }

    #[test]
    fn generic_arguments_do_not_split_the_class() {
        let c = Caller::resolve("app", "app::Pool<app::conn::Tcp>::get::__here").unwrap();
        assert_eq!(c.class(), "app::Pool<app::conn::Tcp>");
        assert_eq!(c.method(), "get");
        assert_eq!(c.render(true), "Pool<app::conn::Tcp>#get");
    }

    #[test]
    fn trait_impl_methods_resolve_to_the_implementing_type() {
        let c = Caller::resolve("app", "<app::Svc as app::Greeter>::greet::__here").unwrap();
        assert_eq!(c.class(), "app::Svc");
        assert_eq!(c.render(true), "Svc#greet");

        let c = Caller::resolve(
            "app::svc",
            "app::svc::<impl app::Greeter<u8> for app::svc::Svc<u8>>::greet::__here",
        )
        .unwrap();
        assert_eq!(c.class(), "app::svc::Svc<u8>");
        assert_eq!(c.render(true), "Svc<u8>#greet");
    }

    trait Greeter {
        fn greet(&self) -> Option<Caller>;
    }

    struct Svc;

    impl Greeter for Svc {
        fn greet(&self) -> Option<Caller> {
            crate::caller!()
        }
    }

    #[test]
    fn caller_macro_in_trait_impl_names_the_type() {
        let c = Svc.greet().unwrap();
        assert_eq!(c.method(), "greet");
        assert_eq!(c.render(true), "Svc#greet");
        assert!(c.render(false).ends_with("tests::Svc#greet"));
        assert!(!c.render(false).contains(" as "));
    }

    #[test]
    fn shallow_or_foreign_paths_give_no_attribution() {
        assert_eq!(Caller::resolve("app", "app::__here"), None);
        assert_eq!(Caller::resolve("app", "__here"), None);
        assert_eq!(Caller::resolve("app", "app::run"), None);
        assert_eq!(Caller::resolve("app", ""), None);
    }

    #[test]
    fn caller_macro_names_enclosing_test() {
        let c = crate::caller!().unwrap();
        assert_eq!(
            c.render(false),
            "rustylog::log::caller::tests#caller_macro_names_enclosing_test"
        );
        assert_eq!(c.render(true), "tests#caller_macro_names_enclosing_test");
    }

    #[test]
    fn caller_macro_inside_closure_names_enclosing_test() {
        let tag = (|| crate::caller!())().unwrap();
        assert_eq!(tag.method(), "caller_macro_inside_closure_names_enclosing_test");
    }

    #[test]
    fn location_tags_render_file_and_line() {
        let here = Location::caller();
        let c = Caller::from_location(here);
        assert_eq!(c.method(), here.line().to_string());
        assert_eq!(c.render(true), format!("caller.rs#{}", here.line()));
        assert!(c.render(false).ends_with(&format!("caller.rs#{}", here.line())));
    }

    #[test]
    fn empty_method_renders_class_only() {
        assert_eq!(Caller::new("app::db", "").render(false), "app::db");
        assert_eq!(Caller::new("app::db", "").render(true), "db");
    }

    #[test]
    fn simple_name_handles_windows_paths() {
        assert_eq!(simple_name(r"src\log\logger.rs"), "logger.rs");
        assert_eq!(simple_name("plain"), "plain");
    }
}
