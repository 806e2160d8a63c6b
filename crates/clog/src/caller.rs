//! crates/clog/src/caller.rs
//! Call-site attribution for labeled log lines.
//!
//! Call sites are resolved fresh for every log call and never cached. The
//! macros capture the enclosing function together with `file!()` and
//! `line!()`; the plain functions are `#[track_caller]` all the way down, so
//! [`Location::caller`] resolves to the first frame outside this crate.

use std::fmt;
use std::panic::Location;

/// Function, file and line of a log call site.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CallSite {
    function: &'static str,
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// Sentinel for call sites that could not be resolved. Renders as `???`.
    pub const UNKNOWN: Self = Self {
        function: "",
        file: "",
        line: 0,
    };

    /// Builds a call site from its parts.
    ///
    /// `function` may be a full type path as produced by
    /// [`std::any::type_name`]; trailing closure segments are stripped.
    #[must_use]
    pub fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function: trim_closures(function),
            file,
            line,
        }
    }

    /// Captures the caller of the nearest non-`#[track_caller]` frame.
    ///
    /// The function name is not available through this path.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    /// Builds a call site from a panic location.
    #[must_use]
    pub fn from_location(location: &Location<'static>) -> Self {
        Self {
            function: "",
            file: location.file(),
            line: location.line(),
        }
    }

    /// Returns the full function path, or an empty string when unknown.
    #[must_use]
    pub const fn function(&self) -> &'static str {
        self.function
    }

    /// Returns the source file path, or an empty string when unknown.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Returns the source line, or zero when unknown.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Reports whether this is the [`CallSite::UNKNOWN`] sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.file.is_empty()
    }
}

impl Default for CallSite {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("???");
        }
        let file = last_component(self.file);
        if self.function.is_empty() {
            write!(f, "{file}:{}", self.line)
        } else {
            write!(
                f,
                "{}() at {file}:{}",
                short_function_name(self.function),
                self.line
            )
        }
    }
}

/// Returns the final component of a `/` or `\` separated path.
///
/// Forward slashes are checked first; backslashes only when no forward slash
/// is present.
///
/// # Examples
///
/// ```
/// use clog::last_component;
///
/// assert_eq!(last_component("a/b/c"), "c");
/// assert_eq!(last_component("a\\b\\c"), "c");
/// assert_eq!(last_component("plain"), "plain");
/// ```
#[must_use]
pub fn last_component(path: &str) -> &str {
    if let Some(index) = path.rfind('/') {
        &path[index + 1..]
    } else if let Some(index) = path.rfind('\\') {
        &path[index + 1..]
    } else {
        path
    }
}

/// Keeps the last two `::` segments of a function path (`module::function`).
fn short_function_name(path: &str) -> &str {
    let mut separators = path.rmatch_indices("::").map(|(index, _)| index);
    separators.next();
    match separators.next() {
        Some(index) => &path[index + 2..],
        None => path,
    }
}

fn trim_closures(mut path: &'static str) -> &'static str {
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path
}

/// Captures the enclosing function, file and line as a [`CallSite`].
///
/// # Examples
///
/// ```
/// fn locate() -> clog::CallSite {
///     clog::call_site!()
/// }
///
/// let site = locate();
/// assert!(site.function().ends_with("locate"));
/// assert!(site.line() > 0);
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __clog_here() {}
        fn __clog_type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __clog_type_name_of(__clog_here);
        $crate::CallSite::new(
            name.strip_suffix("::__clog_here").unwrap_or(name),
            file!(),
            line!(),
        )
    }};
}
