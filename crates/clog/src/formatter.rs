//! crates/clog/src/formatter.rs
//! Pluggable line rendering.

use std::fmt;

/// Replaces the built-in `<color><LABEL>: <message><reset>` rendering.
///
/// The formatter receives the entry label (`LOG` for plain output, the key
/// for keyed output, otherwise the upper-case severity label) and the
/// message. Its return value is written verbatim; an empty string suppresses
/// the line. Installing a formatter clears the sink's timestamp flags since
/// the formatter owns its own timestamp convention.
pub trait Formatter: Send + Sync {
    /// Renders one log line.
    fn format(&self, label: &str, message: fmt::Arguments<'_>) -> String;
}

/// [`Formatter`] backed by a closure. Built with [`formatter_fn`].
#[derive(Clone, Copy)]
pub struct FnFormatter<F>(F);

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(&str, fmt::Arguments<'_>) -> String + Send + Sync,
{
    fn format(&self, label: &str, message: fmt::Arguments<'_>) -> String {
        (self.0)(label, message)
    }
}

impl<F> fmt::Debug for FnFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFormatter")
    }
}

/// Wraps a closure as a [`Formatter`].
///
/// # Examples
///
/// ```
/// use clog::{Formatter, formatter_fn};
///
/// let formatter = formatter_fn(|label, message| format!("[{label}] {message}"));
/// assert_eq!(formatter.format("WARNING", format_args!("disk {}%", 93)), "[WARNING] disk 93%");
/// ```
pub fn formatter_fn<F>(f: F) -> FnFormatter<F>
where
    F: Fn(&str, fmt::Arguments<'_>) -> String + Send + Sync,
{
    FnFormatter(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bracketed;

    impl Formatter for Bracketed {
        fn format(&self, label: &str, message: fmt::Arguments<'_>) -> String {
            format!("<{label}> {message}")
        }
    }

    #[test]
    fn trait_objects_render() {
        let formatter: Box<dyn Formatter> = Box::new(Bracketed);
        assert_eq!(formatter.format("TEMP", format_args!("x={}", 1)), "<TEMP> x=1");
    }

    #[test]
    fn closures_can_suppress() {
        let formatter = formatter_fn(|label, _| {
            if label == "DEBUG" {
                String::new()
            } else {
                label.to_owned()
            }
        });
        assert_eq!(formatter.format("DEBUG", format_args!("hidden")), "");
        assert_eq!(formatter.format("ERROR", format_args!("shown")), "ERROR");
    }
}
