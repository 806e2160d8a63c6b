//! crates/clog/src/emit.rs
//! Emission engine: gate, render, attribute and write one log line.
//!
//! Every entry point funnels into [`Logger::emit`]. The gate compares the
//! entry's intrinsic severity with the logger's threshold (keyed entries also
//! consult the key registry), the line is rendered either by the installed
//! [`Formatter`](crate::Formatter) or by the built-in
//! `<color><LABEL>: <message><reset>` layout, labeled entries get the caller
//! suffix, and the result goes to the sink in a single write.

use std::fmt;
use std::panic::panic_any;

use crate::caller::CallSite;
use crate::level::Level;
use crate::logger::{FATAL_EXIT_CODE, Logger};
use crate::palette::Palette;

/// Label selecting the severity, color and attribution of a log entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Label<'k> {
    /// Bare message at Normal severity, no label, no caller suffix.
    Plain,
    /// Message gated on a key from the registry at Normal severity.
    Key(&'k str),
    /// `DEBUG`, blue.
    Debug,
    /// `WARNING`, red.
    Warning,
    /// `ERROR`, red.
    Error,
    /// `TEMP`, yellow. Bypasses the level gate.
    Temp,
    /// `PANIC`, red. Bypasses the level gate.
    Panic,
    /// `FATAL`, red. Bypasses the level gate.
    Fatal,
}

impl<'k> Label<'k> {
    /// Severity compared against the threshold, or `None` for entries that
    /// always emit.
    #[must_use]
    pub const fn severity(self) -> Option<Level> {
        match self {
            Self::Plain | Self::Key(_) => Some(Level::Normal),
            Self::Debug => Some(Level::Debug),
            Self::Warning => Some(Level::Warning),
            Self::Error => Some(Level::Error),
            Self::Temp | Self::Panic | Self::Fatal => None,
        }
    }

    /// Text handed to formatters and rendered in front of the message.
    #[must_use]
    pub const fn text(self) -> &'k str {
        match self {
            Self::Plain => "LOG",
            Self::Key(key) => key,
            Self::Debug => "DEBUG",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Temp => "TEMP",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Reports whether the caller suffix applies to this entry.
    #[must_use]
    pub const fn is_attributed(self) -> bool {
        !matches!(self, Self::Plain | Self::Key(_))
    }

    const fn color(self, palette: &Palette) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Key(_) | Self::Temp => palette.fg_yellow,
            Self::Debug => palette.fg_blue,
            Self::Warning | Self::Error | Self::Panic | Self::Fatal => palette.fg_red,
        }
    }
}

/// Unwind payload of a fatal entry whose exit hook returned.
///
/// Only observed when a test installs an exit hook that does not terminate
/// the process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FatalExit {
    /// Status passed to the exit hook.
    pub code: i32,
}

/// Displays a list of values back to back, without separators.
///
/// ```
/// use clog::Concat;
///
/// assert_eq!(Concat(&[&"disk ", &93, &"%"]).to_string(), "disk 93%");
/// ```
#[derive(Clone, Copy)]
pub struct Concat<'a>(pub &'a [&'a dyn fmt::Display]);

impl fmt::Display for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|part| part.fmt(f))
    }
}

impl Logger {
    /// Reports whether an entry with `label` would be written.
    #[must_use]
    pub fn would_emit(&self, label: Label<'_>) -> bool {
        let Some(severity) = label.severity() else {
            return true;
        };
        if !self.level.allows(severity) {
            return false;
        }
        match label {
            Label::Key(key) => self.keys.is_enabled(key),
            _ => true,
        }
    }

    /// Writes one entry if the gate lets it through.
    ///
    /// This is the primitive behind every entry point and macro; `site` is
    /// rendered only for attributed labels while caller attribution is on.
    pub fn emit(&self, label: Label<'_>, message: fmt::Arguments<'_>, site: CallSite) {
        if self.would_emit(label) {
            self.write_entry(label, message, site);
        }
    }

    fn write_entry(&self, label: Label<'_>, message: fmt::Arguments<'_>, site: CallSite) {
        let palette = self.palette();
        let mut line = match self.current_formatter() {
            Some(formatter) => {
                let line = formatter.format(label.text(), message);
                if line.is_empty() {
                    return;
                }
                line
            }
            None => match label {
                Label::Plain => message.to_string(),
                Label::Key(key) => {
                    format!("{}{key}: {}{message}", label.color(&palette), palette.reset)
                }
                _ => format!(
                    "{}{}: {message}{}",
                    label.color(&palette),
                    label.text(),
                    palette.reset
                ),
            },
        };
        if label.is_attributed() && self.include_caller() {
            line.push_str(palette.dim);
            line.push_str(" -- ");
            line.push_str(&site.to_string());
            line.push_str(palette.reset);
        }
        // Write errors are not reported to callers.
        let _ = self.sink.read(|sink| sink.write_line(&line));
    }

    /// Writes a plain formatted message at Normal severity.
    pub fn log(&self, message: fmt::Arguments<'_>) {
        self.emit(Label::Plain, message, CallSite::UNKNOWN);
    }

    /// Same as [`Logger::log`].
    pub fn printf(&self, message: fmt::Arguments<'_>) {
        self.log(message);
    }

    /// Writes the concatenation of `parts` at Normal severity.
    pub fn print(&self, parts: &[&dyn fmt::Display]) {
        self.emit(Label::Plain, format_args!("{}", Concat(parts)), CallSite::UNKNOWN);
    }

    /// Writes a message prefixed by `key`, only while `key` is enabled.
    pub fn to(&self, key: &str, message: fmt::Arguments<'_>) {
        self.emit(Label::Key(key), message, CallSite::UNKNOWN);
    }

    /// Concatenates `parts` into a `WARNING` line.
    ///
    /// The caller suffix names only `file:line`, taken through
    /// `#[track_caller]`. Use [`crate::warn!`] to attribute the enclosing
    /// function as well.
    #[track_caller]
    pub fn warn(&self, parts: &[&dyn fmt::Display]) {
        self.emit(Label::Warning, format_args!("{}", Concat(parts)), CallSite::caller());
    }

    /// Formats a `WARNING` line.
    ///
    /// Attributed like [`Logger::warn`]; the matching macro also names the function.
    #[track_caller]
    pub fn warnf(&self, message: fmt::Arguments<'_>) {
        self.emit(Label::Warning, message, CallSite::caller());
    }

    /// Concatenates `parts` into a `DEBUG` line.
    ///
    /// Attributed like [`Logger::warn`]; the matching macro also names the function.
    #[track_caller]
    pub fn debug(&self, parts: &[&dyn fmt::Display]) {
        self.emit(Label::Debug, format_args!("{}", Concat(parts)), CallSite::caller());
    }

    /// Formats a `DEBUG` line.
    ///
    /// Attributed like [`Logger::warn`]; the matching macro also names the function.
    #[track_caller]
    pub fn debugf(&self, message: fmt::Arguments<'_>) {
        self.emit(Label::Debug, message, CallSite::caller());
    }

    /// Logs the error side of `result` and hands the result back unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use clog::Logger;
    ///
    /// let logger = Logger::with_output(std::io::sink());
    /// let parsed = logger.error("12".parse::<u8>());
    /// assert_eq!(parsed, Ok(12));
    /// ```
    #[track_caller]
    pub fn error<T, E: fmt::Display>(&self, result: Result<T, E>) -> Result<T, E> {
        if let Err(err) = &result {
            self.emit(Label::Error, format_args!("{err}"), CallSite::caller());
        }
        result
    }

    /// Formats an `ERROR` line.
    ///
    /// The caller suffix names only `file:line`, taken through
    /// `#[track_caller]`. Use [`crate::errorf!`] to attribute the enclosing
    /// function as well.
    #[track_caller]
    pub fn errorf(&self, message: fmt::Arguments<'_>) {
        self.emit(Label::Error, message, CallSite::caller());
    }

    /// Concatenates `parts` into a `TEMP` line, regardless of level.
    ///
    /// The caller suffix names only `file:line`, taken through
    /// `#[track_caller]`. Use [`crate::temp!`] to attribute the enclosing
    /// function as well.
    #[track_caller]
    pub fn temp(&self, parts: &[&dyn fmt::Display]) {
        self.emit(Label::Temp, format_args!("{}", Concat(parts)), CallSite::caller());
    }

    /// Formats a `TEMP` line, regardless of level.
    ///
    /// Attributed like [`Logger::warn`]; the matching macro also names the function.
    #[track_caller]
    pub fn tempf(&self, message: fmt::Arguments<'_>) {
        self.emit(Label::Temp, message, CallSite::caller());
    }

    /// Writes a `PANIC` line from the concatenated `parts`, then panics with
    /// the message as a `String` payload.
    #[track_caller]
    pub fn panic(&self, parts: &[&dyn fmt::Display]) -> ! {
        self.panic_at(format_args!("{}", Concat(parts)), CallSite::caller())
    }

    /// Writes a formatted `PANIC` line, then panics with the message.
    #[track_caller]
    pub fn panicf(&self, message: fmt::Arguments<'_>) -> ! {
        self.panic_at(message, CallSite::caller())
    }

    /// Panic entry with an explicit call site.
    pub fn panic_at(&self, message: fmt::Arguments<'_>, site: CallSite) -> ! {
        let text = message.to_string();
        self.write_entry(Label::Panic, format_args!("{text}"), site);
        panic_any(text)
    }

    /// Writes a `FATAL` line from the concatenated `parts`, then exits with
    /// status 1.
    #[track_caller]
    pub fn fatal(&self, parts: &[&dyn fmt::Display]) -> ! {
        self.fatal_at(format_args!("{}", Concat(parts)), CallSite::caller())
    }

    /// Writes a formatted `FATAL` line, then exits with status 1.
    #[track_caller]
    pub fn fatalf(&self, message: fmt::Arguments<'_>) -> ! {
        self.fatal_at(message, CallSite::caller())
    }

    /// Fatal entry with an explicit call site.
    ///
    /// Calls the exit hook once. When the hook returns, unwinds with a
    /// [`FatalExit`] payload.
    pub fn fatal_at(&self, message: fmt::Arguments<'_>, site: CallSite) -> ! {
        self.write_entry(Label::Fatal, message, site);
        let hook = self.exit.load();
        (*hook)(FATAL_EXIT_CODE);
        panic_any(FatalExit {
            code: FATAL_EXIT_CODE,
        })
    }
}
