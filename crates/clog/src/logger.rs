//! crates/clog/src/logger.rs
//! Logger context: level threshold, caller attribution switch, color, key
//! registry, output sink, formatter and exit hook.
//!
//! Every field is replaced as a whole value (atomic scalar or atomic pointer
//! swap) and never mutated in place. Fields are independent: a reader may see
//! a new level together with an old sink while another thread reconfigures.

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::formatter::Formatter;
use crate::level::{AtomicLevel, Level};
use crate::output::{OutputFlags, OutputSink};
use crate::palette::Palette;
use crate::registry::KeyRegistry;
use crate::swap::SwapCell;

/// Exit status passed to the exit hook by the fatal entry points.
pub const FATAL_EXIT_CODE: i32 = 1;

type ExitHook = Box<dyn Fn(i32) + Send + Sync>;

/// A logging context.
///
/// The crate-root functions and macros operate on a process-wide instance
/// (see [`logger`](crate::logger)); tests and embedders can create their own
/// and pass it around by reference.
///
/// # Examples
///
/// ```
/// use clog::{Level, Logger, OutputFlags};
///
/// let logger = Logger::with_output(std::io::sink());
/// logger.set_level(Level::Warning);
/// logger.enable_key("net");
///
/// assert!(logger.key_enabled("net"));
/// assert_eq!(logger.level(), Level::Warning);
/// assert_eq!(logger.flags(), OutputFlags::MICROSECONDS);
/// ```
pub struct Logger {
    pub(crate) level: AtomicLevel,
    include_caller: AtomicBool,
    color: AtomicBool,
    pub(crate) keys: KeyRegistry,
    pub(crate) sink: SwapCell<OutputSink>,
    pub(crate) formatter: SwapCell<Option<Arc<dyn Formatter>>>,
    pub(crate) exit: SwapCell<ExitHook>,
}

impl Logger {
    /// Creates a logger writing to standard error with the default settings:
    /// [`Level::Normal`], caller attribution on, color on, no keys, time of
    /// day with microseconds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(OutputSink::stderr())
    }

    /// Creates a logger with default settings writing to `writer`.
    #[must_use]
    pub fn with_output<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_sink(OutputSink::new(Box::new(writer), OutputFlags::STANDARD))
    }

    fn with_sink(sink: OutputSink) -> Self {
        Self {
            level: AtomicLevel::new(Level::Normal),
            include_caller: AtomicBool::new(true),
            color: AtomicBool::new(true),
            keys: KeyRegistry::new(),
            sink: SwapCell::new(sink),
            formatter: SwapCell::new(None),
            exit: SwapCell::new(Box::new(|code| std::process::exit(code))),
        }
    }

    /// Returns the current severity threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level.get()
    }

    /// Sets the severity threshold.
    pub fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    /// Reports whether labeled lines end with the caller's location.
    #[must_use]
    pub fn include_caller(&self) -> bool {
        self.include_caller.load(Ordering::Acquire)
    }

    /// Turns caller attribution on or off.
    pub fn set_include_caller(&self, include: bool) {
        self.include_caller.swap(include, Ordering::AcqRel);
    }

    /// Returns the palette used for rendering.
    #[must_use]
    pub fn palette(&self) -> Palette {
        if self.color.load(Ordering::Acquire) {
            Palette::ANSI
        } else {
            Palette::PLAIN
        }
    }

    /// Clears every escape sequence from the output. Color cannot be turned
    /// back on for this logger.
    pub fn disable_color(&self) {
        self.color.store(false, Ordering::Release);
    }

    /// Replaces the output writer, keeping the current formatting flags.
    ///
    /// Lines already being written to the previous writer finish there.
    pub fn set_output<W>(&self, writer: W)
    where
        W: Write + Send + 'static,
    {
        let flags = self.flags();
        self.sink.store(OutputSink::new(Box::new(writer), flags));
    }

    /// Returns the formatting flags of the active writer.
    #[must_use]
    pub fn flags(&self) -> OutputFlags {
        self.sink.read(OutputSink::flags)
    }

    /// Sets the formatting flags of the active writer.
    pub fn set_flags(&self, flags: OutputFlags) {
        self.sink.read(|sink| sink.set_flags(flags));
    }

    /// Removes the date and time components from the formatting flags.
    pub fn disable_time(&self) {
        self.sink.read(OutputSink::clear_timestamp);
    }

    /// Installs a formatter that replaces the built-in rendering.
    ///
    /// Also disables the built-in timestamp.
    pub fn set_formatter<F>(&self, formatter: F)
    where
        F: Formatter + 'static,
    {
        self.formatter.store(Some(Arc::new(formatter)));
        self.disable_time();
    }

    /// Returns to the built-in rendering. Timestamp flags are left as they are.
    pub fn clear_formatter(&self) {
        self.formatter.store(None);
    }

    /// Reports whether a formatter is installed.
    #[must_use]
    pub fn has_formatter(&self) -> bool {
        self.formatter.read(Option::is_some)
    }

    pub(crate) fn current_formatter(&self) -> Option<Arc<dyn Formatter>> {
        self.formatter.read(Clone::clone)
    }

    /// Substitutes the primitive the fatal entry points use to end the process.
    ///
    /// When the hook returns instead of exiting, the fatal call unwinds with a
    /// [`FatalExit`](crate::FatalExit) payload.
    pub fn set_exit_hook<F>(&self, hook: F)
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit.store(Box::new(hook));
    }

    /// Restores [`std::process::exit`] as the exit primitive.
    pub fn reset_exit_hook(&self) {
        self.exit.store(Box::new(|code| std::process::exit(code)));
    }

    /// Enables keyed output for `key`.
    pub fn enable_key(&self, key: &str) {
        self.keys.enable(key);
    }

    /// Disables keyed output for `key`.
    pub fn disable_key(&self, key: &str) {
        self.keys.disable(key);
    }

    /// Reports whether keyed output for `key` is enabled.
    #[must_use]
    pub fn key_enabled(&self, key: &str) -> bool {
        self.keys.is_enabled(key)
    }

    /// Returns the enabled keys, sorted.
    #[must_use]
    pub fn enabled_keys(&self) -> Vec<String> {
        self.keys.snapshot()
    }

    /// Returns the key registry.
    #[must_use]
    pub fn keys(&self) -> &KeyRegistry {
        &self.keys
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("include_caller", &self.include_caller())
            .field("color", &self.palette().is_colored())
            .field("keys", &self.keys)
            .field("flags", &self.flags())
            .field("formatter", &self.has_formatter())
            .finish_non_exhaustive()
    }
}
