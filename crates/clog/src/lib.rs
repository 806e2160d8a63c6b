#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `clog` is a leveled, key-filtered logging facility for long-running
//! services. Every line goes through one emission path: a severity gate, an
//! optional key filter, rendering (`<color><LABEL>: <message><reset>` or a
//! user [`Formatter`]), an optional ` -- function() at file:line` suffix, and
//! a single write to the output sink behind a timestamp.
//!
//! # Design
//!
//! All state lives in a [`Logger`]. The free functions and macros at the
//! crate root operate on a process-wide instance returned by [`logger`];
//! components that prefer explicit dependencies create their own `Logger` and
//! pass it by reference.
//!
//! Configuration values are replaced whole, never mutated in place. The key
//! set in particular is copy-on-write: enabling a key builds a new set and
//! publishes it with a compare-and-swap, so the per-call key lookup never
//! takes a lock.
//!
//! # Invariants
//!
//! - Logging never fails the caller: sink write errors are dropped.
//! - `TEMP`, `PANIC` and `FATAL` lines bypass the level threshold.
//! - Keyed lines are written only while their key is enabled and the level
//!   is at most [`Level::Normal`].
//! - Plain and keyed lines never carry a call site.
//!
//! # Examples
//!
//! ```
//! use clog::{Level, Logger, OutputFlags};
//!
//! let logger = Logger::with_output(std::io::sink());
//! logger.set_flags(OutputFlags::DATE | OutputFlags::TIME);
//! logger.parse_log_flag("http,disk+");
//!
//! logger.to("http", format_args!("GET {}", "/index.html"));
//! clog::warnf!(logger: &logger, "disk {}% full", 93);
//!
//! let parsed = logger.error("x".parse::<u32>());
//! assert!(parsed.is_err());
//! assert_eq!(logger.level(), Level::Normal);
//! ```
//!
//! # See also
//!
//! - [`LogConfig`] for environment and file based configuration.
//! - [`tag`] for redaction markers around sensitive values.

use std::fmt;
use std::io::Write;
use std::sync::LazyLock;

mod caller;
mod config;
mod emit;
mod formatter;
mod level;
mod logger;
mod macros;
mod output;
mod palette;
mod parse;
mod registry;
mod swap;
mod tag;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use caller::{CallSite, last_component};
pub use config::{ConfigError, KEYS_VAR, LEVEL_VAR, LogConfig, NO_CALLER_VAR, NO_COLOR_VAR};
pub use emit::{Concat, FatalExit, Label};
pub use formatter::{FnFormatter, Formatter, formatter_fn};
pub use level::{Level, ParseLevelError};
pub use logger::{FATAL_EXIT_CODE, Logger};
pub use output::OutputFlags;
pub use palette::Palette;
pub use parse::{NO_COLOR_FLAG, NO_TIME_FLAG};
pub use registry::KeyRegistry;
pub use tag::{ContentTag, ParseContentTagError, Tagged, tag, tag_code};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ClogLayer, init_tracing, init_tracing_with_filter};

static LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

/// Returns the process-wide logger used by the free functions and macros.
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// Sets the severity threshold of the process-wide logger.
pub fn set_level(level: Level) {
    logger().set_level(level);
}

/// Returns the severity threshold of the process-wide logger.
pub fn level() -> Level {
    logger().level()
}

/// Turns caller attribution on or off.
pub fn set_include_caller(include: bool) {
    logger().set_include_caller(include);
}

/// Reports whether caller attribution is on.
pub fn include_caller() -> bool {
    logger().include_caller()
}

/// Replaces the output writer, keeping the formatting flags.
pub fn set_output<W: Write + Send + 'static>(writer: W) {
    logger().set_output(writer);
}

/// Sets the formatting flags.
pub fn set_flags(flags: OutputFlags) {
    logger().set_flags(flags);
}

/// Returns the formatting flags.
pub fn flags() -> OutputFlags {
    logger().flags()
}

/// Disables color for the rest of the process.
pub fn disable_color() {
    logger().disable_color();
}

/// Removes the timestamp from every line.
pub fn disable_time() {
    logger().disable_time();
}

/// Installs a formatter and disables the built-in timestamp.
pub fn set_formatter<F: Formatter + 'static>(formatter: F) {
    logger().set_formatter(formatter);
}

/// Returns to the built-in rendering.
pub fn clear_formatter() {
    logger().clear_formatter();
}

/// Substitutes the exit primitive used by the fatal entry points.
pub fn set_exit_hook<F: Fn(i32) + Send + Sync + 'static>(hook: F) {
    logger().set_exit_hook(hook);
}

/// Restores [`std::process::exit`] as the exit primitive.
pub fn reset_exit_hook() {
    logger().reset_exit_hook();
}

/// Enables keyed output for `key`.
pub fn enable_key(key: &str) {
    logger().enable_key(key);
}

/// Disables keyed output for `key`.
pub fn disable_key(key: &str) {
    logger().disable_key(key);
}

/// Reports whether keyed output for `key` is enabled.
pub fn key_enabled(key: &str) -> bool {
    logger().key_enabled(key)
}

/// Returns the enabled keys, sorted.
pub fn enabled_keys() -> Vec<String> {
    logger().enabled_keys()
}

/// See [`Logger::parse_log_flag`].
pub fn parse_log_flag(flags: &str) {
    logger().parse_log_flag(flags);
}

/// See [`Logger::parse_log_flags`].
pub fn parse_log_flags<S: AsRef<str>>(flags: &[S]) {
    logger().parse_log_flags(flags);
}

/// See [`Logger::log`].
pub fn log(message: fmt::Arguments<'_>) {
    logger().log(message);
}

/// See [`Logger::printf`].
pub fn printf(message: fmt::Arguments<'_>) {
    logger().printf(message);
}

/// See [`Logger::print`].
pub fn print(parts: &[&dyn fmt::Display]) {
    logger().print(parts);
}

/// See [`Logger::to`].
pub fn to(key: &str, message: fmt::Arguments<'_>) {
    logger().to(key, message);
}

/// See [`Logger::warn`].
#[track_caller]
pub fn warn(parts: &[&dyn fmt::Display]) {
    logger().warn(parts);
}

/// See [`Logger::warnf`].
#[track_caller]
pub fn warnf(message: fmt::Arguments<'_>) {
    logger().warnf(message);
}

/// See [`Logger::debug`].
#[track_caller]
pub fn debug(parts: &[&dyn fmt::Display]) {
    logger().debug(parts);
}

/// See [`Logger::debugf`].
#[track_caller]
pub fn debugf(message: fmt::Arguments<'_>) {
    logger().debugf(message);
}

/// See [`Logger::error`].
#[track_caller]
pub fn error<T, E: fmt::Display>(result: Result<T, E>) -> Result<T, E> {
    logger().error(result)
}

/// See [`Logger::errorf`].
#[track_caller]
pub fn errorf(message: fmt::Arguments<'_>) {
    logger().errorf(message);
}

/// See [`Logger::temp`].
#[track_caller]
pub fn temp(parts: &[&dyn fmt::Display]) {
    logger().temp(parts);
}

/// See [`Logger::tempf`].
#[track_caller]
pub fn tempf(message: fmt::Arguments<'_>) {
    logger().tempf(message);
}

/// See [`Logger::panic`].
#[track_caller]
pub fn panic(parts: &[&dyn fmt::Display]) -> ! {
    logger().panic(parts)
}

/// See [`Logger::panicf`].
#[track_caller]
pub fn panicf(message: fmt::Arguments<'_>) -> ! {
    logger().panicf(message)
}

/// See [`Logger::fatal`].
#[track_caller]
pub fn fatal(parts: &[&dyn fmt::Display]) -> ! {
    logger().fatal(parts)
}

/// See [`Logger::fatalf`].
#[track_caller]
pub fn fatalf(message: fmt::Arguments<'_>) -> ! {
    logger().fatalf(message)
}
