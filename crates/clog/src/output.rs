//! crates/clog/src/output.rs
//! Output sink handle and timestamp formatting flags.

use std::fmt;
use std::io::{self, Write};
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month padding:zero]/[day padding:zero] ");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]:[second padding:zero]");
const MICROS_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(".[subsecond digits:6]");

/// Bitmask selecting the timestamp rendered in front of every line.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct OutputFlags(u32);

impl OutputFlags {
    /// No timestamp.
    pub const NONE: Self = Self(0);
    /// Local date, `2009/01/23`.
    pub const DATE: Self = Self(1);
    /// Local time of day, `01:23:23`.
    pub const TIME: Self = Self(1 << 1);
    /// Microsecond resolution, `01:23:23.123123`. Implies [`OutputFlags::TIME`].
    pub const MICROSECONDS: Self = Self(1 << 2);
    /// Use UTC instead of the local time zone.
    pub const UTC: Self = Self(1 << 5);
    /// Flags covering every timestamp component.
    pub const TIMESTAMP: Self = Self(Self::DATE.0 | Self::TIME.0 | Self::MICROSECONDS.0);
    /// Flags a fresh sink starts with.
    pub const STANDARD: Self = Self::MICROSECONDS;

    /// Builds flags from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reports whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reports whether any bit of `other` is set.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns these flags with the timestamp components cleared.
    #[must_use]
    pub const fn without_timestamp(self) -> Self {
        Self(self.0 & !Self::TIMESTAMP.0)
    }

    /// Appends the timestamp selected by these flags to `line`.
    pub(crate) fn write_timestamp(self, line: &mut String) {
        if !self.intersects(Self::TIMESTAMP) {
            return;
        }
        let now = if self.contains(Self::UTC) {
            OffsetDateTime::now_utc()
        } else {
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
        };
        if self.contains(Self::DATE) {
            push_formatted(line, now, DATE_FORMAT);
        }
        if self.intersects(Self::TIME | Self::MICROSECONDS) {
            push_formatted(line, now, TIME_FORMAT);
            if self.contains(Self::MICROSECONDS) {
                push_formatted(line, now, MICROS_FORMAT);
            }
            line.push(' ');
        }
    }
}

fn push_formatted(line: &mut String, now: OffsetDateTime, format: &[BorrowedFormatItem<'_>]) {
    if let Ok(text) = now.format(format) {
        line.push_str(&text);
    }
}

impl BitOr for OutputFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for OutputFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for OutputFlags {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Debug for OutputFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::DATE, "DATE"),
            (Self::TIME, "TIME"),
            (Self::MICROSECONDS, "MICROSECONDS"),
            (Self::UTC, "UTC"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in names {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// Destination stream of rendered lines.
///
/// The writer sits behind a mutex so that each line reaches it through one
/// `write_all` call and concurrent lines never interleave. The flags live on
/// the sink, so replacing the sink carries the current flags over.
pub(crate) struct OutputSink {
    writer: Mutex<Box<dyn Write + Send>>,
    flags: AtomicU32,
}

impl OutputSink {
    pub(crate) fn new(writer: Box<dyn Write + Send>, flags: OutputFlags) -> Self {
        Self {
            writer: Mutex::new(writer),
            flags: AtomicU32::new(flags.bits()),
        }
    }

    pub(crate) fn stderr() -> Self {
        Self::new(Box::new(io::stderr()), OutputFlags::STANDARD)
    }

    pub(crate) fn flags(&self) -> OutputFlags {
        OutputFlags::from_bits(self.flags.load(Ordering::Acquire))
    }

    pub(crate) fn set_flags(&self, flags: OutputFlags) {
        self.flags.store(flags.bits(), Ordering::Release);
    }

    /// Clears the timestamp bits, keeping any other flag.
    pub(crate) fn clear_timestamp(&self) {
        self.flags
            .fetch_and(!OutputFlags::TIMESTAMP.bits(), Ordering::AcqRel);
    }

    /// Writes `body` prefixed by the timestamp and terminated by a newline.
    pub(crate) fn write_line(&self, body: &str) -> io::Result<()> {
        let mut line = String::with_capacity(body.len() + 28);
        self.flags().write_timestamp(&mut line);
        line.push_str(body);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink")
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}
