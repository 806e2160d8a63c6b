//! crates/clog/src/level.rs
//! Severity levels and the atomic threshold cell.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

/// Ordered severity of a log call.
///
/// A call is emitted when the logger's threshold is less than or equal to the
/// call's intrinsic level. Setting the threshold to [`Level::Panic`] silences
/// everything except the entry points that bypass the gate.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u32)]
pub enum Level {
    /// Developer diagnostics.
    Debug = 0,
    /// Regular output from `log`, `printf`, `print` and `to`.
    #[default]
    Normal = 1,
    /// Recoverable problems.
    Warning = 2,
    /// Failures reported through `error` and `errorf`.
    Error = 3,
    /// Only the gate-bypassing entry points remain visible.
    Panic = 4,
}

impl Level {
    /// Every level in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Normal,
        Self::Warning,
        Self::Error,
        Self::Panic,
    ];

    /// Returns the lowercase name of the level.
    ///
    /// # Examples
    ///
    /// ```
    /// use clog::Level;
    ///
    /// assert_eq!(Level::Normal.as_str(), "normal");
    /// assert_eq!(Level::Warning.as_str(), "warning");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Panic => "panic",
        }
    }

    /// Returns the 32-bit code stored in the atomic threshold.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Converts a stored code back into a level.
    ///
    /// Codes above the highest level saturate to [`Level::Panic`].
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Debug,
            1 => Self::Normal,
            2 => Self::Warning,
            3 => Self::Error,
            _ => Self::Panic,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Level`] from text fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown log level: {input:?}")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// Returns the text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let level = match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "normal" | "info" => Self::Normal,
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            "panic" => Self::Panic,
            _ => {
                return Err(ParseLevelError {
                    input: input.to_owned(),
                });
            }
        };
        Ok(level)
    }
}

/// Process-wide severity threshold stored as a 32-bit code.
#[derive(Debug)]
pub(crate) struct AtomicLevel {
    code: AtomicU32,
}

impl AtomicLevel {
    pub(crate) const fn new(level: Level) -> Self {
        Self {
            code: AtomicU32::new(level.code()),
        }
    }

    pub(crate) fn get(&self) -> Level {
        Level::from_code(self.code.load(Ordering::Acquire))
    }

    /// Publishes `level` with a compare-and-swap loop against the value
    /// observed at each attempt. Returns the level it replaced.
    pub(crate) fn set(&self, level: Level) -> Level {
        let previous = self
            .code
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |_| Some(level.code()));
        match previous {
            Ok(code) | Err(code) => Level::from_code(code),
        }
    }

    /// Reports whether a call of intrinsic level `level` passes the gate.
    pub(crate) fn allows(&self, level: Level) -> bool {
        self.get() <= level
    }
}
