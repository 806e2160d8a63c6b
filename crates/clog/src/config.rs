//! crates/clog/src/config.rs
//! Logger configuration gathered from files or the environment.

use std::env;

use crate::level::{Level, ParseLevelError};
use crate::logger::Logger;

/// Environment variable holding the severity threshold.
pub const LEVEL_VAR: &str = "CLOG_LEVEL";
/// Environment variable holding the comma-separated key flags.
pub const KEYS_VAR: &str = "CLOG_KEYS";
/// Environment variable that turns caller attribution off when truthy.
pub const NO_CALLER_VAR: &str = "CLOG_NO_CALLER";
/// Environment variable that disables color when set to anything non-empty.
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Error raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The level variable does not name a level.
    #[error("invalid {variable}")]
    Level {
        /// Variable that was read.
        variable: &'static str,
        /// Underlying parse failure.
        #[source]
        source: ParseLevelError,
    },
    /// A boolean variable holds something other than a yes/no word.
    #[error("invalid {variable}: expected a boolean, got {value:?}")]
    Bool {
        /// Variable that was read.
        variable: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Declarative logger settings.
///
/// Missing fields deserialize to their defaults, which match a fresh
/// [`Logger`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Severity threshold.
    pub level: Level,
    /// Append the call site to labeled lines.
    pub include_caller: bool,
    /// Render escape sequences.
    pub color: bool,
    /// Render the timestamp.
    pub time: bool,
    /// Flag tokens handed to [`Logger::parse_log_flags`].
    pub keys: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Normal,
            include_caller: true,
            color: true,
            time: true,
            keys: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Reads [`LEVEL_VAR`], [`KEYS_VAR`], [`NO_CALLER_VAR`] and
    /// [`NO_COLOR_VAR`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`LogConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(text) = lookup(LEVEL_VAR).filter(|text| !text.trim().is_empty()) {
            config.level = text.parse().map_err(|source| ConfigError::Level {
                variable: LEVEL_VAR,
                source,
            })?;
        }
        if let Some(text) = lookup(KEYS_VAR).filter(|text| !text.is_empty()) {
            config.keys = text.split(',').map(str::to_owned).collect();
        }
        if let Some(text) = lookup(NO_CALLER_VAR) {
            config.include_caller = !parse_bool(NO_CALLER_VAR, &text)?;
        }
        if lookup(NO_COLOR_VAR).is_some_and(|text| !text.is_empty()) {
            config.color = false;
        }

        Ok(config)
    }

    /// Pushes these settings into `logger`.
    ///
    /// Color and time can only be turned off. Keys go through
    /// [`Logger::parse_log_flags`], so `bw` and `notime` work here too.
    pub fn apply(&self, logger: &Logger) {
        logger.set_level(self.level);
        logger.set_include_caller(self.include_caller);
        if !self.color {
            logger.disable_color();
        }
        if !self.time {
            logger.disable_time();
        }
        if !self.keys.is_empty() {
            logger.parse_log_flags(&self.keys);
        }
    }
}

fn parse_bool(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ConfigError::Bool {
            variable,
            value: value.to_owned(),
        }),
    }
}
