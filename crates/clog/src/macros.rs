//! crates/clog/src/macros.rs
//! Logging macros over the process-wide logger.
//!
//! Unlike the plain functions, the macros record the enclosing function
//! together with the file and line, so attributed lines read
//! `module::function() at file.rs:42`.
//!
//! Every macro also accepts a leading `logger: <expr>,` argument to write
//! through an explicit [`Logger`](crate::Logger) instead.
//!
//! Format-style macros (`log!`, `warnf!`, ...) take `format!` arguments.
//! Concatenating macros (`warn!`, `debug!`, `temp!`, `fatal!`) take a list of
//! displayable expressions and join them without separators.

/// Writes a plain formatted line at Normal severity.
///
/// ```
/// let files = 3;
/// clog::log!("synced {files} files");
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.log(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logger().log(::core::format_args!($($arg)+))
    };
}

/// Same as [`log!`].
#[macro_export]
macro_rules! printf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.printf(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logger().printf(::core::format_args!($($arg)+))
    };
}

/// Writes a formatted line prefixed by a key, only while the key is enabled.
///
/// ```
/// clog::logger().enable_key("http");
/// clog::to!("http", "GET {}", "/index.html");
/// ```
#[macro_export]
macro_rules! to {
    (logger: $logger:expr, $key:expr, $($arg:tt)+) => {
        $logger.to($key, ::core::format_args!($($arg)+))
    };
    ($key:expr, $($arg:tt)+) => {
        $crate::logger().to($key, ::core::format_args!($($arg)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit_concat {
    ($logger:expr, $label:ident, $($arg:expr),+) => {
        $logger.emit(
            $crate::Label::$label,
            ::core::format_args!(
                "{}",
                $crate::Concat(&[$(&$arg as &dyn ::core::fmt::Display),+])
            ),
            $crate::call_site!(),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit_format {
    ($logger:expr, $label:ident, $($arg:tt)+) => {
        $logger.emit(
            $crate::Label::$label,
            ::core::format_args!($($arg)+),
            $crate::call_site!(),
        )
    };
}

/// Concatenates its arguments into a `WARNING` line.
///
/// ```
/// clog::warn!("disk ", 93, "% full");
/// ```
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_concat!($logger, Warning, $($arg),+)
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::__emit_concat!($crate::logger(), Warning, $($arg),+)
    };
}

/// Formats a `WARNING` line.
#[macro_export]
macro_rules! warnf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__emit_format!($logger, Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__emit_format!($crate::logger(), Warning, $($arg)+)
    };
}

/// Concatenates its arguments into a `DEBUG` line.
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_concat!($logger, Debug, $($arg),+)
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::__emit_concat!($crate::logger(), Debug, $($arg),+)
    };
}

/// Formats a `DEBUG` line.
#[macro_export]
macro_rules! debugf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__emit_format!($logger, Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__emit_format!($crate::logger(), Debug, $($arg)+)
    };
}

/// Formats an `ERROR` line.
///
/// ```
/// clog::errorf!("open {}: {}", "/etc/app.toml", "permission denied");
/// ```
#[macro_export]
macro_rules! errorf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__emit_format!($logger, Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__emit_format!($crate::logger(), Error, $($arg)+)
    };
}

/// Concatenates its arguments into a `TEMP` line, regardless of level.
#[macro_export]
macro_rules! temp {
    (logger: $logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_concat!($logger, Temp, $($arg),+)
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::__emit_concat!($crate::logger(), Temp, $($arg),+)
    };
}

/// Formats a `TEMP` line, regardless of level.
#[macro_export]
macro_rules! tempf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__emit_format!($logger, Temp, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__emit_format!($crate::logger(), Temp, $($arg)+)
    };
}

/// Writes a formatted `PANIC` line, then panics with the message.
#[macro_export]
macro_rules! panicf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.panic_at(::core::format_args!($($arg)+), $crate::call_site!())
    };
    ($($arg:tt)+) => {
        $crate::logger().panic_at(::core::format_args!($($arg)+), $crate::call_site!())
    };
}

/// Concatenates its arguments into a `FATAL` line, then exits with status 1.
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.fatal_at(
            ::core::format_args!(
                "{}",
                $crate::Concat(&[$(&$arg as &dyn ::core::fmt::Display),+])
            ),
            $crate::call_site!(),
        )
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::fatal!(logger: $crate::logger(), $($arg),+)
    };
}

/// Formats a `FATAL` line, then exits with status 1.
#[macro_export]
macro_rules! fatalf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.fatal_at(::core::format_args!($($arg)+), $crate::call_site!())
    };
    ($($arg:tt)+) => {
        $crate::logger().fatal_at(::core::format_args!($($arg)+), $crate::call_site!())
    };
}
