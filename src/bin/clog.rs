#![deny(unsafe_code)]

//! `clog` demo binary: configures the process-wide logger from the command
//! line and the environment, then writes one line per entry point.

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use clog::{ContentTag, Level, LogConfig, Logger, tag};

fn command() -> Command {
    Command::new("clog")
        .about("Write one sample line through every clog entry point.")
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("KEYS")
                .help("Comma-separated keys to enable; `bw` disables color, `notime` the timestamp.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .value_name("LEVEL")
                .help("Severity threshold: debug, normal, warning, error or panic.")
                .value_parser(|text: &str| text.parse::<Level>()),
        )
        .arg(
            Arg::new("no-caller")
                .long("no-caller")
                .help("Omit the call site from labeled lines.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable escape sequences.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-time")
                .long("no-time")
                .help("Disable the timestamp.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-env")
                .long("no-env")
                .help("Ignore CLOG_LEVEL, CLOG_KEYS, CLOG_NO_CALLER and NO_COLOR.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tracing")
                .long("tracing")
                .help("Also emit events through the tracing bridge.")
                .action(ArgAction::SetTrue),
        )
}

/// Applies the environment and then the command line to `logger`.
///
/// Command-line options win over the environment.
fn configure(matches: &ArgMatches, logger: &Logger) -> Result<(), clog::ConfigError> {
    if !matches.get_flag("no-env") {
        LogConfig::from_env()?.apply(logger);
    }
    if let Some(level) = matches.get_one::<Level>("level") {
        logger.set_level(*level);
    }
    if matches.get_flag("no-caller") {
        logger.set_include_caller(false);
    }
    if matches.get_flag("no-color") {
        logger.disable_color();
    }
    if matches.get_flag("no-time") {
        logger.disable_time();
    }
    if let Some(values) = matches.get_many::<String>("log") {
        for flags in values {
            logger.parse_log_flag(flags);
        }
    }
    Ok(())
}

/// Writes one sample line per non-terminal entry point.
fn demo(logger: &Logger) {
    logger.log(format_args!("log: {} keys enabled", logger.enabled_keys().len()));
    logger.printf(format_args!("printf: level is {}", logger.level()));
    logger.print(&[&"print: ", &"concatenated ", &42]);
    for key in logger.enabled_keys() {
        logger.to(&key, format_args!("to: keyed line for {key}"));
    }
    clog::warnf!(logger: logger, "warnf: disk {}% full", 93);
    clog::warn!(logger: logger, "warn: ", "concatenated");
    clog::debugf!(logger: logger, "debugf: {} bytes buffered", 4096);
    clog::debug!(logger: logger, "debug: ", "concatenated");
    let _ = logger.error(
        "not-a-port"
            .parse::<u16>()
            .map_err(|err| format!("error: parsing port: {err}")),
    );
    clog::errorf!(
        logger: logger,
        "errorf: cannot open {}",
        tag(ContentTag::SystemData, "/var/lib/app/db")
    );
    clog::tempf!(logger: logger, "tempf: user {}", tag(ContentTag::UserData, "alice"));
    clog::temp!(logger: logger, "temp: ", "concatenated");
}

#[cfg(feature = "tracing")]
fn demo_tracing(matches: &ArgMatches) {
    if matches.get_flag("tracing") {
        clog::init_tracing();
        tracing::warn!(attempt = 2, "tracing: retrying");
        tracing::info!("tracing: plain info");
    }
}

#[cfg(not(feature = "tracing"))]
fn demo_tracing(_matches: &ArgMatches) {}

/// Parses `args`, configures the global logger and runs the demo.
fn run_with<I, T>(args: I, stderr: &mut impl Write) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            let _ = write!(stderr, "{err}");
            return if err.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let logger = clog::logger();
    if let Err(err) = configure(&matches, logger) {
        let _ = writeln!(stderr, "clog: {err}");
        return ExitCode::from(2);
    }
    demo(logger);
    demo_tracing(&matches);
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let mut stderr = io::stderr().lock();
    run_with(std::env::args_os(), &mut stderr)
}
