//! Integration tests for line rendering and caller attribution.
//!
//! Every entry point is exercised against an in-memory sink with the
//! timestamp disabled, comparing the rendered line with and without the
//! trailing ` -- <call site>` suffix.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use clog::{ContentTag, Level, Logger, OutputFlags, Palette, tag};
use test_support::{CaptureBuffer, TempLogFile, strip_caller};

fn capture() -> (Logger, CaptureBuffer) {
    let buffer = CaptureBuffer::new();
    let logger = Logger::with_output(buffer.clone());
    logger.set_flags(OutputFlags::NONE);
    (logger, buffer)
}

const ANSI: Palette = Palette::ANSI;

// ============================================================================
// Rendering Table
// ============================================================================

/// Verifies every non-terminal entry point against its expected rendering.
#[test]
fn rendering_table() {
    let (logger, buffer) = capture();
    logger.set_level(Level::Debug);
    logger.enable_key("k");
    let red = ANSI.fg_red;
    let yellow = ANSI.fg_yellow;
    let blue = ANSI.fg_blue;
    let reset = ANSI.reset;

    let cases: Vec<(Box<dyn Fn(&Logger)>, String)> = vec![
        (Box::new(|l: &Logger| l.log(format_args!("a{}", 1))), "a1".to_owned()),
        (Box::new(|l: &Logger| l.printf(format_args!("a{}", 1))), "a1".to_owned()),
        (Box::new(|l: &Logger| l.print(&[&"a", &1])), "a1".to_owned()),
        (
            Box::new(|l: &Logger| l.to("k", format_args!("a{}", 1))),
            format!("{yellow}k: {reset}a1"),
        ),
        (
            Box::new(|l: &Logger| l.warn(&[&"a", &1])),
            format!("{red}WARNING: a1{reset}"),
        ),
        (
            Box::new(|l: &Logger| l.warnf(format_args!("a{}", 1))),
            format!("{red}WARNING: a1{reset}"),
        ),
        (
            Box::new(|l: &Logger| l.debug(&[&"a", &1])),
            format!("{blue}DEBUG: a1{reset}"),
        ),
        (
            Box::new(|l: &Logger| l.debugf(format_args!("a{}", 1))),
            format!("{blue}DEBUG: a1{reset}"),
        ),
        (
            Box::new(|l: &Logger| l.errorf(format_args!("a{}", 1))),
            format!("{red}ERROR: a1{reset}"),
        ),
        (
            Box::new(|l: &Logger| {
                let _ = l.error(Err::<(), _>("a1"));
            }),
            format!("{red}ERROR: a1{reset}"),
        ),
        (
            Box::new(|l: &Logger| l.temp(&[&"a", &1])),
            format!("{yellow}TEMP: a1{reset}"),
        ),
        (
            Box::new(|l: &Logger| l.tempf(format_args!("a{}", 1))),
            format!("{yellow}TEMP: a1{reset}"),
        ),
    ];

    for (index, (call, expected)) in cases.iter().enumerate() {
        for include_caller in [true, false] {
            logger.set_include_caller(include_caller);
            call(&logger);
            let line = buffer.only_line();
            buffer.clear();
            assert_eq!(strip_caller(&line, ANSI.dim), expected, "case {index}");
            if !include_caller {
                assert_eq!(&line, expected, "case {index} without caller");
            }
        }
    }
}

/// Verifies the suffix points at this file for the `#[track_caller]` methods.
#[test]
fn method_call_site_is_the_test_file() {
    let (logger, buffer) = capture();
    logger.disable_color();
    let line_no = line!() + 1;
    logger.warnf(format_args!("x"));
    assert_eq!(
        buffer.only_line(),
        format!("WARNING: x -- emission.rs:{line_no}")
    );
}

/// Verifies the macros attribute the enclosing function as well.
#[test]
fn macro_call_site_names_function() {
    let (logger, buffer) = capture();
    logger.disable_color();
    let line_no = line!() + 1;
    clog::warnf!(logger: &logger, "disk {}%", 93);
    assert_eq!(
        buffer.only_line(),
        format!("WARNING: disk 93% -- emission::macro_call_site_names_function() at emission.rs:{line_no}")
    );
}

/// Verifies the concatenating macros join their arguments.
#[test]
fn concatenating_macros_join_arguments() {
    let (logger, buffer) = capture();
    logger.disable_color();
    logger.set_include_caller(false);
    logger.set_level(Level::Debug);
    clog::warn!(logger: &logger, "a", 1, 'c');
    clog::debug!(logger: &logger, "b", 2);
    clog::temp!(logger: &logger, "t", 3.5);
    assert_eq!(buffer.lines(), vec!["WARNING: a1c", "DEBUG: b2", "TEMP: t3.5"]);
}

/// Verifies the plain and keyed macros never attribute a call site.
#[test]
fn plain_macros_have_no_suffix() {
    let (logger, buffer) = capture();
    logger.enable_key("net");
    clog::log!(logger: &logger, "one {}", 1);
    clog::printf!(logger: &logger, "two");
    clog::to!(logger: &logger, "net", "three");
    clog::to!(logger: &logger, "off", "hidden");
    assert_eq!(
        buffer.lines(),
        vec![
            "one 1".to_owned(),
            "two".to_owned(),
            format!("{}net: {}three", ANSI.fg_yellow, ANSI.reset),
        ]
    );
}

/// Verifies content tags embed in messages.
#[test]
fn tagged_values_render_inline() {
    let (logger, buffer) = capture();
    logger.log(format_args!(
        "opened {} for {}",
        tag(ContentTag::SystemData, "/var/db"),
        tag(ContentTag::UserData, "alice")
    ));
    assert_eq!(buffer.only_line(), "opened <sd>/var/db</sd> for <ud>alice</ud>");
}

// ============================================================================
// Gating
// ============================================================================

/// Verifies `error` passes results through and respects the threshold.
#[test]
fn error_passthrough_and_gate() {
    let (logger, buffer) = capture();
    let ok: Result<i32, std::io::Error> = Ok(5);
    assert_eq!(logger.error(ok).unwrap(), 5);
    assert!(buffer.is_empty());

    let err = std::io::Error::other("disk gone");
    let returned = logger.error::<(), _>(Err(err)).unwrap_err();
    assert_eq!(returned.to_string(), "disk gone");
    assert_eq!(buffer.lines().len(), 1);
    assert!(buffer.contents().contains("ERROR: disk gone"));

    buffer.clear();
    logger.set_level(Level::Panic);
    let _ = logger.error::<(), _>(Err("suppressed"));
    assert!(buffer.is_empty());
}

/// Verifies keyed output needs both the key and a Normal threshold.
#[test]
fn keyed_output_needs_key_and_level() {
    let (logger, buffer) = capture();
    logger.to("k", format_args!("off"));
    assert!(buffer.is_empty());

    logger.enable_key("k");
    logger.to("k", format_args!("on"));
    assert_eq!(buffer.lines().len(), 1);

    buffer.clear();
    logger.set_level(Level::Warning);
    logger.to("k", format_args!("above threshold"));
    assert!(buffer.is_empty());
}

/// Verifies `TEMP` ignores the threshold.
#[test]
fn temp_bypasses_level() {
    let (logger, buffer) = capture();
    logger.set_level(Level::Panic);
    logger.tempf(format_args!("still here"));
    assert_eq!(buffer.lines().len(), 1);
}

// ============================================================================
// Sinks
// ============================================================================

/// Verifies the default flags put a microsecond time of day in front.
#[test]
fn default_flags_prefix_time_of_day() {
    let buffer = CaptureBuffer::new();
    let logger = Logger::with_output(buffer.clone());
    logger.set_flags(OutputFlags::MICROSECONDS | OutputFlags::UTC);
    logger.log(format_args!("tick"));
    let line = buffer.only_line();
    let (stamp, rest) = line.split_once(' ').unwrap();
    assert_eq!(rest, "tick");
    assert_eq!(stamp.len(), "00:00:00.000000".len(), "{line}");
    assert!(stamp.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.'));
}

/// Verifies empty plain messages still write a line, timestamp included.
#[test]
fn empty_plain_messages_still_write() {
    let buffer = CaptureBuffer::new();
    let logger = Logger::with_output(buffer.clone());
    logger.set_flags(OutputFlags::MICROSECONDS | OutputFlags::UTC);
    logger.log(format_args!(""));
    logger.print(&[]);
    logger.printf(format_args!("{}", ""));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3, "{lines:?}");
    for line in &lines {
        assert_eq!(line.len(), "00:00:00.000000 ".len(), "{line:?}");
        assert!(line.ends_with(' '));
    }

    let (logger, buffer) = capture();
    logger.log(format_args!(""));
    assert_eq!(buffer.contents(), "\n");
}

/// Verifies output can be redirected to a file mid-run.
#[test]
fn redirect_to_file() {
    let file = TempLogFile::new("clog.log").unwrap();
    let (logger, buffer) = capture();
    logger.log(format_args!("before"));
    logger.set_output(file.open_append().unwrap());
    logger.log(format_args!("after"));

    assert_eq!(buffer.only_line(), "before");
    assert_eq!(file.read().unwrap(), "after\n");
}

/// Verifies concurrent writers never interleave within a line.
#[test]
fn concurrent_lines_stay_whole() {
    let (logger, buffer) = capture();
    let logger = Arc::new(logger);
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    logger.log(format_args!("thread-{t} line-{i} {}", "x".repeat(64)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let lines = buffer.lines();
    assert_eq!(lines.len(), 800);
    for line in lines {
        assert!(line.starts_with("thread-"), "{line}");
        assert!(line.ends_with(&"x".repeat(64)), "{line}");
    }
}

/// Verifies write failures are swallowed.
#[test]
fn failing_writer_is_ignored() {
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let logger = Logger::with_output(Broken);
    logger.log(format_args!("dropped"));
    logger.errorf(format_args!("dropped too"));
}

// ============================================================================
// Formatter
// ============================================================================

/// Verifies formatter labels and the caller suffix on formatted lines.
#[test]
fn formatter_labels() {
    let (logger, buffer) = capture();
    logger.disable_color();
    logger.set_include_caller(false);
    logger.enable_key("net");
    logger.set_level(Level::Debug);
    logger.set_formatter(clog::formatter_fn(|label, message| {
        format!("{label}={message}")
    }));

    logger.log(format_args!("1"));
    logger.print(&[&2]);
    logger.to("net", format_args!("3"));
    logger.debugf(format_args!("4"));
    logger.tempf(format_args!("5"));
    assert_eq!(
        buffer.lines(),
        vec!["LOG=1", "LOG=2", "net=3", "DEBUG=4", "TEMP=5"]
    );
}

/// Verifies a blank formatter result suppresses the write entirely.
#[test]
fn blank_formatter_result_suppresses() {
    let (logger, buffer) = capture();
    logger.set_formatter(clog::formatter_fn(|label, message| {
        if label == "WARNING" {
            String::new()
        } else {
            message.to_string()
        }
    }));
    logger.warnf(format_args!("dropped"));
    logger.log(format_args!("kept"));
    assert_eq!(buffer.only_line(), "kept");
}

/// Verifies installing a formatter clears the timestamp flags for good.
#[test]
fn formatter_clears_time_flags() {
    let logger = Logger::with_output(std::io::sink());
    logger.set_flags(OutputFlags::DATE | OutputFlags::TIME);
    logger.set_formatter(clog::formatter_fn(|_, m| m.to_string()));
    assert_eq!(logger.flags(), OutputFlags::NONE);
    logger.clear_formatter();
    assert_eq!(logger.flags(), OutputFlags::NONE);
}
