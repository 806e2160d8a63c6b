//! crates/clog/src/tracing_bridge.rs
//! Bridge between the tracing crate and a [`Logger`].
//!
//! [`ClogLayer`] is a tracing-subscriber layer that renders tracing events
//! through the logger's emission engine, so events share its sink, level
//! threshold, key filters and colors.
//!
//! | tracing level   | entry                                         |
//! |-----------------|-----------------------------------------------|
//! | `ERROR`         | `ERROR` line                                  |
//! | `WARN`          | `WARNING` line                                |
//! | `INFO`          | keyed line when the target is an enabled key, |
//! |                 | plain line otherwise                          |
//! | `DEBUG`/`TRACE` | `DEBUG` line                                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! clog::logger().enable_key("http");
//! clog::init_tracing();
//!
//! tracing::info!(target: "http", "GET /index.html");
//! tracing::warn!("disk {}% full", 93);
//! ```

use std::borrow::Borrow;
use std::fmt::{self, Write as _};

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::caller::CallSite;
use crate::emit::Label;
use crate::logger::Logger;

/// A tracing layer that writes events through a [`Logger`].
pub struct ClogLayer<L = &'static Logger> {
    logger: L,
}

impl ClogLayer {
    /// Creates a layer over the process-wide logger.
    #[must_use]
    pub fn global() -> Self {
        Self::new(crate::logger())
    }
}

impl<L: Borrow<Logger>> ClogLayer<L> {
    /// Creates a layer over `logger`.
    #[must_use]
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    fn label_for<'t>(&self, level: Level, target: &'t str) -> Label<'t> {
        match level {
            Level::ERROR => Label::Error,
            Level::WARN => Label::Warning,
            Level::INFO if self.logger.borrow().key_enabled(target) => Label::Key(target),
            Level::INFO => Label::Plain,
            _ => Label::Debug,
        }
    }
}

impl<L> fmt::Debug for ClogLayer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClogLayer")
    }
}

impl<S, L> Layer<S> for ClogLayer<L>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    L: Borrow<Logger> + Send + Sync + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let label = self.label_for(*metadata.level(), metadata.target());
        let logger = self.logger.borrow();
        if !logger.would_emit(label) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let site = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => CallSite::new("", file, line),
            _ => CallSite::UNKNOWN,
        };
        logger.emit(label, format_args!("{}", visitor.text), site);
    }
}

/// Collects the `message` field followed by the other fields as `name=value`.
#[derive(Default)]
struct MessageVisitor {
    text: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if name == "message" {
            let _ = self.text.write_fmt(value);
            self.text.push_str(&std::mem::take(&mut self.fields));
        } else {
            let target = if self.text.is_empty() {
                &mut self.fields
            } else {
                &mut self.text
            };
            let _ = write!(target, " {name}={value}");
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        self.push_field(field.name(), format_args!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push_field(field.name(), format_args!("{value}"));
    }
}

/// Installs a global tracing subscriber that writes through the
/// process-wide logger.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(ClogLayer::global())
        .init();
}

/// Same as [`init_tracing`] with an additional filter layer in front.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing_with_filter<F>(filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(ClogLayer::global())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level as ClogLevel;
    use crate::output::OutputFlags;
    use std::sync::Arc;
    use test_support::CaptureBuffer;
    use tracing_subscriber::layer::SubscriberExt;

    fn setup() -> (Arc<Logger>, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let logger = Arc::new(Logger::with_output(buffer.clone()));
        logger.set_flags(OutputFlags::NONE);
        logger.disable_color();
        logger.set_include_caller(false);
        (logger, buffer)
    }

    fn with_layer(logger: &Arc<Logger>, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(ClogLayer::new(Arc::clone(logger)));
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn levels_map_to_labels() {
        let (logger, buffer) = setup();
        logger.set_level(ClogLevel::Debug);
        with_layer(&logger, || {
            tracing::error!("e");
            tracing::warn!("w");
            tracing::info!("i");
            tracing::debug!("d");
            tracing::trace!("t");
        });
        assert_eq!(
            buffer.lines(),
            vec!["ERROR: e", "WARNING: w", "i", "DEBUG: d", "DEBUG: t"]
        );
    }

    #[test]
    fn info_with_enabled_target_is_keyed() {
        let (logger, buffer) = setup();
        logger.enable_key("http");
        with_layer(&logger, || {
            tracing::info!(target: "http", "GET /");
            tracing::info!(target: "disk", "sync");
        });
        assert_eq!(buffer.lines(), vec!["http: GET /", "sync"]);
    }

    #[test]
    fn threshold_applies() {
        let (logger, buffer) = setup();
        logger.set_level(ClogLevel::Error);
        with_layer(&logger, || {
            tracing::warn!("hidden");
            tracing::debug!("hidden");
            tracing::error!("shown");
        });
        assert_eq!(buffer.lines(), vec!["ERROR: shown"]);
    }

    #[test]
    fn fields_follow_message() {
        let (logger, buffer) = setup();
        with_layer(&logger, || {
            tracing::warn!(attempt = 3, "retrying");
        });
        assert_eq!(buffer.only_line(), "WARNING: retrying attempt=3");
    }

    #[test]
    fn caller_comes_from_event_metadata() {
        let (logger, buffer) = setup();
        logger.set_include_caller(true);
        with_layer(&logger, || {
            tracing::warn!("here");
        });
        let line = buffer.only_line();
        assert!(line.starts_with("WARNING: here -- tracing_bridge.rs:"), "{line}");
    }
}
