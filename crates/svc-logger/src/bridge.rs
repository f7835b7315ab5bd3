//! Route `tracing` events through a [`LogHandle`].
//!
//! Libraries that log with `tracing::info!` and friends end up in the same
//! JSON sink, with the same record shape as direct [`Logger`](crate::Logger)
//! calls. Span data is not recorded.

use std::fmt;

use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Level;
use crate::error::{LogError, Result};
use crate::handle::LogHandle;
use crate::record::Tag;

/// A `tracing_subscriber` layer writing every enabled event to a handle.
#[derive(Debug, Clone)]
pub struct LogLayer {
    handle: LogHandle,
}

impl LogLayer {
    pub fn new(handle: LogHandle) -> Self {
        Self { handle }
    }
}

impl<S: Subscriber> Layer<S> for LogLayer {
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.handle.enabled(Level::from_tracing(metadata.level()))
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(match self.handle.config().level {
            Level::Debug => LevelFilter::TRACE,
            Level::Info => LevelFilter::INFO,
            Level::Error => LevelFilter::ERROR,
        })
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut fields = FieldVisitor::default();
        event.record(&mut fields);

        let level_name = meta.level().to_string().to_lowercase();
        self.handle.emit(
            Level::from_tracing(meta.level()),
            &level_name,
            fields.message.as_deref().unwrap_or_default(),
            meta.file().zip(meta.line()),
            &fields.tags,
        );
    }
}

impl LogHandle {
    /// Install this handle as the process-wide `tracing` subscriber.
    ///
    /// Fails with [`LogError::Subscriber`] when another global subscriber is
    /// already set.
    pub fn install_global_subscriber(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(LogLayer::new(self.clone()))
            .try_init()
            .map_err(|e| LogError::Subscriber(e.to_string()))
    }
}

/// Collects event fields: `message` separately, everything else as tags.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    tags: Vec<Tag>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.tags.push(Tag::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::from(format!("{value:?}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;
    use crate::testing::Capture;

    fn scoped(config: LogConfig) -> (tracing::subscriber::DefaultGuard, Capture) {
        let capture = Capture::new();
        let subscriber =
            tracing_subscriber::registry().with(LogLayer::new(capture.handle(config)));
        (tracing::subscriber::set_default(subscriber), capture)
    }

    #[test]
    fn test_event_fields_become_tags() {
        let (_guard, buf) = scoped(LogConfig::default());
        tracing::info!(order_id = 17, customer = "ada", paid = true, "order placed");

        let recs = buf.records().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["level"], "info");
        assert_eq!(recs[0]["message"], "order placed");
        assert_eq!(recs[0]["order_id"], 17);
        assert_eq!(recs[0]["customer"], "ada");
        assert_eq!(recs[0]["paid"], true);
        assert!(recs[0]["caller"].as_str().unwrap().starts_with("src/bridge.rs:"));
    }

    #[test]
    fn test_formatted_message_and_warn_level() {
        let (_guard, buf) = scoped(LogConfig::default());
        let n = 3;
        tracing::warn!("retrying {} times", n);

        let recs = buf.records().unwrap();
        assert_eq!(recs[0]["level"], "warn");
        assert_eq!(recs[0]["message"], "retrying 3 times");
    }

    #[test]
    fn test_events_below_level_are_dropped() {
        let (_guard, buf) = scoped(LogConfig::default());
        tracing::debug!("not written");
        tracing::trace!("not written");
        tracing::error!(code = 500, "written");

        let recs = buf.records().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["level"], "error");
        assert_eq!(recs[0]["code"], 500);
    }

    #[test]
    fn test_debug_config_admits_trace() {
        let (_guard, buf) = scoped(LogConfig::default().with_level(Level::Debug));
        tracing::trace!(step = "parse", "tracing step");
        let recs = buf.records().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["level"], "trace");
    }
}
