//! Capture tracing events emitted by library code on the current thread.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

type Events = Arc<Mutex<Vec<CapturedEvent>>>;

/// Records events until dropped.
pub struct LogCapture {
    events: Events,
    _guard: tracing::subscriber::DefaultGuard,
}

impl LogCapture {
    /// Install a thread-local subscriber that records every event.
    pub fn start() -> Self {
        let events = Events::default();
        let subscriber = tracing_subscriber::registry().with(Recorder {
            events: Arc::clone(&events),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        Self {
            events,
            _guard: guard,
        }
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn assert_logged(&self, level: tracing::Level, needle: &str) {
        let events = self.events();
        assert!(
            events
                .iter()
                .any(|e| e.level == level && e.message.contains(needle)),
            "no {level} event containing {needle:?}; got {:#?}",
            events
                .iter()
                .map(|e| (e.level, &e.message))
                .collect::<Vec<_>>()
        );
    }

    pub fn assert_field(&self, name: &str, value: &str) {
        let events = self.events();
        assert!(
            events
                .iter()
                .any(|e| e.fields.iter().any(|(k, v)| k == name && v == value)),
            "no event with {name}={value}; got {:#?}",
            events.iter().map(|e| &e.fields).collect::<Vec<_>>()
        );
    }

    pub fn assert_no_warnings(&self) {
        let noisy: Vec<_> = self
            .events()
            .into_iter()
            .filter(|e| e.level <= tracing::Level::WARN)
            .collect();
        assert!(noisy.is_empty(), "unexpected warnings: {noisy:#?}");
    }
}

struct Recorder {
    events: Events,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Recorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = Fields::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedEvent {
                level: *meta.level(),
                target: meta.target().to_string(),
                message: visitor.message,
                fields: visitor.fields,
            });
    }
}

#[derive(Default)]
struct Fields {
    message: String,
    fields: Vec<(String, String)>,
}

impl Fields {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}
