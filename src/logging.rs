//! Routes `tracing` events to the browser console.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Install the console subscriber. Events below `level` are dropped.
pub fn init(level: Level) {
    let filter = EnvFilter::default().add_directive(LevelFilter::from_level(level).into());

    if tracing_subscriber::registry()
        .with(ConsoleLayer.with_filter(filter))
        .try_init()
        .is_err()
    {
        console::warn_1(&JsValue::from_str("tracing subscriber already installed"));
    }
}

struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut line = LineVisitor::default();
        event.record(&mut line);

        let text = JsValue::from_str(&format!(
            "{} {}: {}{}",
            meta.level(),
            meta.target(),
            line.message,
            line.fields
        ));
        match *meta.level() {
            Level::ERROR => console::error_1(&text),
            Level::WARN => console::warn_1(&text),
            Level::INFO => console::info_1(&text),
            _ => console::debug_1(&text),
        }
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
