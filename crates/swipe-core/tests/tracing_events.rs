#![forbid(unsafe_code)]

//! Structured log events emitted along the gesture path.
//!
//! Run:
//!   cargo test -p swipe-core --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use swipe_core::{ActionSpec, GestureInput, Point, RecordingSurface, SwipeableItem};
use tracing_subscriber::layer::SubscriberExt;
use web_time::{Duration, Instant};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Vec<&'a CapturedEvent> {
    events.iter().filter(|e| e.message == message).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn classification_and_resolution_are_logged_at_debug() {
    let events = capture(|| {
        let mut item = SwipeableItem::new().left_action(ActionSpec::bare(|| {}));
        let mut surface = RecordingSurface::new(200.0);
        let t0 = Instant::now();
        item.handle(GestureInput::start(Point::new(100.0, 0.0)), t0, &mut surface);
        item.handle(GestureInput::moved(Point::new(-20.0, 0.0)), t0, &mut surface);
        item.handle(GestureInput::end(Point::new(-20.0, 0.0)), t0, &mut surface);
    });

    let classified = find(&events, "gesture classified");
    assert_eq!(classified.len(), 1);
    assert_eq!(classified[0].level, tracing::Level::DEBUG);
    assert_eq!(classified[0].fields["direction"], "Left");
    assert_eq!(classified[0].fields["dx"], "-120");

    let resolved = find(&events, "swipe resolved");
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].fields["decision"], "Trigger(Left)");
    assert_eq!(resolved[0].fields["final_offset"], "-120");
}

#[test]
fn frames_are_logged_at_trace() {
    let events = capture(|| {
        let mut item = SwipeableItem::new().left_action(ActionSpec::bare(|| {}));
        let mut surface = RecordingSurface::new(200.0);
        let t0 = Instant::now();
        item.handle(GestureInput::start(Point::new(100.0, 0.0)), t0, &mut surface);
        item.handle(GestureInput::moved(Point::new(50.0, 0.0)), t0, &mut surface);
        item.run_frame(t0 + Duration::from_millis(4), &mut surface);
        item.handle(GestureInput::moved(Point::new(40.0, 0.0)), t0, &mut surface);
        item.run_frame(t0 + Duration::from_millis(20), &mut surface);
    });

    let skipped = find(&events, "frame skipped");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].level, tracing::Level::TRACE);
    assert_eq!(skipped[0].fields["reason"], "too soon");

    let applied = find(&events, "frame applied");
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].fields["offset"], "-60");
    assert_eq!(applied[0].fields["opacity"], "0.6");
}

#[test]
fn teardown_with_pending_frame_is_logged() {
    let events = capture(|| {
        let mut item = SwipeableItem::new().right_action(ActionSpec::bare(|| {}));
        let mut surface = RecordingSurface::new(200.0);
        item.handle(GestureInput::start(Point::new(0.0, 0.0)), Instant::now(), &mut surface);
        item.teardown();
        item.teardown();
    });

    assert_eq!(find(&events, "teardown cancelled a pending frame").len(), 1);
}
