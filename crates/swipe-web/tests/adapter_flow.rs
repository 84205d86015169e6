#![forbid(unsafe_code)]

//! Adapter output driven straight into a `SwipeableItem`.
//!
//! Run:
//!   cargo test -p swipe-web --test adapter_flow

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use swipe_core::{ActionSpec, AnimationOutcome, InputResponse, RecordingSurface, SwipeableItem};
use swipe_web::{DispatchOutcome, GestureInputAdapter, IgnoredReason, InputDispatch, TouchContact};
use tracing_subscriber::layer::SubscriberExt;
use web_time::{Duration, Instant};

struct Host {
    adapter: GestureInputAdapter,
    item: SwipeableItem,
    surface: RecordingSurface,
    now: Instant,
}

impl Host {
    fn new(item: SwipeableItem) -> Self {
        Self {
            adapter: GestureInputAdapter::new(),
            item,
            surface: RecordingSurface::new(200.0),
            now: Instant::now(),
        }
    }

    /// Forward one dispatch, then run animation frames every 10 ms until
    /// none is pending.
    fn feed(&mut self, dispatch: InputDispatch) -> Option<InputResponse> {
        let input = dispatch.gesture?;
        self.now += Duration::from_millis(5);
        let response = self.item.handle(input, self.now, &mut self.surface);
        if response.frame_requested {
            loop {
                self.now += Duration::from_millis(10);
                self.item.run_frame(self.now, &mut self.surface);
                if !self.item.frame_pending() {
                    break;
                }
            }
        }
        Some(response)
    }
}

fn touch(id: i32, x: f64) -> TouchContact {
    TouchContact::new(id, x, 300.0)
}

#[test]
fn touch_swipe_triggers_action() {
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let mut host = Host::new(SwipeableItem::new().left_action(
        ActionSpec::bare(move || counter.set(counter.get() + 1))
            .animation(AnimationOutcome::RemoveFromView),
    ));

    let d = host.adapter.touch_start(&[touch(1, 180.0)], true);
    host.feed(d);
    let d = host.adapter.touch_move(&[touch(1, 150.0)], true);
    let response = host.feed(d).expect("forwarded");
    assert!(response.prevent_default);

    let d = host.adapter.touch_move(&[touch(1, 40.0)], true);
    host.feed(d);
    // The first frame after this move lands inside the interval and is retried.
    assert_eq!(host.surface.translation(), -140.0);
    let d = host.adapter.touch_end(&[touch(1, 40.0)]);
    host.feed(d);

    assert_eq!(hits.get(), 1);
    assert_eq!(host.surface.translation(), -200.0);
}

#[test]
fn second_finger_cannot_hijack_the_gesture() {
    let mut host = Host::new(SwipeableItem::new().right_action(ActionSpec::bare(|| {})));

    let d = host.adapter.touch_start(&[touch(1, 0.0)], true);
    host.feed(d);
    let d = host.adapter.touch_start(&[touch(1, 0.0), touch(2, 100.0)], true);
    assert_eq!(d.outcome, DispatchOutcome::Ignored(IgnoredReason::ExtraContact));
    assert!(host.feed(d).is_none());

    let d = host.adapter.touch_move(&[touch(2, 190.0)], true);
    assert!(host.feed(d).is_none());
    let d = host.adapter.touch_move(&[touch(1, 30.0)], true);
    host.feed(d);

    assert_eq!(host.item.gesture().offset, 30.0);
}

#[test]
fn touch_cancel_resolves_like_release() {
    let ends = Rc::new(Cell::new(0));
    let counter = Rc::clone(&ends);
    let mut host = Host::new(
        SwipeableItem::new()
            .left_action(ActionSpec::bare(|| {}))
            .on_swipe_end(move || counter.set(counter.get() + 1)),
    );

    let d = host.adapter.touch_start(&[touch(4, 100.0)], true);
    host.feed(d);
    let d = host.adapter.touch_move(&[touch(4, 60.0)], true);
    host.feed(d);
    let d = host.adapter.touch_cancel(&[touch(4, 60.0)]);
    let response = host.feed(d).expect("forwarded");

    assert!(response.resolution.is_some());
    assert_eq!(ends.get(), 1);
    assert_eq!(host.surface.translation(), 0.0);
    assert_eq!(host.adapter.active_source(), None);
}

#[test]
fn right_click_never_starts_a_drag() {
    let mut host = Host::new(SwipeableItem::new().left_action(ActionSpec::bare(|| {})));
    let d = host.adapter.mouse_down(100.0, 0.0, 2);
    assert!(host.feed(d).is_none());
    let d = host.adapter.mouse_move(0.0, 0.0, true);
    assert!(host.feed(d).is_none());
    assert!(host.surface.ops().is_empty());
}

#[test]
fn ignored_signals_are_traced() {
    let events = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&events);

    struct Capture(Arc<Mutex<Vec<String>>>);
    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            struct Reason(Option<String>);
            impl tracing::field::Visit for Reason {
                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "reason" {
                        self.0 = Some(format!("{value:?}"));
                    }
                }
            }
            let mut reason = Reason(None);
            event.record(&mut reason);
            if let Some(reason) = reason.0 {
                self.0.lock().unwrap().push(reason);
            }
        }
    }

    let subscriber = tracing_subscriber::registry().with(Capture(sink));
    tracing::subscriber::with_default(subscriber, || {
        let mut adapter = GestureInputAdapter::new();
        adapter.mouse_up(0.0, 0.0);
        adapter.touch_start(&[touch(1, 0.0)], true);
        adapter.touch_move(&[touch(9, 0.0)], true);
    });

    assert_eq!(
        *events.lock().unwrap(),
        vec!["NoActiveGesture".to_string(), "ContactMismatch".to_string()]
    );
}
