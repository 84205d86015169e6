#![forbid(unsafe_code)]

//! DOM binding for one swipeable item (`wasm32` only).
//!
//! Expected markup, all under one item root element:
//!
//! ```html
//! <li class="swipeable">
//!   <div data-swipe-left>Delete</div>
//!   <div data-swipe-right>Archive</div>
//!   <div data-swipe-content>Row content</div>
//! </li>
//! ```
//!
//! The content element is translated; panel elements get their opacity
//! written; the root carries a `data-swipe-state` attribute
//! (`dragging` / `returning` / `removing`) for transition styling.
//!
//! Action and handler callbacks run while the binding is borrowed. They must
//! not call back into the same binding synchronously; use
//! [`SwipeBinding::with_item`] from a later task instead.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use swipe_core::{Side, SwipeableItem, VisualState, VisualSurface};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, TouchList};
use web_time::Instant;

use crate::adapter::{GestureInputAdapter, InputDispatch, TouchContact};
use crate::error::BindError;

pub const CONTENT_SELECTOR: &str = "[data-swipe-content]";
pub const LEFT_PANEL_SELECTOR: &str = "[data-swipe-left]";
pub const RIGHT_PANEL_SELECTOR: &str = "[data-swipe-right]";
pub const STATE_ATTRIBUTE: &str = "data-swipe-state";

// ---------------------------------------------------------------------------
// DomSurface
// ---------------------------------------------------------------------------

/// [`VisualSurface`] backed by inline styles on DOM elements.
#[derive(Debug, Clone)]
pub struct DomSurface {
    root: HtmlElement,
    content: HtmlElement,
    left: Option<HtmlElement>,
    right: Option<HtmlElement>,
}

impl DomSurface {
    /// Locate the content and panel elements under `root`.
    pub fn from_root(root: HtmlElement) -> Result<Self, BindError> {
        let content =
            find(&root, CONTENT_SELECTOR)?.ok_or(BindError::MissingElement(CONTENT_SELECTOR))?;
        let left = find(&root, LEFT_PANEL_SELECTOR)?;
        let right = find(&root, RIGHT_PANEL_SELECTOR)?;
        Ok(Self {
            root,
            content,
            left,
            right,
        })
    }

    fn panel(&self, side: Side) -> Option<&HtmlElement> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }
}

fn find(root: &HtmlElement, selector: &'static str) -> Result<Option<HtmlElement>, BindError> {
    let found = root
        .query_selector(selector)
        .map_err(|err| BindError::Js(format!("{err:?}")))?;
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        warn!(property, value, error = ?err, "style write failed");
    }
}

impl VisualSurface for DomSurface {
    fn item_width(&self) -> f64 {
        f64::from(self.content.offset_width())
    }

    fn set_translation(&mut self, px: f64) {
        set_style(&self.content, "transform", &format!("translateX({px}px)"));
    }

    fn set_opacity(&mut self, panel: Side, value: f64) {
        if let Some(element) = self.panel(panel) {
            set_style(element, "opacity", &value.to_string());
        }
    }

    fn set_visual_state(&mut self, state: VisualState) {
        let name = match state {
            VisualState::Dragging => "dragging",
            VisualState::Returning => "returning",
            VisualState::Removing => "removing",
        };
        if let Err(err) = self.root.set_attribute(STATE_ATTRIBUTE, name) {
            warn!(state = name, error = ?err, "state attribute write failed");
        }
    }
}

// ---------------------------------------------------------------------------
// SwipeBinding
// ---------------------------------------------------------------------------

struct Shared<C> {
    item: SwipeableItem<C>,
    surface: DomSurface,
    adapter: GestureInputAdapter,
    frame: Option<AnimationFrame>,
}

type SharedRef<C> = Rc<RefCell<Shared<C>>>;

/// Owns the DOM listeners and pending animation frame for one item.
///
/// Dropping the binding (or calling [`detach`](Self::detach)) removes every
/// listener and cancels any pending frame.
pub struct SwipeBinding<C: 'static = ()> {
    shared: SharedRef<C>,
    listeners: Vec<EventListener>,
}

impl<C: 'static> SwipeBinding<C> {
    /// Bind `item` to the markup under `root`.
    pub fn attach(root: HtmlElement, item: SwipeableItem<C>) -> Result<Self, BindError> {
        let window = web_sys::window().ok_or(BindError::NoWindow)?;
        let surface = DomSurface::from_root(root.clone())?;
        let shared = Rc::new(RefCell::new(Shared {
            item,
            surface,
            adapter: GestureInputAdapter::new(),
            frame: None,
        }));

        let listeners = vec![
            listen(&root, "mousedown", &shared, |adapter, event| {
                let event = event.dyn_ref::<MouseEvent>()?;
                Some(adapter.mouse_down(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    event.button(),
                ))
            }),
            listen(&root, "touchstart", &shared, |adapter, event| {
                let event = event.dyn_ref::<TouchEvent>()?;
                Some(adapter.touch_start(&contacts(&event.target_touches()), event.cancelable()))
            }),
            listen(&root, "touchmove", &shared, |adapter, event| {
                let event = event.dyn_ref::<TouchEvent>()?;
                Some(adapter.touch_move(&contacts(&event.changed_touches()), event.cancelable()))
            }),
            listen(&root, "touchend", &shared, |adapter, event| {
                let event = event.dyn_ref::<TouchEvent>()?;
                Some(adapter.touch_end(&contacts(&event.changed_touches())))
            }),
            listen(&root, "touchcancel", &shared, |adapter, event| {
                let event = event.dyn_ref::<TouchEvent>()?;
                Some(adapter.touch_cancel(&contacts(&event.changed_touches())))
            }),
            listen(&window, "mousemove", &shared, |adapter, event| {
                let event = event.dyn_ref::<MouseEvent>()?;
                Some(adapter.mouse_move(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    event.cancelable(),
                ))
            }),
            listen(&window, "mouseup", &shared, |adapter, event| {
                let event = event.dyn_ref::<MouseEvent>()?;
                Some(adapter.mouse_up(f64::from(event.client_x()), f64::from(event.client_y())))
            }),
        ];

        Ok(Self { shared, listeners })
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Run `f` against the bound item (for reconfiguration).
    pub fn with_item<R>(&self, f: impl FnOnce(&mut SwipeableItem<C>) -> R) -> Result<R, BindError> {
        let mut shared = self.shared.try_borrow_mut().map_err(|_| BindError::Busy)?;
        Ok(f(&mut shared.item))
    }

    /// Remove all listeners and cancel any pending frame. Idempotent.
    pub fn detach(&mut self) {
        self.listeners.clear();
        match self.shared.try_borrow_mut() {
            Ok(mut shared) => {
                shared.frame = None;
                shared.item.teardown();
                shared.adapter.reset();
            }
            Err(_) => warn!("detach while dispatching; gesture state left in place"),
        }
    }
}

impl<C: 'static> Drop for SwipeBinding<C> {
    fn drop(&mut self) {
        self.detach();
    }
}

fn listen<C: 'static>(
    target: &EventTarget,
    event_type: &'static str,
    shared: &SharedRef<C>,
    normalize: impl Fn(&mut GestureInputAdapter, &Event) -> Option<InputDispatch> + 'static,
) -> EventListener {
    let weak = Rc::downgrade(shared);
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        move |event: &Event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut guard) = shared.try_borrow_mut() else {
                return;
            };
            let Some(dispatch) = normalize(&mut guard.adapter, event) else {
                return;
            };
            let Some(input) = dispatch.gesture else {
                return;
            };

            let Shared {
                item,
                surface,
                frame,
                ..
            } = &mut *guard;
            let response = item.handle(input, Instant::now(), surface);
            if !item.frame_pending() {
                frame.take();
            }
            drop(guard);

            if response.prevent_default {
                event.prevent_default();
            }
            if response.frame_requested {
                schedule_frame(&shared);
            }
        },
    )
}

fn schedule_frame<C: 'static>(shared: &SharedRef<C>) {
    let weak = Rc::downgrade(shared);
    let handle = request_animation_frame(move |_timestamp| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Ok(mut guard) = shared.try_borrow_mut() else {
            return;
        };
        let Shared {
            item,
            surface,
            frame,
            ..
        } = &mut *guard;
        frame.take();
        item.run_frame(Instant::now(), surface);
        let retry = item.frame_pending();
        drop(guard);
        if retry {
            schedule_frame(&shared);
        }
    });
    if let Ok(mut shared) = shared.try_borrow_mut() {
        shared.frame = Some(handle);
    }
}

fn contacts(list: &TouchList) -> Vec<TouchContact> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .map(|touch| {
            TouchContact::new(
                touch.identifier(),
                f64::from(touch.client_x()),
                f64::from(touch.client_y()),
            )
        })
        .collect()
}
