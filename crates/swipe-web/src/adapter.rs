#![forbid(unsafe_code)]

//! Mouse/touch normalization into [`GestureInput`].
//!
//! Hosts report raw pointer signals; [`GestureInputAdapter`] turns them into
//! the single `start → move* → end` stream the engine consumes. It tracks
//! which source (mouse or touch) owns the current gesture and, for touch,
//! which contact. Signals that do not belong to the active gesture are
//! ignored with a deterministic [`IgnoredReason`].
//!
//! Rules:
//!
//! - Only the primary mouse button starts a mouse gesture.
//! - The first contact of a `touchstart` is tracked; extra fingers landing
//!   while it is down are ignored.
//! - A start while a gesture is active restarts (the previous end was lost).
//! - `touchcancel` ends the gesture like `touchend`.

use swipe_core::{GestureInput, Point};
use tracing::trace;

/// Primary (usually left) mouse button, as reported by `MouseEvent.button`.
pub const PRIMARY_BUTTON: i16 = 0;

/// Which input device drives the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// One touch contact (`Touch.identifier` plus client coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl TouchContact {
    #[must_use]
    pub const fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    #[inline]
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Raw lifecycle signal, named after the DOM event that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

/// Why a raw signal produced no gesture input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    ButtonNotPrimary,
    NoActiveGesture,
    SourceMismatch,
    ContactMismatch,
    ExtraContact,
    NoContacts,
}

/// Outcome category for one adapter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Forwarded,
    /// A start replaced a gesture that never saw its end.
    Restarted,
    Ignored(IgnoredReason),
}

/// Result of one adapter call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputDispatch {
    pub phase: PointerPhase,
    pub gesture: Option<GestureInput>,
    pub outcome: DispatchOutcome,
}

impl InputDispatch {
    fn forwarded(phase: PointerPhase, gesture: GestureInput) -> Self {
        Self {
            phase,
            gesture: Some(gesture),
            outcome: DispatchOutcome::Forwarded,
        }
    }

    fn started(phase: PointerPhase, gesture: GestureInput, restarted: bool) -> Self {
        Self {
            phase,
            gesture: Some(gesture),
            outcome: if restarted {
                DispatchOutcome::Restarted
            } else {
                DispatchOutcome::Forwarded
            },
        }
    }

    fn ignored(phase: PointerPhase, reason: IgnoredReason) -> Self {
        trace!(?phase, ?reason, "pointer signal ignored");
        Self {
            phase,
            gesture: None,
            outcome: DispatchOutcome::Ignored(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Active {
    Mouse,
    Touch(i32),
}

/// Collapses mouse and touch streams into one gesture stream.
#[derive(Debug, Clone, Default)]
pub struct GestureInputAdapter {
    active: Option<Active>,
}

impl GestureInputAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Source of the active gesture, if any.
    #[must_use]
    pub fn active_source(&self) -> Option<PointerSource> {
        self.active.map(|active| match active {
            Active::Mouse => PointerSource::Mouse,
            Active::Touch(_) => PointerSource::Touch,
        })
    }

    /// Tracked touch contact id, if a touch gesture is active.
    #[must_use]
    pub fn active_contact(&self) -> Option<i32> {
        match self.active {
            Some(Active::Touch(id)) => Some(id),
            _ => None,
        }
    }

    /// Forget the active gesture without emitting an end.
    pub fn reset(&mut self) {
        self.active = None;
    }

    // --- mouse -------------------------------------------------------------

    pub fn mouse_down(&mut self, x: f64, y: f64, button: i16) -> InputDispatch {
        let phase = PointerPhase::MouseDown;
        if button != PRIMARY_BUTTON {
            return InputDispatch::ignored(phase, IgnoredReason::ButtonNotPrimary);
        }
        let restarted = self.active.replace(Active::Mouse).is_some();
        InputDispatch::started(phase, GestureInput::start(Point::new(x, y)), restarted)
    }

    pub fn mouse_move(&mut self, x: f64, y: f64, cancelable: bool) -> InputDispatch {
        let phase = PointerPhase::MouseMove;
        match self.active {
            None => InputDispatch::ignored(phase, IgnoredReason::NoActiveGesture),
            Some(Active::Touch(_)) => InputDispatch::ignored(phase, IgnoredReason::SourceMismatch),
            Some(Active::Mouse) => InputDispatch::forwarded(
                phase,
                GestureInput::moved(Point::new(x, y)).cancelable(cancelable),
            ),
        }
    }

    pub fn mouse_up(&mut self, x: f64, y: f64) -> InputDispatch {
        let phase = PointerPhase::MouseUp;
        match self.active {
            None => InputDispatch::ignored(phase, IgnoredReason::NoActiveGesture),
            Some(Active::Touch(_)) => InputDispatch::ignored(phase, IgnoredReason::SourceMismatch),
            Some(Active::Mouse) => {
                self.active = None;
                InputDispatch::forwarded(phase, GestureInput::end(Point::new(x, y)))
            }
        }
    }

    // --- touch -------------------------------------------------------------

    /// `touches` is the full list of contacts currently on the element.
    pub fn touch_start(&mut self, touches: &[TouchContact], cancelable: bool) -> InputDispatch {
        let phase = PointerPhase::TouchStart;
        let Some(first) = touches.first() else {
            return InputDispatch::ignored(phase, IgnoredReason::NoContacts);
        };
        if let Some(Active::Touch(id)) = self.active
            && touches.iter().any(|t| t.id == id)
        {
            return InputDispatch::ignored(phase, IgnoredReason::ExtraContact);
        }
        let restarted = self.active.replace(Active::Touch(first.id)).is_some();
        InputDispatch::started(
            phase,
            GestureInput::start(first.point()).cancelable(cancelable),
            restarted,
        )
    }

    /// `changed` is the list of contacts that moved.
    pub fn touch_move(&mut self, changed: &[TouchContact], cancelable: bool) -> InputDispatch {
        let phase = PointerPhase::TouchMove;
        match self.tracked(phase, changed) {
            Ok(contact) => InputDispatch::forwarded(
                phase,
                GestureInput::moved(contact.point()).cancelable(cancelable),
            ),
            Err(ignored) => ignored,
        }
    }

    /// `changed` is the list of contacts that lifted.
    pub fn touch_end(&mut self, changed: &[TouchContact]) -> InputDispatch {
        self.finish_touch(PointerPhase::TouchEnd, changed)
    }

    /// The browser aborted the touch sequence; ends the gesture.
    pub fn touch_cancel(&mut self, changed: &[TouchContact]) -> InputDispatch {
        self.finish_touch(PointerPhase::TouchCancel, changed)
    }

    fn finish_touch(&mut self, phase: PointerPhase, changed: &[TouchContact]) -> InputDispatch {
        match self.tracked(phase, changed) {
            Ok(contact) => {
                self.active = None;
                InputDispatch::forwarded(phase, GestureInput::end(contact.point()))
            }
            Err(ignored) => ignored,
        }
    }

    fn tracked(
        &self,
        phase: PointerPhase,
        changed: &[TouchContact],
    ) -> Result<TouchContact, InputDispatch> {
        match self.active {
            None => Err(InputDispatch::ignored(phase, IgnoredReason::NoActiveGesture)),
            Some(Active::Mouse) => Err(InputDispatch::ignored(
                phase,
                IgnoredReason::SourceMismatch,
            )),
            Some(Active::Touch(id)) => changed
                .iter()
                .find(|t| t.id == id)
                .copied()
                .ok_or_else(|| InputDispatch::ignored(phase, IgnoredReason::ContactMismatch)),
        }
    }
}
