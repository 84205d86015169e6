#![forbid(unsafe_code)]

//! Normalized gesture input consumed by [`SwipeableItem`](crate::item::SwipeableItem).
//!
//! Input adapters collapse mouse and touch streams into this single
//! `start → move* → end` sequence of points.

use crate::geometry::Point;

/// Lifecycle phase of one normalized input sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Start,
    Move,
    End,
}

/// One normalized input sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInput {
    pub phase: GesturePhase,
    pub point: Point,
    /// Whether the originating host event may have its default action
    /// (scrolling) suppressed.
    pub cancelable: bool,
}

impl GestureInput {
    #[must_use]
    pub const fn start(point: Point) -> Self {
        Self {
            phase: GesturePhase::Start,
            point,
            cancelable: true,
        }
    }

    #[must_use]
    pub const fn moved(point: Point) -> Self {
        Self {
            phase: GesturePhase::Move,
            point,
            cancelable: true,
        }
    }

    #[must_use]
    pub const fn end(point: Point) -> Self {
        Self {
            phase: GesturePhase::End,
            point,
            cancelable: false,
        }
    }

    /// Override the cancelable flag.
    #[must_use]
    pub const fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

/// What the host should do after feeding one input sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputResponse {
    /// Call `preventDefault()` (or equivalent) on the host event.
    pub prevent_default: bool,
    /// A new frame was requested; the host must schedule one call to
    /// [`SwipeableItem::run_frame`](crate::item::SwipeableItem::run_frame).
    pub frame_requested: bool,
    /// Present on the `End` sample of a horizontal gesture.
    pub resolution: Option<crate::resolver::Resolution>,
}
