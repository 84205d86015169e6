#![forbid(unsafe_code)]

//! Visual surface abstraction: the output half of the engine boundary.
//!
//! The engine never renders. It pushes a translation, panel opacities and a
//! coarse visual state to a [`VisualSurface`]; hosts translate those into
//! DOM style writes, widget properties, or anything else.
//!
//! Surface writes are infallible from the engine's point of view. A host
//! whose render target has gone away should drop the write silently.

use crate::geometry::Side;

/// Coarse item state, used by hosts to pick transition styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Finger is down; no transition should run.
    Dragging,
    /// Snapping back to rest.
    Returning,
    /// Sliding out of view.
    Removing,
}

/// Render target for one swipeable item.
pub trait VisualSurface {
    /// Current rendered width of the item in pixels. `0.0` when unknown.
    fn item_width(&self) -> f64;

    /// Translate the item's foreground layer horizontally.
    fn set_translation(&mut self, px: f64);

    /// Set the opacity of the panel revealed for `panel`.
    fn set_opacity(&mut self, panel: Side, value: f64);

    /// Switch the item's visual state.
    fn set_visual_state(&mut self, state: VisualState);
}

impl<S: VisualSurface + ?Sized> VisualSurface for &mut S {
    fn item_width(&self) -> f64 {
        (**self).item_width()
    }

    fn set_translation(&mut self, px: f64) {
        (**self).set_translation(px);
    }

    fn set_opacity(&mut self, panel: Side, value: f64) {
        (**self).set_opacity(panel, value);
    }

    fn set_visual_state(&mut self, state: VisualState) {
        (**self).set_visual_state(state);
    }
}

// ---------------------------------------------------------------------------
// RecordingSurface
// ---------------------------------------------------------------------------

/// One recorded surface write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    Translate(f64),
    Opacity(Side, f64),
    State(VisualState),
}

/// Headless surface that records every write.
///
/// Useful for tests and for hosts that diff the engine's output before
/// applying it elsewhere.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    ops: Vec<SurfaceOp>,
    translation: f64,
    opacity: [f64; 2],
    state: Option<VisualState>,
}

impl RecordingSurface {
    /// Create a surface reporting `width` pixels.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Change the reported item width.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// All writes since creation or the last [`take_ops`](Self::take_ops).
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drain recorded writes.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of translation writes recorded.
    #[must_use]
    pub fn translation_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Translate(_)))
            .count()
    }

    /// Last applied translation.
    #[must_use]
    pub fn translation(&self) -> f64 {
        self.translation
    }

    /// Last applied opacity for `panel`.
    #[must_use]
    pub fn opacity(&self, panel: Side) -> f64 {
        self.opacity[slot(panel)]
    }

    /// Last applied visual state.
    #[must_use]
    pub fn state(&self) -> Option<VisualState> {
        self.state
    }
}

const fn slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

impl VisualSurface for RecordingSurface {
    fn item_width(&self) -> f64 {
        self.width
    }

    fn set_translation(&mut self, px: f64) {
        self.translation = px;
        self.ops.push(SurfaceOp::Translate(px));
    }

    fn set_opacity(&mut self, panel: Side, value: f64) {
        self.opacity[slot(panel)] = value;
        self.ops.push(SurfaceOp::Opacity(panel, value));
    }

    fn set_visual_state(&mut self, state: VisualState) {
        self.state = Some(state);
        self.ops.push(SurfaceOp::State(state));
    }
}
