#![forbid(unsafe_code)]

//! Per-item gesture controller.
//!
//! [`SwipeableItem`] wires the classifier, drag tracker, frame throttle,
//! position updater and resolver together. It consumes normalized
//! [`GestureInput`] samples and writes to a caller-supplied
//! [`VisualSurface`]; it never schedules anything itself. When a response
//! reports `frame_requested`, the host must arrange exactly one later call
//! to [`SwipeableItem::run_frame`] (typically from an animation frame
//! callback). A frame that runs before the interval has elapsed stays
//! pending, so the host schedules another while
//! [`SwipeableItem::frame_pending`] is `true`.
//!
//! # Example
//!
//! ```
//! use swipe_core::{
//!     ActionSpec, AnimationOutcome, GestureInput, Point, RecordingSurface, SwipeableItem,
//! };
//! use web_time::{Duration, Instant};
//!
//! let mut item = SwipeableItem::new()
//!     .left_action(
//!         ActionSpec::bare(|| println!("deleted")).animation(AnimationOutcome::RemoveFromView),
//!     );
//! let mut surface = RecordingSurface::new(200.0);
//! let t0 = Instant::now();
//!
//! item.handle(GestureInput::start(Point::new(150.0, 10.0)), t0, &mut surface);
//! item.handle(GestureInput::moved(Point::new(20.0, 12.0)), t0, &mut surface);
//! item.run_frame(t0 + Duration::from_millis(20), &mut surface);
//! let response = item.handle(GestureInput::end(Point::new(20.0, 12.0)), t0, &mut surface);
//!
//! assert!(response.resolution.is_some());
//! assert_eq!(surface.translation(), -200.0);
//! ```

use std::fmt;

use tracing::{debug, trace};
use web_time::Instant;

use crate::action::{ActionSpec, AnimationOutcome};
use crate::config::{ThresholdConfig, ThresholdOverrides};
use crate::direction::Panels;
use crate::geometry::{Point, Side};
use crate::input::{GestureInput, GesturePhase, InputResponse};
use crate::position::{FrameFeedback, PositionUpdater, compute_feedback};
use crate::resolver::{Decision, Resolution, decide, play_animation};
use crate::surface::{VisualState, VisualSurface};
use crate::throttle::{FrameGate, FrameThrottle};
use crate::tracker::{DragTracker, GestureState};

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Optional lifecycle notifications.
#[derive(Default)]
pub(crate) struct SwipeHandlers {
    on_swipe_start: Option<Box<dyn FnMut()>>,
    on_swipe_end: Option<Box<dyn FnMut()>>,
    on_swipe_progress: Option<Box<dyn FnMut(u8)>>,
}

impl SwipeHandlers {
    fn swipe_started(&mut self) {
        if let Some(handler) = self.on_swipe_start.as_mut() {
            handler();
        }
    }

    fn swipe_ended(&mut self) {
        if let Some(handler) = self.on_swipe_end.as_mut() {
            handler();
        }
    }

    fn progressed(&mut self, percent: u8) {
        if let Some(handler) = self.on_swipe_progress.as_mut() {
            handler(percent);
        }
    }
}

impl fmt::Debug for SwipeHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeHandlers")
            .field("on_swipe_start", &self.on_swipe_start.is_some())
            .field("on_swipe_end", &self.on_swipe_end.is_some())
            .field("on_swipe_progress", &self.on_swipe_progress.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SwipeableItem
// ---------------------------------------------------------------------------

/// Gesture controller for one list item.
#[derive(Debug)]
pub struct SwipeableItem<C = ()> {
    overrides: ThresholdOverrides,
    thresholds: ThresholdConfig,
    block_swipe: bool,
    left: Option<ActionSpec<C>>,
    right: Option<ActionSpec<C>>,
    handlers: SwipeHandlers,
    tracker: DragTracker,
    throttle: FrameThrottle,
    updater: PositionUpdater,
}

impl<C> Default for SwipeableItem<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SwipeableItem<C> {
    /// Item with default thresholds and no actions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overrides: ThresholdOverrides::none(),
            thresholds: ThresholdConfig::default(),
            block_swipe: false,
            left: None,
            right: None,
            handlers: SwipeHandlers::default(),
            tracker: DragTracker::new(),
            throttle: FrameThrottle::new(),
            updater: PositionUpdater::new(),
        }
    }

    // --- builders ----------------------------------------------------------

    /// Item-level threshold overrides, resolved over the built-in defaults.
    ///
    /// Items registered in a [`SwipeableList`](crate::list::SwipeableList)
    /// are re-resolved against the list's overrides.
    #[must_use]
    pub fn thresholds(mut self, overrides: ThresholdOverrides) -> Self {
        self.set_overrides(overrides, &ThresholdOverrides::none());
        self
    }

    #[must_use]
    pub fn block_swipe(mut self, block: bool) -> Self {
        self.block_swipe = block;
        self
    }

    /// Action revealed and triggered by dragging to the left.
    #[must_use]
    pub fn left_action(mut self, action: ActionSpec<C>) -> Self {
        self.left = Some(action);
        self
    }

    /// Action revealed and triggered by dragging to the right.
    #[must_use]
    pub fn right_action(mut self, action: ActionSpec<C>) -> Self {
        self.right = Some(action);
        self
    }

    #[must_use]
    pub fn on_swipe_start(mut self, handler: impl FnMut() + 'static) -> Self {
        self.handlers.on_swipe_start = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_swipe_end(mut self, handler: impl FnMut() + 'static) -> Self {
        self.handlers.on_swipe_end = Some(Box::new(handler));
        self
    }

    /// Called with a 0–100 percentage whenever it changes during a swipe.
    #[must_use]
    pub fn on_swipe_progress(mut self, handler: impl FnMut(u8) + 'static) -> Self {
        self.handlers.on_swipe_progress = Some(Box::new(handler));
        self
    }

    // --- reconfiguration ---------------------------------------------------

    /// Replace the item-level overrides and re-resolve against `list`.
    pub fn set_overrides(&mut self, overrides: ThresholdOverrides, list: &ThresholdOverrides) {
        self.overrides = overrides;
        self.thresholds = overrides.resolve(list);
    }

    /// Re-resolve the current item-level overrides against `list`.
    pub fn apply_list_overrides(&mut self, list: &ThresholdOverrides) {
        self.thresholds = self.overrides.resolve(list);
    }

    pub fn set_block_swipe(&mut self, block: bool) {
        self.block_swipe = block;
    }

    pub fn set_action(&mut self, side: Side, action: Option<ActionSpec<C>>) {
        *self.action_slot(side) = action;
    }

    // --- accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn overrides(&self) -> &ThresholdOverrides {
        &self.overrides
    }

    /// Resolved thresholds in effect.
    #[inline]
    #[must_use]
    pub fn resolved_thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    #[must_use]
    pub fn action(&self, side: Side) -> Option<&ActionSpec<C>> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Which reveal panels exist.
    #[must_use]
    pub fn panels(&self) -> Panels {
        Panels::from_presence(self.left.is_some(), self.right.is_some())
    }

    #[inline]
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.block_swipe
    }

    /// `true` while a horizontally classified gesture is in progress and
    /// swiping is not blocked.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        !self.block_swipe && self.tracker.direction().is_horizontal()
    }

    #[inline]
    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        self.tracker.state()
    }

    /// A frame was requested and has not run yet.
    #[inline]
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.throttle.is_pending()
    }

    // --- input -------------------------------------------------------------

    /// Feed one normalized input sample.
    pub fn handle(
        &mut self,
        input: GestureInput,
        now: Instant,
        surface: &mut dyn VisualSurface,
    ) -> InputResponse {
        match input.phase {
            GesturePhase::Start => self.on_drag_start(input.point, now, surface),
            GesturePhase::Move => self.on_drag_move(input.point, input.cancelable),
            GesturePhase::End => self.on_drag_end(surface),
        }
    }

    /// Reset, capture `point` and arm frame updates.
    pub fn on_drag_start(
        &mut self,
        point: Point,
        now: Instant,
        surface: &mut dyn VisualSurface,
    ) -> InputResponse {
        if self.block_swipe {
            return InputResponse::default();
        }
        self.tracker.begin(point);
        self.updater.reset();
        self.throttle.arm(now);
        surface.set_visual_state(VisualState::Dragging);
        InputResponse {
            frame_requested: self.throttle.request(),
            ..InputResponse::default()
        }
    }

    /// Classify (if still unknown) and track the horizontal offset.
    pub fn on_drag_move(&mut self, point: Point, cancelable: bool) -> InputResponse {
        if self.block_swipe {
            return InputResponse::default();
        }
        let panels = self.panels();
        let Some(outcome) = self.tracker.track(point, &self.thresholds, panels) else {
            return InputResponse::default();
        };

        if outcome.newly_classified {
            let (dx, dy) = match self.tracker.state().start {
                Some(start) => point.delta_from(start),
                None => (0.0, 0.0),
            };
            debug!(direction = ?outcome.direction, dx, dy, "gesture classified");
            if outcome.direction.is_horizontal() {
                self.handlers.swipe_started();
            }
        }

        if !outcome.direction.is_horizontal() {
            return InputResponse::default();
        }
        InputResponse {
            prevent_default: cancelable,
            frame_requested: self.throttle.request(),
            resolution: None,
        }
    }

    /// Resolve a horizontal gesture, then clear all gesture state.
    pub fn on_drag_end(&mut self, surface: &mut dyn VisualSurface) -> InputResponse {
        let resolution = if self.is_swiping() {
            let resolution = self.resolve_release(surface);
            self.handlers.swipe_ended();
            Some(resolution)
        } else {
            None
        };
        self.tracker.reset();
        self.throttle.cancel();
        InputResponse {
            resolution,
            ..InputResponse::default()
        }
    }

    fn resolve_release(&mut self, surface: &mut dyn VisualSurface) -> Resolution {
        let final_offset = self.tracker.offset();
        let panels = self.panels();
        let decision = decide(
            final_offset,
            surface.item_width(),
            self.thresholds.trigger_ratio,
            panels,
        );

        let (animation, side) = match decision {
            Decision::Trigger(side) => {
                let animation = self
                    .action(side)
                    .map_or(AnimationOutcome::ReturnToRest, ActionSpec::outcome);
                (animation, side)
            }
            Decision::Rest => (AnimationOutcome::ReturnToRest, Side::revealed_by(final_offset)),
        };

        if animation == AnimationOutcome::StayInPlace
            && self.updater.applied_offset() != Some(final_offset)
        {
            debug!(final_offset, "flushing undrawn offset before release");
            self.apply_feedback(surface);
        }
        play_animation(animation, side, panels, surface);
        if let Decision::Trigger(side) = decision
            && let Some(action) = self.action_slot(side).as_mut()
        {
            action.trigger();
        }

        Resolution {
            decision,
            animation,
            final_offset,
        }
    }

    // --- frames ------------------------------------------------------------

    /// Run one scheduled frame. Returns `true` if the surface was updated.
    ///
    /// Reads the latest tracked offset, so any number of moves since the
    /// request collapse into this single update. A frame that arrives
    /// before the interval has elapsed re-arms itself while swiping; check
    /// [`frame_pending`](Self::frame_pending) afterwards.
    pub fn run_frame(&mut self, now: Instant, surface: &mut dyn VisualSurface) -> bool {
        match self.throttle.begin_frame(now) {
            FrameGate::NotRequested => {
                trace!(reason = "not requested", "frame skipped");
                return false;
            }
            FrameGate::TooSoon => {
                if self.is_swiping() {
                    self.throttle.request();
                }
                trace!(reason = "too soon", "frame skipped");
                return false;
            }
            FrameGate::Due => {}
        }
        if !self.is_swiping() {
            trace!(reason = "not swiping", "frame skipped");
            return false;
        }

        let Some(feedback) = self.apply_feedback(surface) else {
            trace!(reason = "no panels", "frame skipped");
            return false;
        };
        self.throttle.mark_applied(now);

        trace!(
            offset = feedback.offset,
            opacity = feedback.opacity,
            progress = ?feedback.progress,
            "frame applied"
        );
        true
    }

    /// Draw the tracked offset and report progress if it changed.
    fn apply_feedback(&mut self, surface: &mut dyn VisualSurface) -> Option<FrameFeedback> {
        let panels = self.panels();
        let feedback = compute_feedback(self.tracker.offset(), panels, surface.item_width())?;

        if feedback.clamped {
            self.tracker.clamp_offset_to_rest();
        }
        self.updater.apply(&feedback, panels, surface);

        if let Some(progress) = feedback.progress
            && self.tracker.report_progress(progress)
        {
            self.handlers.progressed(progress);
        }
        Some(feedback)
    }

    /// Cancel any pending frame and drop the current gesture.
    ///
    /// Returns `true` if a pending frame was cancelled.
    pub fn teardown(&mut self) -> bool {
        let cancelled = self.throttle.cancel();
        if cancelled {
            debug!("teardown cancelled a pending frame");
        }
        self.tracker.reset();
        cancelled
    }

    fn action_slot(&mut self, side: Side) -> &mut Option<ActionSpec<C>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
