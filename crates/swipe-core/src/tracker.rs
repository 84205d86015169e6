#![forbid(unsafe_code)]

//! Raw per-gesture drag state.
//!
//! [`DragTracker`] owns one [`GestureState`]: the start point (or the unset
//! sentinel), the classified [`Direction`], the horizontal offset and the
//! last reported progress. It is reset at every drag start and every drag
//! end, so nothing leaks from one gesture into the next.
//!
//! # Invariants
//!
//! 1. Once `direction` is resolved it never changes until the next reset.
//! 2. `offset` stays `0.0` unless `direction` is horizontal.
//! 3. Move samples without an active start point are ignored.

use crate::config::ThresholdConfig;
use crate::direction::{Direction, Panels, classify};
use crate::geometry::Point;

/// Snapshot of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    /// `None` is the unset sentinel: no gesture is active.
    pub start: Option<Point>,
    /// Signed horizontal offset in pixels (`current.x - start.x`).
    pub offset: f64,
    pub direction: Direction,
    /// Last progress value handed to the progress handler.
    pub last_progress: u8,
}

/// Result of feeding one move sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// The direction was resolved by this very sample.
    pub newly_classified: bool,
}

/// Tracks the state of the gesture currently in progress on one item.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: GestureState,
}

impl DragTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset and capture `point` as the new start.
    pub fn begin(&mut self, point: Point) {
        self.reset();
        self.state.start = Some(point);
    }

    /// Feed a move sample.
    ///
    /// Returns `None` when no gesture is active. Classification only runs
    /// while the direction is still unknown.
    pub fn track(
        &mut self,
        point: Point,
        thresholds: &ThresholdConfig,
        panels: Panels,
    ) -> Option<MoveOutcome> {
        let start = self.state.start?;

        let mut newly_classified = false;
        if !self.state.direction.is_resolved() {
            self.state.direction = classify(
                start,
                point,
                thresholds.swipe_start_threshold,
                thresholds.scroll_start_threshold,
                panels,
            );
            newly_classified = self.state.direction.is_resolved();
        }

        if self.state.direction.is_horizontal() {
            self.state.offset = point.x - start.x;
        }

        Some(MoveOutcome {
            direction: self.state.direction,
            newly_classified,
        })
    }

    /// Clear everything back to the unset sentinel.
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub(crate) fn clamp_offset_to_rest(&mut self) {
        self.state.offset = 0.0;
    }

    /// Record `progress`; returns `true` if it differs from the last value.
    pub(crate) fn report_progress(&mut self, progress: u8) -> bool {
        if progress == self.state.last_progress {
            return false;
        }
        self.state.last_progress = progress;
        true
    }
}
