#![forbid(unsafe_code)]

//! Per-frame visual feedback for a horizontal swipe.
//!
//! Each applied frame turns the tracked offset into three outputs:
//!
//! - the foreground translation,
//! - the opacity of the revealed panel (`min(1, |offset| / 100)`, two
//!   decimals), with the opposite panel forced to 0 while fading in,
//! - a 0–100 progress value relative to the item width.
//!
//! Panel choice follows the offset sign (see [`Side::revealed_by`]). When
//! only one panel exists and the sign points at the missing one, the offset
//! is clamped to rest and the existing panel is shown instead.

use crate::direction::Panels;
use crate::geometry::Side;
use crate::surface::VisualSurface;

/// Offset (px) at which the revealed panel reaches full opacity.
pub const FULL_OPACITY_DISTANCE: f64 = 100.0;

/// Computed feedback for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFeedback {
    /// Offset to apply, after clamping.
    pub offset: f64,
    /// The offset was clamped to 0 because the revealed side has no panel.
    pub clamped: bool,
    /// Panel being revealed.
    pub shown: Side,
    /// Opacity for the revealed panel, in `[0, 1]` with two decimals.
    pub opacity: f64,
    /// Progress percentage, `None` when the item width is unknown.
    pub progress: Option<u8>,
}

/// Compute the feedback for `offset`, or `None` if no panel exists.
#[must_use]
pub fn compute_feedback(offset: f64, panels: Panels, item_width: f64) -> Option<FrameFeedback> {
    let mut offset = offset;
    let mut clamped = false;
    let mut shown = Side::revealed_by(offset);

    if !panels.has(shown) {
        let existing = panels.only()?;
        offset = 0.0;
        clamped = true;
        shown = existing;
    }

    Some(FrameFeedback {
        offset,
        clamped,
        shown,
        opacity: panel_opacity(offset),
        progress: progress_percent(offset, item_width),
    })
}

/// Revealed panel opacity for `offset`, rounded to two decimals.
#[must_use]
pub fn panel_opacity(offset: f64) -> f64 {
    let raw = (offset.abs() / FULL_OPACITY_DISTANCE).min(1.0);
    (raw * 100.0).round() / 100.0
}

/// Swipe progress in percent of `item_width`, clamped to `[0, 100]`.
///
/// Returns `None` for a zero (or otherwise unusable) width.
#[must_use]
pub fn progress_percent(offset: f64, item_width: f64) -> Option<u8> {
    if !(item_width.is_finite() && item_width > 0.0) {
        return None;
    }
    let remaining = (item_width - offset.abs()).max(0.0);
    let percent = (100.0 * (1.0 - remaining / item_width)).round();
    Some(percent.clamp(0.0, 100.0) as u8)
}

/// Applies frame feedback to a surface, skipping redundant opacity writes.
#[derive(Debug, Clone, Default)]
pub struct PositionUpdater {
    last_opacity: Option<(Side, f64)>,
    last_offset: Option<f64>,
}

impl PositionUpdater {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was written; call at the start of every gesture.
    pub fn reset(&mut self) {
        self.last_opacity = None;
        self.last_offset = None;
    }

    /// Translation written by the most recent [`apply`](Self::apply).
    #[inline]
    #[must_use]
    pub fn applied_offset(&self) -> Option<f64> {
        self.last_offset
    }

    /// Write `feedback` to `surface`.
    pub fn apply(
        &mut self,
        feedback: &FrameFeedback,
        panels: Panels,
        surface: &mut dyn VisualSurface,
    ) {
        let shown = feedback.shown;
        let written = Some((shown, feedback.opacity));

        if feedback.opacity < 1.0 {
            if self.last_opacity != written {
                surface.set_opacity(shown, feedback.opacity);
                let hidden = shown.opposite();
                if panels.has(hidden) {
                    surface.set_opacity(hidden, 0.0);
                }
                self.last_opacity = written;
            }
        } else if self.last_opacity != written {
            surface.set_opacity(shown, 1.0);
            self.last_opacity = written;
        }

        surface.set_translation(feedback.offset);
        self.last_offset = Some(feedback.offset);
    }
}
