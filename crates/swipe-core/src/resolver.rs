#![forbid(unsafe_code)]

//! End-of-gesture resolution.
//!
//! On release the final offset is compared against `item_width *
//! trigger_ratio` in each direction. Left is checked first, so a degenerate
//! zero-width item with both actions never triggers right by accident.

use tracing::debug;

use crate::action::AnimationOutcome;
use crate::direction::Panels;
use crate::geometry::Side;
use crate::surface::{VisualState, VisualSurface};

/// Which action (if any) a released swipe commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Trigger the action bound to this side.
    Trigger(Side),
    /// Below the trigger distance, or no action on that side.
    Rest,
}

/// Outcome of one released horizontal gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub decision: Decision,
    /// Animation that was played.
    pub animation: AnimationOutcome,
    /// Offset at release.
    pub final_offset: f64,
}

/// Decide which action a release at `final_offset` commits.
#[must_use]
pub fn decide(final_offset: f64, item_width: f64, trigger_ratio: f64, actions: Panels) -> Decision {
    let distance = item_width * trigger_ratio;
    let decision = if final_offset < -distance && actions.has(Side::Left) {
        Decision::Trigger(Side::Left)
    } else if final_offset > distance && actions.has(Side::Right) {
        Decision::Trigger(Side::Right)
    } else {
        Decision::Rest
    };
    debug!(
        ?decision,
        final_offset, item_width, trigger_ratio, "swipe resolved"
    );
    decision
}

/// Play `animation` for a gesture released on `side` (the side whose
/// panel was revealed).
pub fn play_animation(
    animation: AnimationOutcome,
    side: Side,
    panels: Panels,
    surface: &mut dyn VisualSurface,
) {
    match animation {
        AnimationOutcome::ReturnToRest => {
            surface.set_visual_state(VisualState::Returning);
            surface.set_translation(0.0);
            for panel in [Side::Left, Side::Right] {
                if panels.has(panel) {
                    surface.set_opacity(panel, 0.0);
                }
            }
        }
        AnimationOutcome::RemoveFromView => {
            let width = surface.item_width();
            surface.set_visual_state(VisualState::Removing);
            surface.set_translation(side.sign() * width);
        }
        AnimationOutcome::StayInPlace => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceOp};
    use pretty_assertions::assert_eq;

    #[test]
    fn past_left_threshold_triggers_left() {
        assert_eq!(
            decide(-101.0, 200.0, 0.5, Panels::all()),
            Decision::Trigger(Side::Left)
        );
    }

    #[test]
    fn short_of_threshold_rests() {
        assert_eq!(decide(-99.0, 200.0, 0.5, Panels::all()), Decision::Rest);
        assert_eq!(decide(100.0, 200.0, 0.5, Panels::all()), Decision::Rest);
    }

    #[test]
    fn past_right_threshold_triggers_right() {
        assert_eq!(
            decide(130.0, 200.0, 0.5, Panels::all()),
            Decision::Trigger(Side::Right)
        );
    }

    #[test]
    fn missing_action_suppresses_trigger() {
        assert_eq!(decide(-150.0, 200.0, 0.5, Panels::RIGHT), Decision::Rest);
        assert_eq!(decide(150.0, 200.0, 0.5, Panels::LEFT), Decision::Rest);
    }

    #[test]
    fn ratio_scales_distance() {
        assert_eq!(
            decide(-41.0, 200.0, 0.2, Panels::LEFT),
            Decision::Trigger(Side::Left)
        );
        assert_eq!(decide(-39.0, 200.0, 0.2, Panels::LEFT), Decision::Rest);
    }

    #[test]
    fn return_to_rest_fades_existing_panels() {
        let mut s = RecordingSurface::new(200.0);
        play_animation(AnimationOutcome::ReturnToRest, Side::Left, Panels::LEFT, &mut s);
        assert_eq!(
            s.take_ops(),
            vec![
                SurfaceOp::State(VisualState::Returning),
                SurfaceOp::Translate(0.0),
                SurfaceOp::Opacity(Side::Left, 0.0),
            ]
        );
    }

    #[test]
    fn remove_from_view_slides_by_full_width() {
        let mut s = RecordingSurface::new(200.0);
        play_animation(AnimationOutcome::RemoveFromView, Side::Left, Panels::all(), &mut s);
        assert_eq!(s.translation(), -200.0);
        assert_eq!(s.state(), Some(VisualState::Removing));

        play_animation(AnimationOutcome::RemoveFromView, Side::Right, Panels::all(), &mut s);
        assert_eq!(s.translation(), 200.0);
    }

    #[test]
    fn stay_in_place_writes_nothing() {
        let mut s = RecordingSurface::new(200.0);
        play_animation(AnimationOutcome::StayInPlace, Side::Right, Panels::all(), &mut s);
        assert!(s.ops().is_empty());
    }
}
