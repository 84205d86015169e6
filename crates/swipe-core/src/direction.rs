#![forbid(unsafe_code)]

//! Direction classification for ambiguous drags.
//!
//! A drag starts out [`Direction::Unknown`]. Once the pointer leaves the
//! dead zone defined by the two thresholds, the displacement vector is
//! bucketed into one of eight 45° octants:
//!
//! ```text
//!            6 (up)
//!        5         7
//!   4 (left)   +   0 (right)
//!        3         1
//!            2 (down)
//! ```
//!
//! Octants 0 and 4 can only resolve horizontally when the matching reveal
//! panel exists; every other octant resolves vertically. A gated octant
//! leaves the direction `Unknown` so the next move event retries.
//!
//! # Invariants
//!
//! 1. Classification is one-shot: callers stop classifying once the result
//!    is anything but `Unknown` (see [`Direction::is_resolved`]).
//! 2. A displacement inside both thresholds is always `Unknown`.
//! 3. A horizontal result implies the matching panel is present.

use std::f64::consts::TAU;

use bitflags::bitflags;

use crate::geometry::{Point, Side};

bitflags! {
    /// Which reveal panels an item currently has.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Panels: u8 {
        /// Panel of the action triggered by a leftward swipe.
        const LEFT  = 0b01;
        /// Panel of the action triggered by a rightward swipe.
        const RIGHT = 0b10;
    }
}

impl Panels {
    /// Build from per-side presence flags.
    #[must_use]
    pub fn from_presence(left: bool, right: bool) -> Self {
        let mut panels = Self::empty();
        panels.set(Self::LEFT, left);
        panels.set(Self::RIGHT, right);
        panels
    }

    /// Whether the panel for `side` exists.
    #[inline]
    #[must_use]
    pub const fn has(self, side: Side) -> bool {
        match side {
            Side::Left => self.contains(Self::LEFT),
            Side::Right => self.contains(Self::RIGHT),
        }
    }

    /// The single present side, if exactly one panel exists.
    #[must_use]
    pub fn only(self) -> Option<Side> {
        if self == Self::LEFT {
            Some(Side::Left)
        } else if self == Self::RIGHT {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Classified direction of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Unknown,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Whether the gesture has been classified at all.
    #[inline]
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether this is a horizontal swipe.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Whether this is a vertical scroll.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Side of a horizontal direction.
    #[inline]
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Left => Some(Side::Left),
            Self::Right => Some(Side::Right),
            _ => None,
        }
    }
}

/// Octant (0..8) of the displacement `(dx, dy)`, with 0 pointing right and
/// indices growing clockwise in screen coordinates.
#[must_use]
pub fn octant(dx: f64, dy: f64) -> u8 {
    let angle = dy.atan2(dx);
    let bucket = (8.0 * angle / TAU + 8.0).round() as i64;
    bucket.rem_euclid(8) as u8
}

/// Classify the drag from `start` to `current`.
///
/// `horizontal_threshold` gates left/right, `vertical_threshold` gates
/// up/down. `panels` gates which horizontal sides are reachable.
#[must_use]
pub fn classify(
    start: Point,
    current: Point,
    horizontal_threshold: f64,
    vertical_threshold: f64,
    panels: Panels,
) -> Direction {
    let (dx, dy) = current.delta_from(start);
    let horizontal = dx.abs();
    let vertical = dy.abs();

    if horizontal <= horizontal_threshold && vertical <= vertical_threshold {
        return Direction::Unknown;
    }

    match octant(dx, dy) {
        0 if horizontal > horizontal_threshold && panels.has(Side::Right) => Direction::Right,
        4 if horizontal > horizontal_threshold && panels.has(Side::Left) => Direction::Left,
        1..=3 if vertical > vertical_threshold => Direction::Down,
        5..=7 if vertical > vertical_threshold => Direction::Up,
        _ => Direction::Unknown,
    }
}
