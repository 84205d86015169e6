#![forbid(unsafe_code)]

//! Geometric primitives.

/// A point in the host's shared pointer coordinate space (CSS pixels for
/// web hosts, origin at top-left, `y` growing downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement `(dx, dy)` from `origin` to `self`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
        }
    }
}

/// The two sides an item can be swiped towards.
///
/// `Left` names the action triggered by dragging the item to the left
/// (negative offset). Its panel is uncovered at the trailing edge of the
/// item while the foreground slides away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Side whose panel a given horizontal offset reveals.
    ///
    /// Negative offsets reveal the left action's panel; zero and positive
    /// offsets reveal the right action's panel.
    #[inline]
    #[must_use]
    pub fn revealed_by(offset: f64) -> Self {
        if offset < 0.0 { Self::Left } else { Self::Right }
    }

    /// Sign applied to the item width when the foreground leaves the view
    /// towards this side.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}
