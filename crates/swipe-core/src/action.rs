#![forbid(unsafe_code)]

//! Caller-supplied actions and their outcome animations.

use std::fmt;

/// Visual resolution applied when a swipe commits an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationOutcome {
    /// Slide back to 0 and fade both panels out.
    #[default]
    ReturnToRest,
    /// Slide the foreground fully out of view in the drag direction.
    RemoveFromView,
    /// Leave the item frozen at its final dragged position.
    StayInPlace,
}

/// An action bound to one swipe side.
///
/// `C` is the host's opaque renderable for the revealed panel. The engine
/// never looks inside it; the presence of an `ActionSpec` is what makes the
/// panel exist.
pub struct ActionSpec<C = ()> {
    callback: Box<dyn FnMut()>,
    animation: AnimationOutcome,
    content: C,
}

impl<C> ActionSpec<C> {
    /// Create an action with the default [`AnimationOutcome::ReturnToRest`].
    pub fn new(content: C, callback: impl FnMut() + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            animation: AnimationOutcome::default(),
            content,
        }
    }

    /// Set the animation played when this action triggers.
    #[must_use]
    pub fn animation(mut self, animation: AnimationOutcome) -> Self {
        self.animation = animation;
        self
    }

    /// The configured outcome animation.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> AnimationOutcome {
        self.animation
    }

    /// The revealed panel content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    pub(crate) fn trigger(&mut self) {
        (self.callback)();
    }
}

impl ActionSpec<()> {
    /// Action without panel content, for hosts that render panels themselves.
    pub fn bare(callback: impl FnMut() + 'static) -> Self {
        Self::new((), callback)
    }
}

impl<C: fmt::Debug> fmt::Debug for ActionSpec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpec")
            .field("animation", &self.animation)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}
