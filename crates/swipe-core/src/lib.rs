#![forbid(unsafe_code)]

//! Core: swipe gesture classification, tracking and resolution for list items.
//!
//! # Role in the workspace
//! `swipe-core` is the platform-independent engine. It consumes normalized
//! `start → move* → end` input samples, decides whether a drag is a
//! horizontal swipe or a vertical scroll, drives frame-throttled visual
//! feedback, and resolves the release into an action and an animation.
//!
//! # Primary responsibilities
//! - **Direction classification**: one-shot octant classifier with
//!   per-axis dead zones ([`direction`]).
//! - **Drag tracking**: per-gesture state, reset at every start and end
//!   ([`tracker`]).
//! - **Frame throttling**: at most one pending frame, applied no more than
//!   once per 1/60 s ([`throttle`], [`position`]).
//! - **Resolution**: trigger-ratio decision and outcome animations
//!   ([`resolver`]).
//! - **Configuration**: item > list > default thresholds ([`config`],
//!   [`list`]).
//!
//! # How it fits in the system
//! Hosts feed [`GestureInput`] into a [`SwipeableItem`] together with a
//! [`VisualSurface`] to write to. `swipe-web` provides the DOM adapter and
//! surface; [`RecordingSurface`] serves headless hosts and tests.

pub mod action;
pub mod config;
pub mod direction;
pub mod geometry;
pub mod input;
pub mod item;
pub mod list;
pub mod position;
pub mod resolver;
pub mod surface;
pub mod throttle;
pub mod tracker;

pub use action::{ActionSpec, AnimationOutcome};
pub use config::{ConfigError, ThresholdConfig, ThresholdOverrides};
pub use direction::{Direction, Panels, classify};
pub use geometry::{Point, Side};
pub use input::{GestureInput, GesturePhase, InputResponse};
pub use item::SwipeableItem;
pub use list::{ItemId, SwipeableList};
pub use resolver::{Decision, Resolution};
pub use surface::{RecordingSurface, SurfaceOp, VisualState, VisualSurface};
pub use throttle::{FRAME_INTERVAL, FrameThrottle};
pub use tracker::{DragTracker, GestureState};
