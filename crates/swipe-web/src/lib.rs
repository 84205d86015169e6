#![forbid(unsafe_code)]

//! Web host for `swipe-core`.
//!
//! # Role in the workspace
//! `swipe-web` connects browser input and rendering to the gesture engine:
//!
//! - [`adapter`] normalizes mouse and touch signals into
//!   [`swipe_core::GestureInput`] (platform-independent, testable natively).
//! - `dom` (on `wasm32` only) provides `DomSurface`, a
//!   [`swipe_core::VisualSurface`] over inline styles, and `SwipeBinding`,
//!   which owns the event listeners and the pending animation frame.

pub mod adapter;
pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use adapter::{
    DispatchOutcome, GestureInputAdapter, IgnoredReason, InputDispatch, PointerPhase,
    PointerSource, TouchContact,
};
pub use error::BindError;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomSurface, SwipeBinding};
