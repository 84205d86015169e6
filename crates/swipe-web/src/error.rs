#![forbid(unsafe_code)]

use core::fmt;

/// Errors raised while binding a swipeable item to the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// A required child element was not found under the item root.
    MissingElement(&'static str),
    /// A DOM call threw; carries the debug rendering of the JS value.
    Js(String),
    /// The binding is handling an event and cannot be re-entered.
    Busy,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window available"),
            Self::MissingElement(selector) => write!(f, "missing element matching {selector}"),
            Self::Js(message) => write!(f, "DOM call failed: {message}"),
            Self::Busy => write!(f, "binding is busy dispatching an event"),
        }
    }
}

impl std::error::Error for BindError {}
