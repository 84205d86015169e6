#![forbid(unsafe_code)]

//! Frame request coalescing with a minimum refresh interval.
//!
//! Pointer moves can arrive far faster than the display refreshes. Rather
//! than queueing one visual update per move, an item holds at most one
//! pending frame request:
//!
//! - [`FrameThrottle::request`] sets the pending flag and returns `true`
//!   only on the transition, so the host schedules exactly one callback.
//! - [`FrameThrottle::begin_frame`] clears the flag before any work runs,
//!   which re-arms requests, then reports whether enough time has passed
//!   since the last applied frame.
//! - [`FrameThrottle::cancel`] drops a pending request on teardown.
//!
//! The frame reads the latest tracked state when it runs ("latest wins"),
//! never a queued history.

use web_time::{Duration, Instant};

/// Refresh budget: one visual update per 1/60 s.
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Outcome of [`FrameThrottle::begin_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameGate {
    /// Nothing was pending (cancelled or spurious callback).
    NotRequested,
    /// Less than one interval since the last applied frame.
    TooSoon,
    /// The frame may be applied.
    Due,
}

/// Pending-flag plus interval gate for one item.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    pending: bool,
    last_frame: Option<Instant>,
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameThrottle {
    /// Throttle at [`FRAME_INTERVAL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(FRAME_INTERVAL)
    }

    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            pending: false,
            last_frame: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Set the baseline the next frame is measured against.
    pub fn arm(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Request a frame. Returns `true` if the caller must schedule one.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start a scheduled frame: clear the pending flag and gate on time.
    pub fn begin_frame(&mut self, now: Instant) -> FrameGate {
        if !std::mem::replace(&mut self.pending, false) {
            return FrameGate::NotRequested;
        }
        match self.last_frame {
            Some(last) if now.saturating_duration_since(last) < self.interval => FrameGate::TooSoon,
            _ => FrameGate::Due,
        }
    }

    /// Record that a frame was applied at `now`.
    pub fn mark_applied(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Drop any pending request. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}
