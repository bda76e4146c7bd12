#![forbid(unsafe_code)]

//! Tick-driven rate limiters.
//!
//! [`Debounce`] fires once after input has been quiet for a delay (trailing
//! edge), which is how resize storms collapse into one reposition.
//! [`FrameThrottle`] fires at most once per frame interval while requests
//! keep arriving, which is how scroll storms are tamed.
//!
//! Both are advanced by the host's frame time, never by a wall clock.

use std::time::Duration;

use guidepost_core::animation::{Animation, Countdown};

/// Default quiet period before a debounced action runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// One animation frame at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Trailing-edge debouncer.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    pending: Option<Countdown>,
}

impl Debounce {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record an input. Restarts the quiet period.
    pub fn trigger(&mut self) {
        self.pending = Some(Countdown::new(self.delay));
    }

    /// Whether an input is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending input.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Advance time. Returns `true` exactly once when the quiet period ends.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(clock) = self.pending.as_mut() else {
            return false;
        };
        clock.tick(dt);
        if clock.is_complete() {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Leading-edge frame throttle.
///
/// A request made while idle fires on the next tick. Further requests made
/// within `interval` of a firing are coalesced into one firing once the
/// interval has passed.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    since_fire: Duration,
    requested: bool,
}

impl FrameThrottle {
    /// Create a throttle with the given minimum interval between firings.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            since_fire: interval,
            requested: false,
        }
    }

    /// Ask for a firing.
    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Whether a request is waiting.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Drop a waiting request.
    pub fn cancel(&mut self) {
        self.requested = false;
    }

    /// Advance time. Returns `true` when a waiting request fires.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.since_fire = self.since_fire.saturating_add(dt);
        if self.requested && self.since_fire >= self.interval {
            self.requested = false;
            self.since_fire = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}
