#![forbid(unsafe_code)]

//! Test harness for Guidepost.
//!
//! - [`SimulatedPage`]: a [`guidepost_core::host::Host`] backed by plain
//!   rectangles, with recorded side effects.
//! - [`EventRecorder`]: captures emitted events for assertions.
//! - [`FrameClock`]: splits a span of time into animation frames so tests
//!   can drive `advance` the way a browser would.
//!
//! # Deterministic mode
//!
//! Nothing here reads a clock. Set `GUIDEPOST_TEST_LOG=debug` to see the
//! engine's tracing output while a test runs.

use std::time::Duration;

pub mod page;
pub mod recorder;

pub use page::{PageElement, SimulatedPage};
pub use recorder::EventRecorder;

/// One 60 Hz frame, rounded down to whole milliseconds.
pub const FRAME: Duration = Duration::from_millis(16);

/// Splits spans of time into fixed frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    frame: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self { frame: FRAME }
    }
}

impl FrameClock {
    /// A clock with the given frame length. Zero is bumped to one millisecond.
    #[must_use]
    pub fn new(frame: Duration) -> Self {
        Self {
            frame: frame.max(Duration::from_millis(1)),
        }
    }

    /// Frame length.
    #[must_use]
    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Frame deltas covering `total`. The last frame is shortened so the
    /// deltas sum to exactly `total`.
    pub fn frames_for(&self, total: Duration) -> impl Iterator<Item = Duration> {
        let frame = self.frame;
        let mut left = total;
        std::iter::from_fn(move || {
            if left.is_zero() {
                return None;
            }
            let dt = frame.min(left);
            left -= dt;
            Some(dt)
        })
    }
}

/// Install a test subscriber filtered by `GUIDEPOST_TEST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GUIDEPOST_TEST_LOG")
        .unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
