#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! Nothing here reads a clock. The host advances every animation with the
//! elapsed frame time, which keeps transitions deterministic under test and
//! lets the same code run inside `requestAnimationFrame` or a native loop.
//!
//! # Invariants
//!
//! 1. `elapsed <= duration` at all times.
//! 2. `tick` returns the part of `dt` that was not needed, so a chain of
//!    animations can complete within a single frame.
//! 3. Zero-duration animations are complete from construction.

use std::time::Duration;

use crate::easing::Easing;

/// A time-driven value.
pub trait Animation {
    /// Advance by `dt` and return the unused remainder.
    fn tick(&mut self, dt: Duration) -> Duration;

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current value in `[0, 1]` (eased curves may overshoot).
    fn value(&self) -> f64;
}

/// A fixed-duration wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    elapsed: Duration,
}

impl Countdown {
    /// Start a countdown of `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// A countdown that has already finished.
    #[must_use]
    pub const fn finished() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Total duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Time still to wait.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}

impl Animation for Countdown {
    fn tick(&mut self, dt: Duration) -> Duration {
        let used = dt.min(self.remaining());
        self.elapsed += used;
        dt - used
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// An eased interpolation between two scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    clock: Countdown,
    easing: Easing,
}

impl Tween {
    /// Interpolate from `from` to `to` over `duration` with the default curve.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            clock: Countdown::new(duration),
            easing: Easing::default(),
        }
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start value.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.from
    }

    /// End value.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.to
    }

    /// Time left until the tween completes.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.clock.remaining()
    }

    /// Interpolated value at the current time. Lands exactly on `to` once
    /// complete.
    #[must_use]
    pub fn current(&self) -> f64 {
        if self.clock.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.value()
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) -> Duration {
        self.clock.tick(dt)
    }

    fn is_complete(&self) -> bool {
        self.clock.is_complete()
    }

    fn value(&self) -> f64 {
        self.easing.apply(self.clock.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn countdown_returns_leftover() {
        let mut c = Countdown::new(MS_100);
        let rest = c.tick(Duration::from_millis(150));
        assert!(c.is_complete());
        assert_eq!(rest, Duration::from_millis(50));
    }

    #[test]
    fn countdown_partial_progress() {
        let mut c = Countdown::new(MS_100);
        assert_eq!(c.tick(Duration::from_millis(25)), Duration::ZERO);
        assert!(!c.is_complete());
        assert!((c.value() - 0.25).abs() < 1e-9);
        assert_eq!(c.remaining(), Duration::from_millis(75));
    }

    #[test]
    fn zero_duration_is_complete_immediately() {
        assert!(Countdown::finished().is_complete());
        assert_eq!(Countdown::finished().value(), 1.0);
        assert!(Tween::new(0.0, 10.0, Duration::ZERO).is_complete());
    }

    #[test]
    fn tween_interpolates_with_curve() {
        let mut tween = Tween::new(0.0, 200.0, MS_100).easing(Easing::Linear);
        tween.tick(Duration::from_millis(50));
        assert!((tween.current() - 100.0).abs() < 1e-9);
        tween.tick(MS_100);
        assert_eq!(tween.current(), 200.0);
    }

    #[test]
    fn tween_lands_exactly_on_target_despite_overshoot_curve() {
        let mut tween = Tween::new(0.0, 1.0, MS_100).easing(Easing::EaseOutBack);
        tween.tick(MS_100);
        assert_eq!(tween.current(), 1.0);
    }

    #[test]
    fn many_small_ticks_complete() {
        let mut c = Countdown::new(Duration::from_secs(1));
        for _ in 0..1000 {
            c.tick(Duration::from_millis(1));
        }
        assert!(c.is_complete());
    }
}
