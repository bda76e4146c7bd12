#![forbid(unsafe_code)]

//! Opacity fade shared by the overlay, tooltip, and toggle.
//!
//! # Invariants
//!
//! - Opacity is always in `[0.0, 1.0]`.
//! - Reversing mid-fade starts from the current opacity, so rapid
//!   show/hide never jumps.
//! - Zero-duration fades settle instantly.

use std::time::Duration;

use guidepost_core::animation::{Animation, Tween};
use guidepost_core::easing::Easing;

// ============================================================================
// Fade Phase
// ============================================================================

/// Visibility lifecycle.
///
/// State machine: Hidden → FadingIn → Visible → FadingOut → Hidden
///
/// Reversal can skip phases (FadingIn → FadingOut directly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    /// Fully transparent; nothing to render.
    #[default]
    Hidden,
    /// Becoming opaque.
    FadingIn,
    /// Fully opaque.
    Visible,
    /// Becoming transparent. Still rendered.
    FadingOut,
}

impl FadePhase {
    /// Whether the surface should be rendered.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Whether a fade is in progress.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::FadingIn | Self::FadingOut)
    }
}

// ============================================================================
// Fade
// ============================================================================

/// A reversible opacity transition.
#[derive(Debug, Clone)]
pub struct Fade {
    duration: Duration,
    easing: Easing,
    tween: Tween,
}

impl Fade {
    /// A hidden fade with the given transition duration.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::Linear,
            tween: Tween::new(0.0, 0.0, Duration::ZERO),
        }
    }

    /// Set the easing curve for future transitions.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Transition duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Change the duration used by future transitions.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Start fading in. Returns the time until fully visible.
    pub fn fade_in(&mut self) -> Duration {
        self.retarget(1.0)
    }

    /// Start fading out. Returns the time until fully hidden.
    pub fn fade_out(&mut self) -> Duration {
        self.retarget(0.0)
    }

    /// Jump straight to hidden.
    pub fn reset(&mut self) {
        self.tween = Tween::new(0.0, 0.0, Duration::ZERO);
    }

    fn retarget(&mut self, target: f64) -> Duration {
        if self.tween.end() == target {
            return self.remaining();
        }
        let from = self.opacity();
        // Scale the duration by the distance left to travel.
        let distance = (target - from).abs();
        let duration = self.duration.mul_f64(distance);
        self.tween = Tween::new(from, target, duration).easing(self.easing);
        duration
    }

    /// Advance the transition.
    pub fn tick(&mut self, dt: Duration) {
        self.tween.tick(dt);
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.tween.current().clamp(0.0, 1.0)
    }

    /// Time left in the current transition.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.tween.remaining()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FadePhase {
        let shown = self.tween.end() >= 1.0;
        match (shown, self.tween.is_complete()) {
            (true, true) => FadePhase::Visible,
            (true, false) => FadePhase::FadingIn,
            (false, false) => FadePhase::FadingOut,
            (false, true) => FadePhase::Hidden,
        }
    }

    /// Whether the fade is heading to (or at) fully visible.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.tween.end() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: Duration = Duration::from_millis(300);

    #[test]
    fn starts_hidden() {
        let fade = Fade::new(FADE);
        assert_eq!(fade.phase(), FadePhase::Hidden);
        assert_eq!(fade.opacity(), 0.0);
        assert!(!fade.phase().is_visible());
    }

    #[test]
    fn fade_in_then_out() {
        let mut fade = Fade::new(FADE);
        assert_eq!(fade.fade_in(), FADE);
        assert_eq!(fade.phase(), FadePhase::FadingIn);
        fade.tick(Duration::from_millis(150));
        assert!((fade.opacity() - 0.5).abs() < 1e-9);
        fade.tick(Duration::from_millis(150));
        assert_eq!(fade.phase(), FadePhase::Visible);
        assert_eq!(fade.opacity(), 1.0);

        fade.fade_out();
        assert_eq!(fade.phase(), FadePhase::FadingOut);
        assert!(fade.phase().is_visible());
        fade.tick(FADE);
        assert_eq!(fade.phase(), FadePhase::Hidden);
    }

    #[test]
    fn reversal_starts_from_current_opacity() {
        let mut fade = Fade::new(FADE);
        fade.fade_in();
        fade.tick(Duration::from_millis(90));
        let before = fade.opacity();
        let back = fade.fade_out();
        assert_eq!(fade.opacity(), before);
        // Only the distance already travelled has to be undone.
        assert_eq!(back, FADE.mul_f64(before));
    }

    #[test]
    fn repeated_fade_in_does_not_restart() {
        let mut fade = Fade::new(FADE);
        fade.fade_in();
        fade.tick(Duration::from_millis(100));
        fade.fade_in();
        fade.tick(Duration::from_millis(200));
        assert_eq!(fade.phase(), FadePhase::Visible);
    }

    #[test]
    fn zero_duration_is_instant() {
        let mut fade = Fade::new(Duration::ZERO);
        assert_eq!(fade.fade_in(), Duration::ZERO);
        assert_eq!(fade.phase(), FadePhase::Visible);
        fade.fade_out();
        assert_eq!(fade.phase(), FadePhase::Hidden);
    }
}
