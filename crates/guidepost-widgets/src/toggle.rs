#![forbid(unsafe_code)]

//! Floating toggle button that starts and stops the tour.
//!
//! The button sits in a viewport corner, fades in shortly after mounting,
//! and carries an optional "new" badge. The badge disappears while the tour
//! is active and stays hidden once the tour has been completed.

use std::fmt;
use std::time::Duration;

use guidepost_core::animation::{Animation, Countdown};
use guidepost_core::geometry::{Rect, Size, Viewport};

use crate::fade::{Fade, FadePhase};

/// Delay between mounting and the fade-in.
pub const MOUNT_DELAY: Duration = Duration::from_millis(100);

/// Corner of the viewport the button is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ToggleCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl fmt::Display for ToggleCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        })
    }
}

/// Toggle button settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleSettings {
    /// Whether the button is mounted at all.
    pub enabled: bool,
    /// Viewport corner.
    pub corner: ToggleCorner,
    /// Distance from both edges of the corner.
    pub offset: f64,
    /// Button label.
    pub text: String,
    /// Whether the badge is rendered.
    pub show_badge: bool,
    /// Fade duration.
    pub fade: Duration,
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            corner: ToggleCorner::BottomRight,
            offset: 20.0,
            text: "?".to_string(),
            show_badge: true,
            fade: Duration::from_millis(300),
        }
    }
}

/// The toggle button controller.
#[derive(Debug, Clone)]
pub struct ToggleButton {
    settings: ToggleSettings,
    mounted: bool,
    active: bool,
    badge: bool,
    pending_show: Option<Countdown>,
    fade: Fade,
}

impl ToggleButton {
    /// Create an unmounted button.
    #[must_use]
    pub fn new(settings: ToggleSettings) -> Self {
        Self {
            fade: Fade::new(settings.fade),
            badge: settings.show_badge,
            settings,
            mounted: false,
            active: false,
            pending_show: None,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &ToggleSettings {
        &self.settings
    }

    /// Mount the button. It fades in after [`MOUNT_DELAY`]. No-op when
    /// disabled or already mounted.
    pub fn mount(&mut self) {
        if self.mounted || !self.settings.enabled {
            return;
        }
        self.mounted = true;
        self.pending_show = Some(Countdown::new(MOUNT_DELAY));
    }

    /// Whether the button is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Fade the button in.
    pub fn show(&mut self) {
        if self.mounted {
            self.fade.fade_in();
        }
    }

    /// Fade the button out.
    pub fn hide(&mut self) {
        self.pending_show = None;
        self.fade.fade_out();
    }

    /// Mark the tour as running (or not). Activating hides the badge.
    pub fn set_active(&mut self, active: bool) {
        if !self.mounted {
            return;
        }
        self.active = active;
        if active {
            self.badge = false;
        }
    }

    /// Whether the button shows the active state.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Show the badge, if badges are enabled.
    pub fn show_badge(&mut self) {
        self.badge = self.settings.show_badge;
    }

    /// Hide the badge.
    pub fn hide_badge(&mut self) {
        self.badge = false;
    }

    /// Whether the badge is rendered.
    #[must_use]
    pub fn badge_visible(&self) -> bool {
        self.mounted && self.badge
    }

    /// Fade phase.
    #[must_use]
    pub fn phase(&self) -> FadePhase {
        self.fade.phase()
    }

    /// Whether the button should be rendered.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.mounted && self.fade.phase().is_visible()
    }

    /// Button bounds for a button of `size` in `viewport` (viewport
    /// coordinates).
    #[must_use]
    pub fn frame(&self, viewport: &Viewport, size: Size) -> Rect {
        let offset = self.settings.offset;
        let left = match self.settings.corner {
            ToggleCorner::TopLeft | ToggleCorner::BottomLeft => offset,
            ToggleCorner::TopRight | ToggleCorner::BottomRight => {
                viewport.width - offset - size.width
            }
        };
        let top = match self.settings.corner {
            ToggleCorner::TopLeft | ToggleCorner::TopRight => offset,
            ToggleCorner::BottomLeft | ToggleCorner::BottomRight => {
                viewport.height - offset - size.height
            }
        };
        Rect::new(left, top, size.width, size.height)
    }

    /// Unmount. The button fades out and then stops rendering.
    pub fn destroy(&mut self) {
        self.hide();
        self.mounted = false;
        self.active = false;
    }

    /// Advance the mount delay and fade.
    pub fn tick(&mut self, dt: Duration) {
        let mut dt = dt;
        if let Some(delay) = self.pending_show.as_mut() {
            dt = delay.tick(dt);
            if delay.is_complete() {
                self.pending_show = None;
                self.fade.fade_in();
            }
        }
        self.fade.tick(dt);
    }
}

impl Default for ToggleButton {
    fn default() -> Self {
        Self::new(ToggleSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_fades_in_after_delay() {
        let mut toggle = ToggleButton::default();
        toggle.mount();
        assert!(toggle.is_mounted());
        assert!(!toggle.is_visible());
        toggle.tick(MOUNT_DELAY);
        assert_eq!(toggle.phase(), FadePhase::FadingIn);
        toggle.tick(Duration::from_millis(300));
        assert_eq!(toggle.phase(), FadePhase::Visible);
    }

    #[test]
    fn leftover_time_carries_into_fade() {
        let mut toggle = ToggleButton::default();
        toggle.mount();
        toggle.tick(MOUNT_DELAY + Duration::from_millis(300));
        assert_eq!(toggle.phase(), FadePhase::Visible);
    }

    #[test]
    fn disabled_never_mounts() {
        let mut toggle = ToggleButton::new(ToggleSettings {
            enabled: false,
            ..ToggleSettings::default()
        });
        toggle.mount();
        assert!(!toggle.is_mounted());
        toggle.set_active(true);
        assert!(!toggle.is_active());
    }

    #[test]
    fn activating_hides_badge() {
        let mut toggle = ToggleButton::default();
        toggle.mount();
        assert!(toggle.badge_visible());
        toggle.set_active(true);
        assert!(!toggle.badge_visible());
        toggle.set_active(false);
        assert!(!toggle.badge_visible());
        toggle.show_badge();
        assert!(toggle.badge_visible());
    }

    #[test]
    fn badge_respects_settings() {
        let mut toggle = ToggleButton::new(ToggleSettings {
            show_badge: false,
            ..ToggleSettings::default()
        });
        toggle.mount();
        toggle.show_badge();
        assert!(!toggle.badge_visible());
    }

    #[test]
    fn frame_per_corner() {
        let vp = Viewport::new(800.0, 600.0);
        let size = Size::new(48.0, 48.0);
        let frame_for = |corner| {
            ToggleButton::new(ToggleSettings {
                corner,
                ..ToggleSettings::default()
            })
            .frame(&vp, size)
        };
        assert_eq!(frame_for(ToggleCorner::TopLeft), Rect::new(20.0, 20.0, 48.0, 48.0));
        assert_eq!(frame_for(ToggleCorner::TopRight), Rect::new(732.0, 20.0, 48.0, 48.0));
        assert_eq!(frame_for(ToggleCorner::BottomLeft), Rect::new(20.0, 532.0, 48.0, 48.0));
        assert_eq!(frame_for(ToggleCorner::BottomRight), Rect::new(732.0, 532.0, 48.0, 48.0));
    }

    #[test]
    fn destroy_unmounts() {
        let mut toggle = ToggleButton::default();
        toggle.mount();
        toggle.tick(Duration::from_secs(1));
        toggle.destroy();
        assert!(!toggle.is_mounted());
        assert!(!toggle.is_visible());
    }
}
