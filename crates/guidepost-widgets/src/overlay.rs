#![forbid(unsafe_code)]

//! Dimming overlay with a highlight cutout.
//!
//! The overlay owns two independent pieces of state:
//!
//! - **Dimming layer**: shown and hidden with a fade. Hiding lingers for the
//!   fade duration before the layer stops rendering.
//! - **Highlight**: either [`Highlight::None`] or a cutout rectangle with a
//!   shape. Setting a new highlight replaces the previous one; there is never
//!   more than one cutout.
//!
//! The click-through area (the region over the cutout where clicks reach
//! the page) belongs to the instance. Two overlays never share one.
//!
//! # Invariants
//!
//! - A cleared highlight is parked at [`Rect::offscreen`] with zero size.
//! - `drawn_rect()` equals the target rectangle whenever no transition is in
//!   progress.
//! - The click area is `Some` exactly while a highlight is set.

use std::time::Duration;

use guidepost_core::animation::{Animation, Tween};
use guidepost_core::easing::Easing;
use guidepost_core::geometry::{Point, Rect};
use tracing::trace;

use crate::fade::{Fade, FadePhase};

/// Default dimming fade and hide linger.
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

/// Shape of the highlight cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Shape {
    /// Rounded rectangle with the configured corner radius.
    #[default]
    Rectangle,
    /// Corner radius of half the larger side.
    Circle,
}

impl Shape {
    /// Corner radius for a cutout of `rect` with this shape.
    #[must_use]
    pub fn corner_radius(self, rect: &Rect, border_radius: f64) -> f64 {
        match self {
            Self::Circle => rect.width.max(rect.height) / 2.0,
            Self::Rectangle => border_radius,
        }
    }
}

/// Highlight state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Highlight {
    /// No cutout; the parked rectangle is off-canvas.
    #[default]
    None,
    /// A cutout around `rect` (document coordinates).
    Highlighting {
        /// Cutout bounds.
        rect: Rect,
        /// Cutout shape.
        shape: Shape,
    },
}

impl Highlight {
    /// The cutout rectangle, if any.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::None => None,
            Self::Highlighting { rect, .. } => Some(*rect),
        }
    }
}

/// How a highlight change should be presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightOptions {
    /// Cutout shape.
    pub shape: Shape,
    /// Whether to animate from the previous cutout.
    pub animate: bool,
    /// Transition duration when animating.
    pub duration: Duration,
    /// Transition curve when animating.
    pub easing: Easing,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            shape: Shape::Rectangle,
            animate: true,
            duration: DEFAULT_FADE,
            easing: Easing::CSS_EASE_IN_OUT,
        }
    }
}

/// Presentation settings for the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    /// Dimming opacity when fully shown.
    pub opacity: f64,
    /// Corner radius for rectangular cutouts.
    pub border_radius: f64,
    /// Dimming fade duration (also the hide linger).
    pub fade: Duration,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            opacity: 0.5,
            border_radius: 4.0,
            fade: DEFAULT_FADE,
        }
    }
}

/// The overlay controller.
#[derive(Debug, Clone)]
pub struct Overlay {
    settings: OverlaySettings,
    dimmer: Fade,
    highlight: Highlight,
    from: Rect,
    transition: Option<Tween>,
    click_area: Option<Rect>,
}

impl Overlay {
    /// Create a hidden overlay with no highlight.
    #[must_use]
    pub fn new(settings: OverlaySettings) -> Self {
        Self {
            dimmer: Fade::new(settings.fade),
            settings,
            highlight: Highlight::None,
            from: Rect::offscreen(),
            transition: None,
            click_area: None,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Start showing the dimming layer. Returns the fade-in time.
    pub fn show(&mut self) -> Duration {
        trace!("overlay show");
        self.dimmer.fade_in()
    }

    /// Start hiding the dimming layer. It keeps rendering until the fade
    /// (the linger) completes. Returns the linger time.
    pub fn hide(&mut self) -> Duration {
        trace!("overlay hide");
        self.dimmer.fade_out()
    }

    /// Dimming layer phase.
    #[must_use]
    pub fn phase(&self) -> FadePhase {
        self.dimmer.phase()
    }

    /// Whether the dimming layer should be rendered.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.dimmer.phase().is_visible()
    }

    /// Current dimming opacity, scaled by the configured maximum.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.dimmer.opacity() * self.settings.opacity
    }

    /// Cut a highlight around `rect`, replacing any previous one.
    ///
    /// Returns how long the transition takes (zero when not animated).
    pub fn highlight(&mut self, rect: Rect, options: HighlightOptions) -> Duration {
        let previous = self.drawn_rect();
        self.highlight = Highlight::Highlighting {
            rect,
            shape: options.shape,
        };
        self.click_area = Some(rect);

        // Only animate between two on-canvas cutouts.
        let animate = options.animate && !options.duration.is_zero() && !previous.is_offscreen();
        if animate {
            self.from = previous;
            self.transition = Some(Tween::new(0.0, 1.0, options.duration).easing(options.easing));
            trace!(?rect, "highlight transition");
            options.duration
        } else {
            self.from = rect;
            self.transition = None;
            Duration::ZERO
        }
    }

    /// Remove the highlight and park the cutout off-canvas.
    pub fn clear_highlight(&mut self) {
        self.highlight = Highlight::None;
        self.from = Rect::offscreen();
        self.transition = None;
        self.click_area = None;
    }

    /// Highlight state.
    #[must_use]
    pub fn highlight_state(&self) -> Highlight {
        self.highlight
    }

    /// The rectangle to draw this frame, mid-transition or settled.
    #[must_use]
    pub fn drawn_rect(&self) -> Rect {
        let Some(target) = self.highlight.rect() else {
            return Rect::offscreen();
        };
        match &self.transition {
            Some(tween) if !tween.is_complete() => self.from.lerp(&target, tween.current()),
            _ => target,
        }
    }

    /// Corner radius of the drawn cutout.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        match self.highlight {
            Highlight::None => 0.0,
            Highlight::Highlighting { shape, .. } => {
                shape.corner_radius(&self.drawn_rect(), self.settings.border_radius)
            }
        }
    }

    /// Region where clicks pass through to the page.
    #[must_use]
    pub fn click_area(&self) -> Option<Rect> {
        self.click_area
    }

    /// Whether a click at `point` (document coordinates) reaches the page.
    #[must_use]
    pub fn passes_click(&self, point: Point) -> bool {
        self.click_area.is_some_and(|area| area.contains(point))
    }

    /// Whether a highlight transition or fade is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.dimmer.phase().is_animating()
            || self.transition.as_ref().is_some_and(|t| !t.is_complete())
    }

    /// Advance fades and transitions.
    pub fn tick(&mut self, dt: Duration) {
        self.dimmer.tick(dt);
        if let Some(tween) = self.transition.as_mut() {
            tween.tick(dt);
            if tween.is_complete() {
                self.transition = None;
                if let Some(rect) = self.highlight.rect() {
                    self.from = rect;
                }
            }
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(OverlaySettings::default())
    }
}
