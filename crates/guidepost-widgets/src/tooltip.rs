#![forbid(unsafe_code)]

//! Tooltip controller.
//!
//! Holds the content and the bound target, runs the placement solver, and
//! keeps the result fresh while the page moves:
//!
//! - **Resize** is debounced ([`DEFAULT_DEBOUNCE`]) and then re-solved.
//! - **Scroll** is throttled to frame cadence. With
//!   [`ScrollBehavior::Reposition`] it re-solves; with
//!   [`ScrollBehavior::Hide`] it fades the tooltip out while the target is
//!   outside the viewport and back in when it returns; with
//!   [`ScrollBehavior::Fixed`] it does nothing.
//! - A bound target that has left the document is never positioned against.
//!   The controller reports [`TooltipSignal::TargetRemoved`] instead.
//!
//! The controller never touches engine state; it only returns signals.

use std::time::Duration;

use guidepost_core::host::{ElementId, Host};
use guidepost_runtime::timer::{DEFAULT_DEBOUNCE, Debounce, FrameThrottle};
use tracing::{debug, trace};

use crate::fade::{Fade, FadePhase};
use crate::placement::{
    Anchor, DEFAULT_OFFSET, DEFAULT_PADDING, Placement, PlacementRequest, PlacementResult,
    PreferredPlacement, ScrollBehavior, solve,
};

/// Default tooltip fade duration.
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

/// Default maximum tooltip width.
pub const DEFAULT_MAX_WIDTH: f64 = 400.0;

/// What the tooltip shows for one step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TooltipContent {
    /// Heading.
    pub title: String,
    /// Body. Passed through to the renderer unmodified.
    pub body: String,
    /// 1-based step number.
    pub step_number: usize,
    /// Total number of steps.
    pub total_steps: usize,
    /// Whether the "previous" control is offered.
    pub show_previous: bool,
    /// Label of the forward control.
    pub next_label: String,
    /// Whether the progress indicator is rendered.
    pub show_progress: bool,
    /// Whether the navigation controls are rendered.
    pub show_navigation: bool,
    /// Whether the close button is rendered.
    pub show_close: bool,
}

impl TooltipContent {
    /// Completed fraction of the tour, `step_number / total_steps`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        self.step_number as f64 / self.total_steps as f64
    }

    /// `"2 of 5"`-style progress label.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} of {}", self.step_number, self.total_steps)
    }
}

/// Controller settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipSettings {
    /// Default side when a binding does not override it.
    pub position: PreferredPlacement,
    /// Default cross-axis anchor.
    pub anchor: Anchor,
    /// Width limit passed to the host when measuring.
    pub max_width: f64,
    /// Gap between target and tooltip.
    pub offset: f64,
    /// Distance kept from viewport edges.
    pub viewport_padding: f64,
    /// Scroll handling.
    pub scroll_behavior: ScrollBehavior,
    /// Fade duration.
    pub fade: Duration,
    /// Side used when automatic placement finds no room.
    pub fallback: Placement,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            position: PreferredPlacement::Auto,
            anchor: Anchor::Center,
            max_width: DEFAULT_MAX_WIDTH,
            offset: DEFAULT_OFFSET,
            viewport_padding: DEFAULT_PADDING,
            scroll_behavior: ScrollBehavior::Reposition,
            fade: DEFAULT_FADE,
            fallback: Placement::Bottom,
        }
    }
}

/// Per-binding overrides of the default side and anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// The element the tooltip points at.
    pub target: ElementId,
    /// Side override.
    pub position: Option<PreferredPlacement>,
    /// Anchor override.
    pub anchor: Option<Anchor>,
}

impl Binding {
    /// Bind to `target` with the controller defaults.
    #[must_use]
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            position: None,
            anchor: None,
        }
    }
}

/// Outcome of a positioning pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionOutcome {
    /// Solved and applied.
    Placed(PlacementResult),
    /// Target is outside the viewport and scroll behavior is `Hide`.
    HiddenOutOfView,
    /// Nothing is bound.
    Unbound,
    /// The bound target has left the document.
    TargetRemoved,
}

/// Notifications the controller raises from `tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipSignal {
    /// The bound target has left the document.
    TargetRemoved(ElementId),
}

/// The tooltip controller.
#[derive(Debug, Clone)]
pub struct Tooltip {
    settings: TooltipSettings,
    content: Option<TooltipContent>,
    binding: Option<Binding>,
    placement: Option<PlacementResult>,
    fade: Fade,
    resize: Debounce,
    scroll: FrameThrottle,
    out_of_view: bool,
}

impl Tooltip {
    /// Create a hidden, unbound tooltip.
    #[must_use]
    pub fn new(settings: TooltipSettings) -> Self {
        Self {
            fade: Fade::new(settings.fade),
            settings,
            content: None,
            binding: None,
            placement: None,
            resize: Debounce::new(DEFAULT_DEBOUNCE),
            scroll: FrameThrottle::default(),
            out_of_view: false,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &TooltipSettings {
        &self.settings
    }

    /// Replace the displayed content.
    pub fn set_content(&mut self, content: TooltipContent) {
        self.content = Some(content);
    }

    /// Current content.
    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// Bind to a target. Positioning happens on the next [`Tooltip::position`].
    pub fn bind(&mut self, binding: Binding) {
        self.binding = Some(binding);
        self.out_of_view = false;
    }

    /// Forget the target and any pending reposition.
    pub fn unbind(&mut self) {
        self.binding = None;
        self.placement = None;
        self.resize.cancel();
        self.scroll.cancel();
        self.out_of_view = false;
    }

    /// Bound target.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        self.binding.map(|b| b.target)
    }

    /// Last solved placement.
    #[must_use]
    pub fn placement(&self) -> Option<PlacementResult> {
        self.placement
    }

    /// Solve placement for the bound target against the host's page.
    pub fn position<H: Host + ?Sized>(&mut self, host: &H) -> PositionOutcome {
        let Some(binding) = self.binding else {
            return PositionOutcome::Unbound;
        };
        let Some(target) = host.bounding_rect(binding.target) else {
            debug!(target = %binding.target, "tooltip target removed");
            return PositionOutcome::TargetRemoved;
        };
        let viewport = host.viewport();

        if self.settings.scroll_behavior == ScrollBehavior::Hide && !viewport.overlaps(&target) {
            self.out_of_view = true;
            return PositionOutcome::HiddenOutOfView;
        }
        self.out_of_view = false;

        let size = host.tooltip_size(self.settings.max_width);
        let request = PlacementRequest::new(target, size, viewport)
            .preferred(binding.position.unwrap_or(self.settings.position))
            .anchor(binding.anchor.unwrap_or(self.settings.anchor))
            .padding(self.settings.viewport_padding)
            .offset(self.settings.offset)
            .scroll_behavior(self.settings.scroll_behavior)
            .fallback(self.settings.fallback);
        let result = solve(&request);
        trace!(placement = %result.placement, x = result.position.x, y = result.position.y, "tooltip placed");
        self.placement = Some(result);
        PositionOutcome::Placed(result)
    }

    /// Start fading in. Returns the fade time.
    pub fn show(&mut self) -> Duration {
        self.fade.fade_in()
    }

    /// Start fading out. Returns the fade time.
    pub fn hide(&mut self) -> Duration {
        self.fade.fade_out()
    }

    /// Fade phase.
    #[must_use]
    pub fn phase(&self) -> FadePhase {
        self.fade.phase()
    }

    /// Whether the tooltip should be rendered.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.fade.phase().is_visible()
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.fade.opacity()
    }

    /// Whether the tooltip is hidden because its target scrolled out of view.
    #[must_use]
    pub fn is_out_of_view(&self) -> bool {
        self.out_of_view
    }

    /// Note a viewport resize.
    pub fn on_resize(&mut self) {
        if self.binding.is_some() && (self.fade.is_shown() || self.out_of_view) {
            self.resize.trigger();
        }
    }

    /// Note a page scroll.
    pub fn on_scroll(&mut self) {
        if self.fade.is_shown()
            && self.binding.is_some()
            && self.settings.scroll_behavior != ScrollBehavior::Fixed
        {
            self.scroll.request();
        } else if self.out_of_view && self.binding.is_some() {
            // A hidden-by-scroll tooltip still watches for its target.
            self.scroll.request();
        }
    }

    /// Advance fades and run any due reposition.
    pub fn tick<H: Host + ?Sized>(&mut self, dt: Duration, host: &H) -> Option<TooltipSignal> {
        self.fade.tick(dt);

        let resize_due = self.resize.tick(dt);
        let scroll_due = self.scroll.tick(dt);
        if !(resize_due || scroll_due) {
            return None;
        }

        let was_out = self.out_of_view;
        match self.position(host) {
            PositionOutcome::TargetRemoved => {
                let target = self.target()?;
                self.resize.cancel();
                self.scroll.cancel();
                return Some(TooltipSignal::TargetRemoved(target));
            }
            PositionOutcome::HiddenOutOfView if !was_out || self.fade.is_shown() => {
                self.fade.fade_out();
            }
            PositionOutcome::Placed(_) if was_out => {
                self.fade.fade_in();
            }
            _ => {}
        }
        None
    }

    /// Whether any part of the bound target is inside the viewport.
    #[must_use]
    pub fn target_in_view<H: Host + ?Sized>(&self, host: &H) -> bool {
        let viewport = host.viewport();
        self.target()
            .and_then(|t| host.bounding_rect(t))
            .is_some_and(|rect| viewport.overlaps(&rect))
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new(TooltipSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidepost_core::geometry::{Rect, Size, Viewport};
    use guidepost_core::host::HostError;
    use std::cell::Cell;

    struct Page {
        target: Option<Rect>,
        scroll_y: f64,
        measured: Cell<u32>,
    }

    impl Page {
        fn with_target(rect: Rect) -> Self {
            Self {
                target: Some(rect),
                scroll_y: 0.0,
                measured: Cell::new(0),
            }
        }
    }

    impl Host for Page {
        fn resolve(&self, _selector: &str) -> Option<ElementId> {
            self.target.map(|_| ElementId(1))
        }

        fn bounding_rect(&self, _element: ElementId) -> Option<Rect> {
            self.target.map(|r| r.translate(0.0, -self.scroll_y))
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(1024.0, 768.0).with_scroll(0.0, self.scroll_y)
        }

        fn scroll_to(&mut self, _x: f64, y: f64) -> Result<(), HostError> {
            self.scroll_y = y;
            Ok(())
        }

        fn tooltip_size(&self, max_width: f64) -> Size {
            self.measured.set(self.measured.get() + 1);
            Size::new(max_width.min(300.0), 150.0)
        }
    }

    fn shown(settings: TooltipSettings) -> Tooltip {
        let mut tip = Tooltip::new(settings);
        tip.bind(Binding::new(ElementId(1)));
        tip.show();
        tip.tick(DEFAULT_FADE, &NoPage);
        tip
    }

    struct NoPage;

    impl Host for NoPage {
        fn resolve(&self, _selector: &str) -> Option<ElementId> {
            None
        }
        fn bounding_rect(&self, _element: ElementId) -> Option<Rect> {
            None
        }
        fn viewport(&self) -> Viewport {
            Viewport::new(1024.0, 768.0)
        }
        fn scroll_to(&mut self, _x: f64, _y: f64) -> Result<(), HostError> {
            Ok(())
        }
        fn tooltip_size(&self, _max_width: f64) -> Size {
            Size::default()
        }
    }

    #[test]
    fn unbound_positions_nothing() {
        let mut tip = Tooltip::default();
        assert_eq!(tip.position(&NoPage), PositionOutcome::Unbound);
    }

    #[test]
    fn position_uses_binding_overrides() {
        let page = Page::with_target(Rect::new(400.0, 300.0, 100.0, 40.0));
        let mut tip = Tooltip::default();
        tip.bind(Binding {
            position: Some(PreferredPlacement::Top),
            anchor: Some(Anchor::Start),
            ..Binding::new(ElementId(1))
        });
        let PositionOutcome::Placed(result) = tip.position(&page) else {
            panic!("expected placement");
        };
        assert_eq!(result.placement, Placement::Top);
        assert_eq!(result.position.x, 400.0);
        assert_eq!(tip.placement(), Some(result));
    }

    #[test]
    fn detached_target_is_reported_not_positioned() {
        let mut page = Page::with_target(Rect::new(400.0, 300.0, 100.0, 40.0));
        let mut tip = shown(TooltipSettings::default());
        tip.position(&page);
        page.target = None;
        assert_eq!(tip.position(&page), PositionOutcome::TargetRemoved);

        tip.on_resize();
        let signal = tip.tick(DEFAULT_DEBOUNCE, &page);
        assert_eq!(signal, Some(TooltipSignal::TargetRemoved(ElementId(1))));
    }

    #[test]
    fn resize_is_debounced() {
        let page = Page::with_target(Rect::new(400.0, 300.0, 100.0, 40.0));
        let mut tip = shown(TooltipSettings::default());
        for _ in 0..5 {
            tip.on_resize();
            tip.tick(Duration::from_millis(100), &page);
        }
        assert_eq!(page.measured.get(), 0);
        tip.tick(DEFAULT_DEBOUNCE, &page);
        assert_eq!(page.measured.get(), 1);
    }

    #[test]
    fn scroll_repositions_at_frame_cadence() {
        let mut page = Page::with_target(Rect::new(400.0, 300.0, 100.0, 40.0));
        let mut tip = shown(TooltipSettings::default());
        page.scroll_y = 100.0;
        tip.on_scroll();
        tip.tick(Duration::from_millis(16), &page);
        assert_eq!(page.measured.get(), 1);
        // Document coordinates do not change when the page scrolls.
        assert_eq!(tip.placement().map(|p| p.position.y), Some(350.0));
    }

    #[test]
    fn fixed_ignores_scroll() {
        let page = Page::with_target(Rect::new(400.0, 300.0, 100.0, 40.0));
        let mut tip = shown(TooltipSettings {
            scroll_behavior: ScrollBehavior::Fixed,
            ..TooltipSettings::default()
        });
        tip.on_scroll();
        tip.tick(Duration::from_millis(16), &page);
        assert_eq!(page.measured.get(), 0);
    }

    #[test]
    fn hide_mode_fades_out_and_back() {
        let mut page = Page::with_target(Rect::new(400.0, 300.0, 100.0, 40.0));
        let mut tip = shown(TooltipSettings {
            scroll_behavior: ScrollBehavior::Hide,
            ..TooltipSettings::default()
        });

        page.scroll_y = 2000.0;
        tip.on_scroll();
        tip.tick(Duration::from_millis(16), &page);
        assert!(tip.is_out_of_view());
        assert!(!tip.target_in_view(&page));
        tip.tick(DEFAULT_FADE, &page);
        assert!(!tip.is_visible());

        page.scroll_y = 0.0;
        tip.on_scroll();
        tip.tick(Duration::from_millis(16), &page);
        assert!(!tip.is_out_of_view());
        tip.tick(DEFAULT_FADE, &page);
        assert_eq!(tip.phase(), FadePhase::Visible);
    }

    #[test]
    fn resize_reveals_a_tooltip_hidden_out_of_view() {
        let mut page = Page::with_target(Rect::new(400.0, 300.0, 100.0, 40.0));
        let mut tip = shown(TooltipSettings {
            scroll_behavior: ScrollBehavior::Hide,
            ..TooltipSettings::default()
        });
        page.scroll_y = 2000.0;
        tip.on_scroll();
        tip.tick(Duration::from_millis(16), &page);
        tip.tick(DEFAULT_FADE, &page);
        assert!(tip.is_out_of_view());
        assert!(!tip.is_visible());

        // The resize brings the target back without any scroll event.
        page.scroll_y = 0.0;
        tip.on_resize();
        tip.tick(DEFAULT_DEBOUNCE, &page);
        assert!(!tip.is_out_of_view());
        tip.tick(DEFAULT_FADE, &page);
        assert_eq!(tip.phase(), FadePhase::Visible);
    }

    #[test]
    fn progress_fraction() {
        let content = TooltipContent {
            step_number: 2,
            total_steps: 4,
            ..TooltipContent::default()
        };
        assert_eq!(content.progress(), 0.5);
        assert_eq!(content.progress_label(), "2 of 4");
        assert_eq!(TooltipContent::default().progress(), 0.0);
    }
}
