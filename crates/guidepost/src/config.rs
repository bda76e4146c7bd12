#![forbid(unsafe_code)]

//! Tour options.
//!
//! One [`TourOptions`] struct with a sub-struct per section. Every section
//! carries `#[serde(default)]`, so a partial JSON document overrides only
//! the fields it names and merging happens exactly one level deep: a
//! section given in JSON starts from that section's defaults, never from
//! another section.
//!
//! # Loading
//!
//! ```json
//! {
//!   "id": "onboarding",
//!   "theme": "dark",
//!   "tooltip": { "position": "top", "viewport": { "padding": 12 } },
//!   "persistence": { "key": "my-app-tour" }
//! }
//! ```
//!
//! ```rust,ignore
//! let options = TourOptions::from_json_file("tour.json")?;
//! ```
//!
//! # Defaults
//!
//! Durations are milliseconds. Defaults match the stock widget: 300 ms
//! fades, 800 ms scrolling, 8 px highlight padding, 20 px viewport padding.

use std::path::Path;
use std::time::Duration;

use guidepost_core::easing::Easing;
use guidepost_core::keybinding::KeyBindings;
use guidepost_widgets::{
    Anchor, HighlightOptions, OverlaySettings, Placement, PreferredPlacement, ScrollBehavior,
    Shape, ToggleCorner, ToggleSettings, TooltipSettings,
};
use serde::{Deserialize, Serialize};

use crate::step::Step;

// ---------------------------------------------------------------------------
// Top-level TourOptions
// ---------------------------------------------------------------------------

/// Everything a [`crate::Tour`] can be configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TourOptions {
    /// Tour identifier used for the completion marker.
    pub id: String,
    /// Ordered steps.
    pub steps: Vec<Step>,
    /// Visual theme.
    pub theme: ThemeName,
    pub animation: AnimationOptions,
    pub overlay: OverlayOptions,
    pub highlight: HighlightConfig,
    pub tooltip: TooltipOptions,
    pub toggle: ToggleOptions,
    pub keyboard: KeyBindings,
    pub persistence: PersistenceOptions,
    /// Accepted and carried for host bindings; the engine does not act on it.
    pub accessibility: AccessibilityOptions,
    pub scroll: ScrollOptions,
    /// Engine delays and margins.
    pub timing: TimingOptions,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            id: "default-tour".to_string(),
            steps: Vec::new(),
            theme: ThemeName::default(),
            animation: AnimationOptions::default(),
            overlay: OverlayOptions::default(),
            highlight: HighlightConfig::default(),
            tooltip: TooltipOptions::default(),
            toggle: ToggleOptions::default(),
            keyboard: KeyBindings::default(),
            persistence: PersistenceOptions::default(),
            accessibility: AccessibilityOptions::default(),
            scroll: ScrollOptions::default(),
            timing: TimingOptions::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Theme preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
    Minimal,
    MinimalDark,
    Neon,
}

impl ThemeName {
    /// Classes the host applies while the tour runs.
    #[must_use]
    pub const fn classes(self) -> &'static [&'static str] {
        match self {
            Self::Light => &[],
            Self::Dark => &["guided-tour-dark"],
            Self::Minimal => &["guided-tour-minimal"],
            Self::MinimalDark => &["guided-tour-minimal", "guided-tour-minimal-dark"],
            Self::Neon => &["guided-tour-neon"],
        }
    }
}

/// Transition settings shared by the overlay, highlight, and tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationOptions {
    pub enabled: bool,
    /// Milliseconds.
    pub duration: u64,
    pub easing: Easing,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: 300,
            easing: Easing::CSS_EASE_IN_OUT,
        }
    }
}

impl AnimationOptions {
    /// Effective transition time: zero when animation is disabled.
    #[must_use]
    pub fn effective_duration(&self) -> Duration {
        if self.enabled {
            Duration::from_millis(self.duration)
        } else {
            Duration::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayOptions {
    pub enabled: bool,
    pub opacity: f64,
    /// CSS color, passed through to the host.
    pub color: String,
    /// Clicking the dimmed area stops the tour.
    pub click_to_close: bool,
    pub z_index: i32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.5,
            color: "#000000".to_string(),
            click_to_close: true,
            z_index: 9998,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightConfig {
    /// Space between the target and the cutout edge.
    pub padding: f64,
    pub border_radius: f64,
    pub shape: Shape,
    /// Ask the host to pulse the target.
    pub pulse: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            padding: 8.0,
            border_radius: 4.0,
            shape: Shape::Rectangle,
            pulse: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipOptions {
    pub position: PreferredPlacement,
    pub anchor_position: Anchor,
    pub max_width: f64,
    /// Gap between target and tooltip.
    pub offset: f64,
    pub show_progress: bool,
    pub show_navigation: bool,
    pub show_close: bool,
    pub z_index: i32,
    pub viewport: ViewportOptions,
    pub scroll_behavior: ScrollBehavior,
    /// Placement used when no side fits under `auto`.
    pub fallback: Placement,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            position: PreferredPlacement::Auto,
            anchor_position: Anchor::Center,
            max_width: 400.0,
            offset: 10.0,
            show_progress: true,
            show_navigation: true,
            show_close: true,
            z_index: 9999,
            viewport: ViewportOptions::default(),
            scroll_behavior: ScrollBehavior::Reposition,
            fallback: Placement::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    /// Minimum distance between the tooltip and the viewport edges.
    pub padding: f64,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self { padding: 20.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleOptions {
    pub enabled: bool,
    pub position: ToggleCorner,
    pub offset: f64,
    pub text: String,
    pub show_badge: bool,
    pub z_index: i32,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            position: ToggleCorner::BottomRight,
            offset: 20.0,
            text: "?".to_string(),
            show_badge: true,
            z_index: 9997,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistenceOptions {
    pub enabled: bool,
    /// Storage key of the progress record.
    pub key: String,
    /// Keep the toggle badge hidden once the tour was completed.
    pub remember_completed: bool,
}

impl Default for PersistenceOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            key: "guided-tour-state".to_string(),
            remember_completed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilityOptions {
    pub announce_steps: bool,
    pub focus_restore: bool,
    pub trap_focus: bool,
}

impl Default for AccessibilityOptions {
    fn default() -> Self {
        Self {
            announce_steps: true,
            focus_restore: true,
            trap_focus: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollOptions {
    /// Milliseconds.
    pub duration: u64,
    pub easing: Easing,
    /// Extra vertical offset added to the centered scroll position.
    pub offset: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            duration: 800,
            easing: Easing::EaseInOutCubic,
            offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingOptions {
    /// Wait before auto-advancing past a missing target (ms).
    pub missing_target_delay: u64,
    /// Distance a target must keep from the top and bottom edges to count
    /// as already in view.
    pub scroll_margin: f64,
    /// Wait after scrolling before highlighting (ms).
    pub scroll_settle: u64,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            missing_target_delay: 100,
            scroll_margin: 100.0,
            scroll_settle: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading, validation, conversion
// ---------------------------------------------------------------------------

impl TourOptions {
    /// Options with the given steps and defaults for everything else.
    #[must_use]
    pub fn with_steps(steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from JSON and reject invalid values.
    pub fn from_json_str_validated(s: &str) -> Result<Self, ConfigError> {
        let options = Self::from_json_str(s)?;
        let errors = options.validate();
        if errors.is_empty() {
            Ok(options)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Check every value. An empty list means the options are valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push("id must not be empty".into());
        }

        if !(0.0..=1.0).contains(&self.overlay.opacity) {
            errors.push(format!(
                "overlay.opacity must be in [0, 1], got {}",
                self.overlay.opacity
            ));
        }

        non_negative(&mut errors, "highlight.padding", self.highlight.padding);
        non_negative(&mut errors, "highlight.borderRadius", self.highlight.border_radius);
        non_negative(&mut errors, "tooltip.offset", self.tooltip.offset);
        non_negative(&mut errors, "tooltip.viewport.padding", self.tooltip.viewport.padding);
        non_negative(&mut errors, "toggle.offset", self.toggle.offset);
        non_negative(&mut errors, "timing.scrollMargin", self.timing.scroll_margin);

        if !(self.tooltip.max_width.is_finite() && self.tooltip.max_width > 0.0) {
            errors.push(format!(
                "tooltip.maxWidth must be > 0, got {}",
                self.tooltip.max_width
            ));
        }

        if !self.scroll.offset.is_finite() {
            errors.push("scroll.offset must be finite".into());
        }

        if self.persistence.enabled && self.persistence.key.trim().is_empty() {
            errors.push("persistence.key must not be empty when persistence is enabled".into());
        }

        for key in self.keyboard.conflicts() {
            errors.push(format!("keyboard: {key} is bound to more than one action"));
        }

        for (index, step) in self.steps.iter().enumerate() {
            if step.target.trim().is_empty() {
                errors.push(format!("steps[{index}].target must not be empty"));
            }
            if let Some(padding) = step.padding {
                non_negative(&mut errors, &format!("steps[{index}].padding"), padding);
            }
        }

        errors
    }

    /// Overlay controller settings.
    #[must_use]
    pub fn to_overlay_settings(&self) -> OverlaySettings {
        OverlaySettings {
            opacity: self.overlay.opacity,
            border_radius: self.highlight.border_radius,
            fade: self.animation.effective_duration(),
        }
    }

    /// Highlight transition for a step with the given shape override.
    #[must_use]
    pub fn to_highlight_options(&self, shape: Option<Shape>) -> HighlightOptions {
        HighlightOptions {
            shape: shape.unwrap_or(self.highlight.shape),
            animate: self.animation.enabled,
            duration: Duration::from_millis(self.animation.duration),
            easing: self.animation.easing,
        }
    }

    /// Tooltip controller settings.
    #[must_use]
    pub fn to_tooltip_settings(&self) -> TooltipSettings {
        TooltipSettings {
            position: self.tooltip.position,
            anchor: self.tooltip.anchor_position,
            max_width: self.tooltip.max_width,
            offset: self.tooltip.offset,
            viewport_padding: self.tooltip.viewport.padding,
            scroll_behavior: self.tooltip.scroll_behavior,
            fade: self.animation.effective_duration(),
            fallback: self.tooltip.fallback,
        }
    }

    /// Toggle button settings.
    #[must_use]
    pub fn to_toggle_settings(&self) -> ToggleSettings {
        ToggleSettings {
            enabled: self.toggle.enabled,
            corner: self.toggle.position,
            offset: self.toggle.offset,
            text: self.toggle.text.clone(),
            show_badge: self.toggle.show_badge,
            fade: self.animation.effective_duration(),
        }
    }
}

fn non_negative(errors: &mut Vec<String>, name: &str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(format!("{name} must be >= 0, got {value}"));
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading options.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidepost_core::event::KeyCode;

    #[test]
    fn defaults_match_stock_widget() {
        let options = TourOptions::default();
        assert_eq!(options.id, "default-tour");
        assert_eq!(options.animation.duration, 300);
        assert_eq!(options.overlay.opacity, 0.5);
        assert!(options.overlay.click_to_close);
        assert_eq!(options.highlight.padding, 8.0);
        assert_eq!(options.tooltip.max_width, 400.0);
        assert_eq!(options.tooltip.viewport.padding, 20.0);
        assert_eq!(options.toggle.text, "?");
        assert_eq!(options.keyboard.next, KeyCode::ArrowRight);
        assert_eq!(options.persistence.key, "guided-tour-state");
        assert_eq!(options.scroll.duration, 800);
        assert_eq!(options.scroll.easing, Easing::EaseInOutCubic);
        assert_eq!(options.timing.missing_target_delay, 100);
    }

    #[test]
    fn default_validates_clean() {
        assert!(TourOptions::default().validate().is_empty());
    }

    #[test]
    fn partial_section_keeps_sibling_defaults() {
        let options = TourOptions::from_json_str(
            r#"{
                "theme": "minimal-dark",
                "tooltip": { "position": "top", "viewport": { "padding": 12 } },
                "overlay": { "clickToClose": false },
                "keyboard": { "next": "n" }
            }"#,
        )
        .expect("valid json");

        assert_eq!(options.theme, ThemeName::MinimalDark);
        assert_eq!(options.tooltip.position, PreferredPlacement::Top);
        assert_eq!(options.tooltip.viewport.padding, 12.0);
        assert_eq!(options.tooltip.max_width, 400.0);
        assert!(!options.overlay.click_to_close);
        assert_eq!(options.overlay.opacity, 0.5);
        assert_eq!(options.keyboard.next, KeyCode::Char('n'));
        assert_eq!(options.keyboard.close, KeyCode::Escape);
        assert_eq!(options.highlight, HighlightConfig::default());
    }

    #[test]
    fn steps_load_with_options() {
        let options = TourOptions::from_json_str(
            r##"{"id": "intro", "steps": [{"element": "#a", "title": "A", "content": "a"}]}"##,
        )
        .expect("valid json");
        assert_eq!(options.id, "intro");
        assert_eq!(options.steps.len(), 1);
        assert_eq!(options.steps[0].target, "#a");
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut options = TourOptions::default();
        options.overlay.opacity = 1.5;
        options.tooltip.max_width = 0.0;
        options.persistence.key = String::new();
        options.keyboard.previous = KeyCode::ArrowRight;
        let errors = options.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
    }

    #[test]
    fn validated_loader_rejects_bad_values() {
        let err = TourOptions::from_json_str_validated(r#"{"highlight": {"padding": -1}}"#)
            .expect_err("negative padding");
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("highlight.padding"));
    }

    #[test]
    fn unknown_easing_is_a_parse_error() {
        let err = TourOptions::from_json_str(r#"{"animation": {"easing": "wobbly"}}"#)
            .expect_err("unknown easing");
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TourOptions::from_json_file("/definitely/not/here.json").expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn disabled_animation_zeroes_fades() {
        let mut options = TourOptions::default();
        options.animation.enabled = false;
        assert_eq!(options.to_overlay_settings().fade, Duration::ZERO);
        assert_eq!(options.to_tooltip_settings().fade, Duration::ZERO);
        assert!(!options.to_highlight_options(None).animate);
    }

    #[test]
    fn conversions_carry_values() {
        let options = TourOptions::default();
        let highlight = options.to_highlight_options(Some(Shape::Circle));
        assert_eq!(highlight.shape, Shape::Circle);
        assert_eq!(highlight.duration, Duration::from_millis(300));

        let tooltip = options.to_tooltip_settings();
        assert_eq!(tooltip.viewport_padding, 20.0);
        assert_eq!(tooltip.offset, 10.0);

        let toggle = options.to_toggle_settings();
        assert_eq!(toggle.corner, ToggleCorner::BottomRight);
        assert_eq!(toggle.offset, 20.0);
    }

    #[test]
    fn theme_classes() {
        assert!(ThemeName::Light.classes().is_empty());
        assert_eq!(
            ThemeName::MinimalDark.classes(),
            &["guided-tour-minimal", "guided-tour-minimal-dark"]
        );
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tour.json");
        std::fs::write(
            &path,
            r##"{"id":"welcome","theme":"neon","steps":[{"element":"#a","title":"A","content":"x"}]}"##,
        )
        .expect("write");
        let options = TourOptions::from_json_file(&path).expect("load");
        assert_eq!(options.id, "welcome");
        assert_eq!(options.theme, ThemeName::Neon);
        assert_eq!(options.steps[0].target, "#a");
    }
}
