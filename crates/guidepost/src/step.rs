#![forbid(unsafe_code)]

//! Step definitions.
//!
//! A [`Step`] names its target by selector and carries display text plus
//! optional per-step overrides. The engine holds the step list immutably for
//! the lifetime of a [`crate::Tour`].

use guidepost_widgets::{Anchor, PreferredPlacement, Shape};
use serde::{Deserialize, Serialize};

/// One stop in a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Selector resolved through [`guidepost_core::host::Host::resolve`].
    #[serde(alias = "element")]
    pub target: String,
    /// Tooltip heading.
    #[serde(default)]
    pub title: String,
    /// Tooltip body. Passed through to the host untouched.
    #[serde(default)]
    pub content: String,
    /// Highlight padding override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Cutout shape override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    /// Tooltip side override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PreferredPlacement>,
    /// Tooltip anchor override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_position: Option<Anchor>,
}

impl Step {
    /// A step pointing at `target` with the given text.
    #[must_use]
    pub fn new(
        target: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            title: title.into(),
            content: content.into(),
            padding: None,
            shape: None,
            position: None,
            anchor_position: None,
        }
    }

    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn position(mut self, position: PreferredPlacement) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor_position = Some(anchor);
        self
    }

    /// Parse a JSON array of steps.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_overrides() {
        let step = Step::new("#save", "Save", "Saves the draft.")
            .padding(4.0)
            .shape(Shape::Circle)
            .position(PreferredPlacement::Left)
            .anchor(Anchor::Start);
        assert_eq!(step.padding, Some(4.0));
        assert_eq!(step.shape, Some(Shape::Circle));
        assert_eq!(step.position, Some(PreferredPlacement::Left));
        assert_eq!(step.anchor_position, Some(Anchor::Start));
    }

    #[test]
    fn loads_list_with_element_alias() {
        let steps = Step::list_from_json(
            r##"[
                {"element": "#nav", "title": "Navigation", "content": "Go places."},
                {"target": ".card", "title": "Cards", "shape": "circle",
                 "position": "top", "anchorPosition": "end", "padding": 12}
            ]"##,
        )
        .expect("valid steps");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].target, "#nav");
        assert_eq!(steps[0].shape, None);
        assert_eq!(steps[1].shape, Some(Shape::Circle));
        assert_eq!(steps[1].position, Some(PreferredPlacement::Top));
        assert_eq!(steps[1].anchor_position, Some(Anchor::End));
        assert_eq!(steps[1].padding, Some(12.0));
    }

    #[test]
    fn missing_target_is_rejected() {
        assert!(Step::list_from_json(r#"[{"title": "x"}]"#).is_err());
    }

    #[test]
    fn serializes_without_empty_overrides() {
        let json = serde_json::to_string(&Step::new("#a", "A", "a")).expect("serialize");
        assert_eq!(json, r##"{"target":"#a","title":"A","content":"a"}"##);
    }
}
