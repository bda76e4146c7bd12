#![forbid(unsafe_code)]

//! The page a tour runs against.
//!
//! The engine never touches a document directly. Everything it needs from
//! the page (resolving selectors, measuring elements, scrolling, sizing the
//! tooltip) goes through [`Host`]. A browser binding implements it on top of
//! the DOM; tests implement it on a simulated page.
//!
//! # Contract
//!
//! - `bounding_rect` is viewport-relative and returns `None` once the element
//!   has left the document.
//! - `scroll_to` takes document coordinates and applies them immediately. The
//!   engine animates by calling it once per frame.
//! - The marker and theme hooks are cosmetic. Their default implementations
//!   do nothing.

use std::fmt;

use crate::geometry::{Rect, Size, Viewport};

/// Opaque handle to a resolved page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors a host may report back to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The element is no longer part of the document.
    Detached(ElementId),
    /// Scrolling was refused or failed.
    Scroll(String),
    /// Any other host-side failure.
    Other(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached(id) => write!(f, "element {id} is detached"),
            Self::Scroll(msg) => write!(f, "scroll failed: {msg}"),
            Self::Other(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

/// The page a tour is attached to.
pub trait Host {
    /// Find the element matching `selector`.
    fn resolve(&self, selector: &str) -> Option<ElementId>;

    /// Current viewport-relative bounds of `element`, or `None` if detached.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Visible area and scroll offset.
    fn viewport(&self) -> Viewport;

    /// Scroll the document so its top-left visible corner is at `(x, y)`.
    fn scroll_to(&mut self, x: f64, y: f64) -> Result<(), HostError>;

    /// Rendered size of the tooltip with its current content, constrained to
    /// `max_width`.
    fn tooltip_size(&self, max_width: f64) -> Size;

    /// Flag `element` as the current tour target.
    fn mark_target(&mut self, _element: ElementId, _pulse: bool) {}

    /// Remove the target flags from `element`.
    fn unmark_target(&mut self, _element: ElementId) {}

    /// Add (`active == true`) or remove theme classes on the tour surfaces.
    fn apply_theme(&mut self, _classes: &[&str], _active: bool) {}
}

impl<H: Host + ?Sized> Host for &mut H {
    fn resolve(&self, selector: &str) -> Option<ElementId> {
        (**self).resolve(selector)
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        (**self).bounding_rect(element)
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn scroll_to(&mut self, x: f64, y: f64) -> Result<(), HostError> {
        (**self).scroll_to(x, y)
    }

    fn tooltip_size(&self, max_width: f64) -> Size {
        (**self).tooltip_size(max_width)
    }

    fn mark_target(&mut self, element: ElementId, pulse: bool) {
        (**self).mark_target(element, pulse);
    }

    fn unmark_target(&mut self, element: ElementId) {
        (**self).unmark_target(element);
    }

    fn apply_theme(&mut self, classes: &[&str], active: bool) {
        (**self).apply_theme(classes, active);
    }
}
