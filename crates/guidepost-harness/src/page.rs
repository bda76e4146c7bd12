#![forbid(unsafe_code)]

//! A scriptable stand-in for a browser page.
//!
//! [`SimulatedPage`] keeps element rectangles in document coordinates and
//! answers [`Host`] queries the way a browser would: bounding rectangles are
//! viewport-relative, scrolling is clamped to the document, and detached
//! elements stop resolving. Every side effect the engine requests (scrolls,
//! target marks, theme classes) is recorded for assertions.
//!
//! # Example
//!
//! ```
//! use guidepost_core::geometry::Rect;
//! use guidepost_core::host::Host;
//! use guidepost_harness::SimulatedPage;
//!
//! let mut page = SimulatedPage::new(1024.0, 768.0);
//! let id = page.add("#save", Rect::new(100.0, 400.0, 50.0, 50.0));
//! assert_eq!(page.resolve("#save"), Some(id));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use guidepost_core::event::Event;
use guidepost_core::geometry::{Rect, Size, Viewport};
use guidepost_core::host::{ElementId, Host, HostError};
use tracing::trace;

/// One element on the simulated page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageElement {
    /// Selector the element answers to.
    pub selector: String,
    /// Bounds in document coordinates.
    pub rect: Rect,
    /// Whether the element is still in the document.
    pub attached: bool,
}

/// In-memory page implementing [`Host`].
#[derive(Debug, Clone)]
pub struct SimulatedPage {
    elements: BTreeMap<ElementId, PageElement>,
    next_id: u64,
    viewport: Viewport,
    document_height: f64,
    tooltip: Size,
    scroll_error: Option<String>,
    scrolls: Vec<(f64, f64)>,
    marked: BTreeMap<ElementId, bool>,
    theme: BTreeSet<String>,
}

impl SimulatedPage {
    /// An empty, unscrolled page. The document is three viewports tall.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: BTreeMap::new(),
            next_id: 1,
            viewport: Viewport::new(width, height),
            document_height: height * 3.0,
            tooltip: Size::new(300.0, 150.0),
            scroll_error: None,
            scrolls: Vec::new(),
            marked: BTreeMap::new(),
            theme: BTreeSet::new(),
        }
    }

    /// Set the document height that scrolling is clamped to.
    #[must_use]
    pub fn with_document_height(mut self, height: f64) -> Self {
        self.document_height = height;
        self
    }

    /// Set the size the tooltip renders at.
    #[must_use]
    pub fn with_tooltip_size(mut self, size: Size) -> Self {
        self.tooltip = size;
        self
    }

    /// Add an element at `rect` (document coordinates).
    pub fn add(&mut self, selector: impl Into<String>, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            PageElement {
                selector: selector.into(),
                rect,
                attached: true,
            },
        );
        id
    }

    /// Remove `id` from the document. Its handle stays valid but no longer
    /// measures or resolves.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.attached = false;
        }
    }

    /// Put a detached element back.
    pub fn reattach(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.attached = true;
        }
    }

    /// Move `id` to `rect` (document coordinates).
    pub fn move_element(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.rect = rect;
        }
    }

    /// Element details.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&PageElement> {
        self.elements.get(&id)
    }

    /// Resize the viewport and return the event the host would deliver.
    pub fn resize(&mut self, width: f64, height: f64) -> Event {
        self.viewport.width = width;
        self.viewport.height = height;
        Event::Resize { width, height }
    }

    /// Scroll as the user would and return the matching event.
    pub fn user_scroll(&mut self, x: f64, y: f64) -> Event {
        let (x, y) = self.clamp_scroll(x, y);
        self.viewport.scroll_x = x;
        self.viewport.scroll_y = y;
        Event::Scroll {
            scroll_x: x,
            scroll_y: y,
        }
    }

    /// Make every following `scroll_to` fail with `message`.
    pub fn fail_scrolling(&mut self, message: impl Into<String>) {
        self.scroll_error = Some(message.into());
    }

    /// Current `(scroll_x, scroll_y)`.
    #[must_use]
    pub fn scroll_position(&self) -> (f64, f64) {
        (self.viewport.scroll_x, self.viewport.scroll_y)
    }

    /// Every position the engine scrolled to, in order.
    #[must_use]
    pub fn scroll_calls(&self) -> &[(f64, f64)] {
        &self.scrolls
    }

    /// Whether `id` carries the target mark.
    #[must_use]
    pub fn is_marked(&self, id: ElementId) -> bool {
        self.marked.contains_key(&id)
    }

    /// Whether `id` carries the pulse mark.
    #[must_use]
    pub fn is_pulsing(&self, id: ElementId) -> bool {
        self.marked.get(&id).copied().unwrap_or(false)
    }

    /// Elements currently marked.
    #[must_use]
    pub fn marked(&self) -> Vec<ElementId> {
        self.marked.keys().copied().collect()
    }

    /// Theme classes currently applied.
    #[must_use]
    pub fn theme_classes(&self) -> Vec<String> {
        self.theme.iter().cloned().collect()
    }

    fn clamp_scroll(&self, x: f64, y: f64) -> (f64, f64) {
        let max_y = (self.document_height - self.viewport.height).max(0.0);
        (x.max(0.0), y.min(max_y).max(0.0))
    }
}

impl Host for SimulatedPage {
    fn resolve(&self, selector: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, e)| e.attached && e.selector == selector)
            .map(|(id, _)| *id)
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let element = self.elements.get(&element).filter(|e| e.attached)?;
        Some(self.viewport.to_viewport(&element.rect))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, x: f64, y: f64) -> Result<(), HostError> {
        if let Some(message) = &self.scroll_error {
            return Err(HostError::Scroll(message.clone()));
        }
        let (x, y) = self.clamp_scroll(x, y);
        trace!(x, y, "simulated scroll");
        self.viewport.scroll_x = x;
        self.viewport.scroll_y = y;
        self.scrolls.push((x, y));
        Ok(())
    }

    fn tooltip_size(&self, max_width: f64) -> Size {
        Size::new(self.tooltip.width.min(max_width), self.tooltip.height)
    }

    fn mark_target(&mut self, element: ElementId, pulse: bool) {
        self.marked.insert(element, pulse);
    }

    fn unmark_target(&mut self, element: ElementId) {
        self.marked.remove(&element);
    }

    fn apply_theme(&mut self, classes: &[&str], active: bool) {
        for class in classes {
            if active {
                self.theme.insert((*class).to_string());
            } else {
                self.theme.remove(*class);
            }
        }
    }
}
