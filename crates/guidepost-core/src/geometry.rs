#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are CSS pixels as `f64`. Unless stated otherwise a [`Rect`]
//! is viewport-relative (origin at the top-left corner of the visible area),
//! which is what a host's bounding-rect query returns. Document coordinates
//! are viewport coordinates shifted by the current scroll offset.

/// Horizontal and vertical coordinate of the parked highlight cutout.
///
/// A cleared highlight is moved this far off-canvas instead of being
/// destroyed, so the next highlight can animate in from a known place.
pub const OFFSCREEN: f64 = -9999.0;

/// A point in viewport or document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate (distance from the left edge).
    pub x: f64,
    /// Vertical coordinate (distance from the top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from its left/top corner and size.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// The sentinel rectangle a cleared highlight is parked at.
    #[inline]
    pub const fn offscreen() -> Self {
        Self::new(OFFSCREEN, OFFSCREEN, 0.0, 0.0)
    }

    /// Right edge (`left + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Size of the rectangle.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when every component is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// True for the parked sentinel produced by [`Rect::offscreen`].
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.left <= OFFSCREEN && self.top <= OFFSCREEN
    }

    /// Grow the rectangle by `padding` on every side.
    #[must_use]
    pub fn expand(&self, padding: f64) -> Rect {
        Rect::new(
            self.left - padding,
            self.top - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    /// Shift the rectangle by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Check if a point is inside the rectangle (edges inclusive on the
    /// left/top, exclusive on the right/bottom).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    /// Linear interpolation between two rectangles, component-wise.
    #[must_use]
    pub fn lerp(&self, to: &Rect, t: f64) -> Rect {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Rect::new(
            mix(self.left, to.left),
            mix(self.top, to.top),
            mix(self.width, to.width),
            mix(self.height, to.height),
        )
    }
}

/// The visible area of the page plus its scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
    /// Horizontal document scroll offset.
    pub scroll_x: f64,
    /// Vertical document scroll offset.
    pub scroll_y: f64,
}

impl Viewport {
    /// Create an unscrolled viewport.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Set the scroll offset.
    #[must_use]
    pub const fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    /// The visible area as a viewport-relative rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Translate a viewport-relative rectangle into document coordinates.
    #[inline]
    pub fn to_document(&self, rect: &Rect) -> Rect {
        rect.translate(self.scroll_x, self.scroll_y)
    }

    /// Translate a document rectangle into viewport-relative coordinates.
    #[inline]
    pub fn to_viewport(&self, rect: &Rect) -> Rect {
        rect.translate(-self.scroll_x, -self.scroll_y)
    }

    /// Whether `rect` sits comfortably inside the viewport.
    ///
    /// The top and bottom edges must keep `margin` away from the viewport
    /// edges; horizontally the rectangle only has to fit.
    pub fn comfortably_contains(&self, rect: &Rect, margin: f64) -> bool {
        rect.top >= margin
            && rect.left >= 0.0
            && rect.bottom() <= self.height - margin
            && rect.right() <= self.width
    }

    /// Whether any part of `rect` is visible.
    pub fn overlaps(&self, rect: &Rect) -> bool {
        rect.bottom() > 0.0 && rect.top < self.height && rect.right() > 0.0 && rect.left < self.width
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Size, Viewport};

    #[test]
    fn rect_derived_edges() {
        let rect = Rect::new(100.0, 400.0, 50.0, 20.0);
        assert_eq!(rect.right(), 150.0);
        assert_eq!(rect.bottom(), 420.0);
        assert_eq!(rect.center_x(), 125.0);
        assert_eq!(rect.center_y(), 410.0);
        assert_eq!(rect.size(), Size::new(50.0, 20.0));
    }

    #[test]
    fn rect_expand_grows_every_side() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0).expand(8.0);
        assert_eq!(rect, Rect::new(2.0, 12.0, 46.0, 56.0));
    }

    #[test]
    fn offscreen_sentinel_is_recognized() {
        assert!(Rect::offscreen().is_offscreen());
        assert!(Rect::offscreen().is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_offscreen());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(9.9, 9.9)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(100.0, 50.0, 20.0, 30.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(50.0, 25.0, 15.0, 20.0));
    }

    #[test]
    fn nan_rect_is_not_finite() {
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_finite());
    }

    #[test]
    fn viewport_document_round_trip() {
        let vp = Viewport::new(1024.0, 768.0).with_scroll(0.0, 300.0);
        let rect = Rect::new(10.0, 20.0, 5.0, 5.0);
        let doc = vp.to_document(&rect);
        assert_eq!(doc.top, 320.0);
        assert_eq!(vp.to_viewport(&doc), rect);
    }

    #[test]
    fn comfortably_contains_respects_vertical_margin() {
        let vp = Viewport::new(1024.0, 768.0);
        assert!(vp.comfortably_contains(&Rect::new(0.0, 100.0, 50.0, 50.0), 100.0));
        assert!(!vp.comfortably_contains(&Rect::new(0.0, 99.0, 50.0, 50.0), 100.0));
        assert!(!vp.comfortably_contains(&Rect::new(0.0, 620.0, 50.0, 50.0), 100.0));
        assert!(!vp.comfortably_contains(&Rect::new(1000.0, 200.0, 50.0, 50.0), 100.0));
    }

    #[test]
    fn overlaps_detects_partial_visibility() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(vp.overlaps(&Rect::new(-10.0, -10.0, 20.0, 20.0)));
        assert!(!vp.overlaps(&Rect::new(0.0, -50.0, 20.0, 50.0)));
        assert!(!vp.overlaps(&Rect::new(0.0, 600.0, 20.0, 20.0)));
    }
}
