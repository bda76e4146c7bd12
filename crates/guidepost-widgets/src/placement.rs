#![forbid(unsafe_code)]

//! Tooltip placement solver.
//!
//! [`solve`] is a pure function: given the target's bounds, the tooltip's
//! size, a preferred side, and the viewport, it picks a side, computes the
//! tooltip's top-left corner, and positions the arrow.
//!
//! # Algorithm
//!
//! 1. **Side**: an explicit preference is used as-is. `Auto` tries
//!    [`AUTO_ORDER`] (bottom, top, right, left) and takes the first side
//!    whose free space (target edge to viewport edge, minus padding) is at
//!    least the tooltip extent plus the offset gap. If none fits, the
//!    request's fallback is used (bottom by default).
//! 2. **Main axis**: the tooltip sits `offset` away from the target edge.
//! 3. **Cross axis**: aligned per [`Anchor`] (start edge, end edge, or
//!    centered on the target).
//! 4. **Document shift**: unless the tooltip is viewport-fixed, the scroll
//!    offset is added so the result is in document coordinates.
//! 5. **Clamp**: each axis is clamped independently into
//!    `[padding, viewport − extent − padding]` (plus scroll).
//! 6. **Fixed flip**: for viewport-fixed tooltips a top/bottom placement
//!    whose unclamped box crosses the padding margin is flipped to the
//!    opposite side when the opposite side keeps it fully visible.
//! 7. **Arrow**: the target's cross-axis center relative to the tooltip's
//!    viewport origin, clamped to `[ARROW_INSET, extent − ARROW_INSET]`.
//!
//! # Invariants
//!
//! - The tooltip never extends past `viewport − padding` on either axis when
//!   it fits in the viewport at all. When it is larger than the viewport it
//!   is pinned to the padding edge.
//! - `Auto` never yields [`Placement::Center`] unless the fallback asks
//!   for it.
//! - The arrow offset is never closer than `ARROW_INSET` to a corner when the
//!   tooltip is at least `2 * ARROW_INSET` long on that axis.

use std::fmt;

use guidepost_core::geometry::{Point, Rect, Size, Viewport};

/// Candidate order for automatic placement.
pub const AUTO_ORDER: [Placement; 4] = [
    Placement::Bottom,
    Placement::Top,
    Placement::Right,
    Placement::Left,
];

/// Minimum distance between the arrow and a tooltip corner.
pub const ARROW_INSET: f64 = 15.0;

/// Default viewport padding.
pub const DEFAULT_PADDING: f64 = 20.0;

/// Default gap between target and tooltip.
pub const DEFAULT_OFFSET: f64 = 10.0;

// ============================================================================
// Placement types
// ============================================================================

/// The side of the target the tooltip ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
    /// Centered in the viewport, detached from the target.
    Center,
}

impl Placement {
    /// The opposite side. `Center` is its own opposite.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Center => Self::Center,
        }
    }

    /// True for placements above or below the target.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Lower-case name, as used in CSS class suffixes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PreferredPlacement {
    /// Let the solver choose.
    #[default]
    Auto,
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl PreferredPlacement {
    /// The fixed placement this preference names, or `None` for `Auto`.
    #[must_use]
    pub const fn fixed(self) -> Option<Placement> {
        match self {
            Self::Auto => None,
            Self::Top => Some(Placement::Top),
            Self::Bottom => Some(Placement::Bottom),
            Self::Left => Some(Placement::Left),
            Self::Right => Some(Placement::Right),
            Self::Center => Some(Placement::Center),
        }
    }
}

/// Cross-axis alignment of the tooltip against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Anchor {
    /// Align with the target's left (or top) edge.
    Start,
    /// Center on the target.
    #[default]
    Center,
    /// Align with the target's right (or bottom) edge.
    End,
}

/// How a shown tooltip reacts to page scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ScrollBehavior {
    /// Follow the target by re-solving on scroll.
    #[default]
    Reposition,
    /// Hide while the target is outside the viewport.
    Hide,
    /// Pin to the viewport; coordinates are viewport-relative.
    Fixed,
}

// ============================================================================
// Request / result
// ============================================================================

/// Inputs to [`solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Target bounds, viewport-relative.
    pub target: Rect,
    /// Measured tooltip size.
    pub tooltip: Size,
    /// Visible area and scroll offset.
    pub viewport: Viewport,
    /// Requested side.
    pub preferred: PreferredPlacement,
    /// Cross-axis alignment.
    pub anchor: Anchor,
    /// Minimum distance between tooltip and viewport edges.
    pub padding: f64,
    /// Gap between target and tooltip.
    pub offset: f64,
    /// Scroll handling; `Fixed` switches to viewport coordinates.
    pub scroll_behavior: ScrollBehavior,
    /// Side used when `Auto` finds no side with enough room.
    pub fallback: Placement,
}

impl PlacementRequest {
    /// A request with default padding, offset, and behavior.
    #[must_use]
    pub fn new(target: Rect, tooltip: Size, viewport: Viewport) -> Self {
        Self {
            target,
            tooltip,
            viewport,
            preferred: PreferredPlacement::Auto,
            anchor: Anchor::Center,
            padding: DEFAULT_PADDING,
            offset: DEFAULT_OFFSET,
            scroll_behavior: ScrollBehavior::Reposition,
            fallback: Placement::Bottom,
        }
    }

    /// Set the preferred side.
    #[must_use]
    pub fn preferred(mut self, preferred: PreferredPlacement) -> Self {
        self.preferred = preferred;
        self
    }

    /// Set the cross-axis anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the viewport padding.
    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the target gap.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the scroll behavior.
    #[must_use]
    pub fn scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = behavior;
        self
    }

    /// Set the fallback side for `Auto`.
    #[must_use]
    pub fn fallback(mut self, fallback: Placement) -> Self {
        self.fallback = fallback;
        self
    }

    fn is_fixed(&self) -> bool {
        self.scroll_behavior == ScrollBehavior::Fixed
    }
}

/// Output of [`solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Chosen side.
    pub placement: Placement,
    /// Tooltip top-left corner. Document coordinates, or viewport
    /// coordinates when the request is viewport-fixed.
    pub position: Point,
    /// Arrow offset from the tooltip's left edge (top/bottom placements) or
    /// top edge (left/right placements). `None` for `Center`.
    pub arrow: Option<f64>,
}

impl PlacementResult {
    /// The tooltip's box at the solved position.
    #[must_use]
    pub fn bounds(&self, tooltip: Size) -> Rect {
        Rect::new(self.position.x, self.position.y, tooltip.width, tooltip.height)
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Free space between the target and the viewport edge on `placement`'s side.
#[must_use]
pub fn available_space(target: &Rect, placement: Placement, viewport: &Viewport, padding: f64) -> f64 {
    match placement {
        Placement::Top => target.top - padding,
        Placement::Bottom => viewport.height - target.bottom() - padding,
        Placement::Left => target.left - padding,
        Placement::Right => viewport.width - target.right() - padding,
        Placement::Center => f64::INFINITY,
    }
}

/// Space the tooltip needs on `placement`'s side.
#[must_use]
pub fn needed_space(tooltip: Size, placement: Placement, offset: f64) -> f64 {
    match placement {
        Placement::Top | Placement::Bottom => tooltip.height + offset,
        Placement::Left | Placement::Right => tooltip.width + offset,
        Placement::Center => 0.0,
    }
}

/// Pick the side for a request.
#[must_use]
pub fn choose_placement(req: &PlacementRequest) -> Placement {
    if let Some(fixed) = req.preferred.fixed() {
        return fixed;
    }
    AUTO_ORDER
        .into_iter()
        .find(|&p| {
            available_space(&req.target, p, &req.viewport, req.padding)
                >= needed_space(req.tooltip, p, req.offset)
        })
        .unwrap_or(req.fallback)
}

/// Solve a placement request.
#[must_use]
pub fn solve(req: &PlacementRequest) -> PlacementResult {
    let mut placement = choose_placement(req);
    let (raw_left, mut raw_top) = raw_position(req, placement);

    if req.is_fixed() && placement.is_vertical() {
        let (flipped, flipped_top) = fixed_flip(req, placement, raw_top);
        placement = flipped;
        raw_top = flipped_top;
    }

    let (scroll_x, scroll_y) = if req.is_fixed() {
        (0.0, 0.0)
    } else {
        (req.viewport.scroll_x, req.viewport.scroll_y)
    };

    let left = clamp_axis(
        raw_left + scroll_x,
        req.tooltip.width,
        req.viewport.width,
        req.padding,
        scroll_x,
    );
    let top = clamp_axis(
        raw_top + scroll_y,
        req.tooltip.height,
        req.viewport.height,
        req.padding,
        scroll_y,
    );

    let arrow = arrow_offset(
        &req.target,
        req.tooltip,
        placement,
        Point::new(left - scroll_x, top - scroll_y),
    );

    PlacementResult {
        placement,
        position: Point::new(left, top),
        arrow,
    }
}

/// Viewport-relative top-left corner before clamping.
fn raw_position(req: &PlacementRequest, placement: Placement) -> (f64, f64) {
    let target = &req.target;
    let tip = req.tooltip;
    match placement {
        Placement::Top => (
            cross_axis(target.left, target.width, tip.width, req.anchor),
            target.top - tip.height - req.offset,
        ),
        Placement::Bottom => (
            cross_axis(target.left, target.width, tip.width, req.anchor),
            target.bottom() + req.offset,
        ),
        Placement::Left => (
            target.left - tip.width - req.offset,
            cross_axis(target.top, target.height, tip.height, req.anchor),
        ),
        Placement::Right => (
            target.right() + req.offset,
            cross_axis(target.top, target.height, tip.height, req.anchor),
        ),
        Placement::Center => (
            (req.viewport.width - tip.width) / 2.0,
            (req.viewport.height - tip.height) / 2.0,
        ),
    }
}

fn cross_axis(start: f64, length: f64, extent: f64, anchor: Anchor) -> f64 {
    match anchor {
        Anchor::Start => start,
        Anchor::End => start + length - extent,
        Anchor::Center => start + (length - extent) / 2.0,
    }
}

/// Flip a viewport-fixed top/bottom tooltip whose box crosses the padding
/// margin, if the other side keeps it inside.
fn fixed_flip(req: &PlacementRequest, placement: Placement, top: f64) -> (Placement, f64) {
    let height = req.tooltip.height;
    let min_top = req.padding;
    let max_bottom = req.viewport.height - req.padding;
    let crosses = top < min_top || top + height > max_bottom;
    if !crosses {
        return (placement, top);
    }
    let other = placement.flip();
    let (_, other_top) = raw_position(req, other);
    if other_top >= min_top && other_top + height <= max_bottom {
        (other, other_top)
    } else {
        (placement, top)
    }
}

/// Clamp one axis into `[origin + padding, origin + viewport - extent - padding]`.
///
/// When the tooltip is larger than the viewport the lower bound wins.
fn clamp_axis(value: f64, extent: f64, viewport: f64, padding: f64, origin: f64) -> f64 {
    let min = origin + padding;
    let max = origin + viewport - extent - padding;
    value.min(max).max(min)
}

fn arrow_offset(target: &Rect, tooltip: Size, placement: Placement, origin: Point) -> Option<f64> {
    let (center, start, extent) = match placement {
        Placement::Top | Placement::Bottom => (target.center_x(), origin.x, tooltip.width),
        Placement::Left | Placement::Right => (target.center_y(), origin.y, tooltip.height),
        Placement::Center => return None,
    };
    Some((center - start).min(extent - ARROW_INSET).max(ARROW_INSET))
}
