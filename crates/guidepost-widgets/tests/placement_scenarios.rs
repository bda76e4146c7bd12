//! Scenario tests for the placement solver.
//!
//! # Invariants Tested
//!
//! 1. **Tie-break order**: with room on every side, `Auto` picks bottom;
//!    then top, right, left as room disappears.
//! 2. **Clamp**: the tooltip never crosses `viewport − extent − padding`.
//! 3. **Reference scenario**: 1024×768 viewport, 50×50 target at (100, 400),
//!    300×150 tooltip, padding 10, offset 10 → bottom at top 460 with left
//!    clamped into `[10, 714]`.

use guidepost_core::geometry::{Rect, Size, Viewport};
use guidepost_widgets::placement::{
    Anchor, Placement, PlacementRequest, PreferredPlacement, ScrollBehavior, solve,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const TOOLTIP: Size = Size::new(300.0, 150.0);

fn viewport() -> Viewport {
    Viewport::new(1024.0, 768.0)
}

fn request(target: Rect) -> PlacementRequest {
    PlacementRequest::new(target, TOOLTIP, viewport())
        .padding(10.0)
        .offset(10.0)
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test]
fn reference_scenario_places_below_and_clamps_left() {
    let result = solve(&request(Rect::new(100.0, 400.0, 50.0, 50.0)));
    assert_eq!(result.placement, Placement::Bottom);
    assert_eq!(result.position.y, 460.0);
    assert!(result.position.x >= 10.0 && result.position.x <= 714.0);
    // Centered would be -25; the clamp pulls it to the padding.
    assert_eq!(result.position.x, 10.0);
    // Arrow points at the target center (125) from the tooltip origin (10).
    assert_eq!(result.arrow, Some(115.0));
}

// ---------------------------------------------------------------------------
// Tie-break order
// ---------------------------------------------------------------------------

#[test]
fn centered_target_in_large_viewport_goes_below() {
    let target = Rect::new(487.0, 359.0, 50.0, 50.0);
    assert_eq!(solve(&request(target)).placement, Placement::Bottom);
}

#[test]
fn order_degrades_bottom_top_right_left() {
    // Room below.
    assert_eq!(
        solve(&request(Rect::new(400.0, 100.0, 50.0, 50.0))).placement,
        Placement::Bottom
    );
    // No room below, room above.
    assert_eq!(
        solve(&request(Rect::new(400.0, 600.0, 50.0, 150.0))).placement,
        Placement::Top
    );
    // Neither vertical side, room right.
    assert_eq!(
        solve(&request(Rect::new(100.0, 100.0, 50.0, 600.0))).placement,
        Placement::Right
    );
    // Only left.
    assert_eq!(
        solve(&request(Rect::new(800.0, 100.0, 200.0, 600.0))).placement,
        Placement::Left
    );
}

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

#[test]
fn target_near_right_edge_is_clamped() {
    let result = solve(&request(Rect::new(1000.0, 300.0, 20.0, 20.0)));
    assert!(result.position.x <= 1024.0 - 300.0 - 10.0);
    assert_eq!(result.position.x, 714.0);
    // Arrow saturates at the far inset.
    assert_eq!(result.arrow, Some(300.0 - 15.0));
}

#[test]
fn scrolled_document_keeps_clamp_relative_to_viewport() {
    let mut req = request(Rect::new(1000.0, 300.0, 20.0, 20.0));
    req.viewport = viewport().with_scroll(50.0, 400.0);
    let result = solve(&req);
    assert_eq!(result.position.x, 50.0 + 714.0);
    assert_eq!(result.position.y, 400.0 + 330.0);
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[test]
fn left_placement_with_start_anchor() {
    let target = Rect::new(600.0, 200.0, 100.0, 300.0);
    let result = solve(
        &request(target)
            .preferred(PreferredPlacement::Left)
            .anchor(Anchor::Start),
    );
    assert_eq!(result.placement, Placement::Left);
    assert_eq!(result.position.x, 290.0);
    assert_eq!(result.position.y, 200.0);
    // Target center y (350) minus tooltip top (200), clamped to 150 - 15.
    assert_eq!(result.arrow, Some(135.0));
}

#[test]
fn fixed_tooltip_uses_viewport_coordinates() {
    let mut req = request(Rect::new(100.0, 400.0, 50.0, 50.0)).scroll_behavior(ScrollBehavior::Fixed);
    req.viewport = viewport().with_scroll(0.0, 5000.0);
    let result = solve(&req);
    assert_eq!(result.position.y, 460.0);
}
