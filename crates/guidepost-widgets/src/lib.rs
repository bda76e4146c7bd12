#![forbid(unsafe_code)]

//! Widgets: placement solver and the overlay, tooltip, and toggle controllers.
//!
//! # Role in Guidepost
//! Everything the tour shows on screen is modeled here as plain state plus
//! geometry. Controllers accept rectangles and content from the engine and
//! return durations and signals; none of them reads step definitions or
//! mutates engine state.
//!
//! # Primary responsibilities
//! - **Placement**: choose a side, position, and arrow for the tooltip.
//! - **Overlay**: dimming layer plus a single highlight cutout.
//! - **Tooltip**: content, binding, and reposition on resize/scroll.
//! - **Toggle**: the floating start/stop button and its badge.
//!
//! # Feature flags
//! - `serde`: `Serialize`/`Deserialize` for the option enums
//!   (`PreferredPlacement`, `Anchor`, `ScrollBehavior`, `Shape`,
//!   `ToggleCorner`).

pub mod fade;
pub mod overlay;
pub mod placement;
pub mod toggle;
pub mod tooltip;

pub use fade::{Fade, FadePhase};
pub use overlay::{Highlight, HighlightOptions, Overlay, OverlaySettings, Shape};
pub use placement::{
    Anchor, Placement, PlacementRequest, PlacementResult, PreferredPlacement, ScrollBehavior,
    solve,
};
pub use toggle::{ToggleButton, ToggleCorner, ToggleSettings};
pub use tooltip::{
    Binding, PositionOutcome, Tooltip, TooltipContent, TooltipSettings, TooltipSignal,
};
