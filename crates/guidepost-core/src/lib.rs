#![forbid(unsafe_code)]

//! Core: geometry, easing, animation clocks, input events, and the host seam.
//!
//! # Role in Guidepost
//! `guidepost-core` is the leaf layer. It has no notion of steps or tours.
//! It defines the coordinate model every other crate speaks, the clocks that
//! drive transitions, and the [`host::Host`] trait through which the engine
//! reaches the page.
//!
//! # Primary responsibilities
//! - **Geometry**: `Rect`, `Viewport`, document/viewport conversion.
//! - **Easing and animation**: named curves and tick-driven `Tween`/`Countdown`.
//! - **Events**: key, resize, scroll and click input from the host.
//! - **Key bindings**: mapping keys onto navigation actions.
//!
//! # How it fits in the system
//! `guidepost-widgets` builds the placement solver and the overlay/tooltip
//! controllers on these types; the `guidepost` engine consumes `Event`s and
//! calls into a `Host`.

pub mod animation;
pub mod easing;
pub mod event;
pub mod geometry;
pub mod host;
pub mod keybinding;
