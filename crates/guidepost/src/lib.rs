#![forbid(unsafe_code)]

//! Guidepost public facade crate.
//!
//! A headless product tour engine. Give it an ordered list of steps and a
//! [`Host`] that stands for the page; it dims the page, cuts a highlight
//! around each target, places a tooltip next to it, and walks the user
//! through the steps. The host renders whatever state the engine exposes
//! and calls [`Tour::advance`] once per animation frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use guidepost::prelude::*;
//!
//! let options = TourOptions::with_steps(vec![
//!     Step::new("#search", "Search", "Find anything from here."),
//!     Step::new("#profile", "Profile", "Your settings live here."),
//! ]);
//! let mut tour = Tour::in_memory(page, options);
//! let _guard = tour.on(TourEventKind::Complete, |_| println!("done"));
//! tour.start();
//! loop {
//!     tour.advance(frame_time);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod persistence;
pub mod state;
pub mod step;

// --- Facade types ----------------------------------------------------------

pub use config::{ConfigError, ThemeName, TourOptions};
pub use engine::{END_LABEL, NEXT_LABEL, Tour};
pub use error::{Recovery, TourError};
pub use events::{ErrorKind, TourEvent, TourEventKind};
pub use persistence::{PersistedTourRecord, TourPersistence};
pub use state::TourState;
pub use step::Step;

// --- Core re-exports -------------------------------------------------------

pub use guidepost_core::event::{ClickTarget, Event, KeyCode, KeyEvent, Modifiers};
pub use guidepost_core::geometry::{Point, Rect, Size, Viewport};
pub use guidepost_core::host::{ElementId, Host, HostError};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "state-persistence")]
pub use guidepost_runtime::FileStorage;
pub use guidepost_runtime::{MemoryStorage, StorageBackend, StorageError, Subscription};

// --- Widget re-exports -----------------------------------------------------

pub use guidepost_widgets::{Anchor, Placement, PreferredPlacement, ScrollBehavior, Shape};

/// Everything needed to drive a tour.
pub mod prelude {
    pub use crate::{
        ClickTarget, ElementId, Event, Host, HostError, KeyCode, KeyEvent, MemoryStorage, Rect,
        Size, Step, Tour, TourEvent, TourEventKind, TourOptions, Viewport,
    };

    pub use crate::{core, runtime, widgets};
}

pub use guidepost_core as core;
pub use guidepost_runtime as runtime;
pub use guidepost_widgets as widgets;
