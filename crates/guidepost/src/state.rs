#![forbid(unsafe_code)]

//! Tour progress bookkeeping.
//!
//! # Invariants
//!
//! - `completed_steps` and `completed_tours` have set semantics.
//! - `current_step_index` is `None` whenever the engine is inactive. The
//!   engine enforces this; the struct itself is plain data.
//! - `paused` survives stop/start. Only [`TourState::reset`] clears it.

use std::collections::BTreeSet;

/// Mutable progress of one engine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourState {
    /// Whether auto-advance is suspended.
    pub paused: bool,
    /// Step indices the user has moved past.
    pub completed_steps: BTreeSet<usize>,
    /// Identifiers of finished tours.
    pub completed_tours: BTreeSet<String>,
    /// Identifier of the running tour.
    pub current_tour_id: Option<String>,
    /// Index of the displayed step.
    pub current_step_index: Option<usize>,
}

impl TourState {
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Record `index` as completed. Returns `false` if it already was.
    pub fn mark_step_complete(&mut self, index: usize) -> bool {
        self.completed_steps.insert(index)
    }

    /// Record `tour_id` as completed. Returns `false` if it already was.
    pub fn mark_tour_complete(&mut self, tour_id: &str) -> bool {
        if self.completed_tours.contains(tour_id) {
            return false;
        }
        self.completed_tours.insert(tour_id.to_string())
    }

    #[must_use]
    pub fn is_tour_completed(&self, tour_id: &str) -> bool {
        self.completed_tours.contains(tour_id)
    }

    #[must_use]
    pub fn is_step_completed(&self, index: usize) -> bool {
        self.completed_steps.contains(&index)
    }

    /// The current index with `-1` standing for "no active step", as the
    /// persisted record stores it.
    #[must_use]
    pub fn current_step_or_sentinel(&self) -> i64 {
        self.current_step_index
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Clear step progress and the pause flag.
    pub fn reset(&mut self) {
        self.paused = false;
        self.completed_steps.clear();
        self.current_step_index = None;
    }

    /// [`TourState::reset`] plus forgetting completed tours.
    pub fn reset_all(&mut self) {
        self.reset();
        self.completed_tours.clear();
        self.current_tour_id = None;
    }
}
