#![forbid(unsafe_code)]

//! Lifecycle events published by the tour engine.

use std::fmt;

use guidepost_runtime::Notification;

use crate::step::Step;

/// Kind of a reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A step's target could not be resolved.
    ElementNotFound,
    /// Displaying a step failed part way.
    ShowStep,
    /// The displayed target left the document.
    TargetRemoved,
}

impl ErrorKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ElementNotFound => "element-not-found",
            Self::ShowStep => "show-step-error",
            Self::TargetRemoved => "target-removed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event emitted by [`crate::Tour`].
#[derive(Debug, Clone, PartialEq)]
pub enum TourEvent {
    /// The tour started.
    Start { total_steps: usize },
    /// The tour stopped (after skip, complete, or an explicit stop).
    Stop,
    /// Auto-advance was paused.
    Pause { step: usize },
    /// Auto-advance resumed.
    Resume { step: usize },
    /// A step is about to be displayed.
    StepChange {
        index: usize,
        step: Step,
        total: usize,
    },
    /// The user skipped the tour.
    Skip { step: usize },
    /// The tour ran to the end.
    Complete { total_steps: usize },
    /// A recoverable failure.
    Error {
        kind: ErrorKind,
        step: usize,
        /// The unresolved selector, for `element-not-found`.
        selector: Option<String>,
        /// Cause, for `show-step-error` and `target-removed`.
        error: Option<String>,
    },
}

/// Routing key for [`TourEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourEventKind {
    Start,
    Stop,
    Pause,
    Resume,
    StepChange,
    Skip,
    Complete,
    Error,
}

impl TourEventKind {
    /// Event name as a host binding would expose it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::StepChange => "stepChange",
            Self::Skip => "skip",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }
}

impl Notification for TourEvent {
    type Kind = TourEventKind;

    fn kind(&self) -> TourEventKind {
        match self {
            Self::Start { .. } => TourEventKind::Start,
            Self::Stop => TourEventKind::Stop,
            Self::Pause { .. } => TourEventKind::Pause,
            Self::Resume { .. } => TourEventKind::Resume,
            Self::StepChange { .. } => TourEventKind::StepChange,
            Self::Skip { .. } => TourEventKind::Skip,
            Self::Complete { .. } => TourEventKind::Complete,
            Self::Error { .. } => TourEventKind::Error,
        }
    }
}
