#![forbid(unsafe_code)]

//! Tour error model and recovery mapping.
//!
//! # Design Principles
//!
//! 1. **Nothing is fatal.** A broken tour must not break the host page, so
//!    every variant maps to a [`Recovery`] that keeps the engine running.
//! 2. **Errors are reported, not returned.** Navigation calls never return
//!    `Err`; the engine converts a [`TourError`] into an `error` event and
//!    carries on.
//! 3. **Storage failures stay internal.** [`TourError::Persistence`] is logged
//!    and swallowed; it never reaches subscribers.

use std::fmt;

use guidepost_core::host::{ElementId, HostError};
use guidepost_runtime::StorageError;

use crate::events::ErrorKind;

// ── Tour Error ──────────────────────────────────────────────────────────

/// Failures that can occur while a tour runs.
#[derive(Debug)]
pub enum TourError {
    /// The step's target selector matched nothing.
    ElementNotFound {
        /// Step index.
        step: usize,
        /// The selector that failed to resolve.
        selector: String,
    },
    /// Something went wrong while scrolling, highlighting, or positioning.
    ShowStep {
        /// Step index.
        step: usize,
        /// Human-readable cause.
        message: String,
    },
    /// Loading or saving tour state failed.
    Persistence(StorageError),
    /// The bound target left the document while its step was displayed.
    TargetRemoved {
        /// Step index.
        step: usize,
        /// The element that disappeared.
        element: ElementId,
    },
}

/// Standard result type for fallible tour internals.
pub type Result<T> = std::result::Result<T, TourError>;

// ── Recovery ────────────────────────────────────────────────────────────

/// What the engine does after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Move on to the next step after a short delay.
    AdvanceAfterDelay,
    /// Stay on the current step; the tour remains active.
    StayOnStep,
    /// Run the current step's display sequence again.
    RedisplayStep,
    /// Continue as if no state had been stored.
    UseDefaults,
}

impl TourError {
    /// The recovery action for this error.
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::ElementNotFound { .. } => Recovery::AdvanceAfterDelay,
            Self::ShowStep { .. } => Recovery::StayOnStep,
            Self::TargetRemoved { .. } => Recovery::RedisplayStep,
            Self::Persistence(_) => Recovery::UseDefaults,
        }
    }

    /// Event kind reported to subscribers, or `None` for errors that are
    /// never surfaced.
    #[must_use]
    pub fn event_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::ElementNotFound { .. } => Some(ErrorKind::ElementNotFound),
            Self::ShowStep { .. } => Some(ErrorKind::ShowStep),
            Self::TargetRemoved { .. } => Some(ErrorKind::TargetRemoved),
            Self::Persistence(_) => None,
        }
    }

    /// Short error type label for structured logs.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ElementNotFound { .. } => "element_not_found",
            Self::ShowStep { .. } => "show_step",
            Self::Persistence(_) => "persistence",
            Self::TargetRemoved { .. } => "target_removed",
        }
    }

    /// The step the error belongs to, if any.
    #[must_use]
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::ElementNotFound { step, .. }
            | Self::ShowStep { step, .. }
            | Self::TargetRemoved { step, .. } => Some(*step),
            Self::Persistence(_) => None,
        }
    }

    /// Whether the engine keeps the tour running after this error. Always
    /// true today; kept so callers can match on it when logging.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementNotFound { step, selector } => {
                write!(f, "step {step}: no element matches {selector:?}")
            }
            Self::ShowStep { step, message } => write!(f, "step {step}: {message}"),
            Self::Persistence(e) => write!(f, "persistence: {e}"),
            Self::TargetRemoved { step, element } => {
                write!(f, "step {step}: target {element} was removed")
            }
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────────

impl From<StorageError> for TourError {
    fn from(e: StorageError) -> Self {
        Self::Persistence(e)
    }
}

impl TourError {
    /// Wrap a host failure that interrupted the display of `step`.
    #[must_use]
    pub fn from_host(step: usize, e: &HostError) -> Self {
        Self::ShowStep {
            step,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn recovery_per_variant() {
        let missing = TourError::ElementNotFound {
            step: 0,
            selector: "#nope".into(),
        };
        assert_eq!(missing.recovery(), Recovery::AdvanceAfterDelay);
        assert_eq!(missing.event_kind(), Some(ErrorKind::ElementNotFound));

        let show = TourError::ShowStep {
            step: 2,
            message: "boom".into(),
        };
        assert_eq!(show.recovery(), Recovery::StayOnStep);
        assert_eq!(show.step(), Some(2));

        let removed = TourError::TargetRemoved {
            step: 1,
            element: ElementId(7),
        };
        assert_eq!(removed.recovery(), Recovery::RedisplayStep);
        assert_eq!(removed.event_kind(), Some(ErrorKind::TargetRemoved));
    }

    #[test]
    fn persistence_is_never_surfaced() {
        let err: TourError = StorageError::Unavailable("quota".into()).into();
        assert_eq!(err.recovery(), Recovery::UseDefaults);
        assert_eq!(err.event_kind(), None);
        assert_eq!(err.step(), None);
        assert!(err.source().is_some());
        assert!(err.is_recoverable());
    }

    #[test]
    fn display_is_informative() {
        let err = TourError::ElementNotFound {
            step: 3,
            selector: ".card".into(),
        };
        assert_eq!(err.to_string(), "step 3: no element matches \".card\"");

        let host = TourError::from_host(1, &HostError::Scroll("locked".into()));
        assert_eq!(host.to_string(), "step 1: scroll failed: locked");
        assert_eq!(host.error_type(), "show_step");
    }
}
