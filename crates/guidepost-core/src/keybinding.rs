#![forbid(unsafe_code)]

//! Key-to-action mapping for tour navigation.
//!
//! [`KeyBindings`] maps three configurable keys onto [`NavAction`]s. Events
//! carrying Ctrl, Alt, or Super are never consumed so host shortcuts keep
//! working while a tour is open.
//!
//! # Example
//!
//! ```
//! use guidepost_core::event::{KeyCode, KeyEvent};
//! use guidepost_core::keybinding::{KeyBindings, NavAction};
//!
//! let bindings = KeyBindings::default();
//! let action = bindings.map(&KeyEvent::new(KeyCode::ArrowRight));
//! assert_eq!(action, Some(NavAction::Next));
//! ```

use crate::event::{KeyCode, KeyEvent};

/// A navigation command produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Advance to the next step (or finish on the last one).
    Next,
    /// Go back one step.
    Previous,
    /// Close the tour.
    Close,
}

/// Keys bound to tour navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct KeyBindings {
    /// Whether key events are handled at all.
    pub enabled: bool,
    /// Key for [`NavAction::Next`].
    pub next: KeyCode,
    /// Key for [`NavAction::Previous`].
    pub previous: KeyCode,
    /// Key for [`NavAction::Close`].
    pub close: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            enabled: true,
            next: KeyCode::ArrowRight,
            previous: KeyCode::ArrowLeft,
            close: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Map a key event to an action.
    ///
    /// Returns `None` when bindings are disabled, a command modifier is held,
    /// or the key is unbound. When two actions share a key, `Next` wins over
    /// `Previous`, which wins over `Close`.
    #[must_use]
    pub fn map(&self, event: &KeyEvent) -> Option<NavAction> {
        if !self.enabled || event.has_command_modifier() {
            return None;
        }
        if event.code == self.next {
            Some(NavAction::Next)
        } else if event.code == self.previous {
            Some(NavAction::Previous)
        } else if event.code == self.close {
            Some(NavAction::Close)
        } else {
            None
        }
    }

    /// Keys bound to more than one action.
    #[must_use]
    pub fn conflicts(&self) -> Vec<KeyCode> {
        let mut dupes = Vec::new();
        let keys = [self.next, self.previous, self.close];
        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) && !dupes.contains(key) {
                dupes.push(*key);
            }
        }
        dupes
    }
}
