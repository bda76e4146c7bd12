#![forbid(unsafe_code)]

//! Canonical host input events.
//!
//! The host translates whatever its platform delivers (DOM events, native
//! window messages, synthetic test input) into these types and hands them to
//! the tour engine. Coordinates follow [`crate::geometry`].
//!
//! # Design Notes
//!
//! - Key names follow the DOM `KeyboardEvent.key` vocabulary
//!   (`"ArrowRight"`, `"Escape"`, single characters).
//! - `Modifiers` use bitflags for easy combination.
//! - Clicks on tour controls are reported by what was hit, not by
//!   coordinates. Presses on the dimming layer carry a document point
//!   instead, so the engine can let presses inside the highlight cutout
//!   through to the page.

use std::fmt;

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width.
        width: f64,
        /// New viewport height.
        height: f64,
    },

    /// The page (or any scroll container) scrolled.
    Scroll {
        /// New horizontal document scroll offset.
        scroll_x: f64,
        /// New vertical document scroll offset.
        scroll_y: f64,
    },

    /// A tour surface was clicked.
    Click(ClickTarget),

    /// The dimming layer was pressed at a document point.
    ///
    /// Presses inside the highlight cutout belong to the page and are not
    /// consumed. Presses elsewhere behave like [`ClickTarget::Overlay`].
    OverlayPress(Point),
}

/// The tour surface a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// The dimming layer outside the highlight cutout.
    ///
    /// The host has already ruled out the cutout. Hosts that cannot hit
    /// test should send [`Event::OverlayPress`] instead.
    Overlay,
    /// The floating toggle button.
    Toggle,
    /// The tooltip's forward control ("Next" / "End Tour").
    Next,
    /// The tooltip's back control.
    Previous,
    /// The tooltip's "Skip tour" control.
    Skip,
    /// The tooltip's close button.
    Close,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True when Ctrl, Alt, or Super is held. Shift alone does not count.
    #[must_use]
    pub const fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SUPER))
    }
}

/// Key codes, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    Backspace,
    Home,
    End,
    PageUp,
    PageDown,
}

impl KeyCode {
    /// Parse a DOM key name.
    ///
    /// `"Space"` and `" "` both map to `Char(' ')`. Any single character
    /// maps to [`KeyCode::Char`].
    pub fn from_name(name: &str) -> Option<Self> {
        let code = match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Space" => Self::Char(' '),
            other => {
                let mut chars = other.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Char(ch)
            }
        };
        Some(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Char(' ') => "Space",
            Self::Char(ch) => return write!(f, "{ch}"),
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::Enter => "Enter",
            Self::Escape => "Escape",
            Self::Tab => "Tab",
            Self::Backspace => "Backspace",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
        };
        f.write_str(name)
    }
}

/// Error returned when a key name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key name {:?}", self.0)
    }
}

impl std::error::Error for UnknownKey {}

impl TryFrom<String> for KeyCode {
    type Error = UnknownKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or(UnknownKey(value))
    }
}

impl From<KeyCode> for String {
    fn from(code: KeyCode) -> Self {
        code.to_string()
    }
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Cmd key.
        const SUPER = 0b1000;
    }
}
