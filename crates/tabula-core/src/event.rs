//! Input events for widgets.
//!
//! Events address elements of a rendered tree through their `data-target`
//! attribute rather than screen coordinates.

use serde::{Deserialize, Serialize};

/// Attribute naming the element an event is aimed at.
pub const TARGET_ATTR: &str = "data-target";

/// Input event types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Element clicked
    Click {
        /// `data-target` of the clicked element
        target: String,
    },
    /// Text field value changed
    Input {
        /// `data-target` of the field
        target: String,
        /// New field value
        value: String,
    },
    /// Key pressed while an element had focus
    KeyDown {
        /// `data-target` of the focused element
        target: String,
        /// Key pressed
        key: Key,
    },
    /// Key released while an element had focus
    KeyUp {
        /// `data-target` of the focused element
        target: String,
        /// Key released
        key: Key,
    },
}

/// Keyboard keys the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Any other key
    Other,
}

impl Key {
    /// Whether the key activates a focused control like a click.
    #[must_use]
    pub const fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

impl Event {
    /// Click on the element with the given target.
    #[must_use]
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    /// Value change on the field with the given target.
    #[must_use]
    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Input {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Target of the event.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Click { target }
            | Self::Input { target, .. }
            | Self::KeyDown { target, .. }
            | Self::KeyUp { target, .. } => target,
        }
    }

    /// Check if this is a keyboard event.
    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::KeyUp { .. })
    }

    /// The target activated by this event, if any.
    ///
    /// Clicks activate their target; so does pressing Enter or Space on a
    /// focused element.
    #[must_use]
    pub fn activated(&self) -> Option<&str> {
        match self {
            Self::Click { target } => Some(target),
            Self::KeyDown { target, key } if key.activates() => Some(target),
            _ => None,
        }
    }
}
