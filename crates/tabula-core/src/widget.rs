//! Widget trait and related types.
//!
//! Widgets are prop-to-output mappings: [`Widget::render`] turns the current
//! props into an [`Element`] tree and [`Widget::event`] turns an input event
//! into a typed message for the owning state.
//!
//! # Examples
//!
//! ```
//! use tabula_core::{Element, Event, Widget, TypeId};
//! use std::any::Any;
//!
//! struct Ping;
//!
//! impl Widget for Ping {
//!     fn type_id(&self) -> TypeId {
//!         TypeId::of::<Self>()
//!     }
//!
//!     fn render(&self) -> Element {
//!         Element::new("button").target("ping").text("Ping")
//!     }
//!
//!     fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
//!         (event.activated() == Some("ping")).then(|| Box::new(()) as Box<dyn Any + Send>)
//!     }
//! }
//!
//! let mut ping = Ping;
//! assert!(ping.event(&Event::click("ping")).is_some());
//! assert_eq!(ping.to_html(), "<button data-target=\"ping\">Ping</button>");
//! ```

use crate::element::Element;
use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Core widget trait that all table components implement.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Render the current props as an element tree.
    fn render(&self) -> Element;

    /// Handle an input event, returning a message for the owner.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Check if this widget is interactive (can receive events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Render straight to HTML.
    fn to_html(&self) -> String {
        self.render().to_html()
    }
}

/// Accessible roles for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// Toolbar grouping buttons
    Toolbar,
    /// Text input
    TextInput,
    /// Link
    Link,
    /// List
    List,
    /// Table
    Table,
    /// Status message
    Status,
}

impl AccessibleRole {
    /// ARIA role name.
    #[must_use]
    pub const fn as_aria(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Button => "button",
            Self::Toolbar => "toolbar",
            Self::TextInput => "textbox",
            Self::Link => "link",
            Self::List => "list",
            Self::Table => "table",
            Self::Status => "status",
        }
    }
}
