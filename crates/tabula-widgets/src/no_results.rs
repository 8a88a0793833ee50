//! Placeholder shown when no rows match.

use crate::EventName;
use std::any::Any;
use tabula_core::{AccessibleRole, Element, Event, TypeId, Widget};

const TARGET: &str = "reset-link";

/// Text shown when filtering leaves no rows.
pub const NO_RESULTS_TEXT: &str = "No results found for current display settings.";

/// Message emitted when the reset link is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetClicked;

impl EventName for ResetClicked {
    fn event_name(&self) -> &'static str {
        "resetClicked"
    }
}

/// "No results" notice with a reset link.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResults;

impl NoResults {
    /// Create the placeholder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Widget for NoResults {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self) -> Element {
        Element::new("div")
            .class("no-results")
            .attr("role", AccessibleRole::Status.as_aria())
            .child(Element::new("div").class("mb-10").text(NO_RESULTS_TEXT))
            .child(
                Element::new("a")
                    .class("reset-link")
                    .attr("href", "#")
                    .target(TARGET)
                    .text("Reset display settings"),
            )
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        (event.activated() == Some(TARGET)).then(|| Box::new(ResetClicked) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Status
    }
}
