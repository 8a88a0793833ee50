//! Filter text input widget.

use crate::EventName;
use serde::{Deserialize, Serialize};
use std::any::Any;
use tabula_core::{AccessibleRole, Element, Event, TypeId, Widget};

const TARGET: &str = "filter";

/// Message emitted when the filter text changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChanged {
    /// New filter text
    pub value: String,
}

impl EventName for FilterChanged {
    fn event_name(&self) -> &'static str {
        "update:modelValue"
    }
}

/// Single-line text field bound to the filter text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterInput {
    value: String,
    placeholder: String,
}

impl FilterInput {
    /// Create a field showing `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            placeholder: "Filter".to_string(),
        }
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Widget for FilterInput {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self) -> Element {
        Element::new("input")
            .class("filter-text-input")
            .attr("type", "text")
            .attr("placeholder", self.placeholder.clone())
            .attr("value", self.value.clone())
            .target(TARGET)
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::Input { target, value } if target == TARGET => {
                self.value.clone_from(value);
                Some(Box::new(FilterChanged {
                    value: value.clone(),
                }))
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.placeholder)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TextInput
    }
}
