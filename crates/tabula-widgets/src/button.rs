//! Simple button widget.

use crate::EventName;
use serde::{Deserialize, Serialize};
use std::any::Any;
use tabula_core::{AccessibleRole, Element, Event, TypeId, Widget};

const TARGET: &str = "simple-button";

/// Button showing its slot text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Button {
    /// Button label
    label: String,
    /// Whether button is disabled
    disabled: bool,
    /// Test ID
    test_id_value: Option<String>,
}

/// Message emitted when button is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonClicked;

impl EventName for ButtonClicked {
    fn event_name(&self) -> &'static str {
        "simpleButtonClick"
    }
}

impl Button {
    /// Create a new button with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            test_id_value: None,
        }
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check if disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Widget for Button {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self) -> Element {
        let mut button = Element::new("button")
            .class("simple-button")
            .attr("type", "button")
            .target(TARGET)
            .flag(self.disabled, "disabled")
            .text(self.label.clone());
        if let Some(id) = &self.test_id_value {
            button = button.test_id(id.clone());
        }
        button
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled || event.activated() != Some(TARGET) {
            return None;
        }
        Some(Box::new(ButtonClicked))
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
