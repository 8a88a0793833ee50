//! Column visibility selector.

use crate::EventName;
use std::any::Any;
use tabula_core::{AccessibleRole, Element, Event, KeyLabelPair, TypeId, Widget};

const COLUMN_PREFIX: &str = "column:";
const RESET_TARGET: &str = "columns-reset";

/// Message emitted when a column entry is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnToggled {
    /// Column key
    pub column: String,
}

impl EventName for ColumnToggled {
    fn event_name(&self) -> &'static str {
        "columnToggle"
    }
}

/// Message emitted when the reset entry is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnsReset;

impl EventName for ColumnsReset {
    fn event_name(&self) -> &'static str {
        "resetColumns"
    }
}

/// One entry per declared column, marked visible or hidden, followed by a
/// reset entry.
#[derive(Debug, Clone, Default)]
pub struct ToggleColumns {
    columns: Vec<KeyLabelPair>,
    visible: Vec<String>,
}

impl ToggleColumns {
    /// Create a selector over the declared columns.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = KeyLabelPair>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            visible: Vec::new(),
        }
    }

    /// Set the visible column keys.
    #[must_use]
    pub fn visible<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the column is currently visible.
    #[must_use]
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.iter().any(|k| k == key)
    }
}

impl Widget for ToggleColumns {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self) -> Element {
        let entries = self.columns.iter().map(|column| {
            let visible = self.is_visible(&column.key);
            Element::new("div")
                .class("column")
                .class(if visible { "visible" } else { "hidden" })
                .attr("aria-pressed", visible.to_string())
                .target(format!("{COLUMN_PREFIX}{}", column.key))
                .text(column.label.clone())
        });
        let reset = Element::new("div")
            .class("column")
            .class("hidden")
            .class("reset")
            .target(RESET_TARGET)
            .text("Reset columns");

        Element::new("div")
            .class("toggle-columns")
            .with_children(entries)
            .child(reset)
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let target = event.activated()?;
        if target == RESET_TARGET {
            return Some(Box::new(ColumnsReset));
        }
        let key = target.strip_prefix(COLUMN_PREFIX)?;
        let column = self.columns.iter().find(|c| c.key == key)?;
        Some(Box::new(ColumnToggled {
            column: column.key.clone(),
        }))
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::List
    }
}
