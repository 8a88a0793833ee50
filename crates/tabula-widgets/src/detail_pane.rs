//! Detail pane listing every field of one row.

use std::any::Any;
use tabula_core::{
    key_label, AccessibleRole, Element, Event, KeyLabelPair, TableRow, TypeId, Widget,
};

/// Label/value list for a single row.
///
/// Labels come from the headers, falling back to the raw field key. List
/// values are joined with `", "`.
#[derive(Debug, Clone)]
pub struct DetailPane {
    row: TableRow,
    headers: Vec<KeyLabelPair>,
}

impl DetailPane {
    /// Create a pane for `row`.
    #[must_use]
    pub fn new(row: TableRow, headers: Vec<KeyLabelPair>) -> Self {
        Self { row, headers }
    }

    /// The row shown.
    #[must_use]
    pub const fn row(&self) -> &TableRow {
        &self.row
    }
}

impl Widget for DetailPane {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self) -> Element {
        Element::new("div")
            .class("detail-pane")
            .with_children(self.row.iter().map(|(key, value)| {
                Element::new("div")
                    .class("detail-row")
                    .child(
                        Element::new("div")
                            .class("label")
                            .text(format!("{}:", key_label(key, &self.headers))),
                    )
                    .child(Element::new("div").class("value").text(value.display()))
            }))
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::List
    }
}
