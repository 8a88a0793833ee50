//! Dynamic table widget.

use crate::EventName;
use std::any::Any;
use tabula_core::{
    AccessibleRole, Element, Event, SortDirection, TableColumn, TableRow, TypeId, Widget,
};

const HEADER_PREFIX: &str = "header:";
const ROW_PREFIX: &str = "row:";

/// Message emitted when a sortable column header is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderClicked {
    /// Column key
    pub column: String,
}

impl EventName for HeaderClicked {
    fn event_name(&self) -> &'static str {
        "handleColumnHeaderClick"
    }
}

/// Message emitted when a body row is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClicked {
    /// Row identifier
    pub id: i64,
}

impl EventName for RowClicked {
    fn event_name(&self) -> &'static str {
        "handleRowClick"
    }
}

/// Table of rows over the visible columns.
///
/// Cells show each column's formatted value. Sortable headers carry an
/// arrow for the active sort; selected rows are marked `active`.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<TableColumn>,
    rows: Vec<TableRow>,
    selected: Vec<i64>,
    sort: Option<(String, SortDirection)>,
    test_id_value: Option<String>,
}

impl DataTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visible columns, in display order.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = TableColumn>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Set the rows, in display order.
    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }

    /// Set the selected row ids.
    #[must_use]
    pub fn selected(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.selected = ids.into_iter().collect();
        self
    }

    /// Set the active sort.
    #[must_use]
    pub fn sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((column.into(), direction));
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get column count.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get row count.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the row is selected.
    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    fn header_cell(&self, column: &TableColumn) -> Element {
        let arrow = match &self.sort {
            Some((key, direction)) if *key == column.key => direction.arrow(),
            _ => "",
        };
        let mut cell = Element::new("th")
            .class("table-header-cell")
            .class(if column.sortable { "sortable" } else { "unsortable" })
            .attr("scope", "col");
        if column.sortable {
            cell = cell.target(format!("{HEADER_PREFIX}{}", column.key));
        }
        cell.child(
            Element::new("div")
                .class("flex-contents")
                .child(Element::new("span").class("column-label").text(column.label.clone()))
                .child(
                    Element::new("span")
                        .class("sort-icon")
                        .test_id("sort-icon-container")
                        .text(arrow),
                ),
        )
    }

    fn body_row(&self, row: &TableRow) -> Element {
        Element::new("tr")
            .class("table-row")
            .class_if(self.is_selected(row.id()), "active")
            .target(format!("{ROW_PREFIX}{}", row.id()))
            .with_children(
                self.columns
                    .iter()
                    .map(|column| Element::new("td").text(column.format_row(row))),
            )
    }
}

impl Widget for DataTable {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self) -> Element {
        let header =
            Element::new("tr").with_children(self.columns.iter().map(|c| self.header_cell(c)));
        let body = self.rows.iter().map(|r| self.body_row(r));

        Element::new("table")
            .class("dynamic-table")
            .test_id(self.test_id_value.as_deref().unwrap_or("dynamic-table"))
            .child(Element::new("thead").child(header))
            .child(Element::new("tbody").with_children(body))
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let target = event.activated()?;

        if let Some(key) = target.strip_prefix(HEADER_PREFIX) {
            let column = self.columns.iter().find(|c| c.key == key)?;
            if !column.sortable {
                return None;
            }
            return Some(Box::new(HeaderClicked {
                column: column.key.clone(),
            }));
        }

        let id: i64 = target.strip_prefix(ROW_PREFIX)?.parse().ok()?;
        self.rows
            .iter()
            .any(|r| r.id() == id)
            .then(|| Box::new(RowClicked { id }) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Table
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
