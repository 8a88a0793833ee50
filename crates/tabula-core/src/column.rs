//! Column definitions: key, type, label, sort and display behavior.

use crate::cell::CellValue;
use crate::row::TableRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Natural order
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Reversed order
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// Orient a natural-order comparison to this direction.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to a sorted header.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    /// Wire name (`ASC` / `DESC`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Declared value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnType {
    #[default]
    #[serde(rename = "string")]
    String,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "string[]")]
    StringArray,
}

impl ColumnType {
    /// Wire tag for the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Decimal => "decimal",
            Self::StringArray => "string[]",
        }
    }

    /// Whether values of this type compare numerically.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Decimal)
    }
}

/// Row comparator: negative (`Less`) sorts `a` before `b`.
pub type Comparator = Arc<dyn Fn(&TableRow, &TableRow, SortDirection) -> Ordering + Send + Sync>;

/// Display formatter applied to a raw cell value.
pub type Formatter = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;

/// Column definition for a data table.
#[derive(Clone)]
pub struct TableColumn {
    /// Column key (field name in data)
    pub key: String,
    /// Declared value type
    pub column_type: ColumnType,
    /// Display label
    pub label: String,
    /// Whether the header can be clicked to sort
    pub sortable: bool,
    sort_fn: Option<Comparator>,
    format_fn: Option<Formatter>,
}

impl TableColumn {
    /// Create a new string column.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            column_type: ColumnType::String,
            label: label.into(),
            sortable: false,
            sort_fn: None,
            format_fn: None,
        }
    }

    /// Set the column type.
    #[must_use]
    pub const fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Make column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Attach a comparator.
    #[must_use]
    pub fn sort_with(
        mut self,
        f: impl Fn(&TableRow, &TableRow, SortDirection) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_fn = Some(Arc::new(f));
        self
    }

    /// Attach a shared comparator.
    #[must_use]
    pub fn comparator(mut self, comparator: Comparator) -> Self {
        self.sort_fn = Some(comparator);
        self
    }

    /// Attach a display formatter.
    #[must_use]
    pub fn format_with(mut self, f: impl Fn(&CellValue) -> String + Send + Sync + 'static) -> Self {
        self.format_fn = Some(Arc::new(f));
        self
    }

    /// Attach a shared display formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.format_fn = Some(formatter);
        self
    }

    /// Whether a comparator is attached.
    #[must_use]
    pub fn has_comparator(&self) -> bool {
        self.sort_fn.is_some()
    }

    /// Whether a formatter is attached.
    #[must_use]
    pub fn has_formatter(&self) -> bool {
        self.format_fn.is_some()
    }

    /// Compare two rows with this column's comparator.
    #[must_use]
    pub fn compare(
        &self,
        a: &TableRow,
        b: &TableRow,
        direction: SortDirection,
    ) -> Option<Ordering> {
        self.sort_fn.as_ref().map(|f| f(a, b, direction))
    }

    /// Format a raw value for display.
    #[must_use]
    pub fn format(&self, value: &CellValue) -> String {
        match &self.format_fn {
            Some(f) => f(value),
            None => value.display(),
        }
    }

    /// Format this column's cell of `row`.
    ///
    /// Missing and empty cells render as an empty string without invoking the
    /// formatter.
    #[must_use]
    pub fn format_row(&self, row: &TableRow) -> String {
        match row.get(&self.key) {
            None | Some(CellValue::Empty) => String::new(),
            Some(value) => self.format(value),
        }
    }
}

impl fmt::Debug for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("key", &self.key)
            .field("column_type", &self.column_type)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("has_comparator", &self.sort_fn.is_some())
            .field("has_formatter", &self.format_fn.is_some())
            .finish()
    }
}
