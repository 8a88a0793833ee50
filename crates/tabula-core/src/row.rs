//! Table rows: an identifier plus ordered cells.

use crate::cell::CellValue;
use crate::error::TableError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field key reserved for the row identifier.
pub const ID_KEY: &str = "id";

/// A row of data in the table.
///
/// Cells keep insertion order and the identifier is always the first cell,
/// so the row serializes as `{"id": .., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, CellValue>",
    into = "IndexMap<String, CellValue>"
)]
pub struct TableRow {
    id: i64,
    cells: IndexMap<String, CellValue>,
}

impl TableRow {
    /// Create a new row holding only its identifier.
    #[must_use]
    pub fn new(id: i64) -> Self {
        let mut cells = IndexMap::new();
        cells.insert(ID_KEY.to_string(), CellValue::Int(id));
        Self { id, cells }
    }

    /// Add a cell value.
    ///
    /// The `id` key is reserved; use [`TableRow::new`] to set it.
    #[must_use]
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a cell value in place, keeping the key's position if it exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        if key == ID_KEY {
            tracing::warn!(row = self.id, "ignoring write to reserved id cell");
            return;
        }
        self.cells.insert(key, value.into());
    }

    /// Row identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Get a cell value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    /// Field keys in insertion order, `id` first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields, including `id`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Rows always carry an identifier, so they are never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<IndexMap<String, CellValue>> for TableRow {
    type Error = TableError;

    fn try_from(mut cells: IndexMap<String, CellValue>) -> Result<Self, Self::Error> {
        let id = match cells.get(ID_KEY) {
            Some(CellValue::Int(id)) => *id,
            Some(CellValue::Decimal(n)) if integral_i64(*n) => *n as i64,
            Some(other) => {
                return Err(TableError::InvalidRow(format!(
                    "id must be an integer, got {}",
                    other.to_json()
                )))
            }
            None => return Err(TableError::InvalidRow("missing id field".into())),
        };

        // Normalize so `id` is an integer cell in first position.
        cells.shift_remove(ID_KEY);
        cells.shift_insert(0, ID_KEY.to_string(), CellValue::Int(id));
        Ok(Self { id, cells })
    }
}

/// Whether `n` is a whole number that `as i64` converts exactly.
fn integral_i64(n: f64) -> bool {
    // -2^63 is representable; 2^63 is the first value past i64::MAX.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    n.is_finite() && n.fract() == 0.0 && (-BOUND..BOUND).contains(&n)
}

impl From<TableRow> for IndexMap<String, CellValue> {
    fn from(row: TableRow) -> Self {
        row.cells
    }
}
