//! Table models: ordered columns plus default sort and visibility.

use crate::column::{Comparator, SortDirection, TableColumn};
use crate::error::TableError;
use crate::row::TableRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Key and display label for a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyLabelPair {
    /// Field key
    pub key: String,
    /// Display label
    pub label: String,
}

impl KeyLabelPair {
    /// Create a new pair.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

impl From<&TableColumn> for KeyLabelPair {
    fn from(column: &TableColumn) -> Self {
        Self::new(column.key.clone(), column.label.clone())
    }
}

/// Declarative description of a dataset shape.
///
/// Column keys are unique; construction rejects duplicates. A model is built
/// once and shared between renders.
#[derive(Clone)]
pub struct TableModel {
    columns: Vec<TableColumn>,
    default_hidden: Vec<String>,
    default_sort: Option<Comparator>,
}

impl TableModel {
    /// Build a model from columns, rejecting duplicate keys.
    pub fn new(columns: Vec<TableColumn>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(TableError::DuplicateColumn(column.key.clone()));
            }
        }
        Ok(Self {
            columns,
            default_hidden: Vec::new(),
            default_sort: None,
        })
    }

    /// Hide columns by default. Every key must be declared.
    pub fn default_hidden<I, S>(mut self, keys: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            let key = key.into();
            if self.column(&key).is_none() {
                return Err(TableError::UnknownColumn(key));
            }
            if !self.default_hidden.contains(&key) {
                self.default_hidden.push(key);
            }
        }
        Ok(self)
    }

    /// Set the comparator used when no column sort is active.
    #[must_use]
    pub fn default_sort(
        mut self,
        f: impl Fn(&TableRow, &TableRow) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.default_sort = Some(Arc::new(move |a, b, dir: SortDirection| dir.apply(f(a, b))));
        self
    }

    /// Use a column-style comparator, ascending, as the default sort.
    #[must_use]
    pub fn default_sort_by(mut self, comparator: Comparator) -> Self {
        self.default_sort = Some(comparator);
        self
    }

    /// Declared columns in order.
    #[must_use]
    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Look up a column by key.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&TableColumn> {
        crate::lookup::column_by_key(key, &self.columns)
    }

    /// Keys hidden until the user shows them.
    #[must_use]
    pub fn hidden_keys(&self) -> &[String] {
        &self.default_hidden
    }

    /// Whether a column starts hidden.
    #[must_use]
    pub fn is_hidden_by_default(&self, key: &str) -> bool {
        self.default_hidden.iter().any(|k| k == key)
    }

    /// Keys visible on first render, in declared order.
    #[must_use]
    pub fn default_visible_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !self.is_hidden_by_default(&c.key))
            .map(|c| c.key.clone())
            .collect()
    }

    /// Whether a default sort is configured.
    #[must_use]
    pub fn has_default_sort(&self) -> bool {
        self.default_sort.is_some()
    }

    /// Compare two rows with the default sort, ascending.
    #[must_use]
    pub fn compare_default(&self, a: &TableRow, b: &TableRow) -> Option<Ordering> {
        self.default_sort
            .as_ref()
            .map(|f| f(a, b, SortDirection::Asc))
    }

    /// Key/label pairs for every declared column.
    #[must_use]
    pub fn headers(&self) -> Vec<KeyLabelPair> {
        self.columns.iter().map(KeyLabelPair::from).collect()
    }

    /// Number of declared columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the model declares no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Debug for TableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableModel")
            .field("columns", &self.columns)
            .field("default_hidden", &self.default_hidden)
            .field("has_default_sort", &self.default_sort.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableModel {
        TableModel::new(vec![
            TableColumn::new("id", "ID"),
            TableColumn::new("name", "Name"),
            TableColumn::new("secret", "Secret"),
        ])
        .unwrap()
    }

    #[test]
    fn test_model_rejects_duplicate_keys() {
        let result = TableModel::new(vec![
            TableColumn::new("a", "A"),
            TableColumn::new("a", "Again"),
        ]);
        assert_eq!(result.unwrap_err(), TableError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_model_default_hidden() {
        let model = sample().default_hidden(["secret"]).unwrap();
        assert!(model.is_hidden_by_default("secret"));
        assert!(!model.is_hidden_by_default("name"));
        assert_eq!(model.default_visible_columns(), vec!["id", "name"]);
    }

    #[test]
    fn test_model_default_hidden_unknown_key() {
        let result = sample().default_hidden(["nope"]);
        assert_eq!(result.unwrap_err(), TableError::UnknownColumn("nope".into()));
    }

    #[test]
    fn test_model_default_hidden_dedups() {
        let model = sample().default_hidden(["secret", "secret"]).unwrap();
        assert_eq!(model.hidden_keys(), ["secret".to_string()]);
    }

    #[test]
    fn test_model_default_sort() {
        let model = sample().default_sort(|a, b| a.id().cmp(&b.id()));
        let a = TableRow::new(1);
        let b = TableRow::new(2);
        assert!(model.has_default_sort());
        assert_eq!(model.compare_default(&a, &b), Some(Ordering::Less));
        assert_eq!(sample().compare_default(&a, &b), None);
    }

    #[test]
    fn test_model_headers() {
        let headers = sample().headers();
        assert_eq!(headers[1], KeyLabelPair::new("name", "Name"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_model_column_lookup() {
        let model = sample();
        assert_eq!(model.column("name").map(|c| c.label.as_str()), Some("Name"));
        assert!(model.column("missing").is_none());
        assert_eq!(model.len(), 3);
        assert!(!model.is_empty());
    }
}
