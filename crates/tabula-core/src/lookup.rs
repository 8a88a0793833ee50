//! Key and column lookups.

use crate::column::TableColumn;
use crate::model::KeyLabelPair;
use std::fmt::Display;

/// Resolve the display label for `key`.
///
/// The key is compared by its string form, so numeric keys match labels
/// declared with the same digits. The first matching pair wins; with no
/// match the key itself is returned.
#[must_use]
pub fn key_label(key: impl Display, headers: &[KeyLabelPair]) -> String {
    let key = key.to_string();
    headers
        .iter()
        .find(|pair| pair.key == key)
        .map_or(key, |pair| pair.label.clone())
}

/// Find the first column declared with `key`.
#[must_use]
pub fn column_by_key<'a>(key: &str, columns: &'a [TableColumn]) -> Option<&'a TableColumn> {
    columns.iter().find(|column| column.key == key)
}
