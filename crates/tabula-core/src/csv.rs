//! CSV conversion of row sets.

use crate::cell::{quote, CellValue};
use crate::error::TableError;
use crate::row::TableRow;

/// Separator placed between list items inside a single CSV field.
pub const LIST_SEPARATOR: &str = " | ";

/// Convert rows to CSV text.
///
/// The header is the first row's keys in order, unquoted. Every following
/// line encodes each header key of a row as a JSON literal: text quoted,
/// numbers and booleans bare, missing values `null`. Non-empty lists are
/// joined with `" | "` and quoted as a single field. Lines are separated by
/// `\n` with no trailing newline.
pub fn to_csv(rows: &[TableRow]) -> Result<String, TableError> {
    let first = rows.first().ok_or(TableError::EmptyInput)?;
    let headers: Vec<&str> = first.keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let fields: Vec<String> = headers
            .iter()
            .map(|key| encode_field(row.get(key)))
            .collect();
        lines.push(fields.join(","));
    }
    Ok(lines.join("\n"))
}

fn encode_field(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::List(items)) if !items.is_empty() => quote(&items.join(LIST_SEPARATOR)),
        Some(value) => value.to_json(),
        None => "null".to_string(),
    }
}
