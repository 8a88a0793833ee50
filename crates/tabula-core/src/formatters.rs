//! Reusable display formatters.
//!
//! Formatters are pure; the table applies them on every render.

use crate::cell::CellValue;
use crate::column::Formatter;
use std::sync::Arc;

/// Keep the first `width` characters of the display text, then `suffix`.
///
/// The suffix is always appended, matching how long identifiers are shown
/// in the table.
#[must_use]
pub fn truncate(width: usize, suffix: impl Into<String>) -> Formatter {
    let suffix = suffix.into();
    Arc::new(move |value: &CellValue| format!("{}{suffix}", take_chars(&value.display(), width)))
}

/// Render numbers with a fixed number of decimal places.
///
/// Non-numeric values fall back to their display text.
#[must_use]
pub fn fixed_decimal(places: usize) -> Formatter {
    Arc::new(move |value: &CellValue| match value {
        CellValue::Int(_) | CellValue::Decimal(_) => value
            .as_f64()
            .map_or_else(String::new, |n| format!("{n:.places$}")),
        other => other.display(),
    })
}

/// Join list values with `separator`.
#[must_use]
pub fn join(separator: impl Into<String>) -> Formatter {
    let separator = separator.into();
    Arc::new(move |value: &CellValue| join_value(value, &separator))
}

/// Join list values with `separator`, then truncate like [`truncate`].
#[must_use]
pub fn join_truncate(
    separator: impl Into<String>,
    width: usize,
    suffix: impl Into<String>,
) -> Formatter {
    let separator = separator.into();
    let suffix = suffix.into();
    Arc::new(move |value: &CellValue| {
        format!("{}{suffix}", take_chars(&join_value(value, &separator), width))
    })
}

fn join_value(value: &CellValue, separator: &str) -> String {
    match value {
        CellValue::List(items) => items.join(separator),
        other => other.display(),
    }
}

fn take_chars(s: &str, width: usize) -> &str {
    match s.char_indices().nth(width) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
