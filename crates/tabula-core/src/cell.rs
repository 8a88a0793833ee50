//! Cell values held by table rows.

use serde::{Deserialize, Serialize};

/// A cell value in the table.
///
/// Serialized untagged, so a row reads and writes as a plain JSON object of
/// scalars and string arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Decimal value
    Decimal(f64),
    /// Text value
    Text(String),
    /// List of strings
    List(Vec<String>),
    /// Absent or null
    #[default]
    Empty,
}

impl CellValue {
    /// Get display text for the cell.
    ///
    /// Lists are joined with `", "`, numbers follow JavaScript formatting.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Decimal(n) => format_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(", "),
            Self::Empty => String::new(),
        }
    }

    /// Numeric view of the cell, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Decimal(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::List(_) | Self::Empty => None,
        }
    }

    /// Text view of the cell, if it is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List view of the cell, if it is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if the cell is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Encode the cell as a JSON literal.
    ///
    /// Non-finite decimals encode as `null`, matching `JSON.stringify`.
    #[must_use]
    pub fn to_json(&self) -> String {
        match self {
            Self::Decimal(n) if !n.is_finite() => "null".to_string(),
            Self::Decimal(n) => format_number(*n),
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Empty => "null".to_string(),
            Self::Text(s) => quote(s),
            Self::List(items) => serde_json::to_string(items).unwrap_or_else(|_| "[]".into()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Decimal(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for CellValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// JSON-quote a string.
pub(crate) fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Format a number the way JavaScript's `Number.prototype.toString` does.
///
/// Integral values drop the fractional part, very large and very small
/// magnitudes switch to exponent notation with an explicit sign.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }

    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Text("Hello".into()).display(), "Hello");
        assert_eq!(CellValue::Int(42).display(), "42");
        assert_eq!(CellValue::Decimal(42.5).display(), "42.5");
        assert_eq!(CellValue::Bool(true).display(), "true");
        assert_eq!(CellValue::Empty.display(), "");
        assert_eq!(CellValue::from(vec!["a", "b", "c"]).display(), "a, b, c");
    }

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from("test"), CellValue::Text("test".into()));
        assert_eq!(CellValue::from(1.5f64), CellValue::Decimal(1.5));
        assert_eq!(CellValue::from(42i32), CellValue::Int(42));
        assert_eq!(CellValue::from(true), CellValue::Bool(true));
        assert_eq!(CellValue::from(None::<i64>), CellValue::Empty);
    }

    #[test]
    fn test_cell_value_as_f64() {
        assert_eq!(CellValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Text(" 2.5 ".into()).as_f64(), Some(2.5));
        assert_eq!(CellValue::Text("abc".into()).as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
    }

    #[test]
    fn test_cell_value_deserialize_untagged() {
        let cells: Vec<CellValue> =
            serde_json::from_str(r#"[1, 1.5, "x", true, null, ["a", "b"]]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                CellValue::Int(1),
                CellValue::Decimal(1.5),
                CellValue::Text("x".into()),
                CellValue::Bool(true),
                CellValue::Empty,
                CellValue::List(vec!["a".into(), "b".into()]),
            ]
        );
    }

    #[test]
    fn test_cell_value_to_json() {
        assert_eq!(CellValue::Text("a \"b\"".into()).to_json(), r#""a \"b\"""#);
        assert_eq!(CellValue::Int(-7).to_json(), "-7");
        assert_eq!(CellValue::Decimal(100.0).to_json(), "100");
        assert_eq!(CellValue::Decimal(f64::NAN).to_json(), "null");
        assert_eq!(CellValue::Bool(false).to_json(), "false");
        assert_eq!(CellValue::Empty.to_json(), "null");
        assert_eq!(CellValue::List(vec![]).to_json(), "[]");
    }

    #[test]
    fn test_format_number_js_style() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(1234.5678), "1234.5678");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }
}
