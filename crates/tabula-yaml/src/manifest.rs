//! YAML table manifest types.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tabula_core::{
    comparators, formatters, ColumnType, Comparator, Formatter, SortDirection, TableColumn,
    TableModel, TableRow,
};

/// Largest accepted `fixed_decimal` precision.
pub const MAX_DECIMAL_PLACES: usize = 20;

/// Table manifest loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableManifest {
    /// Table name
    pub name: String,
    /// Table description
    #[serde(default)]
    pub description: String,
    /// Sort used when no column sort is active
    #[serde(default)]
    pub default_sort: Option<DefaultSort>,
    /// Keys hidden on first render
    #[serde(default)]
    pub default_hidden: Vec<String>,
    /// Delay before filter input is applied
    #[serde(default = "default_debounce_ms")]
    pub filter_debounce_ms: u64,
    /// Declared columns, in display order
    pub columns: Vec<ColumnSpec>,
}

fn default_debounce_ms() -> u64 {
    300
}

/// Default sort configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort {
    /// Column key
    pub key: String,
    /// Direction
    #[serde(default)]
    pub direction: SortDirection,
}

/// Column configuration from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Field key
    pub key: String,
    /// Value type
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Header label
    pub label: String,
    /// Whether the header sorts
    #[serde(default)]
    pub sortable: bool,
    /// Comparator kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKind>,
    /// Formatter kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatKind>,
}

/// Named comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SortKind {
    /// Numeric comparison
    Numeric,
    /// Case-insensitive text comparison
    Text,
    /// Position in a declared list
    Ranked {
        /// Values from lowest to highest
        ranks: Vec<String>,
    },
}

/// Named display formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatKind {
    /// Keep the first `width` characters and append `suffix`
    Truncate {
        /// Characters kept
        width: usize,
        /// Appended text
        #[serde(default = "default_suffix")]
        suffix: String,
    },
    /// Fixed number of decimal places
    FixedDecimal {
        /// Decimal places
        places: usize,
    },
    /// Join list items
    Join {
        /// Item separator
        #[serde(default = "default_separator")]
        separator: String,
    },
    /// Join list items, then truncate
    JoinTruncate {
        /// Item separator
        #[serde(default = "default_separator")]
        separator: String,
        /// Characters kept
        width: usize,
        /// Appended text
        #[serde(default = "default_suffix")]
        suffix: String,
    },
}

fn default_suffix() -> String {
    "...".to_string()
}

fn default_separator() -> String {
    ", ".to_string()
}

impl SortKind {
    /// Kind used when a sortable column names none.
    #[must_use]
    pub const fn for_type(column_type: ColumnType) -> Self {
        if column_type.is_numeric() {
            Self::Numeric
        } else {
            Self::Text
        }
    }

    /// Build the comparator for `key`.
    #[must_use]
    pub fn comparator(&self, key: &str) -> Comparator {
        match self {
            Self::Numeric => comparators::numeric(key),
            Self::Text => comparators::text(key),
            Self::Ranked { ranks } => comparators::ranked(key, ranks.iter().cloned()),
        }
    }
}

impl FormatKind {
    /// Build the formatter.
    #[must_use]
    pub fn formatter(&self) -> Formatter {
        match self {
            Self::Truncate { width, suffix } => formatters::truncate(*width, suffix.clone()),
            Self::FixedDecimal { places } => formatters::fixed_decimal(*places),
            Self::Join { separator } => formatters::join(separator.clone()),
            Self::JoinTruncate {
                separator,
                width,
                suffix,
            } => formatters::join_truncate(separator.clone(), *width, suffix.clone()),
        }
    }
}

impl ColumnSpec {
    /// Comparator for this column, if it sorts.
    fn comparator(&self) -> Option<Comparator> {
        if !self.sortable {
            return None;
        }
        let kind = self
            .sort
            .clone()
            .unwrap_or_else(|| SortKind::for_type(self.column_type));
        Some(kind.comparator(&self.key))
    }

    fn build(&self) -> TableColumn {
        let mut column = TableColumn::new(self.key.clone(), self.label.clone())
            .column_type(self.column_type);
        if let Some(comparator) = self.comparator() {
            column = column.sortable().comparator(comparator);
        }
        if let Some(format) = &self.format {
            column = column.formatter(format.formatter());
        }
        column
    }
}

impl TableManifest {
    /// Parse a manifest from YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or doesn't match the schema.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }

    /// Parse and validate in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn load(yaml: &str) -> Result<Self, ParseError> {
        let manifest = Self::from_yaml(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check the manifest describes a buildable model.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.name.trim().is_empty() {
            return Err(ParseError::InvalidValue {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.columns.is_empty() {
            return Err(ParseError::Validation(
                "at least one column is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (i, column) in self.columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(ParseError::InvalidValue {
                    field: format!("columns[{i}].key"),
                    message: "must not be empty".to_string(),
                });
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ParseError::Validation(format!(
                    "duplicate column key: {}",
                    column.key
                )));
            }
            validate_column(i, column)?;
        }

        for key in &self.default_hidden {
            if !seen.contains(key.as_str()) {
                return Err(ParseError::UnknownColumn(key.clone()));
            }
        }

        if let Some(sort) = &self.default_sort {
            if !seen.contains(sort.key.as_str()) {
                return Err(ParseError::UnknownColumn(sort.key.clone()));
            }
        }

        Ok(())
    }

    /// Validate and build the table model.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build_model(&self) -> Result<TableModel, ParseError> {
        self.validate()?;

        let columns: Vec<TableColumn> = self.columns.iter().map(ColumnSpec::build).collect();
        let mut model = TableModel::new(columns)
            .and_then(|m| m.default_hidden(self.default_hidden.iter().cloned()))
            .map_err(|e| ParseError::Validation(e.to_string()))?;

        if let Some(sort) = &self.default_sort {
            model = model.default_sort_by(self.default_comparator(sort));
        }

        tracing::debug!(
            name = %self.name,
            columns = model.len(),
            hidden = model.hidden_keys().len(),
            "built table model"
        );
        Ok(model)
    }

    fn default_comparator(&self, sort: &DefaultSort) -> Comparator {
        let base = self
            .columns
            .iter()
            .find(|c| c.key == sort.key)
            .map_or(SortKind::Text, |c| {
                c.sort.clone().unwrap_or_else(|| SortKind::for_type(c.column_type))
            })
            .comparator(&sort.key);
        match sort.direction {
            SortDirection::Asc => base,
            SortDirection::Desc => Arc::new(move |a: &TableRow, b: &TableRow, dir: SortDirection| {
                base(a, b, dir.toggled())
            }),
        }
    }
}

fn validate_column(index: usize, column: &ColumnSpec) -> Result<(), ParseError> {
    if column.sort.is_some() && !column.sortable {
        return Err(ParseError::InvalidValue {
            field: format!("columns[{index}].sort"),
            message: format!("column '{}' declares a sort but is not sortable", column.key),
        });
    }
    if let Some(SortKind::Ranked { ranks }) = &column.sort {
        if ranks.is_empty() {
            return Err(ParseError::InvalidValue {
                field: format!("columns[{index}].sort.ranks"),
                message: "must list at least one value".to_string(),
            });
        }
    }
    if let Some(FormatKind::FixedDecimal { places }) = &column.format {
        if *places > MAX_DECIMAL_PLACES {
            return Err(ParseError::InvalidValue {
                field: format!("columns[{index}].format.places"),
                message: format!("must be at most {MAX_DECIMAL_PLACES}"),
            });
        }
    }
    Ok(())
}
