//! YAML table manifests for Tabula.
//!
//! A manifest declares a table's columns by name: each column picks a
//! comparator kind (`numeric`, `text`, `ranked`) and a formatter kind
//! (`truncate`, `fixed_decimal`, `join`, `join_truncate`), and
//! [`TableManifest::build_model`] turns it into a [`tabula_core::TableModel`].

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{
    ColumnSpec, DefaultSort, FormatKind, SortKind, TableManifest, MAX_DECIMAL_PLACES,
};

/// Manifest for the example deals table.
pub const DEALS_MANIFEST: &str = include_str!("../models/deals.yaml");
