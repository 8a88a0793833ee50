//! Tabula: a data table with sorting, filtering, row selection, column
//! toggling, a detail pane and CSV export.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { TableApp } from './tabula.js';
//!
//! async function main() {
//!     await init();
//!     const rows = await (await fetch('deals.json')).text();
//!     const app = new TableApp('table', rows);
//! }
//! ```
//!
//! # Native Usage
//!
//! ```
//! use std::sync::Arc;
//! use tabula::{deals, State, TableMessage, TableRow, TableState};
//!
//! let model = Arc::new(deals::deal_model().unwrap());
//! let rows = vec![TableRow::new(1).cell("issuer_name", "Acme")];
//! let mut state = TableState::new(model, rows);
//!
//! let command = state.update(TableMessage::ExportCsv);
//! assert_eq!(command.export_rows().map(<[TableRow]>::len), Some(1));
//! ```

pub use tabula_core::*;
pub use tabula_widgets as widgets;
pub use tabula_yaml as yaml;

pub mod app;
mod error;
#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod host;

pub use app::{TableMessage, TableState};
pub use error::LoadError;
#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserFileSaver, TableApp, TimeoutDebouncer};
#[cfg(not(target_arch = "wasm32"))]
pub use host::FsFileSaver;

/// Parse a JSON array of row objects.
///
/// Every object needs a numeric `id`.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a row lacks an id.
pub fn rows_from_json(json: &str) -> Result<Vec<TableRow>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Build a table state from a YAML manifest and JSON rows.
///
/// # Errors
///
/// Returns [`LoadError::Manifest`] for the first manifest problem and
/// [`LoadError::Rows`] for malformed rows.
pub fn load_table(manifest_yaml: &str, rows_json: &str) -> Result<TableState, LoadError> {
    let model = yaml::TableManifest::load(manifest_yaml)?.build_model()?;
    let rows = rows_from_json(rows_json)?;
    tracing::debug!(rows = rows.len(), columns = model.len(), "loaded table");
    Ok(TableState::new(std::sync::Arc::new(model), rows))
}
