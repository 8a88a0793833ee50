//! Core types and utilities for Tabula data tables.
//!
//! This crate provides the foundations the widgets and hosts build on:
//! - Rows and cells: [`TableRow`], [`CellValue`]
//! - Column models: [`TableColumn`], [`TableModel`], [`KeyLabelPair`]
//! - Utilities: [`key_label`], [`column_by_key`], [`to_csv`], [`export_csv`], [`Debouncer`]
//! - Widgets and events: [`Widget`], [`Element`], [`Event`]
//! - State management: [`State`], [`Command`], [`CommandExecutor`]

mod cell;
mod column;
pub mod comparators;
mod csv;
pub mod deals;
mod debounce;
mod element;
mod error;
mod event;
pub mod formatters;
mod lookup;
mod model;
mod row;
mod runtime;
mod state;
pub mod widget;

pub use cell::{format_number, CellValue};
pub use column::{ColumnType, Comparator, Formatter, SortDirection, TableColumn};
pub use csv::{to_csv, LIST_SEPARATOR};
pub use debounce::Debouncer;
pub use element::{escape, Element, TEST_ID_ATTR};
pub use error::{SaveError, TableError};
pub use event::{Event, Key, TARGET_ATTR};
pub use lookup::{column_by_key, key_label};
pub use model::{KeyLabelPair, TableModel};
pub use row::{TableRow, ID_KEY};
pub use runtime::{
    export_csv, memory_executor, CommandExecutor, ExecutionResult, FileSaver, MemoryFileSaver,
    SavedFile, CSV_MIME_TYPE, EXPORT_FILENAME,
};
pub use state::{Command, State};
pub use widget::{AccessibleRole, TypeId, Widget};
