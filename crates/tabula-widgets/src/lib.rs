//! Presentational components for Tabula data tables.
//!
//! Each component renders its props as an element tree and turns clicks
//! and input on that tree into a typed message. Components hold no state
//! beyond their props; the owner reacts to messages and re-renders.

pub mod button;
pub mod button_bar;
pub mod data_table;
pub mod detail_pane;
pub mod filter_input;
pub mod no_results;
pub mod toggle_columns;

pub use button::{Button, ButtonClicked};
pub use button_bar::{ButtonBar, ButtonBarAction};
pub use data_table::{DataTable, HeaderClicked, RowClicked};
pub use detail_pane::DetailPane;
pub use filter_input::{FilterChanged, FilterInput};
pub use no_results::{NoResults, ResetClicked, NO_RESULTS_TEXT};
pub use toggle_columns::{ColumnToggled, ColumnsReset, ToggleColumns};

/// A message a component emits, named the way DOM listeners see it.
pub trait EventName {
    /// Event name for listeners.
    fn event_name(&self) -> &'static str;
}
