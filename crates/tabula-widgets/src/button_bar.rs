//! Toolbar of table actions.

use crate::EventName;
use serde::{Deserialize, Serialize};
use std::any::Any;
use tabula_core::{AccessibleRole, Element, Event, TypeId, Widget};

/// Action requested from the button bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonBarAction {
    /// Clear the filter text
    ClearFilter,
    /// Clear the active sort
    ClearSort,
    /// Clear the row selection
    ClearSelectedRows,
    /// Reset every display setting
    Reset,
    /// Open or close the column selector
    ToggleColumnEditor,
    /// Export rows to CSV
    ExportToCsv,
}

impl ButtonBarAction {
    /// All actions in toolbar order.
    pub const ALL: [Self; 6] = [
        Self::ClearFilter,
        Self::ClearSort,
        Self::ClearSelectedRows,
        Self::Reset,
        Self::ToggleColumnEditor,
        Self::ExportToCsv,
    ];

    /// Test ID of the action's button; also its event target.
    #[must_use]
    pub const fn test_id(self) -> &'static str {
        match self {
            Self::ClearFilter => "clear-filter-button",
            Self::ClearSort => "clear-sort-button",
            Self::ClearSelectedRows => "clear-selected-rows-button",
            Self::Reset => "reset-button",
            Self::ToggleColumnEditor => "column-list-toggle-button",
            Self::ExportToCsv => "export-to-csv-button",
        }
    }

    fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.test_id() == target)
    }
}

impl EventName for ButtonBarAction {
    fn event_name(&self) -> &'static str {
        match self {
            Self::ClearFilter => "clickClearFilter",
            Self::ClearSort => "clickClearSort",
            Self::ClearSelectedRows => "clickClearSelectedRows",
            Self::Reset => "clickReset",
            Self::ToggleColumnEditor => "toggleColumnEditVisibility",
            Self::ExportToCsv => "clickExportToCSV",
        }
    }
}

/// Row of table action buttons.
///
/// Every button but the column selector toggle can be disabled; a disabled
/// button emits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBar {
    clear_filter_disabled: bool,
    clear_sort_disabled: bool,
    clear_selected_rows_disabled: bool,
    reset_disabled: bool,
    export_csv_disabled: bool,
    column_selector_visible: bool,
}

impl ButtonBar {
    /// Create a bar with every button enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable the clear filter button.
    #[must_use]
    pub const fn clear_filter_disabled(mut self, disabled: bool) -> Self {
        self.clear_filter_disabled = disabled;
        self
    }

    /// Disable the clear sort button.
    #[must_use]
    pub const fn clear_sort_disabled(mut self, disabled: bool) -> Self {
        self.clear_sort_disabled = disabled;
        self
    }

    /// Disable the clear selected rows button.
    #[must_use]
    pub const fn clear_selected_rows_disabled(mut self, disabled: bool) -> Self {
        self.clear_selected_rows_disabled = disabled;
        self
    }

    /// Disable the reset button.
    #[must_use]
    pub const fn reset_disabled(mut self, disabled: bool) -> Self {
        self.reset_disabled = disabled;
        self
    }

    /// Disable the export button.
    #[must_use]
    pub const fn export_csv_disabled(mut self, disabled: bool) -> Self {
        self.export_csv_disabled = disabled;
        self
    }

    /// Whether the column selector is open.
    #[must_use]
    pub const fn column_selector_visible(mut self, visible: bool) -> Self {
        self.column_selector_visible = visible;
        self
    }

    /// Whether the button for `action` is disabled.
    #[must_use]
    pub const fn is_disabled(&self, action: ButtonBarAction) -> bool {
        match action {
            ButtonBarAction::ClearFilter => self.clear_filter_disabled,
            ButtonBarAction::ClearSort => self.clear_sort_disabled,
            ButtonBarAction::ClearSelectedRows => self.clear_selected_rows_disabled,
            ButtonBarAction::Reset => self.reset_disabled,
            ButtonBarAction::ToggleColumnEditor => false,
            ButtonBarAction::ExportToCsv => self.export_csv_disabled,
        }
    }

    /// Label shown on the button for `action`.
    #[must_use]
    pub const fn label(&self, action: ButtonBarAction) -> &'static str {
        match action {
            ButtonBarAction::ClearFilter => "Clear filter",
            ButtonBarAction::ClearSort => "Clear sort",
            ButtonBarAction::ClearSelectedRows => "Clear selected rows",
            ButtonBarAction::Reset => "Reset",
            ButtonBarAction::ToggleColumnEditor if self.column_selector_visible => {
                "Close column selector"
            }
            ButtonBarAction::ToggleColumnEditor => "Show/hide columns",
            ButtonBarAction::ExportToCsv => "Export to CSV",
        }
    }
}

impl Widget for ButtonBar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn render(&self) -> Element {
        Element::new("div")
            .class("button-bar")
            .attr("role", AccessibleRole::Toolbar.as_aria())
            .with_children(ButtonBarAction::ALL.into_iter().map(|action| {
                Element::new("button")
                    .attr("type", "button")
                    .test_id(action.test_id())
                    .target(action.test_id())
                    .flag(self.is_disabled(action), "disabled")
                    .text(self.label(action))
            }))
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let action = ButtonBarAction::from_target(event.activated()?)?;
        if self.is_disabled(action) {
            return None;
        }
        Some(Box::new(action))
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Toolbar
    }
}
