//! Table state: the owner of every component's props.
//!
//! Components only emit messages. [`TableState`] folds those messages into
//! filter, sort, selection and column visibility, derives the rows to show
//! and builds the component tree for the next render.

use std::any::Any;
use std::cmp::Ordering;
use std::sync::Arc;

use tabula_core::{
    Command, Element, Event, SortDirection, State, TableColumn, TableError, TableModel, TableRow,
    Widget,
};
use tabula_widgets::{
    ButtonBar, ButtonBarAction, ColumnToggled, ColumnsReset, DataTable, DetailPane, FilterChanged,
    FilterInput, HeaderClicked, NoResults, ResetClicked, RowClicked, ToggleColumns,
};

/// Messages understood by [`TableState`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableMessage {
    /// Filter text changed
    FilterChanged(String),
    /// Clear the filter text
    ClearFilter,
    /// Clear the active sort
    ClearSort,
    /// Clear the row selection
    ClearSelectedRows,
    /// Restore every display setting
    Reset,
    /// A sortable header was clicked
    HeaderClicked(String),
    /// A row was clicked
    RowClicked(i64),
    /// A column entry was clicked in the selector
    ColumnToggled(String),
    /// Restore default visible columns
    ResetColumns,
    /// Open or close the column selector
    ToggleColumnEditor,
    /// Show one row in the detail pane
    ShowDetail(i64),
    /// Close the detail pane
    CloseDetail,
    /// Export the displayed rows
    ExportCsv,
    /// An export finished
    ExportFinished(Result<(), TableError>),
    /// Replace the data set
    SetRows(Vec<TableRow>),
}

impl TableMessage {
    /// Convert a message emitted by a component.
    ///
    /// Returns `None` for messages no table component produces.
    #[must_use]
    pub fn from_emitted(message: &(dyn Any + Send)) -> Option<Self> {
        if let Some(action) = message.downcast_ref::<ButtonBarAction>() {
            return Some(match action {
                ButtonBarAction::ClearFilter => Self::ClearFilter,
                ButtonBarAction::ClearSort => Self::ClearSort,
                ButtonBarAction::ClearSelectedRows => Self::ClearSelectedRows,
                ButtonBarAction::Reset => Self::Reset,
                ButtonBarAction::ToggleColumnEditor => Self::ToggleColumnEditor,
                ButtonBarAction::ExportToCsv => Self::ExportCsv,
            });
        }
        if let Some(m) = message.downcast_ref::<HeaderClicked>() {
            return Some(Self::HeaderClicked(m.column.clone()));
        }
        if let Some(m) = message.downcast_ref::<RowClicked>() {
            return Some(Self::RowClicked(m.id));
        }
        if let Some(m) = message.downcast_ref::<ColumnToggled>() {
            return Some(Self::ColumnToggled(m.column.clone()));
        }
        if message.downcast_ref::<ColumnsReset>().is_some() {
            return Some(Self::ResetColumns);
        }
        if let Some(m) = message.downcast_ref::<FilterChanged>() {
            return Some(Self::FilterChanged(m.value.clone()));
        }
        if message.downcast_ref::<ResetClicked>().is_some() {
            return Some(Self::Reset);
        }
        None
    }

    fn name(&self) -> &'static str {
        match self {
            Self::FilterChanged(_) => "filter_changed",
            Self::ClearFilter => "clear_filter",
            Self::ClearSort => "clear_sort",
            Self::ClearSelectedRows => "clear_selected_rows",
            Self::Reset => "reset",
            Self::HeaderClicked(_) => "header_clicked",
            Self::RowClicked(_) => "row_clicked",
            Self::ColumnToggled(_) => "column_toggled",
            Self::ResetColumns => "reset_columns",
            Self::ToggleColumnEditor => "toggle_column_editor",
            Self::ShowDetail(_) => "show_detail",
            Self::CloseDetail => "close_detail",
            Self::ExportCsv => "export_csv",
            Self::ExportFinished(_) => "export_finished",
            Self::SetRows(_) => "set_rows",
        }
    }
}

/// Display state of one table.
#[derive(Debug, Clone)]
pub struct TableState {
    model: Arc<TableModel>,
    rows: Vec<TableRow>,
    filter: String,
    sort: Option<(String, SortDirection)>,
    selected: Vec<i64>,
    visible: Vec<String>,
    column_editor_open: bool,
    detail: Option<i64>,
    last_export_error: Option<TableError>,
}

impl TableState {
    /// Create a state showing `rows` with the model's default columns.
    #[must_use]
    pub fn new(model: Arc<TableModel>, rows: Vec<TableRow>) -> Self {
        let visible = model.default_visible_columns();
        Self {
            model,
            rows,
            filter: String::new(),
            sort: None,
            selected: Vec::new(),
            visible,
            column_editor_open: false,
            detail: None,
            last_export_error: None,
        }
    }

    /// The column model.
    #[must_use]
    pub fn model(&self) -> &TableModel {
        &self.model
    }

    /// Every row, in data order.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Current filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Active sort column and direction.
    #[must_use]
    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(key, dir)| (key.as_str(), *dir))
    }

    /// Selected row ids, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    /// Visible column keys, in declared order.
    #[must_use]
    pub fn visible_keys(&self) -> &[String] {
        &self.visible
    }

    /// Whether the column selector is open.
    #[must_use]
    pub const fn column_editor_open(&self) -> bool {
        self.column_editor_open
    }

    /// Row shown in the detail pane.
    #[must_use]
    pub const fn detail_id(&self) -> Option<i64> {
        self.detail
    }

    /// Error of the most recent export, if it failed.
    #[must_use]
    pub const fn last_export_error(&self) -> Option<&TableError> {
        self.last_export_error.as_ref()
    }

    /// Visible columns, in declared order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<TableColumn> {
        self.model
            .columns()
            .iter()
            .filter(|c| self.is_visible(&c.key))
            .cloned()
            .collect()
    }

    fn is_visible(&self, key: &str) -> bool {
        self.visible.iter().any(|k| k == key)
    }

    /// Rows matching the filter, sorted.
    ///
    /// A row matches when any visible column's formatted value contains the
    /// filter text, ignoring case. The active column sort wins over the
    /// model's default sort; ties keep data order.
    #[must_use]
    pub fn displayed_rows(&self) -> Vec<TableRow> {
        let columns = self.visible_columns();
        let needle = self.filter.trim().to_lowercase();

        let mut rows: Vec<TableRow> = self
            .rows
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || columns
                        .iter()
                        .any(|c| c.format_row(row).to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();

        let active = self
            .sort
            .as_ref()
            .and_then(|(key, dir)| self.model.column(key).map(|c| (c, *dir)))
            .filter(|(c, _)| c.has_comparator());
        match active {
            Some((column, dir)) => {
                rows.sort_by(|a, b| column.compare(a, b, dir).unwrap_or(Ordering::Equal));
            }
            None if self.model.has_default_sort() => {
                rows.sort_by(|a, b| self.model.compare_default(a, b).unwrap_or(Ordering::Equal));
            }
            None => {}
        }
        rows
    }

    /// Rows an export would contain: the selected displayed rows, or every
    /// displayed row when nothing is selected.
    #[must_use]
    pub fn export_rows(&self) -> Vec<TableRow> {
        let displayed = self.displayed_rows();
        if self.selected.is_empty() {
            return displayed;
        }
        displayed
            .into_iter()
            .filter(|r| self.selected.contains(&r.id()))
            .collect()
    }

    fn is_default_display(&self) -> bool {
        self.filter.is_empty()
            && self.sort.is_none()
            && self.selected.is_empty()
            && self.visible == self.model.default_visible_columns()
    }

    // === Component props ===

    /// Button bar props.
    #[must_use]
    pub fn button_bar(&self) -> ButtonBar {
        ButtonBar::new()
            .clear_filter_disabled(self.filter.is_empty())
            .clear_sort_disabled(self.sort.is_none())
            .clear_selected_rows_disabled(self.selected.is_empty())
            .reset_disabled(self.is_default_display())
            .export_csv_disabled(self.displayed_rows().is_empty())
            .column_selector_visible(self.column_editor_open)
    }

    /// Table props.
    #[must_use]
    pub fn data_table(&self) -> DataTable {
        let table = DataTable::new()
            .columns(self.visible_columns())
            .rows(self.displayed_rows())
            .selected(self.selected.iter().copied());
        match &self.sort {
            Some((key, dir)) => table.sort(key.clone(), *dir),
            None => table,
        }
    }

    /// Column selector props.
    #[must_use]
    pub fn toggle_columns(&self) -> ToggleColumns {
        ToggleColumns::new(self.model.headers()).visible(self.visible.iter().cloned())
    }

    /// Filter input props.
    #[must_use]
    pub fn filter_input(&self) -> FilterInput {
        FilterInput::new(self.filter.clone())
    }

    /// Detail pane props, when a row is open.
    #[must_use]
    pub fn detail_pane(&self) -> Option<DetailPane> {
        let id = self.detail?;
        let row = self.rows.iter().find(|r| r.id() == id)?;
        Some(DetailPane::new(row.clone(), self.model.headers()))
    }

    /// Components of the current view, top to bottom.
    #[must_use]
    pub fn widgets(&self) -> Vec<Box<dyn Widget>> {
        let mut widgets: Vec<Box<dyn Widget>> =
            vec![Box::new(self.filter_input()), Box::new(self.button_bar())];
        if self.column_editor_open {
            widgets.push(Box::new(self.toggle_columns()));
        }
        let table = self.data_table();
        if table.is_empty() {
            widgets.push(Box::new(NoResults::new()));
        } else {
            widgets.push(Box::new(table));
        }
        if let Some(pane) = self.detail_pane() {
            widgets.push(Box::new(pane));
        }
        widgets
    }

    /// Render the whole view.
    #[must_use]
    pub fn render(&self) -> Element {
        Element::new("div")
            .class("tabula")
            .with_children(self.widgets().iter().map(|w| w.render()))
    }

    /// Render the whole view as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.render().to_html()
    }

    /// Message the current view produces for `event`.
    #[must_use]
    pub fn message_for(&self, event: &Event) -> Option<TableMessage> {
        self.widgets()
            .iter_mut()
            .find_map(|w| w.event(event))
            .and_then(|m| TableMessage::from_emitted(&*m))
    }

    /// Route `event` through the view and apply the resulting message.
    pub fn handle_event(&mut self, event: &Event) -> Command<TableMessage> {
        match self.message_for(event) {
            Some(msg) => self.update(msg),
            None => Command::None,
        }
    }

    // === Transitions ===

    fn click_header(&mut self, key: String) {
        let sortable = self
            .model
            .column(&key)
            .is_some_and(|c| c.sortable && c.has_comparator());
        if !sortable {
            tracing::debug!(column = %key, "ignoring click on unsortable header");
            return;
        }
        self.sort = match self.sort.take() {
            Some((current, SortDirection::Asc)) if current == key => {
                Some((current, SortDirection::Desc))
            }
            Some((current, SortDirection::Desc)) if current == key => None,
            _ => Some((key, SortDirection::Asc)),
        };
    }

    fn click_row(&mut self, id: i64) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
            if self.detail == Some(id) {
                self.detail = None;
            }
        } else if self.rows.iter().any(|r| r.id() == id) {
            self.selected.push(id);
            self.detail = Some(id);
        }
    }

    fn toggle_column(&mut self, key: &str) {
        if self.model.column(key).is_none() {
            return;
        }
        let show = !self.is_visible(key);
        self.visible = self
            .model
            .columns()
            .iter()
            .filter(|c| if c.key == key { show } else { self.is_visible(&c.key) })
            .map(|c| c.key.clone())
            .collect();
    }

    fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
        let rows = &self.rows;
        self.selected.retain(|id| rows.iter().any(|r| r.id() == *id));
        if let Some(id) = self.detail {
            if !rows.iter().any(|r| r.id() == id) {
                self.detail = None;
            }
        }
    }
}

impl State for TableState {
    type Message = TableMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        tracing::debug!(message = msg.name(), "table update");
        match msg {
            TableMessage::FilterChanged(text) => self.filter = text,
            TableMessage::ClearFilter => self.filter.clear(),
            TableMessage::ClearSort => self.sort = None,
            TableMessage::ClearSelectedRows => {
                self.selected.clear();
                self.detail = None;
            }
            TableMessage::Reset => {
                self.filter.clear();
                self.sort = None;
                self.selected.clear();
                self.visible = self.model.default_visible_columns();
                self.column_editor_open = false;
                self.detail = None;
            }
            TableMessage::HeaderClicked(key) => self.click_header(key),
            TableMessage::RowClicked(id) => self.click_row(id),
            TableMessage::ColumnToggled(key) => self.toggle_column(&key),
            TableMessage::ResetColumns => self.visible = self.model.default_visible_columns(),
            TableMessage::ToggleColumnEditor => self.column_editor_open = !self.column_editor_open,
            TableMessage::ShowDetail(id) => {
                if self.rows.iter().any(|r| r.id() == id) {
                    self.detail = Some(id);
                }
            }
            TableMessage::CloseDetail => self.detail = None,
            TableMessage::ExportCsv => {
                return Command::ExportCsv {
                    rows: self.export_rows(),
                    on_complete: TableMessage::ExportFinished,
                };
            }
            TableMessage::ExportFinished(result) => self.last_export_error = result.err(),
            TableMessage::SetRows(rows) => self.set_rows(rows),
        }
        Command::None
    }
}
