//! End-to-end flows: manifest and JSON rows in, rendered view and CSV out.

#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use std::sync::Arc;
use tabula::widgets::ButtonBarAction;
use tabula::yaml::DEALS_MANIFEST;
use tabula::{
    load_table, memory_executor, rows_from_json, Command, CommandExecutor, Event, FsFileSaver,
    LoadError, SortDirection, State, TableMessage, TableState, CSV_MIME_TYPE, EXPORT_FILENAME,
};
use tabula_test::Selector;

const ROWS: &str = r#"[
  {"id": 1, "issuer_name": "Acme", "deal_name": "Series A", "bloomberg_id": "BBG000BLNNH6",
   "total": 1500, "industry": "Tech", "status": "Good", "analysts": ["Ann", "Bo"],
   "doc_count": 4, "custom_deal_identifiers": ["X-1"]},
  {"id": 2, "issuer_name": "bravo", "deal_name": "Bridge", "bloomberg_id": "BBG000XYZ",
   "total": 12.5, "industry": "Energy", "status": "Excellent", "analysts": [],
   "doc_count": 1, "custom_deal_identifiers": []},
  {"id": 3, "issuer_name": "Cobalt", "deal_name": "Seed", "bloomberg_id": null,
   "total": 99.5, "industry": "tech", "status": "Bad", "analysts": ["Cy"],
   "doc_count": 7, "custom_deal_identifiers": ["Z-9", "Z-10"]}
]"#;

fn deals() -> TableState {
    load_table(DEALS_MANIFEST, ROWS).unwrap()
}

fn ids(state: &TableState) -> Vec<i64> {
    state.displayed_rows().iter().map(|r| r.id()).collect()
}

fn run(
    state: &mut TableState,
    executor: &CommandExecutor<tabula::MemoryFileSaver>,
    msg: TableMessage,
) {
    let mut pending = vec![msg];
    while let Some(msg) = pending.pop() {
        let command = state.update(msg);
        pending.extend(executor.execute(command).into_messages());
    }
}

#[test]
fn test_initial_view() {
    let state = deals();
    assert_eq!(ids(&state), [1, 2, 3]);
    let el = state.render();

    let headers = Selector::parse(".table-header-cell").unwrap().query_all(&el).len();
    assert_eq!(headers, 6);
    let rows = Selector::parse("tbody tr.table-row").unwrap().query_all(&el).len();
    assert_eq!(rows, 3);
    assert!(Selector::parse(".toggle-columns").unwrap().query(&el).is_none());

    let first_total = state.model().column("total").unwrap().format_row(&state.rows()[1]);
    assert_eq!(first_total, "12.50");
}

#[test]
fn test_status_sort_uses_ranks() {
    let mut state = deals();
    state.handle_event(&Event::click("header:status"));
    assert_eq!(state.sort(), Some(("status", SortDirection::Asc)));
    assert_eq!(ids(&state), [3, 1, 2]);
    state.handle_event(&Event::click("header:status"));
    assert_eq!(ids(&state), [2, 1, 3]);
}

#[test]
fn test_text_sort_ignores_case() {
    let mut state = deals();
    state.update(TableMessage::HeaderClicked("issuer_name".into()));
    assert_eq!(ids(&state), [1, 2, 3]);
    state.update(TableMessage::HeaderClicked("industry".into()));
    assert_eq!(ids(&state), [2, 1, 3]);
}

#[test]
fn test_filter_matches_formatted_visible_values() {
    let mut state = deals();
    state.update(TableMessage::FilterChanged("TECH".into()));
    assert_eq!(ids(&state), [1, 3]);

    state.update(TableMessage::FilterChanged("12.50".into()));
    assert_eq!(ids(&state), [2]);

    // bloomberg_id is hidden by default
    state.update(TableMessage::FilterChanged("BBG".into()));
    assert!(state.displayed_rows().is_empty());
    assert!(state
        .button_bar()
        .is_disabled(ButtonBarAction::ExportToCsv));
}

#[test]
fn test_column_editor_flow() {
    let mut state = deals();
    state.handle_event(&Event::click("column-list-toggle-button"));
    assert!(state.column_editor_open());
    let el = state.render();
    let entries = Selector::parse("div.column").unwrap().query_all(&el).len();
    assert_eq!(entries, 11);

    state.handle_event(&Event::click("column:doc_count"));
    assert!(state.visible_keys().iter().any(|k| k == "doc_count"));
    state.handle_event(&Event::click("columns-reset"));
    assert!(!state.visible_keys().iter().any(|k| k == "doc_count"));
}

#[test]
fn test_export_displayed_rows() {
    let mut state = deals();
    let executor = memory_executor();
    state.update(TableMessage::FilterChanged("seed".into()));
    run(&mut state, &executor, TableMessage::ExportCsv);

    let saved = executor.saver().last().unwrap();
    assert_eq!(saved.filename, EXPORT_FILENAME);
    assert_eq!(saved.mime_type, CSV_MIME_TYPE);
    assert_eq!(
        saved.text(),
        "id,issuer_name,deal_name,bloomberg_id,total,industry,status,analysts,doc_count,custom_deal_identifiers\n\
         3,\"Cobalt\",\"Seed\",null,99.5,\"tech\",\"Bad\",\"Cy\",7,\"Z-9 | Z-10\""
    );
    assert_eq!(state.last_export_error(), None);
}

#[test]
fn test_export_failure_becomes_message() {
    let mut state = deals();
    let executor = CommandExecutor::new(tabula::MemoryFileSaver::rejecting("blocked"));
    run(&mut state, &executor, TableMessage::ExportCsv);
    assert!(state
        .last_export_error()
        .is_some_and(|e| e.to_string().contains("blocked")));
    assert!(executor.saver().is_empty());
}

#[test]
fn test_export_selected_rows_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::new(FsFileSaver::new(dir.path()));
    let mut state = deals();
    state.handle_event(&Event::click("row:2"));

    let command = state.update(TableMessage::ExportCsv);
    assert!(matches!(&command, Command::ExportCsv { rows, .. } if rows.len() == 1));
    for msg in executor.execute(command).into_messages() {
        state.update(msg);
    }

    let csv = std::fs::read_to_string(dir.path().join(EXPORT_FILENAME)).unwrap();
    assert!(csv.lines().nth(1).unwrap().starts_with("2,\"bravo\""));
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn test_detail_pane_shows_all_fields() {
    let mut state = deals();
    state.handle_event(&Event::click("row:1"));
    let el = state.render();
    let labels: Vec<String> = Selector::parse(".detail-pane .label")
        .unwrap()
        .query_all(&el)
        .iter()
        .map(|e| e.text_content())
        .collect();
    assert_eq!(labels.len(), 10);
    assert_eq!(labels[0], "ID:");
    assert_eq!(labels[7], "Analysts:");
}

#[test]
fn test_rows_from_json_requires_id() {
    assert!(rows_from_json(r#"[{"name": "x"}]"#).is_err());
    assert_eq!(rows_from_json("[]").unwrap().len(), 0);
}

#[test]
fn test_load_table_reports_manifest_errors() {
    let err = load_table("name: t\ncolumns: []\n", "[]").unwrap_err();
    assert!(matches!(err, LoadError::Manifest(_)));
    assert!(err.to_string().contains("at least one column"));

    let err = load_table(DEALS_MANIFEST, r#"[{"name": "x"}]"#).unwrap_err();
    assert!(matches!(err, LoadError::Rows(_)));
}

proptest! {
    #[test]
    fn prop_three_header_clicks_clear_sort(column in prop::sample::select(vec![
        "id", "issuer_name", "deal_name", "total", "industry", "status", "doc_count",
    ])) {
        let mut state = TableState::new(Arc::new(tabula::deals::deal_model().unwrap()), vec![]);
        for _ in 0..3 {
            state.update(TableMessage::HeaderClicked(column.to_string()));
        }
        prop_assert_eq!(state.sort(), None);
    }

    #[test]
    fn prop_displayed_rows_subset_of_rows(filter in "[a-zA-Z0-9 ]{0,6}") {
        let mut state = deals();
        state.update(TableMessage::FilterChanged(filter));
        let displayed = state.displayed_rows();
        prop_assert!(displayed.len() <= state.rows().len());
        prop_assert!(displayed.iter().all(|d| state.rows().contains(d)));
    }
}
