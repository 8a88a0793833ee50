//! The shipped deals manifest builds the same model as the code-defined one.

use std::cmp::Ordering;
use tabula_core::{deals, CellValue, SortDirection, TableRow};
use tabula_yaml::{TableManifest, DEALS_MANIFEST};

fn deal(id: i64, status: &str, total: f64) -> TableRow {
    TableRow::new(id)
        .cell("issuer_name", "Acme")
        .cell("deal_name", "Series A")
        .cell("bloomberg_id", "BBG000BLNNH6")
        .cell("total", total)
        .cell("industry", "Tech")
        .cell("status", status)
        .cell("analysts", vec!["Alice Anderson", "Bob Brown"])
        .cell("doc_count", 4)
        .cell("custom_deal_identifiers", vec!["X-1"])
}

#[test]
fn test_deals_manifest_parses_and_validates() {
    let manifest = TableManifest::load(DEALS_MANIFEST).unwrap();
    assert_eq!(manifest.name, "deals");
    assert_eq!(manifest.filter_debounce_ms, 300);
    assert_eq!(manifest.columns.len(), 10);
}

#[test]
fn test_deals_manifest_matches_code_model() {
    let from_yaml = TableManifest::load(DEALS_MANIFEST)
        .unwrap()
        .build_model()
        .unwrap();
    let from_code = deals::deal_model().unwrap();

    assert_eq!(from_yaml.headers(), from_code.headers());
    assert_eq!(from_yaml.hidden_keys(), from_code.hidden_keys());
    assert_eq!(
        from_yaml.default_visible_columns(),
        from_code.default_visible_columns()
    );

    let rows = [deal(2, "Good", 10.5), deal(1, "Excellent", 3.0), deal(3, "Bad", 99.999)];
    for (yc, cc) in from_yaml.columns().iter().zip(from_code.columns()) {
        assert_eq!(yc.key, cc.key);
        assert_eq!(yc.column_type, cc.column_type);
        assert_eq!(yc.sortable, cc.sortable, "sortable flag of {}", yc.key);
        for row in &rows {
            assert_eq!(yc.format_row(row), cc.format_row(row), "format of {}", yc.key);
        }
        for a in &rows {
            for b in &rows {
                for dir in [SortDirection::Asc, SortDirection::Desc] {
                    assert_eq!(yc.compare(a, b, dir), cc.compare(a, b, dir), "sort of {}", yc.key);
                }
            }
        }
    }

    assert_eq!(
        from_yaml.compare_default(&rows[0], &rows[1]),
        Some(Ordering::Greater)
    );
}

#[test]
fn test_deals_manifest_formatting() {
    let model = TableManifest::load(DEALS_MANIFEST)
        .unwrap()
        .build_model()
        .unwrap();
    let bloomberg = model.column("bloomberg_id").unwrap();
    assert_eq!(bloomberg.format(&CellValue::from("BBG000BLNNH6")), "BBG000BL...");
    let total = model.column("total").unwrap();
    assert_eq!(total.format(&CellValue::from(1234.5)), "1234.50");
}
