//! Example model over deal records.

use crate::column::{ColumnType, TableColumn};
use crate::comparators;
use crate::error::TableError;
use crate::formatters;
use crate::model::TableModel;

/// Status values from worst to best.
pub const STATUS_RANKS: [&str; 5] = ["Bad", "Ok", "Good", "Great", "Excellent"];

/// Columns hidden until the user shows them.
pub const DEFAULT_HIDDEN: [&str; 4] = [
    "bloomberg_id",
    "analysts",
    "custom_deal_identifiers",
    "doc_count",
];

/// Build the deals model.
pub fn deal_model() -> Result<TableModel, TableError> {
    let columns = vec![
        TableColumn::new("id", "ID")
            .column_type(ColumnType::Int)
            .sortable()
            .comparator(comparators::numeric("id")),
        TableColumn::new("issuer_name", "Issuer")
            .sortable()
            .comparator(comparators::text("issuer_name")),
        TableColumn::new("deal_name", "Deal")
            .sortable()
            .comparator(comparators::text("deal_name")),
        TableColumn::new("bloomberg_id", "Bloomberg ID").formatter(formatters::truncate(8, "...")),
        TableColumn::new("total", "Total")
            .column_type(ColumnType::Decimal)
            .sortable()
            .comparator(comparators::numeric("total"))
            .formatter(formatters::fixed_decimal(2)),
        TableColumn::new("industry", "Industry")
            .sortable()
            .comparator(comparators::text("industry")),
        TableColumn::new("status", "Status")
            .sortable()
            .comparator(comparators::ranked("status", STATUS_RANKS)),
        TableColumn::new("analysts", "Analysts")
            .column_type(ColumnType::StringArray)
            .formatter(formatters::join_truncate(", ", 20, "...")),
        TableColumn::new("doc_count", "Docs")
            .column_type(ColumnType::Int)
            .sortable()
            .comparator(comparators::numeric("doc_count")),
        TableColumn::new("custom_deal_identifiers", "Identifiers")
            .column_type(ColumnType::StringArray)
            .formatter(formatters::join_truncate(", ", 20, "...")),
    ];

    Ok(TableModel::new(columns)?
        .default_hidden(DEFAULT_HIDDEN)?
        .default_sort_by(comparators::numeric("id")))
}
