//! Column model inferred from sample rows.

use tabula::{
    comparators, formatters, CellValue, ColumnType, TableColumn, TableError, TableModel, TableRow,
};

/// Build a model with one column per field of the first row.
///
/// Numeric fields sort numerically, text and boolean fields sort as text,
/// and list fields are joined with `", "` and left unsortable. Labels are
/// the field keys.
pub(crate) fn infer_model(rows: &[TableRow]) -> Result<TableModel, TableError> {
    let first = rows.first().ok_or(TableError::EmptyInput)?;
    let columns = first
        .iter()
        .map(|(key, value)| {
            let column = TableColumn::new(key, key).column_type(column_type(value));
            match value {
                CellValue::Int(_) | CellValue::Decimal(_) => {
                    column.sortable().comparator(comparators::numeric(key))
                }
                CellValue::List(_) => column.formatter(formatters::join(", ")),
                _ => column.sortable().comparator(comparators::text(key)),
            }
        })
        .collect();
    let model = TableModel::new(columns)?.default_sort_by(comparators::numeric(tabula::ID_KEY));
    tracing::debug!(columns = model.len(), "inferred model from first row");
    Ok(model)
}

const fn column_type(value: &CellValue) -> ColumnType {
    match value {
        CellValue::Int(_) => ColumnType::Int,
        CellValue::Decimal(_) => ColumnType::Decimal,
        CellValue::List(_) => ColumnType::StringArray,
        _ => ColumnType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;
    use tabula::SortDirection;

    #[test]
    fn test_infer_model_types() {
        let rows = [TableRow::new(1)
            .cell("name", "Ann")
            .cell("score", 2.5)
            .cell("tags", vec!["a", "b"])
            .cell("active", true)];
        let model = infer_model(&rows).unwrap();
        let types: Vec<_> = model.columns().iter().map(|c| c.column_type).collect();
        assert_eq!(
            types,
            [
                ColumnType::Int,
                ColumnType::String,
                ColumnType::Decimal,
                ColumnType::StringArray,
                ColumnType::String
            ]
        );
        assert!(!model.column("tags").unwrap().sortable);
        assert!(model.column("active").unwrap().sortable);
        assert_eq!(
            model.column("tags").unwrap().format_row(&rows[0]),
            "a, b"
        );
    }

    #[test]
    fn test_infer_model_sorts() {
        let a = TableRow::new(1).cell("score", 10);
        let b = TableRow::new(2).cell("score", 9);
        let model = infer_model(&[a.clone(), b.clone()]).unwrap();
        let score = model.column("score").unwrap();
        assert_eq!(score.compare(&a, &b, SortDirection::Asc), Some(Ordering::Greater));
        assert_eq!(model.compare_default(&a, &b), Some(Ordering::Less));
    }

    #[test]
    fn test_infer_model_empty() {
        assert_eq!(infer_model(&[]).unwrap_err(), TableError::EmptyInput);
    }
}
