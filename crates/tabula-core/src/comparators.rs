//! Reusable column comparators.
//!
//! Each builder returns a [`Comparator`] that computes a natural-order
//! comparison and orients it with [`SortDirection::apply`], so
//! `c(a, b, Desc) == c(a, b, Asc).reverse()` holds for all of them.

use crate::cell::CellValue;
use crate::column::{Comparator, SortDirection};
use crate::row::TableRow;
use std::cmp::Ordering;
use std::sync::Arc;

/// Compare a field numerically. Rows without a numeric value sort first.
#[must_use]
pub fn numeric(key: impl Into<String>) -> Comparator {
    let key = key.into();
    Arc::new(move |a: &TableRow, b: &TableRow, dir: SortDirection| {
        let x = a.get(&key).and_then(CellValue::as_f64);
        let y = b.get(&key).and_then(CellValue::as_f64);
        let ordering = match (x, y) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        dir.apply(ordering)
    })
}

/// Compare a field's display text, ignoring case first.
///
/// Values equal under case folding fall back to a case-sensitive
/// comparison so the order stays total.
#[must_use]
pub fn text(key: impl Into<String>) -> Comparator {
    let key = key.into();
    Arc::new(move |a: &TableRow, b: &TableRow, dir: SortDirection| {
        let x = a.get(&key).map(CellValue::display).unwrap_or_default();
        let y = b.get(&key).map(CellValue::display).unwrap_or_default();
        dir.apply(compare_text(&x, &y))
    })
}

/// Compare a field by its position in `ranks`.
///
/// Declared values rank from 1 upward; anything else ranks 0 and sorts
/// before every declared value.
#[must_use]
pub fn ranked<I, S>(key: impl Into<String>, ranks: I) -> Comparator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let key = key.into();
    let ranks: Vec<String> = ranks.into_iter().map(Into::into).collect();
    Arc::new(move |a: &TableRow, b: &TableRow, dir: SortDirection| {
        let x = rank_of(&ranks, a.get(&key));
        let y = rank_of(&ranks, b.get(&key));
        dir.apply(x.cmp(&y))
    })
}

/// Case-insensitive comparison with a case-sensitive tie-break.
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn rank_of(ranks: &[String], value: Option<&CellValue>) -> usize {
    value
        .and_then(CellValue::as_str)
        .and_then(|s| ranks.iter().position(|r| r == s))
        .map_or(0, |index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STATUS: [&str; 5] = ["Bad", "Ok", "Good", "Great", "Excellent"];

    fn row(id: i64, value: impl Into<CellValue>) -> TableRow {
        TableRow::new(id).cell("v", value)
    }

    #[test]
    fn test_numeric_orders_values() {
        let c = numeric("v");
        assert_eq!(c(&row(1, 2), &row(2, 10), SortDirection::Asc), Ordering::Less);
        assert_eq!(c(&row(1, 2), &row(2, 10), SortDirection::Desc), Ordering::Greater);
        assert_eq!(c(&row(1, 2.5), &row(2, 2.5), SortDirection::Asc), Ordering::Equal);
    }

    #[test]
    fn test_numeric_missing_sorts_first() {
        let c = numeric("v");
        assert_eq!(c(&TableRow::new(1), &row(2, 0), SortDirection::Asc), Ordering::Less);
    }

    #[test]
    fn test_text_ignores_case() {
        let c = text("v");
        assert_eq!(c(&row(1, "apple"), &row(2, "Banana"), SortDirection::Asc), Ordering::Less);
        assert_eq!(c(&row(1, "Zed"), &row(2, "alpha"), SortDirection::Asc), Ordering::Greater);
    }

    #[test]
    fn test_text_tie_break_is_total() {
        assert_ne!(compare_text("abc", "ABC"), Ordering::Equal);
        assert_eq!(compare_text("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn test_ranked_order() {
        let c = ranked("v", STATUS);
        assert_eq!(c(&row(1, "Bad"), &row(2, "Excellent"), SortDirection::Asc), Ordering::Less);
        assert_eq!(c(&row(1, "Great"), &row(2, "Ok"), SortDirection::Asc), Ordering::Greater);
        assert_eq!(c(&row(1, "Good"), &row(2, "Good"), SortDirection::Desc), Ordering::Equal);
    }

    #[test]
    fn test_ranked_unknown_ranks_zero() {
        let c = ranked("v", STATUS);
        assert_eq!(c(&row(1, "Unknown"), &row(2, "Bad"), SortDirection::Asc), Ordering::Less);
        assert_eq!(c(&TableRow::new(1), &row(2, "Other"), SortDirection::Asc), Ordering::Equal);
    }

    proptest! {
        #[test]
        fn prop_numeric_antisymmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let c = numeric("v");
            let (x, y) = (row(1, a), row(2, b));
            prop_assert_eq!(
                c(&x, &y, SortDirection::Asc),
                c(&x, &y, SortDirection::Desc).reverse()
            );
        }

        #[test]
        fn prop_text_antisymmetric(a in "[a-zA-Z ]{0,8}", b in "[a-zA-Z ]{0,8}") {
            let c = text("v");
            let (x, y) = (row(1, a), row(2, b));
            prop_assert_eq!(
                c(&x, &y, SortDirection::Asc),
                c(&x, &y, SortDirection::Desc).reverse()
            );
            prop_assert_eq!(c(&x, &y, SortDirection::Asc), c(&y, &x, SortDirection::Asc).reverse());
        }

        #[test]
        fn prop_ranked_antisymmetric(i in 0usize..7, j in 0usize..7) {
            let pool = ["Bad", "Ok", "Good", "Great", "Excellent", "Meh", ""];
            let c = ranked("v", STATUS);
            let (x, y) = (row(1, pool[i]), row(2, pool[j]));
            prop_assert_eq!(
                c(&x, &y, SortDirection::Asc),
                c(&x, &y, SortDirection::Desc).reverse()
            );
        }
    }
}
