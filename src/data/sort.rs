//! Type-aware sorting of row indexes
//!
//! Sorting never moves data. It produces a permutation of row indexes that the
//! view composer reads through, leaving the column store untouched.
//!
//! Comparators are looked up by type tag in [`COMPARATORS`]. Each comparator is
//! lenient: cells that do not fit the column type are coerced (to zero, to the
//! empty string, or to length zero) instead of failing the sort. A tag with no
//! comparator leaves the rows in their original order.

use crate::data::infer::{parse_date, parse_number};
use crate::types::{Cell, ColumnType};
use std::cmp::Ordering;

/// Comparison function for two cells of one column
pub type Comparator = fn(&Cell, &Cell) -> Ordering;

/// Comparator table keyed by type tag
pub const COMPARATORS: &[(&str, Comparator)] = &[
    ("number", compare_numeric),
    ("boolean", compare_numeric),
    ("string", compare_text),
    ("list", compare_length),
    ("date", compare_instant),
];

/// Find the comparator for a column type, `None` if the type is unsortable
pub fn comparator_for(column_type: &ColumnType) -> Option<Comparator> {
    let tag = column_type.as_str();
    COMPARATORS
        .iter()
        .find(|(key, _)| *key == tag)
        .map(|(_, cmp)| *cmp)
}

/// Compute the sorted order of `values`.
///
/// Returns a permutation of `0..values.len()`: position `i` of the result holds
/// the index of the value shown at position `i`. The sort is stable, so equal
/// values keep their original relative order in both directions.
pub fn sort_indexes(values: &[Cell], column_type: &ColumnType, ascending: bool) -> Vec<usize> {
    let mut indexes: Vec<usize> = (0..values.len()).collect();

    let Some(compare) = comparator_for(column_type) else {
        tracing::trace!(%column_type, "no comparator for column type, keeping original order");
        return indexes;
    };

    indexes.sort_by(|&a, &b| {
        let ord = compare(&values[a], &values[b]);
        if ascending { ord } else { ord.reverse() }
    });

    indexes
}

// ============================================================================
// Comparators
// ============================================================================

/// Numeric difference. Non-numeric cells count as zero.
///
/// Two integer cells compare exactly, so ids above 2^53 keep their order.
pub fn compare_numeric(a: &Cell, b: &Cell) -> Ordering {
    match (a, b) {
        (Cell::Integer(x), Cell::Integer(y)) => x.cmp(y),
        _ => numeric_key(a).total_cmp(&numeric_key(b)),
    }
}

/// Case-insensitive text order with lowercase before uppercase on ties.
/// Null compares as the empty string.
pub fn compare_text(a: &Cell, b: &Cell) -> Ordering {
    let a = text_key(a);
    let b = text_key(b);
    locale_cmp(&a, &b)
}

/// Nested cells by element count only; scalars count as empty.
pub fn compare_length(a: &Cell, b: &Cell) -> Ordering {
    a.nested_len()
        .unwrap_or(0)
        .cmp(&b.nested_len().unwrap_or(0))
}

/// Chronological order of instants. Unparseable cells count as the epoch.
pub fn compare_instant(a: &Cell, b: &Cell) -> Ordering {
    instant_key(a).cmp(&instant_key(b))
}

fn numeric_key(cell: &Cell) -> f64 {
    let n = match cell {
        Cell::Integer(n) => *n as f64,
        Cell::Number(n) => *n,
        Cell::Boolean(b) => f64::from(u8::from(*b)),
        Cell::Text(s) => parse_number(s).unwrap_or(0.0),
        Cell::Date(d) => d.timestamp_millis() as f64,
        Cell::Null | Cell::List(_) | Cell::Object(_) => 0.0,
    };
    if n.is_nan() {
        tracing::trace!("coercing NaN to zero for comparison");
        0.0
    } else {
        // Fold -0.0 into 0.0 so total_cmp treats them as equal
        n + 0.0
    }
}

fn text_key(cell: &Cell) -> std::borrow::Cow<'_, str> {
    match cell {
        Cell::Text(s) => std::borrow::Cow::Borrowed(s.as_str()),
        Cell::Null => std::borrow::Cow::Borrowed(""),
        other => std::borrow::Cow::Owned(other.to_string()),
    }
}

fn instant_key(cell: &Cell) -> i64 {
    match cell {
        Cell::Date(d) => d.timestamp_millis(),
        Cell::Text(s) => parse_date(s)
            .map(|d| d.timestamp_millis())
            .or_else(|| parse_number(s).map(|n| n as i64))
            .unwrap_or(0),
        Cell::Integer(n) => *n,
        Cell::Number(n) if n.is_finite() => *n as i64,
        _ => 0,
    }
}

/// Locale-style string ordering: letters compare case-insensitively first,
/// then lowercase sorts before uppercase, then by code point.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
