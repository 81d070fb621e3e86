//! Unit tests for the sort engine.

use crate::helpers::cells;
use serde_json::json;
use tabular_view::data::{comparator_for, sort_indexes};
use tabular_view::{Cell, ColumnType};

#[test]
fn test_number_ascending_and_descending() {
    let values = cells(&[json!(3), json!(1), json!(2)]);
    assert_eq!(sort_indexes(&values, &ColumnType::Number, true), vec![1, 2, 0]);
    assert_eq!(sort_indexes(&values, &ColumnType::Number, false), vec![0, 2, 1]);
}

#[test]
fn test_numeric_strings_sort_by_value() {
    let values = cells(&[json!("10"), json!("9"), json!("100")]);
    assert_eq!(sort_indexes(&values, &ColumnType::Number, true), vec![1, 0, 2]);
}

#[test]
fn test_non_numeric_cells_count_as_zero() {
    let values = cells(&[json!(5), json!("abc"), json!(-1), json!(null)]);
    // "abc" and null tie at 0 and keep their relative order
    assert_eq!(sort_indexes(&values, &ColumnType::Number, true), vec![2, 1, 3, 0]);
}

#[test]
fn test_booleans_sort_as_numbers() {
    let values = cells(&[json!(true), json!(false), json!(true)]);
    assert_eq!(sort_indexes(&values, &ColumnType::Boolean, true), vec![1, 0, 2]);
}

#[test]
fn test_strings_null_as_empty() {
    let values = cells(&[json!("banana"), json!(null), json!("Apple"), json!("cherry")]);
    assert_eq!(sort_indexes(&values, &ColumnType::String, true), vec![1, 2, 0, 3]);
}

#[test]
fn test_string_case_ties_are_deterministic() {
    let values = cells(&[json!("B"), json!("b"), json!("a")]);
    assert_eq!(sort_indexes(&values, &ColumnType::String, true), vec![2, 1, 0]);
}

#[test]
fn test_lists_compare_by_length_only() {
    let values = cells(&[json!([1, 2, 3]), json!([9]), json!([]), json!([0])]);
    assert_eq!(sort_indexes(&values, &ColumnType::List, true), vec![2, 1, 3, 0]);
}

#[test]
fn test_dates_compare_as_instants() {
    let values = cells(&[
        json!("2024-03-01"),
        json!("2023-12-31T23:59:59Z"),
        json!("2024-01-15T10:00:00+02:00"),
    ]);
    assert_eq!(sort_indexes(&values, &ColumnType::Date, true), vec![1, 2, 0]);
}

#[test]
fn test_unknown_type_is_identity() {
    let values = cells(&[json!(3), json!(1), json!(2)]);
    let custom = ColumnType::from("currency");
    assert!(comparator_for(&custom).is_none());
    assert_eq!(sort_indexes(&values, &custom, true), vec![0, 1, 2]);
    assert_eq!(sort_indexes(&values, &custom, false), vec![0, 1, 2]);
}

#[test]
fn test_ties_keep_original_order_in_both_directions() {
    let values = cells(&[json!(1), json!(0), json!(1), json!(0), json!(1)]);
    assert_eq!(sort_indexes(&values, &ColumnType::Number, true), vec![1, 3, 0, 2, 4]);
    assert_eq!(sort_indexes(&values, &ColumnType::Number, false), vec![0, 2, 4, 1, 3]);
}

#[test]
fn test_empty_and_single() {
    assert!(sort_indexes(&[], &ColumnType::Number, true).is_empty());
    assert_eq!(sort_indexes(&[Cell::Null], &ColumnType::String, false), vec![0]);
}
