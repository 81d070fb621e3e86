//! Unit tests for header normalization.

use serde_json::{Value, json};
use tabular_view::data::normalize;
use tabular_view::{ColumnStore, ColumnType, ColumnsSpec, TableData};

fn store(data: Value) -> ColumnStore {
    TableData::from_value(data).unwrap().into_store().unwrap()
}

fn normalize_json(spec: Value, data: Value) -> tabular_view::TableResult<Vec<tabular_view::Column>> {
    let spec = ColumnsSpec::from_value(&spec)?;
    normalize(&spec, &store(data))
}

// ============================================================================
// Accepted Shapes
// ============================================================================

#[test]
fn test_absent_spec_uses_first_row_keys() {
    let columns = normalize_json(Value::Null, json!([{"b": "x", "a": 1}])).unwrap();
    let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(columns[0].title, "b");
    assert_eq!(columns[1].column_type, ColumnType::Number);
}

#[test]
fn test_names_default_title_to_name() {
    let columns = normalize_json(json!(["a", "missing"]), json!({"a": ["hello"]})).unwrap();
    assert_eq!(columns[0].title, "a");
    assert_eq!(columns[0].width, 5.0);
    assert_eq!(columns[0].column_type, ColumnType::String);

    // not in the data: title-sized width, string type
    assert_eq!(columns[1].width, 7.0);
    assert_eq!(columns[1].column_type, ColumnType::String);
}

#[test]
fn test_descriptors_keep_explicit_fields() {
    let spec = json!([
        {"name": "price", "title": "Price", "width": 12, "type": "string", "unit": "EUR"},
        {"name": "qty", "sortable": false, "skipRender": true}
    ]);
    let columns = normalize_json(spec, json!({"price": [9.5], "qty": [3]})).unwrap();

    assert_eq!(columns[0].title, "Price");
    assert_eq!(columns[0].width, 12.0);
    assert_eq!(columns[0].column_type, ColumnType::String);
    assert_eq!(columns[0].unit.as_deref(), Some("EUR"));

    assert_eq!(columns[1].title, "qty");
    assert_eq!(columns[1].column_type, ColumnType::Number);
    assert!(!columns[1].is_sortable());
    assert!(!columns[1].is_rendered());
}

#[test]
fn test_descriptor_without_name_is_schema_error() {
    let err = normalize_json(json!([{"title": "No name"}]), json!([])).unwrap_err();
    assert!(err.is_schema());

    let err = normalize_json(json!([{"name": ""}]), json!([])).unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn test_title_mapping() {
    let columns = normalize_json(json!({"age": "Age (yrs)"}), json!([{"age": 30}])).unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].name, "age");
    assert_eq!(columns[0].title, "Age (yrs)");
    assert_eq!(columns[0].width, 9.0);
    assert_eq!(columns[0].column_type, ColumnType::Number);
}

#[test]
fn test_partial_mapping_merges_key_as_name() {
    let spec = json!({"joined": {"title": "Joined", "unit": "UTC"}});
    let columns = normalize_json(spec, json!([{"joined": "2024-01-15T10:30:00Z"}])).unwrap();
    assert_eq!(columns[0].name, "joined");
    assert_eq!(columns[0].title, "Joined");
    assert_eq!(columns[0].column_type, ColumnType::Date);
    assert_eq!(columns[0].width, 20.0);
}

#[test]
fn test_partial_without_title_is_schema_error() {
    let err = normalize_json(json!({"a": {"width": 3}}), json!([])).unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn test_unsupported_shapes_are_schema_errors() {
    for spec in [json!("bogus"), json!(5), json!(true), json!([1, 2]), json!(["a", {"name": "b"}])] {
        let err = ColumnsSpec::from_value(&spec).unwrap_err();
        assert!(err.is_schema(), "expected schema error for {}", spec);
    }
}

#[test]
fn test_duplicate_names_are_schema_error() {
    let err = normalize_json(json!(["a", "a"]), json!([])).unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn test_empty_name_list_gives_empty_header() {
    let columns = normalize_json(json!([]), json!([{"a": 1}])).unwrap();
    assert!(columns.is_empty());
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_normalize_is_idempotent() {
    let data = json!([{"a": 1, "b": "some text", "c": [1, 2], "d": null}]);
    let store = store(data);

    let first = normalize(&ColumnsSpec::Absent, &store).unwrap();
    let second = normalize(&ColumnsSpec::from(first.clone()), &store).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_normalize_is_idempotent_for_every_shape() {
    let store = store(json!([{"a": 1, "b": "x"}]));
    let specs = [
        json!(null),
        json!(["b", "a"]),
        json!([{"name": "a", "title": "Alpha", "sortable": false}]),
        json!({"a": "Alpha"}),
        json!({"b": {"title": "Bee", "skipRender": true}}),
    ];
    for spec in specs {
        let first = normalize(&ColumnsSpec::from_value(&spec).unwrap(), &store).unwrap();
        let second = normalize(&ColumnsSpec::from(first.clone()), &store).unwrap();
        assert_eq!(first, second, "spec {}", spec);
    }
}

#[test]
fn test_empty_name_is_rejected_in_every_shape() {
    let data = json!([{"": 1, "a": 2}]);
    for spec in [json!(null), json!([""]), json!([{"name": ""}]), json!({"": "Blank"}), json!({"": {"title": "Blank"}})] {
        let err = normalize_json(spec.clone(), data.clone()).unwrap_err();
        assert!(err.is_schema(), "spec {}", spec);
        assert!(err.to_string().contains("name is required"), "spec {}: {}", spec, err);
    }
}

#[test]
fn test_patch_is_not_mutated() {
    let spec = ColumnsSpec::from_value(&json!([{"name": "a"}])).unwrap();
    let before = spec.clone();
    normalize(&spec, &store(json!({"a": [1]}))).unwrap();
    assert_eq!(spec, before);
}
