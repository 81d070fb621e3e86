//! Whole-pipeline tests through `render_table`.

use crate::helpers::rows;
use serde_json::{Value, json};
use tabular_view::data::columns_to_rows;
use tabular_view::{
    ColumnStore, ColumnType, ColumnsSpec, SortRequest, TableData, TableError, render_table,
};

fn run(data: Value, columns: Value, controls: SortRequest) -> tabular_view::TableResult<tabular_view::Rendered> {
    let data = TableData::from_value(data)?;
    let spec = ColumnsSpec::from_value(&columns)?;
    render_table(data, &spec, &controls)
}

#[test]
fn test_rows_without_spec_sorted_ascending() {
    let rendered = run(
        json!([{"a": 3}, {"a": 1}, {"a": 2}]),
        Value::Null,
        SortRequest::ascending("a"),
    )
    .unwrap();

    assert_eq!(rendered.header.len(), 1);
    assert_eq!(rendered.header[0].name, "a");
    assert_eq!(rendered.header[0].title, "a");
    assert_eq!(rendered.permutation, vec![1, 2, 0]);
    assert_eq!(rendered.length, 3);
}

#[test]
fn test_column_oriented_input_rebuilds_rows() {
    let rendered = run(
        json!({"a": [1, 2], "b": ["x", "y"]}),
        Value::Null,
        SortRequest::default(),
    )
    .unwrap();

    let rebuilt = columns_to_rows(&rendered.store).unwrap();
    assert_eq!(rebuilt, rows(json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}])));
    assert_eq!(rendered.permutation, vec![0, 1]);
}

#[test]
fn test_title_mapping_spec() {
    let rendered = run(json!([{"age": 41}]), json!({"age": "Age (yrs)"}), SortRequest::default()).unwrap();
    assert_eq!(rendered.header.len(), 1);
    assert_eq!(rendered.header[0].name, "age");
    assert_eq!(rendered.header[0].title, "Age (yrs)");
    assert_eq!(rendered.header[0].column_type, ColumnType::Number);
}

#[test]
fn test_bare_string_spec_is_schema_error() {
    let err = run(json!([{"a": 1}]), json!("bogus"), SortRequest::default()).unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("string"));
}

#[test]
fn test_ragged_store_is_shape_error() {
    let store: ColumnStore = serde_json::from_value(json!({"a": [1, 2, 3], "b": [1, 2]})).unwrap();
    assert!(matches!(columns_to_rows(&store), Err(TableError::Shape { .. })));

    let err = run(json!({"a": [1, 2, 3], "b": [1, 2]}), Value::Null, SortRequest::default()).unwrap_err();
    assert!(err.is_shape());
}

#[test]
fn test_sort_uses_resolved_column_type() {
    // numeric strings infer as numbers, so "10" sorts after "9"
    let rendered = run(
        json!({"v": ["10", "9", "100"]}),
        Value::Null,
        SortRequest::ascending("v"),
    )
    .unwrap();
    assert_eq!(rendered.header[0].column_type, ColumnType::Number);
    assert_eq!(rendered.permutation, vec![1, 0, 2]);

    // an explicit string type sorts lexically
    let rendered = run(
        json!({"v": ["10", "9", "100"]}),
        json!([{"name": "v", "type": "string"}]),
        SortRequest::ascending("v"),
    )
    .unwrap();
    assert_eq!(rendered.permutation, vec![0, 2, 1]);
}

#[test]
fn test_controls_deserialize_from_control_surface() {
    let controls: SortRequest =
        serde_json::from_value(json!({"sortByColumnName": "a", "ascending": true})).unwrap();
    assert_eq!(controls, SortRequest::ascending("a"));

    let controls: SortRequest = serde_json::from_value(json!({"sortByColumnName": null})).unwrap();
    assert_eq!(controls, SortRequest::unsorted());
    assert!(!controls.ascending);
}

#[test]
fn test_empty_data() {
    let rendered = run(json!([]), Value::Null, SortRequest::ascending("a")).unwrap();
    assert!(rendered.header.is_empty());
    assert!(rendered.permutation.is_empty());
    assert_eq!(rendered.length, 0);
}

#[test]
fn test_keyless_rows_keep_their_length() {
    let rendered = run(json!([{}, {}, {}]), Value::Null, SortRequest::default()).unwrap();
    assert!(rendered.header.is_empty());
    assert_eq!(rendered.length, 3);
    assert_eq!(rendered.permutation, vec![0, 1, 2]);
    assert_eq!(columns_to_rows(&rendered.store).unwrap().len(), 3);
}

#[test]
fn test_integers_survive_the_payload_exactly() {
    let rendered = run(
        json!([{"id": 9007199254740993i64, "age": 30}, {"id": 9007199254740992i64, "age": 2.5}]),
        Value::Null,
        SortRequest::ascending("id"),
    )
    .unwrap();
    assert_eq!(rendered.permutation, vec![1, 0]);

    let payload = tabular_view::data::compose(
        &rendered.header,
        &rendered.store,
        &rendered.permutation,
        0..2,
    );
    assert_eq!(
        serde_json::to_string(&payload.visible_rows).unwrap(),
        r#"[{"id":9007199254740992,"age":2.5},{"id":9007199254740993,"age":30}]"#
    );
}
