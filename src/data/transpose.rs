//! Row/column transposition
//!
//! The column-oriented [`ColumnStore`] is the canonical storage. Row-oriented
//! input is transposed into it on entry and rows are rebuilt from it on demand.
//!
//! Transposition is lenient about row keys: the column set comes from the
//! first row only. A later row missing one of those keys leaves a hole (a
//! `Null` cell) in that column; keys not present in the first row are dropped.

use crate::data::error::{TableError, TableResult};
use crate::types::{Cell, Row, value_kind};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Column Store
// ============================================================================

/// Column-oriented table storage: an ordered mapping from column name to the
/// column's cells.
///
/// The row count is stored, not derived, so rows without any keys still
/// count. It follows the first column when one is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnStore {
    columns: Vec<(String, Vec<Cell>)>,
    /// Column name -> position in `columns`
    index: HashMap<String, usize>,
    rows: usize,
}

impl ColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store of `rows` rows with no columns
    pub fn with_row_count(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Add a column, replacing the values of an existing column of the same name
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Cell>) {
        let name = name.into();
        let position = match self.index.get(&name) {
            Some(&position) => {
                self.columns[position].1 = values;
                position
            }
            None => {
                let position = self.columns.len();
                self.index.insert(name.clone(), position);
                self.columns.push((name, values));
                position
            }
        };
        if position == 0 {
            self.rows = self.columns[0].1.len();
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Cell]> {
        self.index
            .get(name)
            .map(|&position| self.columns[position].1.as_slice())
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Cell>> {
        self.index
            .get(name)
            .map(|&position| &mut self.columns[position].1)
    }

    /// A single cell, `None` if the column or row does not exist
    pub fn cell(&self, name: &str, row: usize) -> Option<&Cell> {
        self.get(name).and_then(|values| values.get(row))
    }

    /// Column names in storage order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Verify every column has the same length, returning the row count
    pub fn check_shape(&self) -> TableResult<usize> {
        let expected = self.row_count();
        for (name, values) in &self.columns {
            if values.len() != expected {
                return Err(TableError::Shape {
                    column: name.clone(),
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(expected)
    }

    /// Build one row, keyed by every column in storage order
    pub fn row(&self, index: usize) -> Option<Row> {
        if index >= self.row_count() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|(name, values)| {
                    (name.as_str(), values.get(index).cloned().unwrap_or_default())
                })
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Cell>)> for ColumnStore {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Cell>)>>(iter: I) -> Self {
        let mut store = ColumnStore::new();
        for (name, values) in iter {
            store.insert(name, values);
        }
        store
    }
}

impl Serialize for ColumnStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, values) in &self.columns {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColumnStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        store_from_value(value).map_err(serde::de::Error::custom)
    }
}

fn store_from_value(value: Value) -> TableResult<ColumnStore> {
    let columns = match value {
        Value::Object(columns) => columns,
        other => {
            return Err(TableError::InvalidData(format!(
                "column data must be an object, got {}",
                value_kind(&other)
            )));
        }
    };

    let mut store = ColumnStore::new();
    for (name, values) in columns {
        match values {
            Value::Array(items) => {
                store.insert(name, items.into_iter().map(Cell::from).collect());
            }
            other => {
                return Err(TableError::InvalidData(format!(
                    "column '{}' must be an array, got {}",
                    name,
                    value_kind(&other)
                )));
            }
        }
    }
    Ok(store)
}

// ============================================================================
// Transposition
// ============================================================================

/// Transpose rows into a column store.
///
/// The column set and order come from the first row. Missing keys become
/// `Null` holes; extra keys are dropped.
pub fn rows_to_columns(rows: &[Row]) -> ColumnStore {
    let Some(first) = rows.first() else {
        return ColumnStore::new();
    };

    let names: Vec<&str> = first.keys().collect();
    let mut columns: Vec<Vec<Cell>> = names
        .iter()
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();

    for (row_idx, row) in rows.iter().enumerate() {
        let mut found = 0;
        for (position, (name, column)) in names.iter().zip(columns.iter_mut()).enumerate() {
            // Rows usually share the first row's key order
            let cell = match row.field_at(position) {
                Some((key, cell)) if key == *name => Some(cell),
                _ => row.get(name),
            };
            if cell.is_some() {
                found += 1;
            }
            column.push(cell.cloned().unwrap_or_default());
        }
        if found < row.len() {
            tracing::trace!(row = row_idx, "dropping keys not present in the first row");
        }
    }

    let mut store = ColumnStore::with_row_count(rows.len());
    for (name, values) in names.into_iter().zip(columns) {
        store.insert(name, values);
    }
    store
}

/// Rebuild rows from a column store.
///
/// Fails with a shape error if the columns disagree in length.
pub fn columns_to_rows(store: &ColumnStore) -> TableResult<Vec<Row>> {
    let row_count = store.check_shape()?;
    let mut rows = Vec::with_capacity(row_count);

    for index in 0..row_count {
        let mut row = Row::with_capacity(store.column_count());
        for (name, values) in store.iter() {
            row.push(name, values[index].clone());
        }
        rows.push(row);
    }

    Ok(rows)
}

// ============================================================================
// Input Data
// ============================================================================

/// Table data as supplied by a caller, in either orientation.
///
/// Deserializing picks the orientation from the JSON shape: an array is a
/// sequence of rows, an object is a mapping of columns.
#[derive(Clone, Debug, PartialEq)]
pub enum TableData {
    Rows(Vec<Row>),
    Columns(ColumnStore),
}

impl TableData {
    /// Detect the orientation of a JSON value
    pub fn from_value(value: Value) -> TableResult<Self> {
        match value {
            Value::Array(items) => {
                let rows = items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| match item {
                        Value::Object(fields) => Ok(Row::from(fields)),
                        other => Err(TableError::InvalidData(format!(
                            "row {} must be an object, got {}",
                            idx,
                            value_kind(&other)
                        ))),
                    })
                    .collect::<TableResult<Vec<Row>>>()?;
                Ok(TableData::Rows(rows))
            }
            value @ Value::Object(_) => store_from_value(value).map(TableData::Columns),
            other => Err(TableError::InvalidData(format!(
                "data must be an array of rows or an object of columns, got {}",
                value_kind(&other)
            ))),
        }
    }

    /// Convert into the canonical column store.
    ///
    /// Column-oriented input must already be rectangular.
    pub fn into_store(self) -> TableResult<ColumnStore> {
        match self {
            TableData::Rows(rows) => Ok(rows_to_columns(&rows)),
            TableData::Columns(store) => {
                store.check_shape()?;
                Ok(store)
            }
        }
    }
}

impl From<Vec<Row>> for TableData {
    fn from(rows: Vec<Row>) -> Self {
        TableData::Rows(rows)
    }
}

impl From<ColumnStore> for TableData {
    fn from(store: ColumnStore) -> Self {
        TableData::Columns(store)
    }
}

impl<'de> Deserialize<'de> for TableData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        TableData::from_value(value).map_err(serde::de::Error::custom)
    }
}
