//! Core types for tabular-view.
//!
//! This module defines the value and schema types shared by every stage of the
//! pipeline: cells and rows, the column type tag, resolved and partial column
//! descriptors, and the sort request coming from the control surface.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Cells
// ============================================================================

/// A single cell value.
///
/// Values are stored exactly as supplied; text that looks like a number or a
/// date stays text, and integers stay integers. Coercion only happens during
/// type inference and sorting.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Cell {
    #[default]
    Null,
    Boolean(bool),
    /// Whole number as written in the input
    Integer(i64),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
    /// Opaque nested sequence
    List(Vec<Cell>),
    /// Opaque nested record
    Object(BTreeMap<String, Cell>),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Whether this cell holds a nested structure rather than a scalar
    pub fn is_nested(&self) -> bool {
        matches!(self, Cell::List(_) | Cell::Object(_))
    }

    /// Element count of a nested cell, `None` for scalars
    pub fn nested_len(&self) -> Option<usize> {
        match self {
            Cell::List(items) => Some(items.len()),
            Cell::Object(fields) => Some(fields.len()),
            _ => None,
        }
    }

    /// Borrow the text of a `Text` cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of an `Integer` or `Number` cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(n) => Some(*n as f64),
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Number of characters the cell occupies when displayed without formatting
    pub fn display_width(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Boolean(b) => write!(f, "{}", b),
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Number(n) => {
                // No trailing zeros for whole numbers
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Cell::Text(s) => f.write_str(s),
            Cell::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Cell::List(items) => write!(f, "[{} items]", items.len()),
            Cell::Object(fields) => write!(f, "{{{} fields}}", fields.len()),
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Integer(i),
                // u64 beyond i64::MAX and fractional values
                None => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s),
            Value::Array(items) => Cell::List(items.into_iter().map(Cell::from).collect()),
            Value::Object(fields) => Cell::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Cell::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Integer(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Integer(i64::from(n))
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Boolean(b)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<DateTime<Utc>> for Cell {
    fn from(d: DateTime<Utc>) -> Self {
        Cell::Date(d)
    }
}

impl From<Vec<Cell>> for Cell {
    fn from(items: Vec<Cell>) -> Self {
        Cell::List(items)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_unit(),
            Cell::Boolean(b) => serializer.serialize_bool(*b),
            Cell::Integer(n) => serializer.serialize_i64(*n),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Cell::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Cell::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Cell::from)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One record: an ordered mapping from column name to cell.
///
/// Key order is insertion order. Equality compares the rows as mappings, so two
/// rows holding the same fields in a different order are equal.
#[derive(Clone, Debug, Default)]
pub struct Row {
    fields: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Set a field, keeping its position if the name already exists.
    /// Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, cell: Cell) -> Option<Cell> {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, cell)),
            None => {
                self.fields.push((name, cell));
                None
            }
        }
    }

    /// Append a field whose name is known to be absent from the row
    pub(crate) fn push(&mut self, name: impl Into<String>, cell: Cell) {
        self.fields.push((name.into(), cell));
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Field at an insertion position
    pub(crate) fn field_at(&self, position: usize) -> Option<(&str, &Cell)> {
        self.fields.get(position).map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl From<Map<String, Value>> for Row {
    fn from(fields: Map<String, Value>) -> Self {
        // JSON object keys are already unique
        let mut row = Row::with_capacity(fields.len());
        for (k, v) in fields {
            row.push(k, Cell::from(v));
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(fields) => Ok(Row::from(fields)),
            other => Err(serde::de::Error::custom(format!(
                "row must be an object, got {}",
                value_kind(&other)
            ))),
        }
    }
}

/// Short name of a JSON value's kind, used in error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Column Types
// ============================================================================

/// Semantic type tag of a column. Drives comparison and default formatting.
///
/// Tags outside the known set are preserved as `Other` so a caller-supplied
/// type round-trips; such columns are treated as unsortable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Number,
    String,
    Boolean,
    Date,
    List,
    Other(String),
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Number => "number",
            ColumnType::String => "string",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::List => "list",
            ColumnType::Other(tag) => tag,
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        Self::String
    }
}

impl From<&str> for ColumnType {
    fn from(tag: &str) -> Self {
        match tag {
            "number" => ColumnType::Number,
            "string" => ColumnType::String,
            "boolean" => ColumnType::Boolean,
            "date" => ColumnType::Date,
            "list" => ColumnType::List,
            other => ColumnType::Other(other.to_string()),
        }
    }
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        ColumnType::from(tag.as_str())
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.as_str().to_string()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Column Descriptors
// ============================================================================

/// A fully resolved column descriptor.
///
/// `title`, `width` and `column_type` are filled in once at normalization and
/// never re-derived afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier, also the key into rows and the column store
    pub name: String,
    /// Display label
    pub title: String,
    /// Display width in characters
    pub width: f32,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_render: Option<bool>,
}

impl Column {
    /// Columns are sortable unless explicitly marked otherwise
    pub fn is_sortable(&self) -> bool {
        self.sortable != Some(false)
    }

    /// Whether the column appears in render output
    pub fn is_rendered(&self) -> bool {
        !self.skip_render.unwrap_or(false)
    }
}

/// A partially specified column descriptor, as supplied by callers.
///
/// Every field is optional; normalization resolves it into a [`Column`]
/// without modifying the patch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_render: Option<bool>,
}

impl ColumnPatch {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    pub fn with_skip_render(mut self, skip: bool) -> Self {
        self.skip_render = Some(skip);
        self
    }
}

impl From<Column> for ColumnPatch {
    fn from(column: Column) -> Self {
        Self {
            name: Some(column.name),
            title: Some(column.title),
            width: Some(column.width),
            column_type: Some(column.column_type),
            unit: column.unit,
            sortable: column.sortable,
            skip_render: column.skip_render,
        }
    }
}

// ============================================================================
// Controls
// ============================================================================

/// Sort request from the control surface.
///
/// Defaults to no sort column and descending direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRequest {
    #[serde(default, rename = "sortByColumnName", alias = "by")]
    pub by: Option<String>,
    #[serde(default, alias = "asc")]
    pub ascending: bool,
}

impl SortRequest {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            by: Some(column.into()),
            ascending: true,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            by: Some(column.into()),
            ascending: false,
        }
    }

    /// Clear the sort column, keeping the direction
    pub fn unsorted() -> Self {
        Self::default()
    }
}
