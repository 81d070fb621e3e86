//! Column spec normalization
//!
//! Callers describe columns in one of several shapes. The shape is detected
//! once, when a [`ColumnsSpec`] is built from JSON, and each shape has its own
//! conversion into `(name, patch)` pairs. Every patch is then resolved into a
//! [`Column`] by the same builder, which fills defaults in a fixed order:
//! title, then width (depends on the title), then type (depends only on the
//! sample).

use crate::data::error::{TableError, TableResult};
use crate::data::infer::{first_sample, infer_or_default};
use crate::data::transpose::ColumnStore;
use crate::types::{Cell, Column, ColumnPatch, value_kind};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashSet;

// ============================================================================
// Columns Spec
// ============================================================================

/// Caller-supplied column specification, one variant per accepted shape
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ColumnsSpec {
    /// No spec; columns come from the data's keys
    #[default]
    Absent,
    /// `["a", "b"]`
    Names(Vec<String>),
    /// `[{"name": "a", ...}, ...]`
    Descriptors(Vec<ColumnPatch>),
    /// `{"a": "Title A", ...}`
    Titles(Vec<(String, String)>),
    /// `{"a": {"title": "Title A", ...}, ...}`
    Partials(Vec<(String, ColumnPatch)>),
}

impl ColumnsSpec {
    /// Detect the shape of a JSON columns spec.
    ///
    /// `null` is treated as absent. Anything that is not an array or an object
    /// fails with a schema error naming the shape received.
    pub fn from_value(value: &Value) -> TableResult<Self> {
        match value {
            Value::Null => Ok(ColumnsSpec::Absent),
            Value::Array(items) => Self::from_array(items),
            Value::Object(entries) => Self::from_object(entries),
            other => Err(TableError::schema(format!(
                "unsupported columns spec: {}; expected an array of names, an array of \
                 descriptors, an object of titles or an object of descriptors",
                value_kind(other)
            ))),
        }
    }

    fn from_array(items: &[Value]) -> TableResult<Self> {
        match items.first() {
            None => Ok(ColumnsSpec::Names(Vec::new())),
            Some(Value::String(_)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::String(name) => Ok(name.clone()),
                    other => Err(TableError::schema(format!(
                        "columns[{}]: expected a name, got {}",
                        idx,
                        value_kind(other)
                    ))),
                })
                .collect::<TableResult<Vec<_>>>()
                .map(ColumnsSpec::Names),
            Some(Value::Object(_)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::Object(_) => parse_patch(item, &format!("columns[{}]", idx)),
                    other => Err(TableError::schema(format!(
                        "columns[{}]: expected a descriptor, got {}",
                        idx,
                        value_kind(other)
                    ))),
                })
                .collect::<TableResult<Vec<_>>>()
                .map(ColumnsSpec::Descriptors),
            Some(other) => Err(TableError::schema(format!(
                "unsupported columns spec: array of {}",
                value_kind(other)
            ))),
        }
    }

    fn from_object(entries: &Map<String, Value>) -> TableResult<Self> {
        if entries.values().all(Value::is_string) {
            let titles = entries
                .iter()
                .map(|(name, title)| (name.clone(), title.as_str().unwrap_or_default().to_string()))
                .collect();
            return Ok(ColumnsSpec::Titles(titles));
        }

        entries
            .iter()
            .map(|(name, entry)| {
                let patch = match entry {
                    // A bare title among descriptors is accepted as a title-only descriptor
                    Value::String(title) => ColumnPatch::titled(title.clone()),
                    Value::Object(_) => parse_patch(entry, &format!("columns.{}", name))?,
                    other => {
                        return Err(TableError::schema(format!(
                            "columns.{}: expected a title or a descriptor, got {}",
                            name,
                            value_kind(other)
                        )));
                    }
                };
                Ok((name.clone(), patch))
            })
            .collect::<TableResult<Vec<_>>>()
            .map(ColumnsSpec::Partials)
    }
}

impl From<Vec<Column>> for ColumnsSpec {
    fn from(columns: Vec<Column>) -> Self {
        ColumnsSpec::Descriptors(columns.into_iter().map(ColumnPatch::from).collect())
    }
}

impl<'de> Deserialize<'de> for ColumnsSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ColumnsSpec::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn parse_patch(value: &Value, path: &str) -> TableResult<ColumnPatch> {
    ColumnPatch::deserialize(value)
        .map_err(|e| TableError::schema(format!("{}: invalid descriptor: {}", path, e)))
}

// ============================================================================
// Normalization
// ============================================================================

/// Resolve a columns spec into canonical columns.
///
/// Samples for width and type defaults are read from `store`; a column the
/// store does not contain gets a title-sized width and the `string` type.
pub fn normalize(spec: &ColumnsSpec, store: &ColumnStore) -> TableResult<Vec<Column>> {
    let patches = match spec {
        ColumnsSpec::Absent => from_store(store),
        ColumnsSpec::Names(names) => from_names(names),
        ColumnsSpec::Descriptors(patches) => from_descriptors(patches)?,
        ColumnsSpec::Titles(titles) => from_titles(titles),
        ColumnsSpec::Partials(partials) => from_partials(partials)?,
    };

    validate_names(&patches)?;

    let columns: Vec<Column> = patches
        .into_iter()
        .map(|(name, patch)| {
            let sample = store.get(&name).and_then(first_sample);
            ColumnBuilder::new(name, patch).resolve(sample)
        })
        .collect();

    tracing::debug!(columns = columns.len(), "normalized columns");
    Ok(columns)
}

fn from_store(store: &ColumnStore) -> Vec<(String, ColumnPatch)> {
    store
        .names()
        .map(|name| (name.to_string(), ColumnPatch::default()))
        .collect()
}

fn from_names(names: &[String]) -> Vec<(String, ColumnPatch)> {
    names
        .iter()
        .map(|name| (name.clone(), ColumnPatch::default()))
        .collect()
}

fn from_descriptors(patches: &[ColumnPatch]) -> TableResult<Vec<(String, ColumnPatch)>> {
    patches
        .iter()
        .enumerate()
        .map(|(idx, patch)| match patch.name.as_deref() {
            Some(name) => Ok((name.to_string(), patch.clone())),
            None => Err(TableError::schema(format!("columns[{}]: name is required", idx))),
        })
        .collect()
}

fn from_titles(titles: &[(String, String)]) -> Vec<(String, ColumnPatch)> {
    titles
        .iter()
        .map(|(name, title)| (name.clone(), ColumnPatch::titled(title.clone())))
        .collect()
}

fn from_partials(partials: &[(String, ColumnPatch)]) -> TableResult<Vec<(String, ColumnPatch)>> {
    partials
        .iter()
        .map(|(name, patch)| {
            if patch.title.as_deref().is_none_or(str::is_empty) {
                return Err(TableError::schema(format!(
                    "columns.{}: descriptor needs a non-empty title",
                    name
                )));
            }
            Ok((name.clone(), patch.clone()))
        })
        .collect()
}

/// Names must be non-empty and unique, whatever shape they came from, so a
/// normalized header always normalizes again to itself.
fn validate_names(patches: &[(String, ColumnPatch)]) -> TableResult<()> {
    let mut seen = HashSet::with_capacity(patches.len());
    for (idx, (name, _)) in patches.iter().enumerate() {
        if name.is_empty() {
            return Err(TableError::schema(format!("columns[{}]: name is required", idx)));
        }
        if !seen.insert(name.as_str()) {
            return Err(TableError::schema(format!("duplicate column name '{}'", name)));
        }
    }
    Ok(())
}

// ============================================================================
// Column Builder
// ============================================================================

/// Resolves an immutable partial descriptor into a full column.
struct ColumnBuilder {
    name: String,
    patch: ColumnPatch,
}

impl ColumnBuilder {
    fn new(name: String, patch: ColumnPatch) -> Self {
        Self { name, patch }
    }

    fn resolve(self, sample: Option<&Cell>) -> Column {
        let title = self.title();
        let width = self.width(&title, sample);
        let column_type = self
            .patch
            .column_type
            .clone()
            .unwrap_or_else(|| infer_or_default(sample));

        Column {
            name: self.name,
            title,
            width,
            column_type,
            unit: self.patch.unit,
            sortable: self.patch.sortable,
            skip_render: self.patch.skip_render,
        }
    }

    fn title(&self) -> String {
        match self.patch.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.name.clone(),
        }
    }

    fn width(&self, title: &str, sample: Option<&Cell>) -> f32 {
        if let Some(width) = self.patch.width.filter(|w| *w > 0.0) {
            return width;
        }
        let title_width = title.chars().count();
        let content_width = sample.map(Cell::display_width).unwrap_or(0);
        title_width.max(content_width) as f32
    }
}
