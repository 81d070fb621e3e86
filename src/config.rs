//! Table configuration.
//!
//! All settings are optional in JSON and fall back to the defaults in
//! [`crate::constants`]. The scroll container itself is owned by the renderer;
//! only its measured viewport height is passed in here.
//!
//! ```json
//! {
//!   "virtualizer": { "overscan": 20, "rowHeight": 28.0, "viewportHeight": 600.0 },
//!   "precision": { "price": 2 },
//!   "rows": { "0": { "class": "highlight" } },
//!   "enumerate": true
//! }
//! ```

use crate::constants::{DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT, DEFAULT_VIEWPORT_HEIGHT};
use crate::data::{TableError, TableResult};
use crate::virtual_scroll::VirtualScrollState;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

// ============================================================================
// Virtualizer
// ============================================================================

/// Settings handed to the virtualizer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualizerConfig {
    /// Rows rendered beyond each edge of the viewport
    pub overscan: usize,
    /// Estimated height of one row in pixels
    pub row_height: f32,
    /// Height of the scroll container's viewport in pixels
    pub viewport_height: f32,
}

impl Default for VirtualizerConfig {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl VirtualizerConfig {
    /// Fresh scroll state positioned at the top
    pub fn scroll_state(&self) -> VirtualScrollState {
        VirtualScrollState::new(self.viewport_height, self.row_height, self.overscan)
    }
}

// ============================================================================
// Row Props
// ============================================================================

/// Attributes a renderer attaches to one row
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowProps {
    #[serde(default)]
    pub class: String,
    #[serde(flatten)]
    pub attrs: BTreeMap<String, Value>,
}

impl RowProps {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attrs: BTreeMap::new(),
        }
    }
}

/// Per-row props keyed by source row index.
///
/// Props belong to source rows, so after sorting they follow their row to its
/// new view position.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowsConfig {
    Indexed(BTreeMap<usize, RowProps>),
    Sequence(Vec<Option<RowProps>>),
}

impl RowsConfig {
    /// Props of a source row
    pub fn get(&self, source_row: usize) -> Option<&RowProps> {
        match self {
            RowsConfig::Indexed(map) => map.get(&source_row),
            RowsConfig::Sequence(list) => list.get(source_row).and_then(Option::as_ref),
        }
    }
}

impl<'de> Deserialize<'de> for RowsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, props)| {
                    let index = key.parse::<usize>().map_err(|_| {
                        D::Error::custom(format!("rows: key '{}' is not a row index", key))
                    })?;
                    let props = RowProps::deserialize(props).map_err(D::Error::custom)?;
                    Ok((index, props))
                })
                .collect::<Result<BTreeMap<_, _>, D::Error>>()
                .map(RowsConfig::Indexed),
            Value::Array(items) => items
                .into_iter()
                .map(|item| Option::<RowProps>::deserialize(item).map_err(D::Error::custom))
                .collect::<Result<Vec<_>, D::Error>>()
                .map(RowsConfig::Sequence),
            other => Err(D::Error::custom(format!(
                "rows must be an object or an array, got {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Table Config
// ============================================================================

/// Render configuration for one table
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    pub virtualizer: VirtualizerConfig,
    /// Decimal places per column name
    pub precision: HashMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<RowsConfig>,
    /// Attach 1-based row numbers to rendered rows
    pub enumerate: bool,
}

impl TableConfig {
    /// Parse and validate a config from JSON text
    pub fn from_json_str(json: &str) -> TableResult<Self> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> TableResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded table config");
        Ok(config)
    }

    /// Reject values the virtualizer cannot work with
    pub fn validate(&self) -> TableResult<()> {
        let v = &self.virtualizer;
        if !(v.row_height.is_finite() && v.row_height > 0.0) {
            return Err(TableError::config(format!(
                "virtualizer.rowHeight must be positive, got {}",
                v.row_height
            )));
        }
        if !(v.viewport_height.is_finite() && v.viewport_height >= 0.0) {
            return Err(TableError::config(format!(
                "virtualizer.viewportHeight must not be negative, got {}",
                v.viewport_height
            )));
        }
        Ok(())
    }

    /// Decimal places configured for a column
    pub fn precision_for(&self, column: &str) -> Option<usize> {
        self.precision.get(column).copied()
    }
}
