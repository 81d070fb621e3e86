//! Cell display formatting and totals rows

use crate::types::{Cell, Column, Row};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render a cell to display text.
///
/// Numbers use `precision` decimal places when given; otherwise whole numbers
/// print without a fraction. The column's unit, if any, is appended to
/// non-empty values.
pub fn format_cell(cell: &Cell, column: &Column, precision: Option<usize>) -> String {
    let text = match (cell, precision) {
        (Cell::Integer(n), Some(places)) => format!("{:.*}", places, *n as f64),
        (Cell::Number(n), Some(places)) if n.is_finite() => format!("{:.*}", places, n),
        _ => cell.to_string(),
    };

    match column.unit.as_deref() {
        Some(unit) if !text.is_empty() && !unit.is_empty() => format!("{} {}", text, unit),
        _ => text,
    }
}

// ============================================================================
// Totals
// ============================================================================

/// Summary values shown below the table body
#[derive(Clone, Debug, PartialEq)]
pub enum TotalValues {
    /// One value per rendered column, by position
    Sequence(Vec<Cell>),
    /// Values keyed by column name
    Mapping(Row),
}

impl<'de> Deserialize<'de> for TotalValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(TotalValues::Sequence(
                items.into_iter().map(Cell::from).collect(),
            )),
            Value::Object(fields) => Ok(TotalValues::Mapping(Row::from(fields))),
            other => Err(serde::de::Error::custom(format!(
                "totals must be an array or an object, got {}",
                other
            ))),
        }
    }
}

/// Align totals with the rendered header, producing a row keyed by column
/// name. Columns without a total get `Null`.
pub fn prepare_totals(totals: &TotalValues, header: &[Column]) -> Row {
    let mut row = Row::with_capacity(header.len());
    for (idx, column) in header.iter().enumerate() {
        let value = match totals {
            TotalValues::Sequence(values) => values.get(idx),
            TotalValues::Mapping(values) => values.get(&column.name),
        };
        row.push(column.name.clone(), value.cloned().unwrap_or_default());
    }
    row
}
