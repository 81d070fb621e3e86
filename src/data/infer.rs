//! Column type inference
//!
//! A column's type is decided from a single representative sample: the first
//! non-null cell. The column is never scanned for mixed types, so a column
//! whose first value is `"12"` and whose later values are words is typed as
//! `number`. Sorting such a column coerces the words to zero.

use crate::types::{Cell, ColumnType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive date-time layouts accepted as dates, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts accepted as dates, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"];

/// Infer the type tag of a single cell.
///
/// Returns `None` for null, which carries no type information; callers fall
/// back to [`ColumnType::String`].
pub fn infer(sample: &Cell) -> Option<ColumnType> {
    let column_type = match sample {
        Cell::Null => return None,
        Cell::List(_) | Cell::Object(_) => ColumnType::List,
        Cell::Boolean(_) => ColumnType::Boolean,
        Cell::Integer(_) | Cell::Number(_) => ColumnType::Number,
        Cell::Date(_) => ColumnType::Date,
        Cell::Text(text) => {
            if parse_number(text).is_some() {
                ColumnType::Number
            } else if parse_date(text).is_some() {
                ColumnType::Date
            } else {
                ColumnType::String
            }
        }
    };
    Some(column_type)
}

/// Infer a column type from an optional sample, defaulting to `string`
pub fn infer_or_default(sample: Option<&Cell>) -> ColumnType {
    sample.and_then(infer).unwrap_or_default()
}

/// The representative sample of a column: its first non-null cell
pub fn first_sample(values: &[Cell]) -> Option<&Cell> {
    values.iter().find(|cell| !cell.is_null())
}

/// Parse text as a finite number. Surrounding whitespace is ignored; empty
/// text, `NaN` and infinities are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse text as a calendar date or instant.
///
/// Accepts RFC 3339 / RFC 2822 timestamps, ISO-like naive date-times (taken as
/// UTC) and a handful of common date-only layouts (midnight UTC).
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

// ============================================================================
// Text Classification
// ============================================================================

/// Display classification of a raw text value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Number,
    String,
    Date,
    Null,
}

/// Classify raw text for display purposes (alignment, styling).
///
/// Numbers win over dates, so `"2024"` is a number.
pub fn classify_text(text: Option<&str>) -> CellKind {
    let Some(text) = text else {
        return CellKind::Null;
    };
    if parse_number(text).is_some() {
        CellKind::Number
    } else if parse_date(text).is_some() {
        CellKind::Date
    } else {
        CellKind::String
    }
}
