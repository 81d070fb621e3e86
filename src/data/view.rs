//! View composition
//!
//! Joins the resolved header, the column store and the sort permutation over
//! a visible window into the payload a renderer paints. Composition never
//! sorts or infers; it reads through the permutation for the window only, so
//! its cost is proportional to the window and the column count.

use crate::config::{RowProps, RowsConfig};
use crate::data::format::{TotalValues, prepare_totals};
use crate::data::transpose::ColumnStore;
use crate::types::{Cell, Column, Row};
use serde::Serialize;
use std::ops::Range;

/// Everything a renderer needs for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    /// Rendered columns, in display order
    pub header: Vec<Column>,
    /// Rows of the window, in view order
    pub visible_rows: Vec<Row>,
    /// Source row index of each visible row
    pub source_indexes: Vec<usize>,
    /// View position of the first visible row
    pub start: usize,
    /// Total row count of the table
    pub length: usize,
    /// 1-based view positions, when enumeration is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_numbers: Option<Vec<usize>>,
    /// Props of each visible row, following the source row through sorting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_props: Option<Vec<Option<RowProps>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<Row>,
}

/// Compose the payload for `window` over the sorted view.
///
/// The window is clamped to the permutation. Columns marked `skip_render` are
/// left out of both the header and the rows. A permutation entry pointing
/// outside the store yields a row of `Null` cells.
pub fn compose(
    columns: &[Column],
    store: &ColumnStore,
    permutation: &[usize],
    window: Range<usize>,
) -> RenderPayload {
    let length = permutation.len();
    let end = window.end.min(length);
    let start = window.start.min(end);

    let header: Vec<Column> = columns.iter().filter(|c| c.is_rendered()).cloned().collect();
    let sources: Vec<Option<&[Cell]>> = header.iter().map(|c| store.get(&c.name)).collect();

    let source_indexes: Vec<usize> = permutation[start..end].to_vec();
    let visible_rows = source_indexes
        .iter()
        .map(|&source| {
            let mut row = Row::with_capacity(header.len());
            for (column, &values) in header.iter().zip(&sources) {
                let cell = values
                    .and_then(|v| v.get(source))
                    .cloned()
                    .unwrap_or_default();
                row.push(column.name.clone(), cell);
            }
            row
        })
        .collect();

    RenderPayload {
        header,
        visible_rows,
        source_indexes,
        start,
        length,
        row_numbers: None,
        row_props: None,
        totals: None,
    }
}

impl RenderPayload {
    /// Attach 1-based row numbers for the visible rows
    pub fn enumerate(mut self) -> Self {
        let first = self.start + 1;
        self.row_numbers = Some((first..first + self.visible_rows.len()).collect());
        self
    }

    /// Attach row props, re-keyed from source rows to view positions
    pub fn with_row_props(mut self, rows: &RowsConfig) -> Self {
        self.row_props = Some(
            self.source_indexes
                .iter()
                .map(|&source| rows.get(source).cloned())
                .collect(),
        );
        self
    }

    /// Attach a totals row aligned with the rendered header
    pub fn with_totals(mut self, totals: &TotalValues) -> Self {
        self.totals = Some(prepare_totals(totals, &self.header));
        self
    }

    /// Number of rows in the window
    pub fn visible_len(&self) -> usize {
        self.visible_rows.len()
    }
}
