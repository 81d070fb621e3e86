//! Table pipeline and stateful facade.
//!
//! [`render_table`] runs the whole pipeline once as a pure function:
//! transposition, header normalization, then sorting. [`Table`] keeps the
//! results so a renderer can ask for successive windows while scrolling
//! without repeating that work.

use crate::config::TableConfig;
use crate::data::{
    ColumnStore, ColumnsSpec, RenderPayload, TableData, TableError, TableResult, TotalValues,
    compose, format_cell, normalize, sort_indexes,
};
use crate::profile_scope;
use crate::types::{Cell, Column, SortRequest};
use crate::virtual_scroll::{VirtualScrollState, VisibleRange};
use std::ops::Range;

/// Output of one pipeline run
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    pub header: Vec<Column>,
    pub store: ColumnStore,
    pub permutation: Vec<usize>,
    pub length: usize,
}

/// Transpose, normalize and sort in one pass
pub fn render_table(
    data: TableData,
    columns: &ColumnsSpec,
    controls: &SortRequest,
) -> TableResult<Rendered> {
    profile_scope!("render_table");

    let store = data.into_store()?;
    let header = normalize(columns, &store)?;
    let permutation = sort_permutation(&header, &store, controls);
    let length = store.row_count();

    tracing::debug!(rows = length, columns = header.len(), "rendered table");
    Ok(Rendered {
        header,
        store,
        permutation,
        length,
    })
}

/// Sort order for a request.
///
/// Returns the identity permutation when no column is requested, the column
/// is unknown, or the column is marked unsortable.
pub fn sort_permutation(header: &[Column], store: &ColumnStore, controls: &SortRequest) -> Vec<usize> {
    profile_scope!("sort_permutation");

    let row_count = store.row_count();
    let identity = || (0..row_count).collect::<Vec<_>>();

    let Some(by) = controls.by.as_deref() else {
        return identity();
    };
    let Some(column) = header.iter().find(|c| c.name == by) else {
        tracing::debug!(column = by, "sort column not in header, keeping original order");
        return identity();
    };
    if !column.is_sortable() {
        tracing::debug!(column = by, "column is not sortable, keeping original order");
        return identity();
    }

    match store.get(&column.name) {
        Some(values) => sort_indexes(values, &column.column_type, controls.ascending),
        None => identity(),
    }
}

// ============================================================================
// Table
// ============================================================================

/// A normalized table with its current sort order.
///
/// The column store is the only mutable state. The header is frozen when
/// data is loaded and is not re-inferred when cells change.
#[derive(Clone, Debug)]
pub struct Table {
    header: Vec<Column>,
    store: ColumnStore,
    permutation: Vec<usize>,
    sort: SortRequest,
    config: TableConfig,
    totals: Option<TotalValues>,
}

impl Table {
    /// Build a table from data in either orientation
    pub fn new(data: TableData, columns: &ColumnsSpec, config: TableConfig) -> TableResult<Self> {
        config.validate()?;
        let sort = SortRequest::default();
        let rendered = render_table(data, columns, &sort)?;

        Ok(Self {
            header: rendered.header,
            store: rendered.store,
            permutation: rendered.permutation,
            sort,
            config,
            totals: None,
        })
    }

    pub fn header(&self) -> &[Column] {
        &self.header
    }

    pub fn store(&self) -> &ColumnStore {
        &self.store
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn sort_request(&self) -> &SortRequest {
        &self.sort
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn row_count(&self) -> usize {
        self.permutation.len()
    }

    /// Change the sort order
    pub fn set_sort(&mut self, request: SortRequest) {
        self.permutation = sort_permutation(&self.header, &self.store, &request);
        self.sort = request;
    }

    /// Set or clear the totals row
    pub fn set_totals(&mut self, totals: Option<TotalValues>) {
        self.totals = totals;
    }

    /// Replace the data and columns, keeping the current sort request.
    ///
    /// On error the table is left exactly as it was.
    pub fn replace_data(&mut self, data: TableData, columns: &ColumnsSpec) -> TableResult<()> {
        let rendered = render_table(data, columns, &self.sort)?;
        self.header = rendered.header;
        self.store = rendered.store;
        self.permutation = rendered.permutation;
        Ok(())
    }

    /// Overwrite one cell of a source row and re-apply the sort.
    /// Returns the previous value.
    pub fn update_cell(&mut self, column: &str, source_row: usize, cell: Cell) -> TableResult<Cell> {
        let len = self.store.row_count();
        let values = self
            .store
            .get_mut(column)
            .ok_or_else(|| TableError::ColumnNotFound {
                name: column.to_string(),
            })?;
        let slot = values
            .get_mut(source_row)
            .ok_or(TableError::RowOutOfBounds {
                index: source_row,
                len,
            })?;
        let previous = std::mem::replace(slot, cell);

        self.permutation = sort_permutation(&self.header, &self.store, &self.sort);
        Ok(previous)
    }

    /// Compose the payload for a window of view positions
    pub fn render(&self, window: Range<usize>) -> RenderPayload {
        profile_scope!("compose");

        let mut payload = compose(&self.header, &self.store, &self.permutation, window);
        if self.config.enumerate {
            payload = payload.enumerate();
        }
        if let Some(rows) = &self.config.rows {
            payload = payload.with_row_props(rows);
        }
        if let Some(totals) = &self.totals {
            payload = payload.with_totals(totals);
        }
        payload
    }

    /// Compose the payload for whatever range `source` reports as visible
    pub fn render_visible(&self, source: &impl VisibleRange) -> RenderPayload {
        self.render(source.visible_range(self.row_count()))
    }

    /// Display text of the cell at a view position, with the configured
    /// precision and the column's unit applied
    pub fn cell_text(&self, view_index: usize, column: &str) -> Option<String> {
        let source = *self.permutation.get(view_index)?;
        let descriptor = self.header.iter().find(|c| c.name == column)?;
        let cell = self.store.cell(column, source)?;
        Some(format_cell(cell, descriptor, self.config.precision_for(column)))
    }

    /// Scroll state seeded from the virtualizer config
    pub fn scroll_state(&self) -> VirtualScrollState {
        self.config.virtualizer.scroll_state()
    }
}
