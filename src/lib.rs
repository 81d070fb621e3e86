//! Tabular view normalization.
//!
//! Accepts a table in either orientation (a list of row records or a map of
//! column sequences) plus a loosely shaped column description, and produces a
//! normalized header, a column store, a stable sort permutation and windowed
//! render payloads for a virtualized renderer.

pub mod config;
pub mod constants;
pub mod data;
pub mod perf;
pub mod table;
pub mod types;
pub mod virtual_scroll;

pub use config::{RowProps, RowsConfig, TableConfig, VirtualizerConfig};
pub use data::{
    ColumnStore, ColumnsSpec, RenderPayload, TableData, TableError, TableResult, TotalValues,
};
pub use table::{Rendered, Table, render_table};
pub use types::{Cell, Column, ColumnPatch, ColumnType, Row, SortRequest};
pub use virtual_scroll::{VirtualScrollState, VisibleRange};
