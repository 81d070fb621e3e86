//! Table data shaping
//!
//! This module turns loosely specified table input into the structures a
//! renderer binds to:
//!
//! - `transpose`: row/column conversion and the canonical `ColumnStore`
//! - `infer`: column type inference from a single sample
//! - `columns`: columns spec shapes and header normalization
//! - `sort`: type-aware, stable sorting into a row permutation
//! - `view`: composing a visible window into a `RenderPayload`
//! - `format`: display text and totals rows
//!
//! ## Error Handling
//!
//! All fallible operations return `TableResult<T>` with a `TableError`:
//! - `Schema`: unsupported columns spec or invalid descriptor
//! - `Shape`: column sequences of different lengths
//! - `InvalidData`: input that is neither rows nor columns

mod columns;
mod error;
mod format;
mod infer;
mod sort;
mod transpose;
mod view;

pub use columns::*;
pub use error::*;
pub use format::*;
pub use infer::*;
pub use sort::*;
pub use transpose::*;
pub use view::*;
