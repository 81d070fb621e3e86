//! Error types for table operations
//!
//! Every failure in the pipeline surfaces as a `TableError`. Validation errors
//! terminate the current call only; they never leave partially updated state.

use thiserror::Error;

/// Errors that can occur while shaping table data
#[derive(Error, Debug)]
pub enum TableError {
    /// Columns spec has an unsupported shape or an invalid descriptor
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Column-oriented data whose sequences disagree in length
    #[error("Shape error: column '{column}' has {found} values, expected {expected}")]
    Shape {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Input data is neither a sequence of rows nor a mapping of columns
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Referenced column does not exist
    #[error("Column '{name}' not found")]
    ColumnNotFound { name: String },

    /// Row index outside the table
    #[error("Row {index} out of bounds for table with {len} rows")]
    RowOutOfBounds { index: usize, len: usize },

    /// Configuration value outside its valid range
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    pub fn schema(message: impl Into<String>) -> Self {
        TableError::Schema {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        TableError::Config {
            message: message.into(),
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, TableError::Schema { .. })
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, TableError::Shape { .. })
    }
}

/// Result type alias for table operations
pub type TableResult<T> = Result<T, TableError>;
