//! Error types for table storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing tables.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Required column absent from the file
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Column cannot be coerced to the expected type
    #[error("column {column} cannot be read as {expected}")]
    ColumnType { column: String, expected: String },

    /// Null in a column that must be fully populated
    #[error("column {column} has a null at row {row}")]
    NullValue { column: String, row: usize },

    /// Table written by an incompatible version
    #[error("unsupported table schema version: {0}")]
    IncompatibleSchema(String),

    /// Refusing to replace an existing file
    #[error("output file {} already exists", path.display())]
    OutputExists { path: PathBuf },
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for pp_common::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OutputExists { path } => pp_common::Error::OutputExists { path },
            StoreError::Io(e) => pp_common::Error::Io(e),
            StoreError::MissingColumn(_)
            | StoreError::ColumnType { .. }
            | StoreError::NullValue { .. }
            | StoreError::IncompatibleSchema(_) => pp_common::Error::Schema(err.to_string()),
            other => pp_common::Error::Storage(other.to_string()),
        }
    }
}
