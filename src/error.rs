use thiserror::Error;

use crate::data::model::CellValue;

/// Failures that make a whole file unusable.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("No valid launch records ({skipped} rows skipped)")]
    Empty { skipped: usize },
}

/// Reasons a single row is rejected. The row is skipped, loading continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("'{column}' is empty")]
    MissingValue { column: &'static str },

    #[error("payload mass {0} is not a non-negative number")]
    InvalidPayload(CellValue),

    #[error("class {0} is neither 0 nor 1")]
    InvalidClass(CellValue),
}
