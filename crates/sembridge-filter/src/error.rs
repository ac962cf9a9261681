//! Error types for sembridge-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sembridge_core::Error),

    /// Invalid filter parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for filtering operations
pub type FilterResult<T> = Result<T, FilterError>;
