//! Error types for sembridge-region

use thiserror::Error;

/// Errors that can occur during region analysis
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sembridge_core::Error),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for region analysis
pub type RegionResult<T> = Result<T, RegionError>;
