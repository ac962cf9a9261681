//! Error types for sembridge-analysis
//!
//! Two tiers, per the pipeline contract: decode and accept-path encode
//! failures abort the whole request; every quality problem degrades to a
//! rejected report instead of an error.

use sembridge_io::IoError;
use thiserror::Error;

/// Errors that abort an analysis request
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The uploaded bytes could not be decoded into an image
    #[error("decode error: {0}")]
    Decode(#[source] IoError),

    /// The overlay could not be encoded on the accept path
    #[error("encode error: {0}")]
    Encode(#[source] IoError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sembridge_core::Error),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] sembridge_morph::MorphError),

    /// Filtering error
    #[error("filter error: {0}")]
    Filter(#[from] sembridge_filter::FilterError),

    /// Region analysis error
    #[error("region error: {0}")]
    Region(#[from] sembridge_region::RegionError),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
