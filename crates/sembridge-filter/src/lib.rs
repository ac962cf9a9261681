//! sembridge-filter - Intensity-field filtering for SEM deposit analysis
//!
//! This crate provides the per-pixel numeric stages that precede
//! segmentation:
//!
//! - Contrast-limited adaptive histogram equalization ([`equalize_adaptive`])
//! - 3x3 Gaussian smoothing ([`gaussian_blur_3x3`])
//! - Integral-image windowed means ([`IntegralImage`])
//! - Local-mean adaptive thresholding ([`adaptive_threshold_darker`])
//! - The Laplacian-variance focus statistic ([`laplacian_variance`])

pub mod convolve;
pub mod equalize;
mod error;
pub mod threshold;
pub mod windowed;

pub use convolve::{gaussian_blur_3x3, laplacian_variance};
pub use equalize::equalize_adaptive;
pub use error::{FilterError, FilterResult};
pub use threshold::adaptive_threshold_darker;
pub use windowed::IntegralImage;
