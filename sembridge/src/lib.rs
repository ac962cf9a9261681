//! Sembridge - SEM deposit bridging quantification
//!
//! Quantifies scanning-electron-microscope captures of mineral deposits to
//! assess whether crystalline growth bridges adjacent grains, a proxy for
//! structural cementation strength.
//!
//! # Overview
//!
//! One call analyzes one capture: quality gating, crystal and grain
//! segmentation, contact-band construction, bridging and habit
//! classification, metric aggregation and overlay rendering.
//!
//! # Example
//!
//! ```no_run
//! use sembridge::analysis::{AnalysisConfig, analyze_image_bytes};
//!
//! let bytes = std::fs::read("deposit_500x.png").unwrap();
//! let result = analyze_image_bytes(&bytes, "deposit_500x.png", None, &AnalysisConfig::default());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use sembridge_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use sembridge_analysis as analysis;
pub use sembridge_filter as filter;
pub use sembridge_io as io;
pub use sembridge_morph as morph;
pub use sembridge_region as region;
