//! sembridge-analysis - Bridging quantification for SEM deposit captures
//!
//! Quantifies whether crystalline growth bridges adjacent mineral grains in
//! a scanning-electron-microscope capture. One call takes the uploaded
//! bytes and produces a fixed-schema numeric report plus an annotated
//! overlay:
//!
//! ```no_run
//! use sembridge_analysis::{AnalysisConfig, analyze_image_bytes};
//!
//! let bytes = std::fs::read("deposit_500x.png").unwrap();
//! let cfg = AnalysisConfig::default();
//! let analysis = analyze_image_bytes(&bytes, "deposit_500x.png", None, &cfg).unwrap();
//! println!("{}", serde_json::to_string_pretty(&analysis.report).unwrap());
//! ```
//!
//! Stages, each consuming only earlier outputs: quality gate, crystal
//! segmentation, grain segmentation, contact band, bridging classification,
//! habit classification, metric aggregation, overlay rendering.

pub mod bridging;
pub mod config;
pub mod contact;
pub mod crystal;
mod error;
pub mod grain;
pub mod habit;
pub mod magnification;
pub mod overlay;
pub mod pipeline;
pub mod quality;
pub mod report;

pub use bridging::bridging_labels;
pub use config::{
    AnalysisConfig, BridgingConfig, CrystalConfig, GrainConfig, HabitConfig, QualityConfig,
};
pub use contact::contact_band;
pub use crystal::{CrystalSegmentation, segment_crystals};
pub use error::{AnalysisError, AnalysisResult};
pub use grain::{GrainSegmentation, segment_grains};
pub use habit::{Habit, HabitRecord, classify_habits};
pub use magnification::parse_magnification;
pub use overlay::render_overlay;
pub use pipeline::{Analysis, analyze_image_bytes};
pub use quality::{QualityAssessment, assess_quality};
pub use report::{BridgingMetrics, RejectReason, Report, ReportSummary};
