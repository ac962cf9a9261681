//! Pipeline configuration
//!
//! Every threshold, radius and count the pipeline consults lives here, in
//! one immutable value passed into each stage. Defaults reproduce the
//! reference tuning; deployments override individual fields from a JSON
//! document, so no threshold change requires a code change. Tests build
//! their own values per run, keeping runs independent.

use serde::{Deserialize, Serialize};

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub quality: QualityConfig,
    pub crystals: CrystalConfig,
    pub grains: GrainConfig,
    pub bridging: BridgingConfig,
    pub habits: HabitConfig,
}

impl AnalysisConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Quality-gate thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Lowest acceptable magnification
    pub mag_min: u32,
    /// Highest acceptable magnification
    pub mag_max: u32,
    /// Minimum Laplacian-variance focus statistic
    pub min_laplacian_var: f64,
    /// Minimum intensity range (max - min) over the field
    pub min_contrast: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        QualityConfig {
            mag_min: 200,
            mag_max: 2000,
            min_laplacian_var: 40.0,
            min_contrast: 0.12,
        }
    }
}

/// Crystal segmentation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalConfig {
    /// CLAHE tile grid per axis
    pub clahe_tiles: u32,
    /// CLAHE histogram clip fraction
    pub clahe_clip_limit: f64,
    /// Adaptive-threshold window side (odd)
    pub adapt_block: u32,
    /// Adaptive-threshold offset below the window mean
    pub adapt_offset: i32,
    /// Minimum component area kept, in pixels
    pub min_crystal_size: u32,
    /// Holes smaller than this are filled, in pixels
    pub min_hole_area: u32,
    /// Disk radius of the speckle-suppressing opening
    pub open_radius: u32,
    /// Disk radius of the gap-bridging closing
    pub close_radius: u32,
    /// Fewer labeled crystals than this marks the segmentation suspect
    pub min_crystal_count: u32,
    /// More mask coverage than this marks the segmentation suspect
    pub max_coverage: f64,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        CrystalConfig {
            clahe_tiles: 8,
            clahe_clip_limit: 0.01,
            adapt_block: 51,
            adapt_offset: 2,
            min_crystal_size: 30,
            min_hole_area: 30,
            open_radius: 1,
            close_radius: 2,
            min_crystal_count: 10,
            max_coverage: 0.85,
        }
    }
}

/// Grain segmentation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrainConfig {
    /// Square side of the background opening
    pub open_size: u32,
    /// Square side of the background closing
    pub close_size: u32,
    /// At most this many grains are kept
    pub max_grains: usize,
    /// Minimum grain area as a fraction of the image
    pub min_area_fraction: f64,
}

impl Default for GrainConfig {
    fn default() -> Self {
        GrainConfig {
            open_size: 5,
            close_size: 7,
            max_grains: 3,
            min_area_fraction: 0.01,
        }
    }
}

/// Contact-band and bridging parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgingConfig {
    /// Disk radius of the grain influence zone
    pub influence_radius: u32,
    /// Disk radius of the grain-touch test
    pub touch_radius: u32,
    /// bridging_success: minimum bridging crystal count
    pub min_count: u32,
    /// bridging_success: minimum bridging coverage
    pub min_coverage: f64,
    /// bridging_success: minimum bridging fraction of all crystals
    pub min_fraction: f64,
}

impl Default for BridgingConfig {
    fn default() -> Self {
        BridgingConfig {
            influence_radius: 4,
            touch_radius: 2,
            min_count: 1,
            min_coverage: 0.01,
            min_fraction: 0.01,
        }
    }
}

/// Habit classification thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitConfig {
    /// Aspect ratio at or above which a solid region is needle-like
    pub needle_aspect_ratio: f64,
    /// Circularity at or above which a solid region is spherical
    pub spherical_circularity: f64,
    /// Solidity floor shared by the needle and spherical rules
    pub min_solidity: f64,
    /// Aspect-ratio floor of the blocky rule
    pub blocky_aspect_min: f64,
    /// Solidity floor of the blocky rule
    pub blocky_solidity: f64,
}

impl Default for HabitConfig {
    fn default() -> Self {
        HabitConfig {
            needle_aspect_ratio: 3.0,
            spherical_circularity: 0.75,
            min_solidity: 0.80,
            blocky_aspect_min: 1.2,
            blocky_solidity: 0.90,
        }
    }
}
