//! Crystal segmentation
//!
//! Extracts the small dark precipitate features from the intensity field:
//! local contrast enhancement, smoothing, local-mean thresholding, then
//! mask cleanup (area floor, hole filling, one opening, one closing) and
//! 8-way labeling. The opening radius stays below the closing radius so
//! speckle noise is dropped without merging distinct crystals.

use crate::config::CrystalConfig;
use crate::error::AnalysisResult;
use sembridge_core::{BitMask, GrayImage, LabelMap};
use sembridge_filter::{adaptive_threshold_darker, equalize_adaptive, gaussian_blur_3x3};
use sembridge_morph::{Sel, close, open};
use sembridge_region::{
    ConnectivityType, fill_small_holes, label_components, remove_small_components,
};

/// Crystal mask, labeling and segmentation validity.
#[derive(Debug, Clone)]
pub struct CrystalSegmentation {
    /// Final binary crystal mask
    pub mask: BitMask,
    /// 8-way labeling of the mask, labels 1..=count
    pub labels: LabelMap,
    /// Number of labeled crystals
    pub count: u32,
    /// Mask coverage fraction of the image
    pub coverage: f64,
    /// Enough crystals and plausible coverage
    pub segmentation_ok: bool,
}

/// Segment crystals from the normalized intensity field.
pub fn segment_crystals(
    field: &GrayImage,
    cfg: &CrystalConfig,
) -> AnalysisResult<CrystalSegmentation> {
    let equalized = equalize_adaptive(field, cfg.clahe_tiles, cfg.clahe_clip_limit)?;
    let blurred = gaussian_blur_3x3(&equalized.to_bytes())?;
    let raw = adaptive_threshold_darker(&blurred, cfg.adapt_block, cfg.adapt_offset)?;

    let sized = remove_small_components(&raw, cfg.min_crystal_size, ConnectivityType::FourWay)?;
    let filled = fill_small_holes(&sized, cfg.min_hole_area, ConnectivityType::FourWay)?;
    let opened = open(&filled, &Sel::disk(cfg.open_radius)?)?;
    let mask = close(&opened, &Sel::disk(cfg.close_radius)?)?;

    let labels = label_components(&mask, ConnectivityType::EightWay)?;
    let count = labels.max_label();
    let coverage = mask.coverage();
    let segmentation_ok = count >= cfg.min_crystal_count && coverage <= cfg.max_coverage;

    log::debug!("crystals: count={count} coverage={coverage:.4} ok={segmentation_ok}");

    Ok(CrystalSegmentation {
        mask,
        labels,
        count,
        coverage,
        segmentation_ok,
    })
}
