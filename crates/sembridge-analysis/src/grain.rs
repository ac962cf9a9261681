//! Grain segmentation
//!
//! Grains are the large background regions left between crystals: the
//! crystal mask is inverted, smoothed with square openings/closings large
//! enough to drop thin protrusions and seal small gaps, and labeled. Only
//! components covering at least a configured fraction of the image are
//! grain candidates; the largest few are kept and relabeled 1..K.
//!
//! Ranking ties break toward the lower label, which scan-order labeling
//! makes deterministic.

use crate::config::GrainConfig;
use crate::error::AnalysisResult;
use sembridge_core::{BitMask, LabelMap};
use sembridge_morph::{Sel, close, open};
use sembridge_region::{ConnectivityType, keep_largest_components, label_components};

/// Grain labeling and validity.
#[derive(Debug, Clone)]
pub struct GrainSegmentation {
    /// Labeling of the kept grains, labels 1..=count
    pub labels: LabelMap,
    /// Number of kept grains (at most the configured maximum)
    pub count: u32,
    /// At least two grains found; bridging is undefined below that
    pub grains_ok: bool,
}

/// Segment grains from the crystal mask.
pub fn segment_grains(crystal_mask: &BitMask, cfg: &GrainConfig) -> AnalysisResult<GrainSegmentation> {
    let background = crystal_mask.invert();
    let opened = open(&background, &Sel::square(cfg.open_size)?)?;
    let smoothed = close(&opened, &Sel::square(cfg.close_size)?)?;

    let all_labels = label_components(&smoothed, ConnectivityType::EightWay)?;
    let min_area = (cfg.min_area_fraction * crystal_mask.pixel_count() as f64) as u32;
    let kept = keep_largest_components(&all_labels, cfg.max_grains, min_area)?;

    // relabel the kept components 1..K in scan order
    let labels = label_components(&kept, ConnectivityType::EightWay)?;
    let count = labels.max_label();
    let grains_ok = count >= 2;

    log::debug!("grains: count={count} ok={grains_ok}");

    Ok(GrainSegmentation {
        labels,
        count,
        grains_ok,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Crystal mask splitting the image into `parts` background slabs with
    /// vertical foreground channels of the given width.
    fn channel_mask(width: u32, height: u32, parts: u32, channel_w: u32) -> BitMask {
        let mut mask = BitMask::new(width, height).unwrap();
        let slab = width / parts;
        for p in 1..parts {
            let x0 = p * slab;
            for y in 0..height {
                for x in x0..(x0 + channel_w).min(width) {
                    mask.set(x, y, true).unwrap();
                }
            }
        }
        mask
    }

    #[test]
    fn test_two_slabs_give_two_grains() {
        let mask = channel_mask(200, 120, 2, 9);
        let seg = segment_grains(&mask, &GrainConfig::default()).unwrap();
        assert_eq!(seg.count, 2);
        assert!(seg.grains_ok);
    }

    #[test]
    fn test_empty_crystal_mask_is_single_grain() {
        let mask = BitMask::new(100, 100).unwrap();
        let seg = segment_grains(&mask, &GrainConfig::default()).unwrap();
        assert_eq!(seg.count, 1);
        assert!(!seg.grains_ok);
    }

    #[test]
    fn test_narrow_channel_is_closed_over() {
        // a 3px channel is sealed by the 7x7 closing: one grain remains
        let mask = channel_mask(200, 120, 2, 3);
        let seg = segment_grains(&mask, &GrainConfig::default()).unwrap();
        assert_eq!(seg.count, 1);
        assert!(!seg.grains_ok);
    }

    #[test]
    fn test_keeps_at_most_max_grains() {
        let mask = channel_mask(400, 120, 5, 9);
        let seg = segment_grains(&mask, &GrainConfig::default()).unwrap();
        assert_eq!(seg.count, 3);
    }

    #[test]
    fn test_labels_are_consecutive_scan_order() {
        let mask = channel_mask(200, 120, 2, 9);
        let seg = segment_grains(&mask, &GrainConfig::default()).unwrap();
        // border rims are trimmed by the closing, probe well inside
        assert_eq!(seg.labels.get(10, 10), 1);
        assert_eq!(seg.labels.get(190, 10), 2);
    }
}
