//! Image quality gate
//!
//! Resolves the magnification, scores focus and contrast, and reports the
//! two validity flags consumed by the aggregator. Nothing here rejects by
//! itself; the pipeline combines these flags with the segmentation checks.

use crate::config::QualityConfig;
use crate::magnification::parse_magnification;
use sembridge_core::{ByteImage, GrayImage};
use sembridge_filter::laplacian_variance;

/// Quality measurements and validity flags for one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    /// Resolved magnification, `None` when unknown
    pub mag: Option<u32>,
    /// Magnification known and inside the acceptance range
    pub zoom_ok: bool,
    /// Laplacian-variance focus statistic over the 8-bit rendering
    pub sharpness: f64,
    /// Intensity range (max - min) over the float field
    pub contrast: f64,
    /// Sharpness and contrast both above their minima
    pub quality_ok: bool,
}

/// Assess a decoded capture.
///
/// `mag_override` wins over filename parsing. Sharpness is measured on the
/// raw 8-bit rendering (`base`), before any enhancement.
pub fn assess_quality(
    field: &GrayImage,
    base: &ByteImage,
    filename: &str,
    mag_override: Option<u32>,
    cfg: &QualityConfig,
) -> QualityAssessment {
    let mag = mag_override.or_else(|| parse_magnification(filename));
    let zoom_ok = mag.is_some_and(|m| m >= cfg.mag_min && m <= cfg.mag_max);

    let sharpness = laplacian_variance(base);
    let (min, max) = field.min_max();
    let contrast = (max - min) as f64;
    let quality_ok = sharpness >= cfg.min_laplacian_var && contrast >= cfg.min_contrast;

    log::debug!(
        "quality: mag={mag:?} zoom_ok={zoom_ok} sharpness={sharpness:.2} contrast={contrast:.3}"
    );

    QualityAssessment {
        mag,
        zoom_ok,
        sharpness,
        contrast,
        quality_ok,
    }
}
