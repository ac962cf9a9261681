//! The analysis pipeline
//!
//! One-shot, synchronous and deterministic: decode, gate, segment,
//! classify, aggregate, render. Every invocation allocates its own
//! buffers; the only shared input is the immutable configuration, so
//! callers may run any number of analyses in parallel.
//!
//! Failure tiers: undecodable bytes and an unencodable overlay on the
//! accept path abort the request; every quality problem degrades to a
//! rejected report with reason codes, and a best-effort overlay whose own
//! failure is swallowed.

use crate::bridging::bridging_labels;
use crate::config::AnalysisConfig;
use crate::contact::contact_band;
use crate::crystal::{CrystalSegmentation, segment_crystals};
use crate::error::{AnalysisError, AnalysisResult};
use crate::grain::{GrainSegmentation, segment_grains};
use crate::habit::{Habit, HabitRecord, classify_habits};
use crate::overlay::render_overlay;
use crate::quality::{QualityAssessment, assess_quality};
use crate::report::{BridgingMetrics, RejectReason, Report, ReportSummary};
use sembridge_core::{BitMask, ByteImage, LabelMap};
use sembridge_region::measure_regions;
use std::collections::BTreeSet;

const EPS: f64 = 1e-6;

/// Result of one analysis: the report plus the overlay when rendering was
/// possible. `None` is a capability limitation, not an error.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: Report,
    pub overlay_png: Option<Vec<u8>>,
}

/// Analyze one uploaded capture.
///
/// `filename` is used only for magnification extraction and as the image
/// id in the report; `mag_override` bypasses filename parsing.
///
/// # Errors
///
/// [`AnalysisError::Decode`] when the bytes cannot be decoded;
/// [`AnalysisError::Encode`] when the overlay cannot be encoded for an
/// accepted capture.
pub fn analyze_image_bytes(
    bytes: &[u8],
    filename: &str,
    mag_override: Option<u32>,
    cfg: &AnalysisConfig,
) -> AnalysisResult<Analysis> {
    let field = sembridge_io::decode_gray(bytes).map_err(AnalysisError::Decode)?;
    let base = field.to_bytes();
    log::debug!(
        "analyzing {filename}: {}x{}",
        field.width(),
        field.height()
    );

    let quality = assess_quality(&field, &base, filename, mag_override, &cfg.quality);
    let crystals = segment_crystals(&field, &cfg.crystals)?;
    let grains = segment_grains(&crystals.mask, &cfg.grains)?;

    let summary = ReportSummary {
        image: filename.to_string(),
        mag: quality.mag,
        sharpness_laplacian_var: quality.sharpness,
        contrast_range: quality.contrast,
        n_grains: grains.count,
        n_cristaux_total: crystals.count,
        coverage_all: crystals.coverage,
    };

    let good_image =
        quality.zoom_ok && quality.quality_ok && crystals.segmentation_ok && grains.grains_ok;

    if !good_image {
        let reasons = collect_reasons(&quality, &crystals, &grains);
        log::debug!("rejected {filename}: {:?}", reasons);

        // best-effort overlay with an empty bridging set; its failure is
        // a capability limitation, not an error
        let overlay_png = match best_effort_overlay(&base, &crystals.labels, &grains, cfg) {
            Ok(png) => Some(png),
            Err(e) => {
                log::warn!("best-effort overlay failed for {filename}: {e}");
                None
            }
        };

        return Ok(Analysis {
            report: Report::rejected(summary, reasons),
            overlay_png,
        });
    }

    let band = contact_band(&grains.labels, cfg.bridging.influence_radius)?;
    let regions = measure_regions(&crystals.labels);
    let bridging = bridging_labels(&regions, &grains.labels, &band, cfg.bridging.touch_radius)?;
    let habits = classify_habits(&regions, &cfg.habits);

    let metrics = aggregate_metrics(&crystals, &bridging, &habits, cfg);

    // the accept path must deliver the overlay or fail the request
    let overlay = render_overlay(&base, &crystals.labels, &bridging, &band, &grains.labels)?;
    let png = sembridge_io::encode_rgb_png(&overlay).map_err(AnalysisError::Encode)?;

    Ok(Analysis {
        report: Report::accepted(summary, metrics),
        overlay_png: Some(png),
    })
}

/// Reason codes in fixed check order. An unknown magnification and an
/// out-of-range one are mutually exclusive.
fn collect_reasons(
    quality: &QualityAssessment,
    crystals: &CrystalSegmentation,
    grains: &GrainSegmentation,
) -> Vec<RejectReason> {
    let mut reasons = Vec::new();
    if quality.mag.is_none() {
        reasons.push(RejectReason::UnknownMagnification);
    } else if !quality.zoom_ok {
        reasons.push(RejectReason::ZoomOutOfRange);
    }
    if !quality.quality_ok {
        reasons.push(RejectReason::InsufficientQuality);
    }
    if !crystals.segmentation_ok {
        reasons.push(RejectReason::SuspectCrystalSegmentation);
    }
    if !grains.grains_ok {
        reasons.push(RejectReason::FewerThanTwoGrains);
    }
    reasons
}

/// Overlay for the reject path: empty bridging set, and a contact band
/// only when at least one grain exists.
fn best_effort_overlay(
    base: &ByteImage,
    crystal_labels: &LabelMap,
    grains: &GrainSegmentation,
    cfg: &AnalysisConfig,
) -> AnalysisResult<Vec<u8>> {
    let band = if grains.count >= 1 {
        contact_band(&grains.labels, cfg.bridging.influence_radius)?
    } else {
        BitMask::new(base.width(), base.height())?
    };
    let overlay = render_overlay(base, crystal_labels, &BTreeSet::new(), &band, &grains.labels)?;
    sembridge_io::encode_rgb_png(&overlay).map_err(AnalysisError::Encode)
}

/// Combine segmentation, bridging and habit results into the metric block.
fn aggregate_metrics(
    crystals: &CrystalSegmentation,
    bridging: &BTreeSet<u32>,
    habits: &[HabitRecord],
    cfg: &AnalysisConfig,
) -> BridgingMetrics {
    let n_total = crystals.count;
    let total_px = crystals.labels.pixel_count() as f64;

    let n_bridge = bridging.len() as u32;
    let pct_bridge = if n_total > 0 {
        n_bridge as f64 / n_total as f64
    } else {
        0.0
    };
    let coverage_bridging = crystals.labels.mask_of_set(bridging).count() as f64 / total_px;

    let density_all_per_mpx = n_total as f64 / total_px * 1e6;
    let density_bridging_per_mpx = n_bridge as f64 / total_px * 1e6;

    let habit_fraction = |habit: Habit| -> f64 {
        if n_total == 0 {
            return 0.0;
        }
        habits.iter().filter(|r| r.habit == habit).count() as f64 / n_total as f64
    };
    let bridging_habit_fraction = |habit: Habit| -> f64 {
        if n_bridge == 0 {
            return 0.0;
        }
        habits
            .iter()
            .filter(|r| r.habit == habit && bridging.contains(&r.label))
            .count() as f64
            / n_bridge as f64
    };

    let n_useless = n_total - n_bridge;
    let pct_useless = 1.0 - pct_bridge;
    let coverage_useless = (crystals.coverage - coverage_bridging).max(0.0);

    let useless_to_useful_ratio = coverage_useless / (coverage_bridging + EPS);
    let useful_fraction_of_deposit = coverage_bridging / (crystals.coverage + EPS);

    let bridging_success = n_bridge >= cfg.bridging.min_count
        && coverage_bridging >= cfg.bridging.min_coverage
        && pct_bridge >= cfg.bridging.min_fraction;
    let bridging_strength_score = 0.5 * pct_bridge + 0.5 * useful_fraction_of_deposit;

    BridgingMetrics {
        density_all_per_mpx,
        n_cristaux_pontage: n_bridge,
        pct_cristaux_pontage: pct_bridge,
        coverage_bridging,
        density_bridging_per_mpx,
        n_cristaux_inutiles: n_useless,
        pct_cristaux_inutiles: pct_useless,
        coverage_useless,
        useful_fraction_of_deposit,
        useless_to_useful_ratio,
        pct_needle_like: habit_fraction(Habit::NeedleLike),
        pct_blocky: habit_fraction(Habit::Blocky),
        pct_spherical: habit_fraction(Habit::Spherical),
        pct_other: habit_fraction(Habit::Other),
        pct_bridging_needle_like: bridging_habit_fraction(Habit::NeedleLike),
        pct_bridging_blocky: bridging_habit_fraction(Habit::Blocky),
        pct_bridging_spherical: bridging_habit_fraction(Habit::Spherical),
        pct_bridging_other: bridging_habit_fraction(Habit::Other),
        bridging_success,
        bridging_strength_score,
    }
}
