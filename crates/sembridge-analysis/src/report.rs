//! Metrics report
//!
//! The externally visible result of one analysis. A capture either passes
//! every gate and gets the full metric block, or is rejected with an
//! ordered list of reason codes; both variants share the summary prefix
//! (image id, magnification, quality statistics, grain/crystal counts).
//!
//! Serialization flattens everything into the stable flat JSON schema the
//! transport layer forwards: `good_image` plus a `";"`-joined `reasons`
//! string next to the numeric fields.

use serde::ser::Serializer;
use serde::Serialize;

/// Why a capture was rejected. Codes are stable API, in fixed check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No magnification in the filename and no explicit value
    UnknownMagnification,
    /// Magnification known but outside the acceptance range
    ZoomOutOfRange,
    /// Sharpness or contrast below the minimum
    InsufficientQuality,
    /// Too few crystals or implausible coverage
    SuspectCrystalSegmentation,
    /// Bridging is undefined with fewer than two grains
    FewerThanTwoGrains,
}

impl RejectReason {
    /// Stable reason code emitted in reports.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::UnknownMagnification => "mag_inconnu",
            RejectReason::ZoomOutOfRange => "zoom_hors_plage",
            RejectReason::InsufficientQuality => "qualite_insuffisante",
            RejectReason::SuspectCrystalSegmentation => "segmentation_cristaux_suspecte",
            RejectReason::FewerThanTwoGrains => "moins_de_2_grains",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Summary prefix present in both report variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Source image identifier (the uploaded filename)
    pub image: String,
    /// Resolved magnification, null when unknown
    pub mag: Option<u32>,
    /// Laplacian-variance focus statistic
    pub sharpness_laplacian_var: f64,
    /// Intensity range over the normalized field
    pub contrast_range: f64,
    /// Number of kept grains
    pub n_grains: u32,
    /// Number of labeled crystals
    pub n_cristaux_total: u32,
    /// Crystal mask coverage fraction
    pub coverage_all: f64,
}

/// Full metric block, present only when the capture passed every gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgingMetrics {
    #[serde(rename = "density_all_per_Mpx")]
    pub density_all_per_mpx: f64,
    pub n_cristaux_pontage: u32,
    pub pct_cristaux_pontage: f64,
    pub coverage_bridging: f64,
    #[serde(rename = "density_bridging_per_Mpx")]
    pub density_bridging_per_mpx: f64,
    pub n_cristaux_inutiles: u32,
    pub pct_cristaux_inutiles: f64,
    pub coverage_useless: f64,
    pub useful_fraction_of_deposit: f64,
    pub useless_to_useful_ratio: f64,
    pub pct_needle_like: f64,
    pub pct_blocky: f64,
    pub pct_spherical: f64,
    pub pct_other: f64,
    pub pct_bridging_needle_like: f64,
    pub pct_bridging_blocky: f64,
    pub pct_bridging_spherical: f64,
    pub pct_bridging_other: f64,
    pub bridging_success: bool,
    pub bridging_strength_score: f64,
}

/// Result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Capture failed a quality gate; only the summary is meaningful.
    Rejected {
        #[serde(flatten)]
        summary: ReportSummary,
        good_image: bool,
        #[serde(serialize_with = "join_reasons")]
        reasons: Vec<RejectReason>,
    },
    /// Capture passed every gate; the full metric block applies.
    Accepted {
        #[serde(flatten)]
        summary: ReportSummary,
        good_image: bool,
        #[serde(serialize_with = "join_reasons")]
        reasons: Vec<RejectReason>,
        #[serde(flatten)]
        metrics: BridgingMetrics,
    },
}

impl Report {
    /// Build a rejected report. `reasons` must be non-empty and ordered.
    pub fn rejected(summary: ReportSummary, reasons: Vec<RejectReason>) -> Self {
        Report::Rejected {
            summary,
            good_image: false,
            reasons,
        }
    }

    /// Build an accepted report.
    pub fn accepted(summary: ReportSummary, metrics: BridgingMetrics) -> Self {
        Report::Accepted {
            summary,
            good_image: true,
            reasons: Vec::new(),
            metrics,
        }
    }

    /// Whether the capture passed every gate.
    pub fn good_image(&self) -> bool {
        matches!(self, Report::Accepted { .. })
    }

    /// Shared summary prefix.
    pub fn summary(&self) -> &ReportSummary {
        match self {
            Report::Rejected { summary, .. } | Report::Accepted { summary, .. } => summary,
        }
    }

    /// Rejection reasons, empty for accepted reports.
    pub fn reasons(&self) -> &[RejectReason] {
        match self {
            Report::Rejected { reasons, .. } | Report::Accepted { reasons, .. } => reasons,
        }
    }

    /// The `";"`-joined reason string as serialized.
    pub fn reasons_joined(&self) -> String {
        self.reasons()
            .iter()
            .map(RejectReason::code)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Full metric block, present only for accepted reports.
    pub fn metrics(&self) -> Option<&BridgingMetrics> {
        match self {
            Report::Accepted { metrics, .. } => Some(metrics),
            Report::Rejected { .. } => None,
        }
    }
}

fn join_reasons<S: Serializer>(reasons: &[RejectReason], ser: S) -> Result<S::Ok, S::Error> {
    let joined = reasons
        .iter()
        .map(RejectReason::code)
        .collect::<Vec<_>>()
        .join(";");
    ser.serialize_str(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ReportSummary {
        ReportSummary {
            image: "a_500x.png".to_string(),
            mag: Some(500),
            sharpness_laplacian_var: 120.0,
            contrast_range: 0.6,
            n_grains: 2,
            n_cristaux_total: 12,
            coverage_all: 0.05,
        }
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(RejectReason::UnknownMagnification.code(), "mag_inconnu");
        assert_eq!(RejectReason::FewerThanTwoGrains.code(), "moins_de_2_grains");
        assert_eq!(
            RejectReason::SuspectCrystalSegmentation.to_string(),
            "segmentation_cristaux_suspecte"
        );
    }

    #[test]
    fn test_rejected_serialization() {
        let report = Report::rejected(
            summary(),
            vec![
                RejectReason::UnknownMagnification,
                RejectReason::InsufficientQuality,
            ],
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["good_image"], serde_json::json!(false));
        assert_eq!(
            value["reasons"],
            serde_json::json!("mag_inconnu;qualite_insuffisante")
        );
        assert_eq!(value["n_cristaux_total"], serde_json::json!(12));
        assert!(value.get("coverage_bridging").is_none());
        assert!(value.get("bridging_success").is_none());
    }

    #[test]
    fn test_accepted_serialization() {
        let metrics = BridgingMetrics {
            density_all_per_mpx: 183.1,
            n_cristaux_pontage: 1,
            pct_cristaux_pontage: 1.0 / 12.0,
            coverage_bridging: 0.03,
            density_bridging_per_mpx: 15.3,
            n_cristaux_inutiles: 11,
            pct_cristaux_inutiles: 11.0 / 12.0,
            coverage_useless: 0.02,
            useful_fraction_of_deposit: 0.6,
            useless_to_useful_ratio: 0.67,
            pct_needle_like: 0.25,
            pct_blocky: 0.25,
            pct_spherical: 0.25,
            pct_other: 0.25,
            pct_bridging_needle_like: 1.0,
            pct_bridging_blocky: 0.0,
            pct_bridging_spherical: 0.0,
            pct_bridging_other: 0.0,
            bridging_success: true,
            bridging_strength_score: 0.34,
        };
        let report = Report::accepted(summary(), metrics);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["good_image"], serde_json::json!(true));
        assert_eq!(value["reasons"], serde_json::json!(""));
        assert_eq!(value["mag"], serde_json::json!(500));
        assert_eq!(value["density_all_per_Mpx"], serde_json::json!(183.1));
        assert_eq!(value["bridging_success"], serde_json::json!(true));
    }

    #[test]
    fn test_null_magnification() {
        let mut s = summary();
        s.mag = None;
        let report = Report::rejected(s, vec![RejectReason::UnknownMagnification]);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["mag"].is_null());
    }

    #[test]
    fn test_accessors() {
        let report = Report::rejected(summary(), vec![RejectReason::FewerThanTwoGrains]);
        assert!(!report.good_image());
        assert!(report.metrics().is_none());
        assert_eq!(report.reasons_joined(), "moins_de_2_grains");
        assert_eq!(report.summary().n_grains, 2);
    }
}
