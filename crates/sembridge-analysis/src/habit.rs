//! Crystal habit classification
//!
//! Assigns each crystal region a shape category from its geometric
//! descriptors. The rules form a fixed decision ladder; the first match
//! wins, and everything that matches nothing is `Other`.

use crate::config::HabitConfig;
use sembridge_region::Region;
use serde::Serialize;
use std::f64::consts::PI;

const EPS: f64 = 1e-6;

/// Crystal shape category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Habit {
    /// Elongated solid growth
    NeedleLike,
    /// Round compact growth
    Spherical,
    /// Moderately elongated, very solid, angular growth
    Blocky,
    /// Anything else
    Other,
}

impl Habit {
    /// Stable lowercase name, matching the report vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Habit::NeedleLike => "needle_like",
            Habit::Spherical => "spherical",
            Habit::Blocky => "blocky",
            Habit::Other => "other",
        }
    }
}

/// One classified crystal region.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitRecord {
    /// Crystal label in the source labeling
    pub label: u32,
    /// Assigned shape category
    pub habit: Habit,
    /// major / minor axis ratio used by the rules
    pub aspect_ratio: f64,
    /// 4*pi*area / perimeter^2 used by the rules
    pub circularity: f64,
}

/// Classify every region. Empty input yields an empty table.
pub fn classify_habits(regions: &[Region], cfg: &HabitConfig) -> Vec<HabitRecord> {
    regions.iter().map(|r| classify_one(r, cfg)).collect()
}

fn classify_one(region: &Region, cfg: &HabitConfig) -> HabitRecord {
    let aspect_ratio = region.major_axis_length / (region.minor_axis_length + EPS);
    let circularity = 4.0 * PI * region.area as f64 / (region.perimeter + EPS).powi(2);
    let solidity = region.solidity;

    let habit = if aspect_ratio >= cfg.needle_aspect_ratio && solidity >= cfg.min_solidity {
        Habit::NeedleLike
    } else if circularity >= cfg.spherical_circularity && solidity >= cfg.min_solidity {
        Habit::Spherical
    } else if aspect_ratio >= cfg.blocky_aspect_min
        && aspect_ratio < cfg.needle_aspect_ratio
        && solidity >= cfg.blocky_solidity
        && circularity < cfg.spherical_circularity
    {
        Habit::Blocky
    } else {
        Habit::Other
    };

    HabitRecord {
        label: region.label,
        habit,
        aspect_ratio,
        circularity,
    }
}
