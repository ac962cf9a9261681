//! Bridging classification
//!
//! A crystal bridges when it spans the shared zone of influence of two or
//! more grains. Both conditions are required: touching two grains without
//! standing in the contact band (two nearby but non-adjacent grains) does
//! not count, and standing in the band while touching a single grain does
//! not either.

use crate::error::AnalysisResult;
use sembridge_core::{BitMask, LabelMap};
use sembridge_morph::{Sel, dilate};
use sembridge_region::Region;
use std::collections::BTreeSet;

/// Classify every crystal region, returning the set of bridging labels.
///
/// A crystal touches a grain when any of its pixels lies inside the grain
/// mask dilated by `touch_radius`; it bridges when it touches at least two
/// distinct grains and at least one pixel is inside `band`. Zero grains or
/// zero crystals yield an empty set without error.
pub fn bridging_labels(
    crystals: &[Region],
    grains: &LabelMap,
    band: &BitMask,
    touch_radius: u32,
) -> AnalysisResult<BTreeSet<u32>> {
    let mut bridging = BTreeSet::new();
    if grains.max_label() == 0 || crystals.is_empty() {
        return Ok(bridging);
    }

    let sel = Sel::disk(touch_radius)?;
    let mut reach: Vec<BitMask> = Vec::with_capacity(grains.max_label() as usize);
    for label in grains.labels() {
        reach.push(dilate(&grains.mask_of(label), &sel)?);
    }

    for region in crystals {
        let mut touched = 0;
        for grain in &reach {
            if region.pixels.iter().any(|&(x, y)| grain.get(x, y)) {
                touched += 1;
                if touched >= 2 {
                    break;
                }
            }
        }
        if touched < 2 {
            continue;
        }
        if region.pixels.iter().any(|&(x, y)| band.get(x, y)) {
            bridging.insert(region.label);
        }
    }

    log::debug!("bridging: {} of {} crystals", bridging.len(), crystals.len());

    Ok(bridging)
}
