//! Inter-grain contact band
//!
//! The contact band is the set of pixels where at least two grains' dilated
//! footprints overlap - the only place a crystal can meaningfully bridge
//! them. Crystal pixels are NOT carved out of the band: a crystal sitting
//! exactly between two grains must still be able to intersect it.

use crate::error::AnalysisResult;
use sembridge_core::{BitMask, LabelMap};
use sembridge_morph::{Sel, dilate};

/// Compute the contact band of a grain labeling.
///
/// Each grain mask is dilated by a disk of `influence_radius`; the band
/// collects every pixel covered by two or more dilated grains. Fewer than
/// two grains always yield an empty band.
pub fn contact_band(grains: &LabelMap, influence_radius: u32) -> AnalysisResult<BitMask> {
    let (w, h) = grains.dimensions();
    let mut overlap = vec![0u8; grains.pixel_count()];

    let sel = Sel::disk(influence_radius)?;
    for label in grains.labels() {
        let dilated = dilate(&grains.mask_of(label), &sel)?;
        for (i, &covered) in dilated.data().iter().enumerate() {
            if covered {
                overlap[i] = overlap[i].saturating_add(1);
            }
        }
    }

    let data = overlap.iter().map(|&c| c >= 2).collect();
    Ok(BitMask::from_data(w, h, data)?)
}
