//! Overlay rendering
//!
//! Paints every region class onto the source image: crystals tinted cyan,
//! bridging crystals re-tinted magenta on top of the cyan pass, the contact
//! band solid green, and grain contours solid red. Later layers overwrite
//! earlier ones, so a bridging crystal inside the band still shows the band
//! crossing it.

use crate::error::AnalysisResult;
use sembridge_core::{BitMask, ByteImage, LabelMap, RgbImage};
use sembridge_morph::inner_boundary;
use std::collections::BTreeSet;

/// Tint for all crystal regions
pub const CRYSTAL_TINT: [u8; 3] = [0, 255, 255];
/// Tint for bridging crystal regions
pub const BRIDGING_TINT: [u8; 3] = [255, 0, 255];
/// Solid color of the contact band
pub const BAND_COLOR: [u8; 3] = [0, 255, 0];
/// Solid color of grain contours
pub const GRAIN_EDGE_COLOR: [u8; 3] = [255, 0, 0];

/// Fraction of the underlying pixel kept when tinting regions
const BASE_WEIGHT: f32 = 0.4;

/// Render the annotated visualization.
///
/// Runs on any input, including rejected captures with an empty bridging
/// set; the caller decides whether an encode failure is fatal.
pub fn render_overlay(
    base: &ByteImage,
    crystals: &LabelMap,
    bridging: &BTreeSet<u32>,
    band: &BitMask,
    grains: &LabelMap,
) -> AnalysisResult<RgbImage> {
    let mut overlay = RgbImage::from_gray(base);
    let (w, h) = overlay.dimensions();

    // crystal tint pass
    for y in 0..h {
        for x in 0..w {
            if crystals.get(x, y) != 0 {
                overlay.blend(x, y, CRYSTAL_TINT, BASE_WEIGHT);
            }
        }
    }

    // bridging re-tint over the cyan layer
    if !bridging.is_empty() {
        for y in 0..h {
            for x in 0..w {
                let label = crystals.get(x, y);
                if label != 0 && bridging.contains(&label) {
                    overlay.blend(x, y, BRIDGING_TINT, BASE_WEIGHT);
                }
            }
        }
    }

    // contact band
    for (x, y) in band.iter_set() {
        overlay.set(x, y, BAND_COLOR)?;
    }

    // grain contours
    let edges = inner_boundary(&grains.foreground())?;
    for (x, y) in edges.iter_set() {
        overlay.set(x, y, GRAIN_EDGE_COLOR)?;
    }

    Ok(overlay)
}
