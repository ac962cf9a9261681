//! Binary morphological operations
//!
//! Dilation, erosion, opening and closing on [`BitMask`], plus the boundary
//! extraction used to trace grain contours. All operations use the
//! asymmetric boundary condition: pixels outside the image are background.
//! Dilation can therefore never grow past the image, and erosion clears
//! foreground wherever the SEL probes outside.

use crate::error::MorphResult;
use crate::sel::Sel;
use sembridge_core::BitMask;

/// Dilate a binary mask.
///
/// A pixel is set in the output if any SEL element over it covers a
/// foreground pixel. Expands foreground regions.
pub fn dilate(mask: &BitMask, sel: &Sel) -> MorphResult<BitMask> {
    let (w, h) = mask.dimensions();
    let offsets: Vec<_> = sel.offsets().collect();
    let mut out = vec![false; mask.pixel_count()];

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let hit = offsets
                .iter()
                .any(|&(dx, dy)| mask.get_signed(x + dx as i64, y + dy as i64));
            if hit {
                out[y as usize * w as usize + x as usize] = true;
            }
        }
    }

    Ok(BitMask::from_data(w, h, out)?)
}

/// Erode a binary mask.
///
/// A pixel survives only if every SEL element over it covers a foreground
/// pixel. Shrinks foreground regions; probing outside the image fails.
pub fn erode(mask: &BitMask, sel: &Sel) -> MorphResult<BitMask> {
    let (w, h) = mask.dimensions();
    let offsets: Vec<_> = sel.offsets().collect();
    let mut out = vec![false; mask.pixel_count()];

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let all = offsets
                .iter()
                .all(|&(dx, dy)| mask.get_signed(x + dx as i64, y + dy as i64));
            if all {
                out[y as usize * w as usize + x as usize] = true;
            }
        }
    }

    Ok(BitMask::from_data(w, h, out)?)
}

/// Open a binary mask.
///
/// Opening = erosion followed by dilation. Removes foreground features
/// smaller than the SEL and smooths contours.
pub fn open(mask: &BitMask, sel: &Sel) -> MorphResult<BitMask> {
    let eroded = erode(mask, sel)?;
    dilate(&eroded, sel)
}

/// Close a binary mask.
///
/// Closing = dilation followed by erosion. Fills gaps narrower than the SEL
/// and connects nearby foreground features.
pub fn close(mask: &BitMask, sel: &Sel) -> MorphResult<BitMask> {
    let dilated = dilate(mask, sel)?;
    erode(&dilated, sel)
}

/// Subtract two masks (a AND NOT b).
pub fn subtract(a: &BitMask, b: &BitMask) -> MorphResult<BitMask> {
    check_same_size(a, b)?;
    let (w, h) = a.dimensions();
    let data = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&va, &vb)| va && !vb)
        .collect();
    Ok(BitMask::from_data(w, h, data)?)
}

/// Inner boundary of the foreground: pixels on the edge of foreground
/// objects, computed as mask AND NOT erode(mask, 3x3).
///
/// Applied to a binarized grain map this traces one-pixel grain contours.
pub fn inner_boundary(mask: &BitMask) -> MorphResult<BitMask> {
    let eroded = erode(mask, &Sel::square(3)?)?;
    subtract(mask, &eroded)
}

fn check_same_size(a: &BitMask, b: &BitMask) -> MorphResult<()> {
    if a.dimensions() != b.dimensions() {
        return Err(sembridge_core::Error::DimensionMismatch {
            expected: a.dimensions(),
            actual: b.dimensions(),
        }
        .into());
    }
    Ok(())
}
