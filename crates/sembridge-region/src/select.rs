//! Component selection by size
//!
//! Mask-level cleanup used by both segmenters: dropping components below an
//! area floor, filling small holes, and the area-ranked keep-top-N grain
//! selection.

use crate::conncomp::{ConnectivityType, label_components};
use crate::error::RegionResult;
use sembridge_core::{BitMask, LabelMap};

/// Remove connected components with fewer than `min_size` pixels.
///
/// Components of exactly `min_size` pixels survive.
pub fn remove_small_components(
    mask: &BitMask,
    min_size: u32,
    connectivity: ConnectivityType,
) -> RegionResult<BitMask> {
    if min_size <= 1 {
        return Ok(mask.clone());
    }
    let labels = label_components(mask, connectivity)?;
    let areas = component_areas(&labels);

    let (w, h) = mask.dimensions();
    let data = labels
        .data()
        .iter()
        .map(|&l| l != 0 && areas[l as usize - 1] >= min_size)
        .collect();
    Ok(BitMask::from_data(w, h, data)?)
}

/// Fill holes (background components) with fewer than `max_area` pixels.
///
/// Implemented as small-component removal on the complement: the outer
/// background always survives because it dwarfs the threshold in any
/// realistic capture.
pub fn fill_small_holes(
    mask: &BitMask,
    max_area: u32,
    connectivity: ConnectivityType,
) -> RegionResult<BitMask> {
    let filled = remove_small_components(&mask.invert(), max_area, connectivity)?;
    Ok(filled.invert())
}

/// Keep the largest components of a labeling.
///
/// Components with at least `min_area` pixels are ranked by descending
/// area, ties broken by ascending label, and at most `max_keep` survive.
/// Returns the union mask of the kept components; the caller relabels it.
pub fn keep_largest_components(
    labels: &LabelMap,
    max_keep: usize,
    min_area: u32,
) -> RegionResult<BitMask> {
    let areas = component_areas(labels);

    let mut ranked: Vec<(u32, u32)> = areas
        .iter()
        .enumerate()
        .filter(|&(_, &area)| area >= min_area)
        .map(|(i, &area)| (i as u32 + 1, area))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(max_keep);

    let kept: std::collections::BTreeSet<u32> = ranked.into_iter().map(|(l, _)| l).collect();
    Ok(labels.mask_of_set(&kept))
}

/// Pixel count per label; index i holds the area of label i+1.
pub fn component_areas(labels: &LabelMap) -> Vec<u32> {
    let mut areas = vec![0u32; labels.max_label() as usize];
    for &l in labels.data() {
        if l > 0 {
            areas[l as usize - 1] += 1;
        }
    }
    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&[u8]]) -> BitMask {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let data = rows.iter().flat_map(|r| r.iter().map(|&v| v != 0)).collect();
        BitMask::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_remove_small_keeps_exact_size() {
        let mask = mask_from_rows(&[
            &[1, 1, 0, 1, 0],
            &[1, 1, 0, 0, 0],
        ]);
        let out = remove_small_components(&mask, 4, ConnectivityType::FourWay).unwrap();
        assert!(out.get(0, 0), "4-pixel block survives a floor of 4");
        assert!(!out.get(3, 0), "single pixel removed");
    }

    #[test]
    fn test_remove_small_trivial_floor() {
        let mask = mask_from_rows(&[&[1, 0, 1]]);
        let out = remove_small_components(&mask, 1, ConnectivityType::FourWay).unwrap();
        assert_eq!(out.count(), 2);
    }

    #[test]
    fn test_fill_small_holes() {
        let mask = mask_from_rows(&[
            &[1, 1, 1, 1, 1],
            &[1, 0, 0, 1, 1],
            &[1, 0, 0, 1, 1],
            &[1, 1, 1, 1, 1],
        ]);
        let out = fill_small_holes(&mask, 5, ConnectivityType::FourWay).unwrap();
        assert!(out.get(1, 1) && out.get(2, 2), "4-pixel hole filled");
        assert_eq!(out.count(), 20);
    }

    #[test]
    fn test_fill_small_holes_leaves_large_holes() {
        let mut mask = BitMask::new(10, 10).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                let border = x == 0 || y == 0 || x == 9 || y == 9;
                mask.set(x, y, border).unwrap();
            }
        }
        // interior hole is 64 pixels, above the 5-pixel cap
        let out = fill_small_holes(&mask, 5, ConnectivityType::FourWay).unwrap();
        assert!(!out.get(5, 5));
    }

    #[test]
    fn test_keep_largest_ranks_by_area() {
        let mask = mask_from_rows(&[
            &[1, 0, 0, 1, 1, 1],
            &[0, 0, 0, 1, 1, 1],
            &[1, 1, 0, 0, 0, 0],
        ]);
        let labels = label_components(&mask, ConnectivityType::FourWay).unwrap();
        let out = keep_largest_components(&labels, 1, 1).unwrap();
        assert!(out.get(4, 0), "6-pixel block is the largest");
        assert!(!out.get(0, 0));
        assert!(!out.get(0, 2));
    }

    #[test]
    fn test_keep_largest_tie_breaks_by_label() {
        let mask = mask_from_rows(&[
            &[1, 1, 0, 2, 2],
        ]);
        // two 2-pixel components; ascending label wins the tie
        let labels = label_components(&mask, ConnectivityType::FourWay).unwrap();
        let out = keep_largest_components(&labels, 1, 1).unwrap();
        assert!(out.get(0, 0));
        assert!(!out.get(3, 0));
    }

    #[test]
    fn test_keep_largest_min_area_floor() {
        let mask = mask_from_rows(&[
            &[1, 1, 1, 0, 1],
        ]);
        let labels = label_components(&mask, ConnectivityType::FourWay).unwrap();
        let out = keep_largest_components(&labels, 5, 2).unwrap();
        assert!(out.get(0, 0));
        assert!(!out.get(4, 0), "below the area floor");
    }
}
