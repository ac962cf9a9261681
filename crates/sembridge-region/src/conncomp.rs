//! Connected component labeling
//!
//! Union-Find (disjoint set) labeling of binary masks. Labels are assigned
//! in row-major first-pixel order, so the labeling of a given mask is fully
//! deterministic and independent of union order.

use crate::error::RegionResult;
use sembridge_core::{BitMask, LabelMap};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

/// Label all connected components of a binary mask.
///
/// Returns a [`LabelMap`] with background 0 and components numbered 1..=K
/// in the order their first (row-major) pixel is encountered.
pub fn label_components(mask: &BitMask, connectivity: ConnectivityType) -> RegionResult<LabelMap> {
    let (w, h) = mask.dimensions();
    let wu = w as usize;

    // provisional ids, 0 = background, id n stored as n+1
    let mut provisional = vec![0u32; mask.pixel_count()];
    let mut parent: Vec<u32> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if !mask.get(x, y) {
                continue;
            }
            let idx = y as usize * wu + x as usize;

            // previously-scanned neighbors
            let mut neighbor_ids = [0u32; 4];
            let mut n = 0;
            if x > 0 && mask.get(x - 1, y) {
                neighbor_ids[n] = provisional[idx - 1];
                n += 1;
            }
            if y > 0 && mask.get(x, y - 1) {
                neighbor_ids[n] = provisional[idx - wu];
                n += 1;
            }
            if connectivity == ConnectivityType::EightWay && y > 0 {
                if x > 0 && mask.get(x - 1, y - 1) {
                    neighbor_ids[n] = provisional[idx - wu - 1];
                    n += 1;
                }
                if x + 1 < w && mask.get(x + 1, y - 1) {
                    neighbor_ids[n] = provisional[idx - wu + 1];
                    n += 1;
                }
            }

            if n == 0 {
                let id = parent.len() as u32;
                parent.push(id);
                provisional[idx] = id + 1;
            } else {
                let first = neighbor_ids[0] - 1;
                provisional[idx] = neighbor_ids[0];
                for &nid in &neighbor_ids[1..n] {
                    union(&mut parent, first, nid - 1);
                }
            }
        }
    }

    // resolve to consecutive labels in row-major first-pixel order
    let mut root_label = vec![0u32; parent.len()];
    let mut next = 0u32;
    let mut out = vec![0u32; mask.pixel_count()];
    for (idx, &p) in provisional.iter().enumerate() {
        if p == 0 {
            continue;
        }
        let root = find(&mut parent, p - 1) as usize;
        if root_label[root] == 0 {
            next += 1;
            root_label[root] = next;
        }
        out[idx] = root_label[root];
    }

    Ok(LabelMap::from_data(w, h, out)?)
}

/// Count the connected components of a binary mask.
pub fn count_components(mask: &BitMask, connectivity: ConnectivityType) -> RegionResult<u32> {
    Ok(label_components(mask, connectivity)?.max_label())
}

fn find(parent: &mut [u32], mut i: u32) -> u32 {
    while parent[i as usize] != i {
        let grand = parent[parent[i as usize] as usize];
        parent[i as usize] = grand;
        i = grand;
    }
    i
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // smaller root wins, keeping label order tied to scan order
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi as usize] = lo;
    }
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
    fn test_empty_mask_has_no_components() {
        let mask = BitMask::new(4, 4).unwrap();
        let labels = label_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(labels.max_label(), 0);
    }

    #[test]
    fn test_two_separate_blocks() {
        let mask = mask_from_rows(&[
            &[1, 1, 0, 0, 0],
            &[1, 1, 0, 0, 0],
            &[0, 0, 0, 1, 1],
            &[0, 0, 0, 1, 1],
        ]);
        let labels = label_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(labels.max_label(), 2);
        assert_eq!(labels.get(0, 0), 1);
        assert_eq!(labels.get(4, 3), 2);
    }

    #[test]
    fn test_diagonal_touch_depends_on_connectivity() {
        let mask = mask_from_rows(&[&[1, 0], &[0, 1]]);
        assert_eq!(count_components(&mask, ConnectivityType::FourWay).unwrap(), 2);
        assert_eq!(count_components(&mask, ConnectivityType::EightWay).unwrap(), 1);
    }

    #[test]
    fn test_u_shape_merges_to_one() {
        // the two arms meet at the bottom; union must resolve them
        let mask = mask_from_rows(&[
            &[1, 0, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        let labels = label_components(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(labels.max_label(), 1);
        assert_eq!(labels.get(2, 0), 1);
    }

    #[test]
    fn test_labels_follow_scan_order() {
        let mask = mask_from_rows(&[
            &[0, 0, 1, 0, 0],
            &[1, 0, 1, 0, 1],
        ]);
        let labels = label_components(&mask, ConnectivityType::FourWay).unwrap();
        // first pixels encountered: (2,0) then (0,1) then (4,1)
        assert_eq!(labels.get(2, 0), 1);
        assert_eq!(labels.get(0, 1), 2);
        assert_eq!(labels.get(4, 1), 3);
    }
}
