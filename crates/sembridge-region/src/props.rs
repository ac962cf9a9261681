//! Region measurement
//!
//! Derives per-component geometric descriptors from a labeling: area,
//! weighted perimeter, centroid, moment-based axis lengths and convex-hull
//! solidity. Regions are read-only views; nothing here mutates the
//! labeling, and descriptor values do not depend on which positive integer
//! a region happens to carry.

use sembridge_core::LabelMap;
use std::f64::consts::SQRT_2;

/// Bounding box of a region, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    /// Bounding box width in pixels
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Bounding box height in pixels
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// One labeled region and its geometric descriptors.
#[derive(Debug, Clone)]
pub struct Region {
    /// Label carried in the source [`LabelMap`]
    pub label: u32,
    /// Pixel count
    pub area: u32,
    /// Weighted boundary length (see [`measure_regions`])
    pub perimeter: f64,
    /// Centroid as (x, y)
    pub centroid: (f64, f64),
    /// Length of the major axis of the moment-equivalent ellipse
    pub major_axis_length: f64,
    /// Length of the minor axis of the moment-equivalent ellipse
    pub minor_axis_length: f64,
    /// Area over convex-hull area, in (0,1]
    pub solidity: f64,
    /// Bounding box
    pub bounds: Bounds,
    /// Member pixel coordinates in row-major order
    pub pixels: Vec<(u32, u32)>,
}

/// Measure every region of a labeling, returned in ascending label order.
///
/// Descriptors follow the conventions the shape thresholds downstream were
/// tuned against:
///
/// - perimeter: border pixels (4-connected erosion residue) weighted by
///   their border-neighbor configuration - 1 for isothetic runs, sqrt(2)
///   for diagonal runs, the average for corners. An isolated pixel has
///   perimeter 0.
/// - axis lengths: 4 * sqrt(eigenvalue) of the second central moment
///   matrix, the moment-equivalent ellipse axes.
/// - solidity: area divided by the number of lattice points inside the
///   convex hull of the member pixels (Pick's theorem; degenerate hulls
///   give solidity 1).
///
/// An all-background labeling yields an empty vector.
pub fn measure_regions(labels: &LabelMap) -> Vec<Region> {
    let k = labels.max_label() as usize;
    if k == 0 {
        return Vec::new();
    }

    let mut pixel_lists: Vec<Vec<(u32, u32)>> = vec![Vec::new(); k];
    for y in 0..labels.height() {
        for x in 0..labels.width() {
            let label = labels.get(x, y);
            if label > 0 {
                pixel_lists[label as usize - 1].push((x, y));
            }
        }
    }

    pixel_lists
        .into_iter()
        .enumerate()
        .filter(|(_, pixels)| !pixels.is_empty())
        .map(|(i, pixels)| measure_one(i as u32 + 1, pixels))
        .collect()
}

fn measure_one(label: u32, pixels: Vec<(u32, u32)>) -> Region {
    let area = pixels.len() as u32;

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut sum_x = 0f64;
    let mut sum_y = 0f64;
    for &(x, y) in &pixels {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
        sum_x += x as f64;
        sum_y += y as f64;
    }
    let n = area as f64;
    let centroid = (sum_x / n, sum_y / n);

    // second central moments
    let mut mxx = 0f64;
    let mut myy = 0f64;
    let mut mxy = 0f64;
    for &(x, y) in &pixels {
        let dx = x as f64 - centroid.0;
        let dy = y as f64 - centroid.1;
        mxx += dx * dx;
        myy += dy * dy;
        mxy += dx * dy;
    }
    mxx /= n;
    myy /= n;
    mxy /= n;

    let common = ((mxx - myy) * (mxx - myy) + 4.0 * mxy * mxy).sqrt();
    let major_axis_length = 4.0 * ((mxx + myy + common) / 2.0).max(0.0).sqrt();
    let minor_axis_length = 4.0 * ((mxx + myy - common) / 2.0).max(0.0).sqrt();

    let bounds = Bounds {
        min_x,
        min_y,
        max_x,
        max_y,
    };
    let perimeter = weighted_perimeter(&pixels, bounds);
    let hull_area = convex_hull_lattice_count(&pixels);
    let solidity = if hull_area > 0.0 {
        (area as f64 / hull_area).min(1.0)
    } else {
        1.0
    };

    Region {
        label,
        area,
        perimeter,
        centroid,
        major_axis_length,
        minor_axis_length,
        solidity,
        bounds,
        pixels,
    }
}

/// Border-configuration weighted perimeter.
///
/// Border pixels are the 4-connected erosion residue of the region taken
/// in isolation. Each border pixel contributes a weight chosen by its
/// number of orthogonal and diagonal border neighbors.
fn weighted_perimeter(pixels: &[(u32, u32)], bounds: Bounds) -> f64 {
    // local bitmap with a 1-pixel margin
    let lw = bounds.width() as usize + 2;
    let lh = bounds.height() as usize + 2;
    let mut local = vec![false; lw * lh];
    for &(x, y) in pixels {
        let lx = (x - bounds.min_x) as usize + 1;
        let ly = (y - bounds.min_y) as usize + 1;
        local[ly * lw + lx] = true;
    }
    let at = |x: usize, y: usize| local[y * lw + x];

    // border = pixel with at least one orthogonal background neighbor
    let mut border = vec![false; lw * lh];
    for y in 1..lh - 1 {
        for x in 1..lw - 1 {
            if at(x, y) && !(at(x - 1, y) && at(x + 1, y) && at(x, y - 1) && at(x, y + 1)) {
                border[y * lw + x] = true;
            }
        }
    }
    let bat = |x: usize, y: usize| border[y * lw + x];

    let mut perimeter = 0f64;
    for y in 1..lh - 1 {
        for x in 1..lw - 1 {
            if !bat(x, y) {
                continue;
            }
            let n_orth = [bat(x - 1, y), bat(x + 1, y), bat(x, y - 1), bat(x, y + 1)]
                .iter()
                .filter(|&&b| b)
                .count();
            let n_diag = [
                bat(x - 1, y - 1),
                bat(x + 1, y - 1),
                bat(x - 1, y + 1),
                bat(x + 1, y + 1),
            ]
            .iter()
            .filter(|&&b| b)
            .count();
            perimeter += match (n_orth, n_diag) {
                (2, 0) | (3, 0) | (2, 1) | (3, 1) | (2, 2) | (3, 2) => 1.0,
                (0, 2) | (1, 3) => SQRT_2,
                (1, 1) | (1, 2) => (1.0 + SQRT_2) / 2.0,
                _ => 0.0,
            };
        }
    }
    perimeter
}

/// Number of lattice points inside the convex hull of the given pixels.
///
/// Uses the monotone chain hull and Pick's theorem
/// (`points = A + B/2 + 1`), so no rasterization is needed. Degenerate
/// hulls (fewer than 3 distinct points, or all collinear) report 0 and the
/// caller treats the region as its own hull.
fn convex_hull_lattice_count(pixels: &[(u32, u32)]) -> f64 {
    if pixels.len() < 3 {
        return 0.0;
    }
    let mut pts: Vec<(i64, i64)> = pixels.iter().map(|&(x, y)| (x as i64, y as i64)).collect();
    pts.sort_unstable();
    pts.dedup();
    if pts.len() < 3 {
        return 0.0;
    }

    let cross = |o: (i64, i64), a: (i64, i64), b: (i64, i64)| -> i64 {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };

    // monotone chain, counterclockwise hull without collinear points
    let mut hull: Vec<(i64, i64)> = Vec::with_capacity(pts.len() * 2);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev() {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();

    if hull.len() < 3 {
        return 0.0;
    }

    // twice the shoelace area
    let mut area2 = 0i64;
    let mut boundary = 0i64;
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        area2 += a.0 * b.1 - b.0 * a.1;
        boundary += gcd((a.0 - b.0).abs(), (a.1 - b.1).abs());
    }
    let area2 = area2.abs();
    if area2 == 0 {
        return 0.0;
    }

    // Pick: interior + boundary lattice points
    area2 as f64 / 2.0 + boundary as f64 / 2.0 + 1.0
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use sembridge_core::LabelMap;

    fn labels_from_rows(rows: &[&[u32]]) -> LabelMap {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        LabelMap::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_empty_labeling() {
        let labels = LabelMap::new(4, 4).unwrap();
        assert!(measure_regions(&labels).is_empty());
    }

    #[test]
    fn test_square_region() {
        let labels = labels_from_rows(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let regions = measure_regions(&labels);
        assert_eq!(regions.len(), 1);
        let r = &regions[0];
        assert_eq!(r.area, 9);
        assert_eq!(r.centroid, (2.0, 2.0));
        assert_eq!(r.perimeter, 8.0);
        assert_eq!(r.solidity, 1.0);
        assert_eq!(r.bounds.width(), 3);
        // square: both axes equal
        assert!((r.major_axis_length - r.minor_axis_length).abs() < 1e-9);
    }

    #[test]
    fn test_single_pixel_region() {
        let labels = labels_from_rows(&[&[0, 0], &[0, 1]]);
        let r = &measure_regions(&labels)[0];
        assert_eq!(r.area, 1);
        assert_eq!(r.perimeter, 0.0);
        assert_eq!(r.major_axis_length, 0.0);
        assert_eq!(r.solidity, 1.0);
    }

    #[test]
    fn test_elongated_region_axes() {
        let labels = labels_from_rows(&[
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
            &[0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ]);
        let r = &measure_regions(&labels)[0];
        assert!(r.major_axis_length > 3.0 * r.minor_axis_length);
        assert_eq!(r.solidity, 1.0);
    }

    #[test]
    fn test_l_shape_solidity_below_one() {
        let labels = labels_from_rows(&[
            &[1, 0, 0, 0],
            &[1, 0, 0, 0],
            &[1, 0, 0, 0],
            &[1, 1, 1, 1],
        ]);
        let r = &measure_regions(&labels)[0];
        assert_eq!(r.area, 7);
        assert!(r.solidity < 0.8, "L-shape solidity was {}", r.solidity);
    }

    #[test]
    fn test_two_regions_ascending_label_order() {
        let labels = labels_from_rows(&[
            &[1, 1, 0, 2],
            &[1, 1, 0, 2],
        ]);
        let regions = measure_regions(&labels);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].label, 1);
        assert_eq!(regions[0].area, 4);
        assert_eq!(regions[1].label, 2);
        assert_eq!(regions[1].area, 2);
    }

    #[test]
    fn test_descriptors_independent_of_label_value() {
        let a = labels_from_rows(&[&[0, 1, 1, 1, 0]]);
        let b = labels_from_rows(&[&[0, 7, 7, 7, 0]]);
        let ra = &measure_regions(&a)[0];
        let rb = &measure_regions(&b)[0];
        assert_eq!(ra.area, rb.area);
        assert_eq!(ra.perimeter, rb.perimeter);
        assert_eq!(ra.major_axis_length, rb.major_axis_length);
        assert_eq!(ra.solidity, rb.solidity);
    }
}
