//! Windowed statistics
//!
//! Integral-image accumulation for O(1) window sums, used by the local-mean
//! adaptive threshold. Windows are clipped at the image border; the mean is
//! taken over the pixels actually inside the image.

use sembridge_core::ByteImage;

/// Summed-area table over an 8-bit plane.
///
/// `sum_in_window` answers arbitrary rectangular sums in constant time.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: u32,
    height: u32,
    // (width+1) x (height+1), first row/column zero
    table: Vec<i64>,
}

impl IntegralImage {
    /// Build the table in a single pass.
    pub fn new(image: &ByteImage) -> Self {
        let (w, h) = image.dimensions();
        let tw = w as usize + 1;
        let th = h as usize + 1;
        let mut table = vec![0i64; tw * th];
        let data = image.data();

        for y in 0..h as usize {
            let mut row_sum = 0i64;
            for x in 0..w as usize {
                row_sum += data[y * w as usize + x] as i64;
                table[(y + 1) * tw + (x + 1)] = table[y * tw + (x + 1)] + row_sum;
            }
        }

        IntegralImage {
            width: w,
            height: h,
            table,
        }
    }

    /// Sum over the inclusive window [x0..x1] x [y0..y1], clipped to the
    /// image. An empty (fully outside) window sums to 0.
    pub fn sum_in_window(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> i64 {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i64 - 1);
        let y1 = y1.min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return 0;
        }
        let tw = self.width as usize + 1;
        let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize, y1 as usize);
        self.table[(y1 + 1) * tw + (x1 + 1)] + self.table[y0 * tw + x0]
            - self.table[y0 * tw + (x1 + 1)]
            - self.table[(y1 + 1) * tw + x0]
    }

    /// Mean over the clipped inclusive window, as f64.
    pub fn mean_in_window(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> f64 {
        let cx0 = x0.max(0);
        let cy0 = y0.max(0);
        let cx1 = x1.min(self.width as i64 - 1);
        let cy1 = y1.min(self.height as i64 - 1);
        if cx0 > cx1 || cy0 > cy1 {
            return 0.0;
        }
        let n = ((cx1 - cx0 + 1) * (cy1 - cy0 + 1)) as f64;
        self.sum_in_window(x0, y0, x1, y1) as f64 / n
    }
}
