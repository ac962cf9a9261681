//! Small-kernel convolution
//!
//! The pipeline needs exactly two 3x3 kernels: the separable 1-2-1 Gaussian
//! for pre-threshold smoothing and the Laplacian for the sharpness
//! statistic. Borders are replicated.

use crate::error::FilterResult;
use sembridge_core::ByteImage;

/// Smooth an 8-bit plane with the separable 3x3 binomial (1-2-1) kernel.
///
/// Integer arithmetic with rounding; replicate border.
pub fn gaussian_blur_3x3(image: &ByteImage) -> FilterResult<ByteImage> {
    let (w, h) = image.dimensions();

    // horizontal pass, x16 fixed point
    let mut tmp = vec![0u16; (w as usize) * (h as usize)];
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let sum = image.get_clamped(x - 1, y) as u16
                + 2 * image.get_clamped(x, y) as u16
                + image.get_clamped(x + 1, y) as u16;
            tmp[y as usize * w as usize + x as usize] = sum;
        }
    }

    let at = |x: i64, y: i64| -> u32 {
        let cx = x.clamp(0, w as i64 - 1) as usize;
        let cy = y.clamp(0, h as i64 - 1) as usize;
        tmp[cy * w as usize + cx] as u32
    };

    let mut out = vec![0u8; (w as usize) * (h as usize)];
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let sum = at(x, y - 1) + 2 * at(x, y) + at(x, y + 1);
            out[y as usize * w as usize + x as usize] = ((sum + 8) / 16) as u8;
        }
    }

    Ok(ByteImage::from_data(w, h, out)?)
}

/// Variance of the 3x3 Laplacian response over an 8-bit plane.
///
/// The response at (x, y) is `u(x-1,y) + u(x+1,y) + u(x,y-1) + u(x,y+1)
/// - 4*u(x,y)` with replicate border. The population variance of this
/// response is the focus statistic gating blurry captures: a flat or
/// defocused field scores near zero, crisp edges score high.
pub fn laplacian_variance(image: &ByteImage) -> f64 {
    let (w, h) = image.dimensions();
    let n = (w as usize * h as usize) as f64;

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let r = image.get_clamped(x - 1, y) as f64
                + image.get_clamped(x + 1, y) as f64
                + image.get_clamped(x, y - 1) as f64
                + image.get_clamped(x, y + 1) as f64
                - 4.0 * image.get_clamped(x, y) as f64;
            sum += r;
            sum_sq += r * r;
        }
    }

    let mean = sum / n;
    sum_sq / n - mean * mean
}
