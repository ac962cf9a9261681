//! Local adaptive thresholding
//!
//! Crystals image darker than their surroundings in backscatter SEM
//! captures, so the segmenter marks a pixel as foreground when it falls
//! below the mean of its neighborhood by at least a fixed offset.

use crate::error::{FilterError, FilterResult};
use crate::windowed::IntegralImage;
use sembridge_core::{BitMask, ByteImage};

/// Threshold an 8-bit plane against its local window mean.
///
/// A pixel is foreground iff `value <= round(window_mean) - offset`, with
/// the window of side `block_size` (odd) centered on the pixel and clipped
/// at the image border.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `block_size` is even or 0.
pub fn adaptive_threshold_darker(
    image: &ByteImage,
    block_size: u32,
    offset: i32,
) -> FilterResult<BitMask> {
    if block_size == 0 || block_size % 2 == 0 {
        return Err(FilterError::InvalidParameter(format!(
            "block_size {block_size} must be odd"
        )));
    }

    let (w, h) = image.dimensions();
    let half = (block_size / 2) as i64;
    let integral = IntegralImage::new(image);

    let mut out = vec![false; (w as usize) * (h as usize)];
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let mean = integral.mean_in_window(x - half, y - half, x + half, y + half);
            let thresh = mean.round() as i64 - offset as i64;
            let v = image.get_clamped(x, y) as i64;
            if v <= thresh {
                out[y as usize * w as usize + x as usize] = true;
            }
        }
    }

    Ok(BitMask::from_data(w, h, out)?)
}
