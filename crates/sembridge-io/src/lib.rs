//! sembridge-io - Image decode/encode for SEM deposit analysis
//!
//! Turns uploaded bytes into the normalized grayscale intensity field the
//! pipeline consumes, and encodes the rendered overlay as PNG. Formats are
//! sniffed from magic numbers; JPEG and TIFF input can be disabled via
//! cargo features, PNG is always available because the overlay contract
//! requires a lossless encoder.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format};
pub use self::png::{decode_gray_png, encode_rgb_png};

use sembridge_core::GrayImage;

/// Decode encoded image bytes into a grayscale field in [0,1].
///
/// Multi-channel inputs are collapsed with Rec.601 luma weights; 16-bit
/// samples are normalized by their full range.
///
/// # Errors
///
/// [`IoError::DecodeError`] when the bytes carry no recognizable image, or
/// a recognized image is structurally broken;
/// [`IoError::UnsupportedFormat`] when the format was compiled out.
pub fn decode_gray(data: &[u8]) -> IoResult<GrayImage> {
    match detect_format(data)? {
        ImageFormat::Png => decode_gray_png(data),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => self::jpeg::decode_gray_jpeg(data),
        #[cfg(not(feature = "jpeg"))]
        ImageFormat::Jpeg => Err(IoError::UnsupportedFormat(
            "JPEG support not enabled".to_string(),
        )),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => self::tiff::decode_gray_tiff(data),
        #[cfg(not(feature = "tiff-format"))]
        ImageFormat::Tiff => Err(IoError::UnsupportedFormat(
            "TIFF support not enabled".to_string(),
        )),
    }
}

/// Rec.601 luma of 8-bit RGB, normalized to [0,1].
#[inline]
pub(crate) fn luma8(r: u8, g: u8, b: u8) -> f32 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

/// Rec.601 luma of 16-bit RGB, normalized to [0,1].
#[inline]
pub(crate) fn luma16(r: u16, g: u16, b: u16) -> f32 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 65535.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = decode_gray(b"definitely not an image").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_decode_empty_is_decode_error() {
        assert!(decode_gray(&[]).is_err());
    }
}
