//! Image format detection
//!
//! Detects image formats by examining magic numbers in the byte header.

use crate::{IoError, IoResult};

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
    /// TIFF format (either byte order)
    Tiff,
}

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// TIFF little-endian: II 2A 00
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];

    /// TIFF big-endian: MM 00 2A
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
}

/// Detect the image format from leading bytes.
///
/// # Errors
///
/// Returns [`IoError::DecodeError`] when no known signature matches; raw
/// garbage is a decode failure, not a missing feature.
pub fn detect_format(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() >= magic::PNG.len() && data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.len() >= magic::JPEG.len() && data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }
    if data.len() >= 4 && (data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE)) {
        return Ok(ImageFormat::Tiff);
    }
    Err(IoError::DecodeError(
        "unrecognized image signature".to_string(),
    ))
}
