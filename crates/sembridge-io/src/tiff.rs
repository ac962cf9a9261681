//! TIFF image format support
//!
//! SEM acquisition software commonly saves captures as 8- or 16-bit
//! grayscale TIFF; color variants are collapsed with the same luma weights
//! as the other formats.

use crate::{IoError, IoResult, luma8, luma16};
use sembridge_core::GrayImage;
use std::io::Cursor;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};

/// Decode TIFF bytes into a grayscale field in [0,1].
pub fn decode_gray_tiff(data: &[u8]) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(Cursor::new(data))
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("TIFF header error: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("TIFF header error: {}", e)))?;
    let image = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("TIFF read error: {}", e)))?;

    let out: Vec<f32> = match (color_type, image) {
        (ColorType::Gray(8), DecodingResult::U8(v)) => {
            v.iter().map(|&p| p as f32 / 255.0).collect()
        }
        (ColorType::Gray(16), DecodingResult::U16(v)) => {
            v.iter().map(|&p| p as f32 / 65535.0).collect()
        }
        (ColorType::RGB(8), DecodingResult::U8(v)) => v
            .chunks_exact(3)
            .map(|c| luma8(c[0], c[1], c[2]))
            .collect(),
        (ColorType::RGBA(8), DecodingResult::U8(v)) => v
            .chunks_exact(4)
            .map(|c| luma8(c[0], c[1], c[2]))
            .collect(),
        (ColorType::RGB(16), DecodingResult::U16(v)) => v
            .chunks_exact(3)
            .map(|c| luma16(c[0], c[1], c[2]))
            .collect(),
        (ct, _) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                ct
            )));
        }
    };

    let n = (width as usize) * (height as usize);
    if out.len() != n {
        return Err(IoError::DecodeError(format!(
            "TIFF payload size {} doesn't match {}x{}",
            out.len(),
            width,
            height
        )));
    }

    Ok(GrayImage::from_data(width, height, out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_tiff_fails() {
        // valid little-endian magic followed by junk
        let bytes = [0x49, 0x49, 0x2A, 0x00, 0xFF, 0xFF];
        assert!(decode_gray_tiff(&bytes).is_err());
    }
}
