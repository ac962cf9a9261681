//! JPEG image format support

use crate::{IoError, IoResult, luma8};
use jpeg_decoder::{Decoder, PixelFormat};
use sembridge_core::GrayImage;
use std::io::Cursor;

/// Decode JPEG bytes into a grayscale field in [0,1].
pub fn decode_gray_jpeg(data: &[u8]) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(Cursor::new(data));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let n = (width as usize) * (height as usize);

    let out: Vec<f32> = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().map(|&v| v as f32 / 255.0).collect(),
        PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|c| (((c[0] as u16) << 8) | c[1] as u16) as f32 / 65535.0)
            .collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|c| luma8(c[0], c[1], c[2]))
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|c| {
                // Adobe inverted CMYK as emitted by the decoder
                let k = c[3] as f32 / 255.0;
                let r = (c[0] as f32 / 255.0) * k;
                let g = (c[1] as f32 / 255.0) * k;
                let b = (c[2] as f32 / 255.0) * k;
                0.299 * r + 0.587 * g + 0.114 * b
            })
            .collect(),
    };

    if out.len() != n {
        return Err(IoError::DecodeError(format!(
            "JPEG payload size {} doesn't match {}x{}",
            out.len(),
            width,
            height
        )));
    }

    Ok(GrayImage::from_data(width, height, out)?)
}
