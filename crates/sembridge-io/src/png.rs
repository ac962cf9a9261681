//! PNG image format support
//!
//! Decode of grayscale / color / indexed PNG into the normalized intensity
//! field, and the lossless overlay encoder.

use crate::{IoError, IoResult, luma8, luma16};
use png::{BitDepth, ColorType, Decoder, Encoder};
use sembridge_core::{GrayImage, RgbImage};
use std::io::Cursor;

/// Decode PNG bytes into a grayscale field in [0,1].
pub fn decode_gray_png(data: &[u8]) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(Cursor::new(data));
    // expand palette and sub-byte grayscale up front
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let (width, height) = (info.width, info.height);
    let (color_type, bit_depth) = reader.output_color_type();
    let data = &buf[..info.buffer_size()];
    let line = info.line_size;

    let mut out = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height as usize {
        let row = &data[y * line..];
        for x in 0..width as usize {
            let v = match (color_type, bit_depth) {
                (ColorType::Grayscale, BitDepth::Eight) => row[x] as f32 / 255.0,
                (ColorType::Grayscale, BitDepth::Sixteen) => {
                    be16(row, x * 2) as f32 / 65535.0
                }
                (ColorType::GrayscaleAlpha, BitDepth::Eight) => row[x * 2] as f32 / 255.0,
                (ColorType::GrayscaleAlpha, BitDepth::Sixteen) => {
                    be16(row, x * 4) as f32 / 65535.0
                }
                (ColorType::Rgb, BitDepth::Eight) => {
                    luma8(row[x * 3], row[x * 3 + 1], row[x * 3 + 2])
                }
                (ColorType::Rgb, BitDepth::Sixteen) => {
                    luma16(be16(row, x * 6), be16(row, x * 6 + 2), be16(row, x * 6 + 4))
                }
                (ColorType::Rgba, BitDepth::Eight) => {
                    luma8(row[x * 4], row[x * 4 + 1], row[x * 4 + 2])
                }
                (ColorType::Rgba, BitDepth::Sixteen) => {
                    luma16(be16(row, x * 8), be16(row, x * 8 + 2), be16(row, x * 8 + 4))
                }
                _ => {
                    return Err(IoError::UnsupportedFormat(format!(
                        "unsupported PNG output: {:?} {:?}",
                        color_type, bit_depth
                    )));
                }
            };
            out.push(v);
        }
    }

    Ok(GrayImage::from_data(width, height, out)?)
}

/// Encode an RGB overlay as PNG bytes.
pub fn encode_rgb_png(image: &RgbImage) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = Encoder::new(&mut bytes, image.width(), image.height());
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| IoError::EncodeError(format!("PNG encode error: {}", e)))?;
        writer
            .finish()
            .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    }
    Ok(bytes)
}

#[inline]
fn be16(row: &[u8], i: usize) -> u16 {
    ((row[i] as u16) << 8) | row[i + 1] as u16
}
