//! Deterministic synthetic scenes
//!
//! SEM-like test captures built pixel by pixel, so regression expectations
//! can be stated against known geometry: grain slabs are bright, crystals
//! and the inter-grain channel are dark (the segmenter's darker-than-mean
//! polarity picks them up as foreground).

use sembridge_core::{ByteImage, RgbImage};

/// Canvas side of every synthetic scene
pub const SCENE_SIZE: u32 = 256;
/// Gray level of grain material
pub const BRIGHT: u8 = 191;
/// Gray level of crystals and the channel
pub const DARK: u8 = 51;
/// First column of the inter-grain channel
pub const CHANNEL_X0: u32 = 126;
/// Channel width in pixels (widens by one on each side after smoothing)
pub const CHANNEL_WIDTH: u32 = 5;
/// Side of one square speck
pub const SPECK_SIDE: u32 = 7;

/// Uniform field at the given gray level.
pub fn flat_field(value: u8) -> ByteImage {
    ByteImage::from_data(
        SCENE_SIZE,
        SCENE_SIZE,
        vec![value; (SCENE_SIZE * SCENE_SIZE) as usize],
    )
    .unwrap()
}

/// Top-left corners of the twelve specks, clear of the channel.
pub fn speck_positions() -> Vec<(u32, u32)> {
    let mut positions = Vec::new();
    for &y in &[40u32, 120] {
        for &x in &[30u32, 60, 90, 170, 200, 230] {
            positions.push((x, y));
        }
    }
    positions
}

/// Bright field with twelve dark square specks: enough crystals to pass
/// segmentation validity, but a single connected background (one grain).
pub fn speck_field() -> ByteImage {
    let mut image = flat_field(BRIGHT);
    for (sx, sy) in speck_positions() {
        for dy in 0..SPECK_SIDE {
            for dx in 0..SPECK_SIDE {
                image.set(sx + dx, sy + dy, DARK).unwrap();
            }
        }
    }
    image
}

/// Speck field plus a dark vertical channel splitting the background into
/// two grain slabs. The channel is an elongated dark region touching both
/// slabs and crossing their contact band, i.e. a bridging crystal.
pub fn two_grain_scene() -> ByteImage {
    let mut image = speck_field();
    for y in 0..SCENE_SIZE {
        for x in CHANNEL_X0..CHANNEL_X0 + CHANNEL_WIDTH {
            image.set(x, y, DARK).unwrap();
        }
    }
    image
}

/// A pixel inside the channel, for label lookups.
pub fn channel_probe() -> (u32, u32) {
    (CHANNEL_X0 + CHANNEL_WIDTH / 2, SCENE_SIZE / 2)
}

/// Encode a grayscale scene as PNG bytes, the pipeline's input form.
pub fn to_png(image: &ByteImage) -> Vec<u8> {
    let rgb = RgbImage::from_gray(image);
    sembridge_io::encode_rgb_png(&rgb).unwrap()
}
