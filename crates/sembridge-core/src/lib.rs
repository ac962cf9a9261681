//! Sembridge Core - Basic raster containers for SEM deposit analysis
//!
//! This crate provides the fundamental data structures used throughout the
//! sembridge workspace:
//!
//! - [`GrayImage`] - normalized floating-point intensity field in [0,1]
//! - [`ByteImage`] - 8-bit grayscale plane
//! - [`BitMask`] - binary mask
//! - [`LabelMap`] - connected-component labeling (0 = background)
//! - [`RgbImage`] - 3-channel overlay buffer
//!
//! Every container is row-major with no padding, allocates its own buffer
//! and shares nothing, so concurrent pipeline invocations need no
//! coordination.

pub mod error;
pub mod gray;
pub mod labels;
pub mod mask;
pub mod rgb;

pub use error::{Error, Result};
pub use gray::{ByteImage, GrayImage};
pub use labels::LabelMap;
pub use mask::BitMask;
pub use rgb::RgbImage;
