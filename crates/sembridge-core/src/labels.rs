//! Component labelings
//!
//! [`LabelMap`] assigns a non-negative integer to every pixel: 0 means
//! "not a member of this labeling", each positive value identifies one
//! connected region. Labelings are produced once by a segmenter and are
//! read-only for every downstream stage.

use crate::error::{Error, Result};
use crate::mask::BitMask;

/// Integer component labeling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    data: Vec<u32>,
    max_label: u32,
}

impl LabelMap {
    /// Create an all-background labeling.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(LabelMap {
            width,
            height,
            data: vec![0; size],
            max_label: 0,
        })
    }

    /// Create a labeling from raw row-major data.
    ///
    /// `max_label` is recomputed from the data.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        let max_label = data.iter().copied().max().unwrap_or(0);
        Ok(LabelMap {
            width,
            height,
            data,
            max_label,
        })
    }

    /// Labeling width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Labeling height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Label at (x, y). Out-of-bounds reads as background (0).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set the label at (x, y).
    pub fn set(&mut self, x: u32, y: u32, label: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize * self.width as usize + x as usize,
                len: self.data.len(),
            });
        }
        self.data[y as usize * self.width as usize + x as usize] = label;
        self.max_label = self.max_label.max(label);
        Ok(())
    }

    /// Raw label data in row-major order
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Highest label value present (equals the component count when labels
    /// are consecutive, which every labeler in this workspace guarantees).
    #[inline]
    pub fn max_label(&self) -> u32 {
        self.max_label
    }

    /// Iterate over all positive labels, ascending.
    pub fn labels(&self) -> impl Iterator<Item = u32> {
        1..=self.max_label
    }

    /// Binary mask of one component.
    pub fn mask_of(&self, label: u32) -> BitMask {
        let data = self.data.iter().map(|&v| v == label && label != 0).collect();
        BitMask::from_data(self.width, self.height, data).unwrap()
    }

    /// Binary mask of all foreground pixels (label != 0).
    pub fn foreground(&self) -> BitMask {
        let data = self.data.iter().map(|&v| v != 0).collect();
        BitMask::from_data(self.width, self.height, data).unwrap()
    }

    /// Binary mask of all pixels whose label is in `labels`.
    pub fn mask_of_set(&self, labels: &std::collections::BTreeSet<u32>) -> BitMask {
        let data = self
            .data
            .iter()
            .map(|&v| v != 0 && labels.contains(&v))
            .collect();
        BitMask::from_data(self.width, self.height, data).unwrap()
    }
}
