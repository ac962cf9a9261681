//! sembridge-region - Connected components and region measurement
//!
//! This crate provides the region layer of the pipeline:
//!
//! - Union-Find connected-component labeling with 4-/8-way connectivity
//! - Per-region geometric descriptors: area, weighted perimeter, centroid,
//!   moment-equivalent ellipse axes, convex-hull solidity
//! - Size-based selection: small-component removal, hole filling, and
//!   area-ranked keep-top-N with a deterministic tie-break

pub mod conncomp;
mod error;
pub mod props;
pub mod select;

pub use conncomp::{ConnectivityType, count_components, label_components};
pub use error::{RegionError, RegionResult};
pub use props::{Bounds, Region, measure_regions};
pub use select::{
    component_areas, fill_small_holes, keep_largest_components, remove_small_components,
};
