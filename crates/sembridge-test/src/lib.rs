//! sembridge-test - Regression test support
//!
//! Shared by the workspace's `tests/*_reg.rs` suites:
//!
//! - [`RegParams`] - indexed value comparisons with failure accumulation
//! - [`synthetic`] - deterministic SEM-like scenes with known geometry

mod params;
pub mod synthetic;

pub use params::RegParams;
