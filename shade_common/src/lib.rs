//! Domain core of the trueshade pipeline.
//!
//! This crate holds everything that is pure data and math:
//! - Color parsing and the RGB distance metric
//! - The skin-tone palette registry
//! - The product catalog model (makeup feed schema)
//! - Recommendation scoring
//! - Pagination over ranked results
//!
//! No model runtime and no pipeline state live here; see `ort_classifier`
//! and `shade_pipeline` for those.

pub mod catalog;
pub mod color;
pub mod paginate;
pub mod palette;
pub mod recommend;

pub use palette::ConfigurationError;
