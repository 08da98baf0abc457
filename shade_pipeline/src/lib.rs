//! The analysis pipeline: frame acquisition, session state and the
//! orchestration of preprocess -> classify -> recommend -> paginate.

pub mod capture;
mod error;
pub mod session;

pub use error::PipelineError;
