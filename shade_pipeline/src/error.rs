//! Unified error surface of the pipeline.

use thiserror::Error;

use ort_classifier::{InferenceError, ModelLoadError};
use shade_common::catalog::CatalogError;
use shade_common::palette::ConfigurationError;

use crate::capture::CaptureError;

/// Anything the pipeline can fail with, for callers that handle all stages
/// uniformly.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
