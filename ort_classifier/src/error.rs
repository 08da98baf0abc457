//! Error types for model loading and inference.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to bring the classifier up. Fatal to serving until a later load
/// attempt succeeds.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model descriptor {path:?}")]
    Descriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model descriptor is missing {0}")]
    MissingField(&'static str),
    #[error("model weights not found at {0:?}")]
    MissingWeights(PathBuf),
    #[error("failed to build inference session")]
    Session(#[from] ort::Error),
    #[error("warmup inference failed")]
    Warmup(#[source] InferenceError),
}

/// Per-request inference failure. Does not poison the session; the next
/// submission runs normally.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference run failed")]
    Run(#[from] ort::Error),
    #[error("model returned {actual} scores, expected {expected}")]
    ClassCountMismatch { expected: usize, actual: usize },
    #[error("model returned no scores")]
    EmptyOutput,
}
