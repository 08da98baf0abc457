//! ONNX-backed skin-tone classification.
//!
//! This crate covers everything between a decoded image and a class id:
//! - Model artifact directories (topology descriptor + ONNX graph)
//! - Image-to-tensor preprocessing
//! - The classifier session, with warmup and argmax

pub mod artifact;
pub mod classifier;
mod error;
pub mod preprocess;

pub use classifier::{Classifier, SkinToneClassifier};
pub use error::{InferenceError, ModelLoadError};
pub use preprocess::InputTensor;
