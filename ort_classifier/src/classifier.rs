//! The classifier session: load, warmup, classify.

use ndarray::{Array4, CowArray};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;

use crate::artifact::ModelArtifact;
use crate::error::{InferenceError, ModelLoadError};
use crate::preprocess::InputTensor;

/// Anything that maps a preprocessed input tensor to a class id.
///
/// The pipeline talks to this trait, so sessions can be driven by stub
/// classifiers in tests.
pub trait Classifier {
    fn classify(&mut self, input: &InputTensor) -> Result<usize, InferenceError>;
    /// Number of classes this classifier can output.
    fn class_count(&self) -> usize;
}

/// Skin-tone classifier backed by an ONNX Runtime session.
pub struct SkinToneClassifier {
    session: Session,
    class_count: usize,
}

impl SkinToneClassifier {
    /// Builds a session from the artifact and warms it up with one all-zero
    /// inference, so graph initialization cost lands at load time instead of
    /// on the first user submission. The warmup doubles as a check that the
    /// graph output length matches the descriptor's declared class count.
    pub fn load(artifact: &ModelArtifact) -> Result<Self, ModelLoadError> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(&artifact.weights)?;
        log::debug!("{session:?}");

        let mut classifier = Self {
            session,
            class_count: artifact.class_count,
        };

        let [height, width, channels] = artifact.input_shape;
        let zeros = Array4::<f32>::zeros((1, height, width, channels));
        classifier.scores(&zeros).map_err(ModelLoadError::Warmup)?;

        log::info!(
            "Prepared ort session from {:?} ({} classes)",
            artifact.weights,
            artifact.class_count
        );

        Ok(classifier)
    }

    /// Runs the graph and returns the raw per-class scores.
    fn scores(&mut self, input: &InputTensor) -> Result<Vec<f32>, InferenceError> {
        let input_dyn = CowArray::from(input.view()).into_dyn();
        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(&input_dyn)?])?;
        let (_shape, raw) = outputs[0].try_extract_tensor::<f32>()?;

        if raw.is_empty() {
            return Err(InferenceError::EmptyOutput);
        }
        if raw.len() != self.class_count {
            return Err(InferenceError::ClassCountMismatch {
                expected: self.class_count,
                actual: raw.len(),
            });
        }
        Ok(raw.to_vec())
    }
}

impl Classifier for SkinToneClassifier {
    fn classify(&mut self, input: &InputTensor) -> Result<usize, InferenceError> {
        let scores = self.scores(input)?;
        let class_id = argmax(&scores).ok_or(InferenceError::EmptyOutput)?;
        log::debug!("Class scores {scores:?} -> class {class_id}");
        Ok(class_id)
    }

    fn class_count(&self) -> usize {
        self.class_count
    }
}

/// Index of the highest score. Ties keep the lowest index, so the update
/// below must stay strictly greater-than.
fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        let replace = match best {
            Some((_, top)) => score > top,
            None => true,
        };
        if replace {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_the_peak() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.9]), Some(0));
    }

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), Some(1));
        assert_eq!(argmax(&[0.5, 0.2, 0.5]), Some(0));
    }

    #[test]
    fn test_argmax_of_nothing() {
        assert_eq!(argmax(&[]), None);
    }
}
