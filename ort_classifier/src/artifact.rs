//! Model artifact directories.
//!
//! A deployable artifact is a directory holding two files:
//! - `model.json`: the topology descriptor exported by the training
//!   pipeline (declared input shape, layer stack, class count),
//! - `model.onnx`: the graph the runtime actually executes.
//!
//! Newer training exports write `batch_shape` on their input layers where
//! the loading contract expects `batch_input_shape`, so the descriptor is
//! normalized in memory before anything reads it.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ModelLoadError;

pub const DESCRIPTOR_FILE: &str = "model.json";
pub const WEIGHTS_FILE: &str = "model.onnx";

/// A read, normalized and validated model artifact, ready for session
/// creation.
#[derive(Debug)]
pub struct ModelArtifact {
    /// Normalized topology descriptor.
    pub descriptor: Value,
    /// Path of the ONNX graph to execute.
    pub weights: PathBuf,
    /// Input shape declared by the descriptor, batch dim omitted:
    /// `[height, width, channels]`.
    pub input_shape: [usize; 3],
    /// Output classes declared by the final dense layer.
    pub class_count: usize,
}

impl ModelArtifact {
    /// Reads an artifact directory.
    pub fn load(dir: &Path) -> Result<Self, ModelLoadError> {
        let descriptor_path = dir.join(DESCRIPTOR_FILE);
        let raw = fs::read_to_string(&descriptor_path).map_err(|source| ModelLoadError::Io {
            path: descriptor_path.clone(),
            source,
        })?;
        let mut descriptor: Value =
            serde_json::from_str(&raw).map_err(|source| ModelLoadError::Descriptor {
                path: descriptor_path.clone(),
                source,
            })?;

        let patched = patch_input_layers(&mut descriptor);
        if patched > 0 {
            log::debug!("Renamed batch_shape on {patched} input layer(s) in {descriptor_path:?}");
        }

        let layers = layers(&descriptor).ok_or(ModelLoadError::MissingField(
            "modelTopology.model_config.config.layers",
        ))?;
        let input_shape = declared_input_shape(layers).ok_or(ModelLoadError::MissingField(
            "a usable InputLayer input shape",
        ))?;
        let class_count = declared_class_count(layers).ok_or(ModelLoadError::MissingField(
            "a final dense layer with units",
        ))?;

        let weights = dir.join(WEIGHTS_FILE);
        if !weights.exists() {
            return Err(ModelLoadError::MissingWeights(weights));
        }

        log::info!("Model artifact at {dir:?}: input {input_shape:?}, {class_count} classes");

        Ok(Self {
            descriptor,
            weights,
            input_shape,
            class_count,
        })
    }
}

/// Renames `batch_shape` to `batch_input_shape` on every InputLayer config.
/// Returns how many layers were patched. Idempotent.
fn patch_input_layers(descriptor: &mut Value) -> usize {
    let mut patched = 0;
    if let Some(layers) = descriptor
        .pointer_mut("/modelTopology/model_config/config/layers")
        .and_then(Value::as_array_mut)
    {
        for layer in layers {
            if layer["class_name"] != "InputLayer" {
                continue;
            }
            if let Some(config) = layer.get_mut("config").and_then(Value::as_object_mut) {
                if let Some(shape) = config.remove("batch_shape") {
                    config.insert("batch_input_shape".to_string(), shape);
                    patched += 1;
                }
            }
        }
    }
    patched
}

fn layers(descriptor: &Value) -> Option<&Vec<Value>> {
    descriptor
        .pointer("/modelTopology/model_config/config/layers")
        .and_then(Value::as_array)
}

/// Input shape from the first InputLayer: `[null, h, w, c]` minus the
/// dynamic batch dim.
fn declared_input_shape(layers: &[Value]) -> Option<[usize; 3]> {
    for layer in layers {
        if layer["class_name"] != "InputLayer" {
            continue;
        }
        let shape = layer.pointer("/config/batch_input_shape")?.as_array()?;
        if shape.len() != 4 {
            return None;
        }
        let height = shape[1].as_u64()? as usize;
        let width = shape[2].as_u64()? as usize;
        let channels = shape[3].as_u64()? as usize;
        return Some([height, width, channels]);
    }
    None
}

/// Class count from the last layer declaring `units` (the final dense
/// layer of the stack).
fn declared_class_count(layers: &[Value]) -> Option<usize> {
    layers
        .iter()
        .rev()
        .find_map(|layer| layer.pointer("/config/units").and_then(Value::as_u64))
        .map(|units| units as usize)
}
