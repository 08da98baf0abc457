//! Skin-tone palette registry.
//!
//! Class ids are fixed by the trained classifier: output index `i` means
//! palette `i`. Each palette carries display copy and six reference colors
//! used as matching anchors by the recommendation engine.

use serde::Serialize;
use thiserror::Error;

/// A model/registry mismatch. Always a deployment defect, never user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The classifier produced a class id with no registered palette.
    #[error("no palette registered for class id {0}")]
    UnknownClass(usize),
    /// The model declares more output classes than the registry can resolve.
    #[error("model declares {model} classes, palette registry holds {registry}")]
    ClassCountMismatch { model: usize, registry: usize },
}

/// One skin-tone class with its reference palette.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SkinTonePalette {
    /// Classifier output index this palette belongs to.
    pub class_id: usize,
    pub title: &'static str,
    pub description: &'static str,
    /// Anchor colors, ordered as exported by the training pipeline.
    pub target_colors: [&'static str; 6],
}

/// Registry indexed by class id. Position in the array is the class id, so
/// entries must stay in classifier output order.
pub static PALETTES: [SkinTonePalette; 3] = [
    SkinTonePalette {
        class_id: 0,
        title: "Deep Cool",
        description: "Deep complexion with cool undertones. Rich espresso \
                      and berry shades sit naturally against it.",
        target_colors: [
            "#5D3A28", "#8B0000", "#4B2E2A", "#3E2723", "#581845", "#6D271A",
        ],
    },
    SkinTonePalette {
        class_id: 1,
        title: "Warm Medium",
        description: "Medium complexion with warm golden undertones. Earthy \
                      caramel and terracotta shades blend in best.",
        target_colors: [
            "#D29C7B", "#B35A5A", "#C68642", "#CD853F", "#A56B57", "#D2691E",
        ],
    },
    SkinTonePalette {
        class_id: 2,
        title: "Fair Ivory",
        description: "Fair complexion with soft pink undertones. Light ivory \
                      and peach shades keep the look from washing out.",
        target_colors: [
            "#F5E0D6", "#FFE4C4", "#FFDEAD", "#FAEBD7", "#F0E68C", "#FFC0CB",
        ],
    },
];

/// Number of classes the registry can resolve.
pub fn class_count() -> usize {
    PALETTES.len()
}

/// Looks up the palette for a classifier output.
///
/// A missing id means the model and the registry are out of step, so the
/// whole operation aborts instead of falling back to some default palette.
pub fn palette_for(class_id: usize) -> Result<&'static SkinTonePalette, ConfigurationError> {
    PALETTES
        .get(class_id)
        .ok_or(ConfigurationError::UnknownClass(class_id))
}
