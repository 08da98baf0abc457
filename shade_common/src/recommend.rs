//! Product scoring against a skin-tone palette.

use serde::Serialize;

use crate::catalog::{Product, Shade};
use crate::color::hex_distance;
use crate::palette::{palette_for, ConfigurationError, SkinTonePalette};

/// Products whose best distance is at or above this never make the list.
pub const MATCH_THRESHOLD: f32 = 60.0;

/// Lower bound applied to the derived match percent.
pub const MATCH_PERCENT_FLOOR: u8 = 80;

/// A catalog product that cleared the match cutoff for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,
    /// Derived closeness score in `[80, 100]`.
    pub match_percent: u8,
    /// Name of the winning shade, when the feed carries one.
    pub best_shade: Option<String>,
    /// Hex of the winning shade.
    pub best_shade_hex: String,
}

/// Scores every product against the palette for `class_id`.
///
/// Each product is reduced to the minimum distance over all of its shades
/// and all six target colors. Products below [`MATCH_THRESHOLD`] (strictly)
/// are kept with `match_percent = max(80, round(100 - distance))` and sorted
/// by descending percent. The sort is stable, so equal scores keep their
/// catalog order. Products without shades, and shades that do not parse,
/// never match. An unknown class id aborts with no partial results.
pub fn recommend(
    class_id: usize,
    products: &[Product],
) -> Result<Vec<ScoredProduct>, ConfigurationError> {
    let palette = palette_for(class_id)?;
    let mut scored = score_against(palette, products);
    scored.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));
    log::debug!(
        "{} of {} products cleared the match cutoff for {:?}",
        scored.len(),
        products.len(),
        palette.title
    );
    Ok(scored)
}

fn score_against(palette: &SkinTonePalette, products: &[Product]) -> Vec<ScoredProduct> {
    let mut scored = Vec::new();
    for product in products {
        // Minimum over every (shade, target) pair; first hit keeps ties.
        let mut best: Option<(f32, &Shade)> = None;
        for shade in &product.shades {
            for target in &palette.target_colors {
                let distance = hex_distance(&shade.hex, target);
                if best.map_or(true, |(b, _)| distance < b) {
                    best = Some((distance, shade));
                }
            }
        }
        if let Some((distance, shade)) = best {
            if distance < MATCH_THRESHOLD {
                scored.push(ScoredProduct {
                    product: product.clone(),
                    match_percent: match_percent(distance),
                    best_shade: shade.name.clone(),
                    best_shade_hex: shade.hex.clone(),
                });
            }
        }
    }
    scored
}

fn match_percent(distance: f32) -> u8 {
    ((100.0 - distance).round() as u8).max(MATCH_PERCENT_FLOOR)
}
