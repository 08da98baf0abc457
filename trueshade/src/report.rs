//! Structured export and text rendering of one analysis.

use std::path::Path;

use serde::Serialize;
use shade_common::paginate;
use shade_common::palette::SkinTonePalette;
use shade_common::recommend::ScoredProduct;
use shade_pipeline::session::AnalysisResult;

/// Full analysis in one JSON document, for downstream presentation.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub class_id: usize,
    pub palette: &'a SkinTonePalette,
    pub total_matches: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub products: &'a [ScoredProduct],
}

impl<'a> AnalysisReport<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self {
            class_id: result.class_id,
            palette: result.palette,
            total_matches: result.products.len(),
            page_size: paginate::PAGE_SIZE,
            total_pages: paginate::total_pages(result.products.len(), paginate::PAGE_SIZE),
            products: &result.products,
        }
    }

    /// Writes the report as pretty JSON.
    pub fn export_json(&self, path: &Path) -> Result<(), std::io::Error> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// One scored product as a single text row.
pub fn render_product_line(item: &ScoredProduct) -> String {
    let brand = item.product.brand.as_deref().unwrap_or("unbranded");
    let shade = item.best_shade.as_deref().unwrap_or(&item.best_shade_hex);
    // Feed display fallbacks: bare prices render as "$0.00".
    let price_sign = item.product.price_sign.as_deref().unwrap_or("$");
    let price = item.product.price.as_deref().unwrap_or("0.00");
    format!(
        "{:>3}%  {} - {} (shade: {}, {}{})",
        item.match_percent, brand, item.product.name, shade, price_sign, price
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_common::catalog::Product;

    fn scored(match_percent: u8) -> ScoredProduct {
        ScoredProduct {
            product: Product {
                id: 1,
                name: "Liquid Foundation".to_string(),
                brand: None,
                price: None,
                price_sign: None,
                product_link: None,
                image_link: None,
                shades: Vec::new(),
            },
            match_percent,
            best_shade: None,
            best_shade_hex: "#D2967B".to_string(),
        }
    }

    #[test]
    fn test_render_line_uses_feed_fallbacks() {
        let line = render_product_line(&scored(94));
        assert!(line.contains("94%"));
        assert!(line.contains("unbranded"));
        assert!(line.contains("$0.00"));
        // No shade name in the feed, so the hex stands in.
        assert!(line.contains("#D2967B"));
    }
}
