//! Product catalog model, matching the upstream makeup product feed.
//!
//! The feed is a JSON array of product records. Almost every field shows up
//! null or absent somewhere in the wild, so the model is deliberately
//! tolerant: only `id` and `name` are required. Catalog data is read-only
//! input; nothing in the pipeline mutates or persists it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog file could not be turned into products.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file")]
    Io(#[from] std::io::Error),
    #[error("catalog is not a valid product array")]
    Json(#[from] serde_json::Error),
}

/// One shade (named color variant) offered by a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shade {
    /// Feed field `hex_value`. Not guaranteed to be a parseable color.
    #[serde(rename = "hex_value")]
    pub hex: String,
    /// Feed field `colour_name`. Missing for some vendors.
    #[serde(rename = "colour_name")]
    pub name: Option<String>,
}

/// One catalog product as delivered by the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub price_sign: Option<String>,
    #[serde(default)]
    pub product_link: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    /// Feed field `product_colors`; absent for shade-less products.
    #[serde(rename = "product_colors", default)]
    pub shades: Vec<Shade>,
}

/// Reads a catalog JSON array from disk.
pub fn read_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let json = fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&json)?;
    log::debug!("Loaded {} products from {path:?}", products.len());
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_feed_json() {
        // Hex values contain `"#`, which would close a single-# raw string.
        let json = r##"{
            "id": 495,
            "brand": "maybelline",
            "name": "Maybelline Fit Me Foundation",
            "price": "10.99",
            "price_sign": null,
            "product_link": null,
            "image_link": null,
            "product_colors": [
                { "hex_value": "#D29C7B", "colour_name": "Natural Beige" },
                { "hex_value": "#F5E0D6", "colour_name": null }
            ]
        }"##;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 495);
        assert_eq!(product.brand.as_deref(), Some("maybelline"));
        assert_eq!(product.shades.len(), 2);
        assert_eq!(product.shades[0].name.as_deref(), Some("Natural Beige"));
        assert_eq!(product.shades[1].hex, "#F5E0D6");
        assert!(product.shades[1].name.is_none());
    }

    #[test]
    fn test_product_with_sparse_fields() {
        // Several vendors omit everything optional, including the colors.
        let json = r#"{ "id": 1, "name": "Bare Product" }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.shades.is_empty());
        assert!(product.brand.is_none());
        assert!(product.price.is_none());
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = read_catalog(Path::new("/nonexistent/makeup.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
