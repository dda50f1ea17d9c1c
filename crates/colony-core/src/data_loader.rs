//! Data-driven catalog loading from JSON.
//!
//! Feature-gated behind `data-loader`. Entries register in file order, so
//! registration-order queries (`accepted_schematic_names`) follow the data
//! file.

use crate::catalog::{Catalog, CatalogError};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level catalog data structure for JSON deserialization.
#[derive(Debug, serde::Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub products: Vec<ProductData>,
    #[serde(default)]
    pub schematics: Vec<SchematicData>,
}

/// JSON representation of a product.
#[derive(Debug, serde::Deserialize)]
pub struct ProductData {
    pub name: String,
    pub tier: u8,
    pub volume: f64,
}

/// JSON representation of a schematic.
#[derive(Debug, serde::Deserialize)]
pub struct SchematicData {
    pub name: String,
    pub tier: u8,
    #[serde(default)]
    pub inputs: Vec<SchematicInputData>,
}

/// JSON representation of one schematic input line.
#[derive(Debug, serde::Deserialize)]
pub struct SchematicInputData {
    pub product: String, // references a product by name
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Load a catalog from a JSON string.
pub fn load_catalog_json(json: &str) -> Result<Catalog, DataLoadError> {
    let data: CatalogData = serde_json::from_str(json)?;
    build_catalog(data)
}

/// Load a catalog from JSON bytes.
pub fn load_catalog_json_bytes(bytes: &[u8]) -> Result<Catalog, DataLoadError> {
    let data: CatalogData = serde_json::from_slice(bytes)?;
    build_catalog(data)
}

fn build_catalog(data: CatalogData) -> Result<Catalog, DataLoadError> {
    let mut catalog = Catalog::new();

    // Products first: schematic inputs reference them by name.
    for product in &data.products {
        catalog.register_product(&product.name, product.tier, product.volume)?;
    }

    for schematic in &data.schematics {
        let inputs: BTreeMap<String, u32> = schematic
            .inputs
            .iter()
            .map(|input| (input.product.clone(), input.quantity))
            .collect();
        catalog.register_schematic(&schematic.name, schematic.tier, inputs)?;
    }

    Ok(catalog)
}
