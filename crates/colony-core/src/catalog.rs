//! The product and schematic catalog.
//!
//! Products are the goods a colony produces and stores; schematics are the
//! recipes that turn input products into an output product of the same name.
//! Both are immutable once registered and shared by `Rc`, so two facilities
//! assigned "the same" schematic hold the identical entity.
//!
//! The catalog is an explicit owned object rather than process-global state:
//! callers (and tests) create one, register what they need, and drop it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use std::rc::Rc;

/// Valid planetary tiers: 1 is raw material, 4 is the most refined.
pub const TIER_RANGE: RangeInclusive<u8> = 1..=4;

/// A producible good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique name, the catalog key.
    pub name: String,
    /// Planetary tier, 1..=4.
    pub tier: u8,
    /// Storage volume per unit, in m3.
    pub volume: f64,
}

/// A production recipe. The output product is the one sharing the
/// schematic's name; inputs map product names to required quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    /// Unique name, the catalog key. Matches the output product's name.
    pub name: String,
    /// Planetary tier of the output, 1..=4. Determines which facility
    /// classes may host this schematic.
    pub tier: u8,
    /// Required input quantities, keyed by product name. Never empty.
    pub inputs: BTreeMap<String, u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("name already registered: {0}")]
    DuplicateName(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("tier for \"{name}\" must be between 1 and 4, got {tier}")]
    TierOutOfRange { name: String, tier: u8 },
    #[error("volume for \"{name}\" must be non-negative, got {volume}")]
    NegativeVolume { name: String, volume: f64 },
    #[error("schematic \"{0}\" has no inputs")]
    EmptyInputs(String),
    #[error("schematic \"{schematic}\" references unregistered product \"{product}\"")]
    UnknownProduct { schematic: String, product: String },
}

/// Registry of products and schematics, keyed by name.
///
/// Registration order is preserved and observable: iteration and
/// tier-filtered queries yield entries in the order they were registered.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Rc<Product>>,
    product_index: HashMap<String, Rc<Product>>,
    schematics: Vec<Rc<Schematic>>,
    schematic_index: HashMap<String, Rc<Schematic>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product. Fails on a duplicate name, a tier outside 1..=4,
    /// or a negative unit volume.
    pub fn register_product(
        &mut self,
        name: &str,
        tier: u8,
        volume: f64,
    ) -> Result<Rc<Product>, CatalogError> {
        if self.product_index.contains_key(name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }
        if !TIER_RANGE.contains(&tier) {
            return Err(CatalogError::TierOutOfRange {
                name: name.to_string(),
                tier,
            });
        }
        if volume < 0.0 {
            return Err(CatalogError::NegativeVolume {
                name: name.to_string(),
                volume,
            });
        }

        let product = Rc::new(Product {
            name: name.to_string(),
            tier,
            volume,
        });
        self.products.push(product.clone());
        self.product_index.insert(name.to_string(), product.clone());
        Ok(product)
    }

    /// Register a schematic. Every input must reference an already
    /// registered product, and at least one input is required.
    pub fn register_schematic(
        &mut self,
        name: &str,
        tier: u8,
        inputs: BTreeMap<String, u32>,
    ) -> Result<Rc<Schematic>, CatalogError> {
        if self.schematic_index.contains_key(name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }
        if !TIER_RANGE.contains(&tier) {
            return Err(CatalogError::TierOutOfRange {
                name: name.to_string(),
                tier,
            });
        }
        if inputs.is_empty() {
            return Err(CatalogError::EmptyInputs(name.to_string()));
        }
        for input in inputs.keys() {
            if !self.product_index.contains_key(input) {
                return Err(CatalogError::UnknownProduct {
                    schematic: name.to_string(),
                    product: input.clone(),
                });
            }
        }

        let schematic = Rc::new(Schematic {
            name: name.to_string(),
            tier,
            inputs,
        });
        self.schematics.push(schematic.clone());
        self.schematic_index
            .insert(name.to_string(), schematic.clone());
        Ok(schematic)
    }

    /// Look up a product by name.
    pub fn product(&self, name: &str) -> Result<Rc<Product>, CatalogError> {
        self.product_index
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Look up a schematic by name.
    pub fn schematic(&self, name: &str) -> Result<Rc<Schematic>, CatalogError> {
        self.schematic_index
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Remove a product. Idempotent: returns `false` if it was absent.
    pub fn deregister_product(&mut self, name: &str) -> bool {
        if self.product_index.remove(name).is_none() {
            return false;
        }
        self.products.retain(|p| p.name != name);
        true
    }

    /// Remove a schematic. Idempotent: returns `false` if it was absent.
    pub fn deregister_schematic(&mut self, name: &str) -> bool {
        if self.schematic_index.remove(name).is_none() {
            return false;
        }
        self.schematics.retain(|s| s.name != name);
        true
    }

    /// Products in registration order.
    pub fn products(&self) -> impl Iterator<Item = &Rc<Product>> {
        self.products.iter()
    }

    /// Schematics in registration order.
    pub fn schematics(&self) -> impl Iterator<Item = &Rc<Schematic>> {
        self.schematics.iter()
    }

    /// Schematics whose tier falls within `tiers`, in registration order.
    /// This is a live query over current registrations, never a snapshot.
    pub fn schematics_in_tier_range(
        &self,
        tiers: RangeInclusive<u8>,
    ) -> impl Iterator<Item = &Rc<Schematic>> {
        self.schematics
            .iter()
            .filter(move |s| tiers.contains(&s.tier))
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn schematic_count(&self) -> usize {
        self.schematics.len()
    }
}
