//! Shared test helpers.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and examples (via the
//! `test-utils` feature).

use crate::catalog::Catalog;
use crate::observer::Observer;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

// ===========================================================================
// Observers
// ===========================================================================

/// Counts how many times it was notified.
#[derive(Debug, Default)]
pub struct CountingObserver {
    updates: Cell<u32>,
}

impl CountingObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Number of notifications received so far.
    pub fn count(&self) -> u32 {
        self.updates.get()
    }

    pub fn was_notified(&self) -> bool {
        self.updates.get() > 0
    }
}

impl Observer for CountingObserver {
    fn update(&self) {
        self.updates.set(self.updates.get() + 1);
    }
}

// ===========================================================================
// Sample catalog
// ===========================================================================

fn inputs(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries
        .iter()
        .map(|(name, qty)| (name.to_string(), *qty))
        .collect()
}

/// A small production chain spanning all four tiers.
///
/// Schematic registration order (relevant for `accepted_schematic_names`):
/// Water, Reactive Metals, Electrolytes, Oxygen (tier 2), Coolant,
/// Synthetic Oil (tier 3), Broadcast Node (tier 4).
pub fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    // Tier 1 raw materials.
    catalog.register_product("Aqueous Liquids", 1, 0.01).unwrap();
    catalog.register_product("Base Metals", 1, 0.01).unwrap();
    catalog.register_product("Ionic Solutions", 1, 0.01).unwrap();
    catalog.register_product("Noble Gas", 1, 0.01).unwrap();

    // Tier 2 refined goods.
    catalog.register_product("Water", 2, 0.38).unwrap();
    catalog.register_product("Reactive Metals", 2, 0.38).unwrap();
    catalog.register_product("Electrolytes", 2, 0.38).unwrap();
    catalog.register_product("Oxygen", 2, 0.38).unwrap();

    // Tier 3 processed goods.
    catalog.register_product("Coolant", 3, 1.5).unwrap();
    catalog.register_product("Synthetic Oil", 3, 1.5).unwrap();

    // Tier 4 advanced goods.
    catalog.register_product("Broadcast Node", 4, 6.0).unwrap();

    catalog
        .register_schematic("Water", 2, inputs(&[("Aqueous Liquids", 3000)]))
        .unwrap();
    catalog
        .register_schematic("Reactive Metals", 2, inputs(&[("Base Metals", 3000)]))
        .unwrap();
    catalog
        .register_schematic("Electrolytes", 2, inputs(&[("Ionic Solutions", 3000)]))
        .unwrap();
    catalog
        .register_schematic("Oxygen", 2, inputs(&[("Noble Gas", 3000)]))
        .unwrap();
    catalog
        .register_schematic("Coolant", 3, inputs(&[("Electrolytes", 40), ("Water", 40)]))
        .unwrap();
    catalog
        .register_schematic(
            "Synthetic Oil",
            3,
            inputs(&[("Electrolytes", 40), ("Oxygen", 40)]),
        )
        .unwrap();
    catalog
        .register_schematic(
            "Broadcast Node",
            4,
            inputs(&[("Coolant", 6), ("Synthetic Oil", 6)]),
        )
        .unwrap();

    catalog
}
