//! Per-building storage ledger.
//!
//! A ledger tracks product quantities against a volume capacity. Every
//! mutation is atomic: an operation that would violate the capacity or
//! stock constraints is rejected outright and leaves the ledger untouched.
//!
//! The ledger never emits change notifications; only the owning building
//! knows whether a storage mutation is externally observable.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quantity and per-unit volume of one stored product.
///
/// The unit volume is captured at first deposit and sticks for the life of
/// the lot, so used-volume accounting stays correct even if the product is
/// later deregistered from the catalog or re-registered with a different
/// volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredLot {
    pub quantity: u32,
    pub unit_volume: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
    #[error("deposit needs {required} m3 but only {available} m3 remain")]
    CapacityExceeded { required: f64, available: f64 },
    #[error("requested {requested} units of \"{product}\" but only {available} are stored")]
    InsufficientQuantity {
        product: String,
        requested: u32,
        available: u32,
    },
    #[error("stored quantity of \"{0}\" would overflow")]
    QuantityOverflow(String),
}

/// Volume-bounded inventory of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageLedger {
    capacity: f64,
    contents: BTreeMap<String, StoredLot>,
}

impl StorageLedger {
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            contents: BTreeMap::new(),
        }
    }

    /// Add `quantity` units of `product`. Rejected atomically if the
    /// resulting total volume would exceed capacity.
    pub fn deposit(&mut self, product: &Product, quantity: u32) -> Result<(), StorageError> {
        self.deposit_lot(&product.name, quantity, product.volume)
    }

    /// Deposit primitive keyed by name and unit volume. Used by `deposit`
    /// and by snapshot restore, which has no live `Product` at hand.
    ///
    /// Merging into an existing lot books the new units at the lot's stored
    /// unit volume; the incoming one only applies to a fresh lot. Otherwise
    /// a name re-registered with a smaller volume could push used volume
    /// past capacity.
    pub(crate) fn deposit_lot(
        &mut self,
        name: &str,
        quantity: u32,
        unit_volume: f64,
    ) -> Result<(), StorageError> {
        if quantity == 0 {
            return Err(StorageError::ZeroQuantity);
        }
        let existing = self.contents.get(name).copied();
        let unit_volume = existing.map_or(unit_volume, |lot| lot.unit_volume);
        let merged = match existing {
            Some(lot) => lot
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| StorageError::QuantityOverflow(name.to_string()))?,
            None => quantity,
        };
        let required = f64::from(quantity) * unit_volume;
        let available = self.remaining_capacity();
        if required > available {
            return Err(StorageError::CapacityExceeded {
                required,
                available,
            });
        }

        self.contents.insert(
            name.to_string(),
            StoredLot {
                quantity: merged,
                unit_volume,
            },
        );
        Ok(())
    }

    /// Remove `quantity` units of `product`. Rejected atomically if fewer
    /// units are stored. The entry disappears when it reaches zero.
    pub fn withdraw(&mut self, product: &Product, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            return Err(StorageError::ZeroQuantity);
        }
        let available = self.quantity_of(&product.name);
        if quantity > available {
            return Err(StorageError::InsufficientQuantity {
                product: product.name.clone(),
                requested: quantity,
                available,
            });
        }

        let lot = self
            .contents
            .get_mut(&product.name)
            .expect("checked above: entry exists");
        lot.quantity -= quantity;
        if lot.quantity == 0 {
            self.contents.remove(&product.name);
        }
        Ok(())
    }

    /// Remove every stored unit of the named product. Returns the quantity
    /// removed, zero if nothing was stored.
    pub fn withdraw_all(&mut self, name: &str) -> u32 {
        self.contents
            .remove(name)
            .map(|lot| lot.quantity)
            .unwrap_or(0)
    }

    /// Capacity minus currently used volume.
    pub fn remaining_capacity(&self) -> f64 {
        self.capacity - self.used_volume()
    }

    /// Total volume currently occupied.
    pub fn used_volume(&self) -> f64 {
        self.contents
            .values()
            .map(|lot| f64::from(lot.quantity) * lot.unit_volume)
            .sum()
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Stored quantity of the named product; zero when absent.
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.contents.get(name).map(|lot| lot.quantity).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Stored lots keyed by product name.
    pub fn contents(&self) -> impl Iterator<Item = (&str, &StoredLot)> {
        self.contents.iter().map(|(name, lot)| (name.as_str(), lot))
    }
}
