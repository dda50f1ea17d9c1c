//! Versioned binary snapshots of a configuration.
//!
//! The live object tree holds trait-object observer lists, which cannot be
//! serialized; instead a plain-data mirror of the tree is captured, encoded
//! with `bitcode` behind a magic/version header, and rebuilt against a
//! catalog on restore. Restored trees come back with empty observer lists.

use crate::building::{
    industrial_class_by_name, storage_class_by_name, Building, BuildingError, BuildingKind,
};
use crate::catalog::{Catalog, CatalogError};
use crate::configuration::Configuration;
use crate::planet::{Planet, PlanetType};
use crate::storage::StorageError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a colony configuration snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0xC01A_0001;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
}

/// Errors rebuilding a live configuration from a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("unknown building class: {0}")]
    UnknownBuildingClass(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Building(#[from] BuildingError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ---------------------------------------------------------------------------
// Snapshot header
// ---------------------------------------------------------------------------

/// Header prepended to every snapshot; enables format detection and version
/// checking before trusting the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
}

impl SnapshotHeader {
    pub fn new() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        Ok(())
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Snapshot mirror types
// ---------------------------------------------------------------------------

/// One stored product line in a building's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProduct {
    pub product: String,
    pub quantity: u32,
    pub unit_volume: f64,
}

/// Variant state of a building, by name rather than by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildingKindSnapshot {
    CommandCenter { level: u8 },
    Industrial {
        class: String,
        schematic: Option<String>,
    },
    Storage { class: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub kind: BuildingKindSnapshot,
    pub stored: Vec<StoredProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSnapshot {
    pub planet_type: PlanetType,
    pub buildings: Vec<BuildingSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    pub header: SnapshotHeader,
    pub product: Option<String>,
    pub planets: Vec<PlanetSnapshot>,
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

fn snapshot_building(building: &Building) -> BuildingSnapshot {
    let kind = match building.kind() {
        BuildingKind::CommandCenter { level } => BuildingKindSnapshot::CommandCenter {
            level: *level,
        },
        BuildingKind::Industrial { class, schematic } => BuildingKindSnapshot::Industrial {
            class: class.name.to_string(),
            schematic: schematic.as_ref().map(|s| s.name.clone()),
        },
        BuildingKind::Storage { class } => BuildingKindSnapshot::Storage {
            class: class.name.to_string(),
        },
    };

    let stored = building
        .ledger()
        .contents()
        .map(|(name, lot)| StoredProduct {
            product: name.to_string(),
            quantity: lot.quantity,
            unit_volume: lot.unit_volume,
        })
        .collect();

    BuildingSnapshot { kind, stored }
}

/// Capture a plain-data mirror of the configuration tree.
pub fn snapshot(configuration: &Configuration) -> ConfigurationSnapshot {
    ConfigurationSnapshot {
        header: SnapshotHeader::new(),
        product: configuration.product().map(|p| p.name.clone()),
        planets: configuration
            .planets()
            .map(|planet| PlanetSnapshot {
                planet_type: planet.planet_type(),
                buildings: planet.buildings().map(snapshot_building).collect(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

fn restore_building(
    snapshot: &BuildingSnapshot,
    catalog: &Catalog,
) -> Result<Building, RestoreError> {
    let mut building = match &snapshot.kind {
        BuildingKindSnapshot::CommandCenter { level } => {
            let mut cc = Building::command_center();
            cc.set_level(*level)?;
            cc
        }
        BuildingKindSnapshot::Industrial { class, schematic } => {
            let class = industrial_class_by_name(class)
                .ok_or_else(|| RestoreError::UnknownBuildingClass(class.clone()))?;
            let mut facility = Building::industrial(class);
            if let Some(name) = schematic {
                facility.set_schematic(catalog, Some(name))?;
            }
            facility
        }
        BuildingKindSnapshot::Storage { class } => {
            let class = storage_class_by_name(class)
                .ok_or_else(|| RestoreError::UnknownBuildingClass(class.clone()))?;
            Building::storage(class)
        }
    };

    for line in &snapshot.stored {
        building
            .ledger_mut()
            .deposit_lot(&line.product, line.quantity, line.unit_volume)?;
    }
    Ok(building)
}

/// Rebuild a live configuration from a snapshot, resolving schematic and
/// product names through `catalog`. Observer lists start empty.
pub fn restore(
    snapshot: &ConfigurationSnapshot,
    catalog: &Catalog,
) -> Result<Configuration, RestoreError> {
    let mut configuration = Configuration::new();

    for planet_snapshot in &snapshot.planets {
        let mut planet = Planet::new(planet_snapshot.planet_type);
        for building_snapshot in &planet_snapshot.buildings {
            planet.add_building(restore_building(building_snapshot, catalog)?);
        }
        configuration.add_planet(planet);
    }

    if let Some(name) = &snapshot.product {
        configuration.set_product(Some(catalog.product(name)?));
    }
    Ok(configuration)
}

// ---------------------------------------------------------------------------
// Binary encoding
// ---------------------------------------------------------------------------

/// Encode a snapshot to bytes.
pub fn encode(snapshot: &ConfigurationSnapshot) -> Result<Vec<u8>, SerializeError> {
    bitcode::serialize(snapshot).map_err(|e| SerializeError::Encode(e.to_string()))
}

/// Decode and validate a snapshot from bytes.
pub fn decode(data: &[u8]) -> Result<ConfigurationSnapshot, DeserializeError> {
    let snapshot: ConfigurationSnapshot =
        bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
    snapshot.header.validate()?;
    Ok(snapshot)
}
