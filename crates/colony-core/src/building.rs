//! Planetary buildings.
//!
//! A [`Building`] couples variant-specific state (command center upgrade
//! level, facility schematic assignment) with a shared storage ledger and a
//! change signal. All derived stats are pure functions of the current
//! variant state, read from fixed tables.
//!
//! Mutations follow one contract everywhere: validate first, apply second,
//! notify last -- and only when externally visible state actually changed.
//! A rejected or no-op call never reaches an observer.

use crate::catalog::{Catalog, Product, Schematic};
use crate::observer::{Observer, Signal};
use crate::storage::{StorageError, StorageLedger};
use std::ops::RangeInclusive;
use std::rc::Rc;

/// Highest command center upgrade level.
pub const MAX_UPGRADE_LEVEL: u8 = 5;

// Command center stat tables, indexed by upgrade level 0..=5.
const LEVEL_TO_POWERGRID: [u32; 6] = [6_000, 9_000, 12_000, 15_000, 17_000, 19_000];
const LEVEL_TO_CPU: [u32; 6] = [1_675, 7_057, 12_136, 17_215, 21_315, 25_415];
const LEVEL_TO_ISK: [f64; 6] = [
    90_000.0,
    670_000.0,
    1_600_000.0,
    2_800_000.0,
    4_300_000.0,
    6_400_000.0,
];

const COMMAND_CENTER_NAME: &str = "Command Center";
const COMMAND_CENTER_STORAGE_VOLUME: f64 = 500.0;

/// Fixed stats of an industrial facility class.
#[derive(Debug, PartialEq)]
pub struct FacilityClass {
    pub name: &'static str,
    pub powergrid_usage: u32,
    pub cpu_usage: u32,
    pub isk_cost: f64,
    pub storage_volume: f64,
    /// Schematic tiers this class may host, inclusive at both ends.
    pub accepted_tiers: RangeInclusive<u8>,
}

pub const BASIC_INDUSTRIAL_FACILITY: FacilityClass = FacilityClass {
    name: "Basic Industrial Facility",
    powergrid_usage: 800,
    cpu_usage: 200,
    isk_cost: 75_000.0,
    storage_volume: 1_000.0,
    accepted_tiers: 2..=2,
};

pub const ADVANCED_INDUSTRIAL_FACILITY: FacilityClass = FacilityClass {
    name: "Advanced Industrial Facility",
    powergrid_usage: 700,
    cpu_usage: 500,
    isk_cost: 250_000.0,
    storage_volume: 1_000.0,
    accepted_tiers: 2..=3,
};

pub const HIGH_TECH_PRODUCTION_PLANT: FacilityClass = FacilityClass {
    name: "High Tech Production Plant",
    powergrid_usage: 400,
    cpu_usage: 1_100,
    isk_cost: 525_000.0,
    storage_volume: 1_500.0,
    accepted_tiers: 4..=4,
};

/// Fixed stats of a pure-storage building class.
#[derive(Debug, PartialEq)]
pub struct StorageClass {
    pub name: &'static str,
    pub powergrid_usage: u32,
    pub cpu_usage: u32,
    pub isk_cost: f64,
    pub storage_volume: f64,
}

pub const STORAGE_FACILITY: StorageClass = StorageClass {
    name: "Storage Facility",
    powergrid_usage: 700,
    cpu_usage: 500,
    isk_cost: 250_000.0,
    storage_volume: 12_000.0,
};

pub const LAUNCHPAD: StorageClass = StorageClass {
    name: "Launchpad",
    powergrid_usage: 700,
    cpu_usage: 3_600,
    isk_cost: 900_000.0,
    storage_volume: 10_000.0,
};

/// Resolve an industrial class by its display name.
pub fn industrial_class_by_name(name: &str) -> Option<&'static FacilityClass> {
    [
        &BASIC_INDUSTRIAL_FACILITY,
        &ADVANCED_INDUSTRIAL_FACILITY,
        &HIGH_TECH_PRODUCTION_PLANT,
    ]
    .into_iter()
    .find(|class| class.name == name)
}

/// Resolve a storage class by its display name.
pub fn storage_class_by_name(name: &str) -> Option<&'static StorageClass> {
    [&STORAGE_FACILITY, &LAUNCHPAD]
        .into_iter()
        .find(|class| class.name == name)
}

#[derive(Debug, thiserror::Error)]
pub enum BuildingError {
    #[error("upgrade level must be between 0 and {MAX_UPGRADE_LEVEL}, got {0}")]
    LevelOutOfRange(u8),
    #[error("\"{0}\" has no upgrade level")]
    NotACommandCenter(&'static str),
    #[error("\"{0}\" cannot host a schematic")]
    SchematicNotSupported(&'static str),
    #[error("no schematic named \"{0}\" is registered")]
    UnknownSchematic(String),
    #[error("schematic \"{name}\" is tier {tier}, outside the accepted range {min}..={max}")]
    TierNotAccepted {
        name: String,
        tier: u8,
        min: u8,
        max: u8,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Variant-specific building state.
#[derive(Debug)]
pub enum BuildingKind {
    /// Provides power and CPU; stats scale with the upgrade level.
    CommandCenter { level: u8 },
    /// Consumes power and CPU to run an optional production schematic.
    Industrial {
        class: &'static FacilityClass,
        schematic: Option<Rc<Schematic>>,
    },
    /// Consumes power and CPU to provide bulk storage.
    Storage { class: &'static StorageClass },
}

/// A single planetary building: variant state, storage ledger, and change
/// signal.
#[derive(Debug)]
pub struct Building {
    kind: BuildingKind,
    ledger: StorageLedger,
    signal: Signal,
}

impl Building {
    /// A fresh command center at upgrade level 0.
    pub fn command_center() -> Self {
        Self {
            kind: BuildingKind::CommandCenter { level: 0 },
            ledger: StorageLedger::new(COMMAND_CENTER_STORAGE_VOLUME),
            signal: Signal::new(),
        }
    }

    /// An industrial facility of the given class with no schematic assigned.
    pub fn industrial(class: &'static FacilityClass) -> Self {
        Self {
            kind: BuildingKind::Industrial {
                class,
                schematic: None,
            },
            ledger: StorageLedger::new(class.storage_volume),
            signal: Signal::new(),
        }
    }

    /// A pure-storage building of the given class.
    pub fn storage(class: &'static StorageClass) -> Self {
        Self {
            kind: BuildingKind::Storage { class },
            ledger: StorageLedger::new(class.storage_volume),
            signal: Signal::new(),
        }
    }

    // -- Read accessors -----------------------------------------------------

    /// Human-readable type name, constant per variant.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            BuildingKind::CommandCenter { .. } => COMMAND_CENTER_NAME,
            BuildingKind::Industrial { class, .. } => class.name,
            BuildingKind::Storage { class } => class.name,
        }
    }

    pub fn kind(&self) -> &BuildingKind {
        &self.kind
    }

    /// Current upgrade level; `None` for anything but a command center.
    pub fn upgrade_level(&self) -> Option<u8> {
        match &self.kind {
            BuildingKind::CommandCenter { level } => Some(*level),
            _ => None,
        }
    }

    pub fn powergrid_provided(&self) -> u32 {
        match &self.kind {
            BuildingKind::CommandCenter { level } => LEVEL_TO_POWERGRID[usize::from(*level)],
            _ => 0,
        }
    }

    pub fn powergrid_usage(&self) -> u32 {
        match &self.kind {
            BuildingKind::CommandCenter { .. } => 0,
            BuildingKind::Industrial { class, .. } => class.powergrid_usage,
            BuildingKind::Storage { class } => class.powergrid_usage,
        }
    }

    pub fn cpu_provided(&self) -> u32 {
        match &self.kind {
            BuildingKind::CommandCenter { level } => LEVEL_TO_CPU[usize::from(*level)],
            _ => 0,
        }
    }

    pub fn cpu_usage(&self) -> u32 {
        match &self.kind {
            BuildingKind::CommandCenter { .. } => 0,
            BuildingKind::Industrial { class, .. } => class.cpu_usage,
            BuildingKind::Storage { class } => class.cpu_usage,
        }
    }

    pub fn isk_cost(&self) -> f64 {
        match &self.kind {
            BuildingKind::CommandCenter { level } => LEVEL_TO_ISK[usize::from(*level)],
            BuildingKind::Industrial { class, .. } => class.isk_cost,
            BuildingKind::Storage { class } => class.isk_cost,
        }
    }

    pub fn storage_volume(&self) -> f64 {
        self.ledger.capacity()
    }

    /// The assigned schematic; `None` for non-industrial buildings or when
    /// nothing is assigned.
    pub fn schematic(&self) -> Option<&Rc<Schematic>> {
        match &self.kind {
            BuildingKind::Industrial { schematic, .. } => schematic.as_ref(),
            _ => None,
        }
    }

    pub fn schematic_name(&self) -> Option<&str> {
        self.schematic().map(|s| s.name.as_str())
    }

    pub fn ledger(&self) -> &StorageLedger {
        &self.ledger
    }

    /// Ledger access for snapshot restore, bypassing notification.
    pub(crate) fn ledger_mut(&mut self) -> &mut StorageLedger {
        &mut self.ledger
    }

    /// Names of all registered schematics this building could host, in
    /// catalog registration order. Empty for non-industrial buildings.
    pub fn accepted_schematic_names(&self, catalog: &Catalog) -> Vec<String> {
        match &self.kind {
            BuildingKind::Industrial { class, .. } => catalog
                .schematics_in_tier_range(class.accepted_tiers.clone())
                .map(|s| s.name.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    // -- Level transitions (command center) ---------------------------------

    /// Raise the upgrade level by one. At level 5 this is a silent no-op.
    pub fn increase_level(&mut self) -> Result<(), BuildingError> {
        let name = self.name();
        match &mut self.kind {
            BuildingKind::CommandCenter { level } => {
                if *level < MAX_UPGRADE_LEVEL {
                    *level += 1;
                    self.signal.emit();
                }
                Ok(())
            }
            _ => Err(BuildingError::NotACommandCenter(name)),
        }
    }

    /// Lower the upgrade level by one. At level 0 this is a silent no-op.
    pub fn decrease_level(&mut self) -> Result<(), BuildingError> {
        let name = self.name();
        match &mut self.kind {
            BuildingKind::CommandCenter { level } => {
                if *level > 0 {
                    *level -= 1;
                    self.signal.emit();
                }
                Ok(())
            }
            _ => Err(BuildingError::NotACommandCenter(name)),
        }
    }

    /// Jump directly to `target`. Setting the current level again is a
    /// no-op without notification.
    pub fn set_level(&mut self, target: u8) -> Result<(), BuildingError> {
        let name = self.name();
        match &mut self.kind {
            BuildingKind::CommandCenter { level } => {
                if target > MAX_UPGRADE_LEVEL {
                    return Err(BuildingError::LevelOutOfRange(target));
                }
                if target == *level {
                    return Ok(());
                }
                *level = target;
                self.signal.emit();
                Ok(())
            }
            _ => Err(BuildingError::NotACommandCenter(name)),
        }
    }

    // -- Schematic assignment (industrial) ----------------------------------

    /// Assign or clear the production schematic.
    ///
    /// `Some(name)` resolves through the catalog, checks the class tier
    /// range, and assigns the shared schematic; re-assigning the currently
    /// held name is a no-op. `None` clears, notifying only if a schematic
    /// was assigned.
    pub fn set_schematic(
        &mut self,
        catalog: &Catalog,
        name: Option<&str>,
    ) -> Result<(), BuildingError> {
        let building_name = self.name();
        match &mut self.kind {
            BuildingKind::Industrial { class, schematic } => match name {
                None => {
                    if schematic.take().is_some() {
                        self.signal.emit();
                    }
                    Ok(())
                }
                Some(wanted) => {
                    let resolved = catalog
                        .schematic(wanted)
                        .map_err(|_| BuildingError::UnknownSchematic(wanted.to_string()))?;
                    if !class.accepted_tiers.contains(&resolved.tier) {
                        return Err(BuildingError::TierNotAccepted {
                            name: resolved.name.clone(),
                            tier: resolved.tier,
                            min: *class.accepted_tiers.start(),
                            max: *class.accepted_tiers.end(),
                        });
                    }
                    // Same-name assignment is a no-op; name is the external
                    // discriminator, not Rc identity.
                    if schematic.as_ref().map(|s| s.name.as_str()) == Some(wanted) {
                        return Ok(());
                    }
                    *schematic = Some(resolved);
                    self.signal.emit();
                    Ok(())
                }
            },
            _ => Err(BuildingError::SchematicNotSupported(building_name)),
        }
    }

    // -- Storage mutation ---------------------------------------------------

    /// Deposit into this building's ledger, notifying on success.
    pub fn store_product(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<(), BuildingError> {
        self.ledger.deposit(product, quantity)?;
        self.signal.emit();
        Ok(())
    }

    /// Withdraw from this building's ledger, notifying on success.
    pub fn remove_product(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<(), BuildingError> {
        self.ledger.withdraw(product, quantity)?;
        self.signal.emit();
        Ok(())
    }

    /// Remove every unit of the named product. Notifies only when
    /// something was actually stored; returns the quantity removed.
    pub fn remove_all_product(&mut self, name: &str) -> u32 {
        let removed = self.ledger.withdraw_all(name);
        if removed > 0 {
            self.signal.emit();
        }
        removed
    }

    pub fn stored_quantity(&self, name: &str) -> u32 {
        self.ledger.quantity_of(name)
    }

    // -- Observation --------------------------------------------------------

    pub fn add_observer(&self, observer: Rc<dyn Observer>) {
        self.signal.subscribe(observer);
    }

    pub fn remove_observer(&self, observer: &dyn Observer) {
        self.signal.unsubscribe(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.signal.observer_count()
    }

    pub(crate) fn signal(&self) -> &Signal {
        &self.signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_catalog, CountingObserver};

    // -----------------------------------------------------------------------
    // Command center: stat tables
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_command_center_defaults() {
        let cc = Building::command_center();
        assert_eq!(cc.name(), "Command Center");
        assert_eq!(cc.upgrade_level(), Some(0));
        assert_eq!(cc.powergrid_provided(), 6_000);
        assert_eq!(cc.cpu_provided(), 1_675);
        assert_eq!(cc.isk_cost(), 90_000.0);
        assert_eq!(cc.powergrid_usage(), 0);
        assert_eq!(cc.cpu_usage(), 0);
        assert_eq!(cc.storage_volume(), 500.0);
    }

    #[test]
    fn command_center_stats_track_level() {
        let expected: [(u32, u32, f64); 6] = [
            (6_000, 1_675, 90_000.0),
            (9_000, 7_057, 670_000.0),
            (12_000, 12_136, 1_600_000.0),
            (15_000, 17_215, 2_800_000.0),
            (17_000, 21_315, 4_300_000.0),
            (19_000, 25_415, 6_400_000.0),
        ];

        let mut cc = Building::command_center();
        for (level, (pg, cpu, isk)) in expected.iter().enumerate() {
            cc.set_level(level as u8).unwrap();
            assert_eq!(cc.powergrid_provided(), *pg, "power at level {level}");
            assert_eq!(cc.cpu_provided(), *cpu, "cpu at level {level}");
            assert_eq!(cc.isk_cost(), *isk, "isk at level {level}");
        }
    }

    // -----------------------------------------------------------------------
    // Command center: level state machine
    // -----------------------------------------------------------------------

    #[test]
    fn increase_then_decrease_round_trips() {
        let mut cc = Building::command_center();
        cc.set_level(3).unwrap();
        cc.increase_level().unwrap();
        cc.decrease_level().unwrap();
        assert_eq!(cc.upgrade_level(), Some(3));
    }

    #[test]
    fn increase_stops_at_five() {
        let mut cc = Building::command_center();
        cc.set_level(5).unwrap();
        cc.increase_level().unwrap();
        assert_eq!(cc.upgrade_level(), Some(5));
    }

    #[test]
    fn decrease_stops_at_zero() {
        let mut cc = Building::command_center();
        cc.decrease_level().unwrap();
        assert_eq!(cc.upgrade_level(), Some(0));
    }

    #[test]
    fn set_level_rejects_out_of_range() {
        let mut cc = Building::command_center();
        for bad in [6u8, 12, 255] {
            let result = cc.set_level(bad);
            assert!(matches!(result, Err(BuildingError::LevelOutOfRange(l)) if l == bad));
        }
        assert_eq!(cc.upgrade_level(), Some(0));
    }

    #[test]
    fn level_ops_rejected_on_non_command_center() {
        let mut facility = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
        assert!(matches!(
            facility.increase_level(),
            Err(BuildingError::NotACommandCenter(_))
        ));
        assert!(matches!(
            facility.set_level(2),
            Err(BuildingError::NotACommandCenter(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Command center: notification contract
    // -----------------------------------------------------------------------

    #[test]
    fn level_change_notifies_observers() {
        let mut cc = Building::command_center();
        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());

        cc.increase_level().unwrap();
        assert_eq!(observer.count(), 1);

        cc.decrease_level().unwrap();
        assert_eq!(observer.count(), 2);

        cc.set_level(4).unwrap();
        assert_eq!(observer.count(), 3);
    }

    #[test]
    fn boundary_noops_do_not_notify() {
        let mut cc = Building::command_center();
        cc.set_level(5).unwrap();

        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());

        cc.increase_level().unwrap();
        assert_eq!(observer.count(), 0);

        cc.set_level(0).unwrap();
        assert_eq!(observer.count(), 1);
        cc.decrease_level().unwrap();
        assert_eq!(observer.count(), 1);
    }

    #[test]
    fn same_level_set_does_not_notify() {
        let mut cc = Building::command_center();
        cc.set_level(3).unwrap();

        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());
        cc.set_level(3).unwrap();
        assert_eq!(observer.count(), 0);
    }

    #[test]
    fn failed_set_level_does_not_notify() {
        let mut cc = Building::command_center();
        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());

        let _ = cc.set_level(12);
        assert_eq!(observer.count(), 0);
    }

    #[test]
    fn remove_observer_stops_notifications() {
        let mut cc = Building::command_center();
        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());
        assert_eq!(cc.observer_count(), 1);

        cc.remove_observer(observer.as_ref());
        assert_eq!(cc.observer_count(), 0);

        cc.increase_level().unwrap();
        assert_eq!(observer.count(), 0);
    }

    // -----------------------------------------------------------------------
    // Industrial facility: fixed stats
    // -----------------------------------------------------------------------

    #[test]
    fn advanced_facility_stats() {
        let facility = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
        assert_eq!(facility.name(), "Advanced Industrial Facility");
        assert_eq!(facility.powergrid_usage(), 700);
        assert_eq!(facility.cpu_usage(), 500);
        assert_eq!(facility.powergrid_provided(), 0);
        assert_eq!(facility.cpu_provided(), 0);
        assert_eq!(facility.isk_cost(), 250_000.0);
        assert_eq!(facility.upgrade_level(), None);
    }

    #[test]
    fn storage_building_stats() {
        let storage = Building::storage(&STORAGE_FACILITY);
        assert_eq!(storage.name(), "Storage Facility");
        assert_eq!(storage.storage_volume(), 12_000.0);
        assert_eq!(storage.powergrid_usage(), 700);

        let launchpad = Building::storage(&LAUNCHPAD);
        assert_eq!(launchpad.cpu_usage(), 3_600);
        assert_eq!(launchpad.storage_volume(), 10_000.0);
    }

    #[test]
    fn class_lookup_by_name() {
        assert!(industrial_class_by_name("Advanced Industrial Facility").is_some());
        assert!(industrial_class_by_name("Command Center").is_none());
        assert!(storage_class_by_name("Launchpad").is_some());
        assert!(storage_class_by_name("Warehouse").is_none());
    }

    // -----------------------------------------------------------------------
    // Industrial facility: schematic assignment
    // -----------------------------------------------------------------------

    #[test]
    fn set_and_clear_schematic() {
        let catalog = sample_catalog();
        let mut facility = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);

        facility.set_schematic(&catalog, Some("Coolant")).unwrap();
        assert_eq!(facility.schematic_name(), Some("Coolant"));

        facility.set_schematic(&catalog, None).unwrap();
        assert_eq!(facility.schematic_name(), None);
        assert!(facility.schematic().is_none());
    }

    #[test]
    fn assigned_schematic_is_the_shared_catalog_entity() {
        let catalog = sample_catalog();
        let mut a = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
        let mut b = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
        a.set_schematic(&catalog, Some("Water")).unwrap();
        b.set_schematic(&catalog, Some("Water")).unwrap();

        let shared = catalog.schematic("Water").unwrap();
        assert!(Rc::ptr_eq(a.schematic().unwrap(), &shared));
        assert!(Rc::ptr_eq(a.schematic().unwrap(), b.schematic().unwrap()));
    }

    #[test]
    fn unknown_schematic_rejected() {
        let catalog = sample_catalog();
        let mut facility = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
        let result = facility.set_schematic(&catalog, Some("faaaaaaail"));
        assert!(matches!(result, Err(BuildingError::UnknownSchematic(_))));
        assert_eq!(facility.schematic_name(), None);
    }

    #[test]
    fn out_of_tier_schematic_rejected() {
        let catalog = sample_catalog();
        let mut facility = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);

        // Broadcast Node is tier 4; the advanced facility takes 2..=3.
        let result = facility.set_schematic(&catalog, Some("Broadcast Node"));
        assert!(matches!(
            result,
            Err(BuildingError::TierNotAccepted {
                tier: 4,
                min: 2,
                max: 3,
                ..
            })
        ));
        assert_eq!(facility.schematic_name(), None);
    }

    #[test]
    fn basic_facility_only_accepts_tier_two() {
        let catalog = sample_catalog();
        let mut facility = Building::industrial(&BASIC_INDUSTRIAL_FACILITY);

        facility.set_schematic(&catalog, Some("Water")).unwrap();
        assert!(facility.set_schematic(&catalog, Some("Coolant")).is_err());
        assert_eq!(facility.schematic_name(), Some("Water"));
    }

    #[test]
    fn schematic_rejected_on_non_industrial() {
        let catalog = sample_catalog();
        let mut cc = Building::command_center();
        assert!(matches!(
            cc.set_schematic(&catalog, Some("Water")),
            Err(BuildingError::SchematicNotSupported(_))
        ));
    }

    #[test]
    fn accepted_schematic_names_in_registration_order() {
        let catalog = sample_catalog();
        let facility = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
        assert_eq!(
            facility.accepted_schematic_names(&catalog),
            vec![
                "Water",
                "Reactive Metals",
                "Electrolytes",
                "Oxygen",
                "Coolant",
                "Synthetic Oil"
            ]
        );
    }

    #[test]
    fn accepted_schematic_names_is_a_live_query() {
        let mut catalog = sample_catalog();
        let facility = Building::industrial(&HIGH_TECH_PRODUCTION_PLANT);
        assert_eq!(
            facility.accepted_schematic_names(&catalog),
            vec!["Broadcast Node"]
        );

        catalog.deregister_schematic("Broadcast Node");
        assert!(facility.accepted_schematic_names(&catalog).is_empty());
    }

    #[test]
    fn schematic_notifications() {
        let catalog = sample_catalog();
        let mut facility = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
        let observer = CountingObserver::new();
        facility.add_observer(observer.clone());

        // Assign: notify.
        facility.set_schematic(&catalog, Some("Coolant")).unwrap();
        assert_eq!(observer.count(), 1);

        // Same name again: no-op, no notify.
        facility.set_schematic(&catalog, Some("Coolant")).unwrap();
        assert_eq!(observer.count(), 1);

        // Different name: notify.
        facility.set_schematic(&catalog, Some("Water")).unwrap();
        assert_eq!(observer.count(), 2);

        // Clear: notify.
        facility.set_schematic(&catalog, None).unwrap();
        assert_eq!(observer.count(), 3);

        // Clear with nothing assigned: no-op.
        facility.set_schematic(&catalog, None).unwrap();
        assert_eq!(observer.count(), 3);

        // Failed assignments never notify.
        let _ = facility.set_schematic(&catalog, Some("faaaaaaail"));
        let _ = facility.set_schematic(&catalog, Some("Broadcast Node"));
        assert_eq!(observer.count(), 3);
    }

    // -----------------------------------------------------------------------
    // Storage mutation through the building
    // -----------------------------------------------------------------------

    #[test]
    fn store_and_remove_notify_on_success() {
        let catalog = sample_catalog();
        let water = catalog.product("Water").unwrap();
        let mut cc = Building::command_center();
        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());

        cc.store_product(&water, 100).unwrap();
        assert_eq!(observer.count(), 1);
        assert_eq!(cc.stored_quantity("Water"), 100);

        cc.remove_product(&water, 40).unwrap();
        assert_eq!(observer.count(), 2);

        assert_eq!(cc.remove_all_product("Water"), 60);
        assert_eq!(observer.count(), 3);
    }

    #[test]
    fn failed_storage_mutation_does_not_notify() {
        let catalog = sample_catalog();
        let water = catalog.product("Water").unwrap();
        let mut cc = Building::command_center();
        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());

        // 2000 * 0.38 = 760 m3 > 500 m3 capacity.
        assert!(cc.store_product(&water, 2_000).is_err());
        assert_eq!(observer.count(), 0);
        assert!(cc.ledger().is_empty());

        assert!(cc.remove_product(&water, 1).is_err());
        assert_eq!(observer.count(), 0);
    }

    #[test]
    fn remove_all_of_absent_product_is_silent() {
        let mut cc = Building::command_center();
        let observer = CountingObserver::new();
        cc.add_observer(observer.clone());

        assert_eq!(cc.remove_all_product("Water"), 0);
        assert_eq!(observer.count(), 0);
    }
}
