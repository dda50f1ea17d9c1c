//! Planets: ordered collections of buildings with aggregate resource views.
//!
//! A planet owns its buildings exclusively. It subscribes a relay into each
//! owned building's signal, so any building-level change re-broadcasts as a
//! planet-level change without the planet inspecting what happened.

use crate::building::Building;
use crate::observer::{Observer, Relay, Signal};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Planetary surface type; determines which raw resources exist in-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    Uncolonized,
    Gas,
    Ice,
    Storm,
    Barren,
    Temperate,
    Lava,
    Oceanic,
    Plasma,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanetError {
    #[error("no building at index {index} (planet has {len})")]
    NoSuchBuilding { index: usize, len: usize },
}

/// A colonized (or not) planet holding an ordered sequence of buildings.
#[derive(Debug)]
pub struct Planet {
    planet_type: PlanetType,
    buildings: Vec<Building>,
    signal: Signal,
    /// Subscribed into every owned building's signal; re-emits `signal`.
    relay: Rc<Relay>,
}

impl Planet {
    pub fn new(planet_type: PlanetType) -> Self {
        let signal = Signal::new();
        let relay = Rc::new(Relay::new(signal.clone()));
        Self {
            planet_type,
            buildings: Vec::new(),
            signal,
            relay,
        }
    }

    pub fn planet_type(&self) -> PlanetType {
        self.planet_type
    }

    /// Change the surface type. Setting the current type again is a no-op.
    pub fn set_planet_type(&mut self, planet_type: PlanetType) {
        if planet_type == self.planet_type {
            return;
        }
        self.planet_type = planet_type;
        self.signal.emit();
    }

    // -- Building ownership -------------------------------------------------

    /// Take ownership of a building, start observing it, and notify.
    /// Structural changes are always observable.
    pub fn add_building(&mut self, building: Building) {
        building.signal().subscribe(self.relay.clone());
        self.buildings.push(building);
        self.signal.emit();
    }

    /// Detach and return the building at `index`, then notify. The removed
    /// building keeps its external observers but no longer reports here.
    pub fn remove_building(&mut self, index: usize) -> Result<Building, PlanetError> {
        if index >= self.buildings.len() {
            return Err(PlanetError::NoSuchBuilding {
                index,
                len: self.buildings.len(),
            });
        }
        let building = self.buildings.remove(index);
        building.signal().unsubscribe(self.relay.as_ref());
        self.signal.emit();
        Ok(building)
    }

    pub fn building(&self, index: usize) -> Option<&Building> {
        self.buildings.get(index)
    }

    /// Mutable access for in-place mutation; changes fan out through the
    /// planet's subscription automatically.
    pub fn building_mut(&mut self, index: usize) -> Option<&mut Building> {
        self.buildings.get_mut(index)
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }

    pub fn num_buildings(&self) -> usize {
        self.buildings.len()
    }

    // -- Aggregation (computed on demand, never cached) ---------------------

    pub fn total_powergrid_provided(&self) -> u32 {
        self.buildings.iter().map(Building::powergrid_provided).sum()
    }

    pub fn total_powergrid_usage(&self) -> u32 {
        self.buildings.iter().map(Building::powergrid_usage).sum()
    }

    pub fn total_cpu_provided(&self) -> u32 {
        self.buildings.iter().map(Building::cpu_provided).sum()
    }

    pub fn total_cpu_usage(&self) -> u32 {
        self.buildings.iter().map(Building::cpu_usage).sum()
    }

    pub fn total_isk_cost(&self) -> f64 {
        self.buildings.iter().map(Building::isk_cost).sum()
    }

    /// Provided minus used power; negative means the layout overdraws.
    pub fn powergrid_balance(&self) -> i64 {
        i64::from(self.total_powergrid_provided()) - i64::from(self.total_powergrid_usage())
    }

    /// Provided minus used CPU.
    pub fn cpu_balance(&self) -> i64 {
        i64::from(self.total_cpu_provided()) - i64::from(self.total_cpu_usage())
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
