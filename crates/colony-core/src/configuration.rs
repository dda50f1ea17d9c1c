//! The configuration: root of a planning session.
//!
//! A configuration owns an ordered sequence of planets and aggregates their
//! changes into a single top-level signal for presentation layers. Like the
//! planet, it subscribes a relay into each child and re-broadcasts without
//! inspecting what changed.

use crate::catalog::Product;
use crate::observer::{Observer, Relay, Signal};
use crate::planet::Planet;
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no planet at index {index} (configuration has {len})")]
    NoSuchPlanet { index: usize, len: usize },
}

/// Root object of a planning session.
#[derive(Debug)]
pub struct Configuration {
    planets: Vec<Planet>,
    /// The product this configuration is built to produce, if decided.
    product: Option<Rc<Product>>,
    signal: Signal,
    relay: Rc<Relay>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    pub fn new() -> Self {
        let signal = Signal::new();
        let relay = Rc::new(Relay::new(signal.clone()));
        Self {
            planets: Vec::new(),
            product: None,
            signal,
            relay,
        }
    }

    // -- Planet ownership ---------------------------------------------------

    /// Take ownership of a planet, start observing it, and notify.
    pub fn add_planet(&mut self, planet: Planet) {
        planet.signal().subscribe(self.relay.clone());
        self.planets.push(planet);
        self.signal.emit();
    }

    /// Detach and return the planet at `index`, then notify. The removed
    /// planet no longer reports into this configuration.
    pub fn remove_planet(&mut self, index: usize) -> Result<Planet, ConfigurationError> {
        if index >= self.planets.len() {
            return Err(ConfigurationError::NoSuchPlanet {
                index,
                len: self.planets.len(),
            });
        }
        let planet = self.planets.remove(index);
        planet.signal().unsubscribe(self.relay.as_ref());
        self.signal.emit();
        Ok(planet)
    }

    pub fn planet(&self, index: usize) -> Option<&Planet> {
        self.planets.get(index)
    }

    pub fn planet_mut(&mut self, index: usize) -> Option<&mut Planet> {
        self.planets.get_mut(index)
    }

    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        self.planets.iter()
    }

    pub fn num_planets(&self) -> usize {
        self.planets.len()
    }

    // -- Target product -----------------------------------------------------

    pub fn product(&self) -> Option<&Rc<Product>> {
        self.product.as_ref()
    }

    /// Set or clear the target product. Same-name assignment is a no-op.
    pub fn set_product(&mut self, product: Option<Rc<Product>>) {
        let current = self.product.as_ref().map(|p| p.name.as_str());
        let wanted = product.as_ref().map(|p| p.name.as_str());
        if current == wanted {
            return;
        }
        self.product = product;
        self.signal.emit();
    }

    // -- Aggregation across planets -----------------------------------------

    pub fn total_powergrid_provided(&self) -> u32 {
        self.planets.iter().map(Planet::total_powergrid_provided).sum()
    }

    pub fn total_powergrid_usage(&self) -> u32 {
        self.planets.iter().map(Planet::total_powergrid_usage).sum()
    }

    pub fn total_cpu_provided(&self) -> u32 {
        self.planets.iter().map(Planet::total_cpu_provided).sum()
    }

    pub fn total_cpu_usage(&self) -> u32 {
        self.planets.iter().map(Planet::total_cpu_usage).sum()
    }

    pub fn total_isk_cost(&self) -> f64 {
        self.planets.iter().map(Planet::total_isk_cost).sum()
    }

    /// Provided minus used power across all planets; negative means the
    /// combined layout overdraws.
    pub fn powergrid_balance(&self) -> i64 {
        i64::from(self.total_powergrid_provided()) - i64::from(self.total_powergrid_usage())
    }

    /// Provided minus used CPU across all planets.
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
}
