//! A small end-to-end colony plan: build a catalog, lay out a planet,
//! watch changes propagate, and round-trip the plan through a snapshot.
//!
//! Run with: cargo run --example colony_plan --features test-utils

use colony_core::building::{Building, ADVANCED_INDUSTRIAL_FACILITY, LAUNCHPAD};
use colony_core::configuration::Configuration;
use colony_core::planet::{Planet, PlanetType};
use colony_core::serialize;
use colony_core::test_utils::{sample_catalog, CountingObserver};

fn main() {
    let catalog = sample_catalog();

    // Lay out a temperate planet: command center, coolant factory, launchpad.
    let mut planet = Planet::new(PlanetType::Temperate);
    planet.add_building(Building::command_center());

    let mut factory = Building::industrial(&ADVANCED_INDUSTRIAL_FACILITY);
    factory
        .set_schematic(&catalog, Some("Coolant"))
        .expect("coolant is tier 3, accepted by the advanced facility");
    planet.add_building(factory);
    planet.add_building(Building::storage(&LAUNCHPAD));

    let mut config = Configuration::new();
    config.add_planet(planet);
    config.set_product(Some(catalog.product("Coolant").unwrap()));

    // Subscribe a top-level observer, then upgrade the command center.
    let observer = CountingObserver::new();
    config.add_observer(observer.clone());

    let planet_ref = config.planet_mut(0).unwrap();
    let cc = planet_ref.building_mut(0).unwrap();
    cc.set_level(2).expect("2 is a valid level");

    println!("configuration observer notified {} time(s)", observer.count());
    println!(
        "power: {} provided / {} used, cpu: {} provided / {} used",
        config.total_powergrid_provided(),
        config.total_powergrid_usage(),
        config.total_cpu_provided(),
        config.total_cpu_usage(),
    );
    println!("total cost: {} ISK", config.total_isk_cost());

    // Round-trip the plan through a binary snapshot.
    let bytes = serialize::encode(&serialize::snapshot(&config)).expect("encode");
    println!("snapshot size: {} bytes", bytes.len());

    let restored =
        serialize::restore(&serialize::decode(&bytes).expect("decode"), &catalog).expect("restore");
    println!(
        "restored {} planet(s), target product {:?}",
        restored.num_planets(),
        restored.product().map(|p| p.name.as_str()),
    );
}
