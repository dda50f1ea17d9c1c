//! Colony Core -- the data model for planetary colony planning.
//!
//! This crate models the buildings, planets, and configurations used to plan
//! resource production on planets: buildings provide or consume power and
//! CPU, store goods against a volume limit, and optionally run a production
//! schematic. The heart of the crate is the change-propagation engine: a
//! mutation enters at a building, is validated against domain rules, applied,
//! and -- only if it changed externally visible state -- broadcast upward
//! through the owning planet to the configuration.
//!
//! # Validate, Apply, Notify
//!
//! Every mutator follows the same contract:
//!
//! 1. **Validate** -- out-of-domain input fails with a typed error and
//!    leaves state untouched.
//! 2. **Apply** -- the mutation lands atomically; no-ops (setting the
//!    current value again, boundary level transitions) change nothing.
//! 3. **Notify** -- real changes notify all subscribed observers in
//!    subscription order, synchronously, before the mutator returns.
//!    Rejected and no-op calls are indistinguishable, to an observer, from
//!    calls never made.
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Owned registry of [`catalog::Product`] and
//!   [`catalog::Schematic`] entries, shared by `Rc`.
//! - [`storage::StorageLedger`] -- Volume-bounded inventory with atomic
//!   deposit/withdraw.
//! - [`building::Building`] -- Command center (upgrade levels 0..=5 with
//!   fixed stat tables), industrial facilities (tier-restricted schematic
//!   hosting), and bulk storage variants.
//! - [`planet::Planet`] / [`configuration::Configuration`] -- Ordered
//!   containers that re-broadcast child changes and compute aggregate
//!   resource totals on demand.
//! - [`observer::Signal`] -- Subscription-order synchronous notification
//!   primitive behind every observable entity.
//! - [`serialize`] -- Versioned binary snapshots via bitcode.

pub mod building;
pub mod catalog;
pub mod configuration;
#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod observer;
pub mod planet;
pub mod serialize;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
