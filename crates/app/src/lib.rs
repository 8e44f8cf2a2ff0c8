//! # dwellhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage port** adapters must implement:
//!   - `EntityReader`: read devices, the hub, dwellings
//!   - `EntityStore`: write them
//! - Define the use-case services:
//!   - `DeviceService`: create, inspect, modify devices
//!   - `PairingService`: the hub singleton, pairing, guarded deletion
//!   - `DwellingService`: dwellings, occupancy, hub installation
//! - Expose the `HomeRegistry` facade and its `SharedRegistry` wrapper
//!   for callers on several threads
//!
//! ## Dependency rule
//! Depends on `dwellhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod config;
pub mod ports;
pub mod registry;
pub mod services;
pub mod shared;

pub use config::RegistryConfig;
pub use registry::{HomeRegistry, RegistrySnapshot};
pub use shared::SharedRegistry;

#[cfg(test)]
mod test_store;
