//! # dwellhub-domain
//!
//! Pure domain model for the dwellhub device registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (switches, dimmers, locks, thermostats) and their
//!   type-specific state records
//! - Define the per-type behavior: default state, request validation,
//!   state transitions
//! - Define the **Hub** and **Dwellings**, and the rules linking them
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Storage is expressed as a trait in the `app` crate (port).

pub mod error;
pub mod id;
pub mod keyword;
pub mod time;

pub mod attribute;
pub mod device;
pub mod dwelling;
pub mod hub;
