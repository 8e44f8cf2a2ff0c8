//! # dwellhubd, the dwellhub daemon
//!
//! Composition root that wires the storage adapter into the registry.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Construct the in-memory store and the registry facade over it
//! - Apply the configured seed
//! - Print the resulting registry snapshot as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod seed;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dwellhub_adapter_storage_memory::InMemoryEntityStore;
use dwellhub_app::HomeRegistry;

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut registry = HomeRegistry::new(InMemoryEntityStore::new(), config.registry);
    let report = seed::apply(&mut registry, &config.seed);
    if report.rejected > 0 {
        tracing::warn!(rejected = report.rejected, "some seed entries were skipped");
    }

    let snapshot = serde_json::to_string_pretty(&registry.snapshot())?;
    println!("{snapshot}");

    Ok(())
}
