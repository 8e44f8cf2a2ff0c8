//! Initial population read from the `[seed]` configuration section.
//!
//! Entries are applied in file order through the registry facade, so they
//! go through exactly the same checks as any other caller. A rejected entry
//! is logged and skipped; the rest of the seed still applies.

use serde::Deserialize;

use dwellhub_app::HomeRegistry;
use dwellhub_app::ports::EntityStore;
use dwellhub_domain::attribute::Attributes;
use dwellhub_domain::error::DwellHubError;

/// The `[seed]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Name of the hub to create. The hub is also created, with the
    /// configured default name, when an entry needs it.
    pub hub: Option<String>,
    pub dwellings: Vec<SeedDwelling>,
    pub devices: Vec<SeedDevice>,
}

/// One `[[seed.dwellings]]` entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedDwelling {
    pub name: String,
    pub address: String,
    pub occupied: bool,
    /// Install the hub into this dwelling.
    pub install_hub: bool,
}

/// One `[[seed.devices]]` entry.
#[derive(Debug, Deserialize)]
pub struct SeedDevice {
    #[serde(rename = "type")]
    pub device_type: String,
    pub name: String,
    /// Creation parameters.
    #[serde(default)]
    pub params: Attributes,
    /// Pair the device to the hub once created.
    #[serde(default)]
    pub pair: bool,
    /// Modification request applied once created (and paired).
    #[serde(default)]
    pub modify: Attributes,
}

impl SeedConfig {
    fn needs_hub(&self) -> bool {
        self.hub.is_some()
            || self.dwellings.iter().any(|dwelling| dwelling.install_hub)
            || self.devices.iter().any(|device| device.pair)
    }
}

/// Outcome of applying a seed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub applied: usize,
    pub rejected: usize,
}

impl SeedReport {
    fn record(&mut self, entry: &str, result: Result<(), DwellHubError>) {
        match result {
            Ok(()) => self.applied += 1,
            Err(err) => {
                tracing::warn!(entry, error = %err, "seed entry rejected");
                self.rejected += 1;
            }
        }
    }
}

/// Apply `seed` to `registry`.
#[tracing::instrument(skip_all)]
pub fn apply<S: EntityStore>(registry: &mut HomeRegistry<S>, seed: &SeedConfig) -> SeedReport {
    let mut report = SeedReport::default();

    if seed.needs_hub() {
        registry.create_hub(seed.hub.as_deref());
    }

    for entry in &seed.dwellings {
        let result = seed_dwelling(registry, entry);
        report.record(&entry.name, result);
    }

    for entry in &seed.devices {
        let result = seed_device(registry, entry);
        report.record(&entry.name, result);
    }

    tracing::info!(
        applied = report.applied,
        rejected = report.rejected,
        "seed applied"
    );
    report
}

fn seed_dwelling<S: EntityStore>(
    registry: &mut HomeRegistry<S>,
    entry: &SeedDwelling,
) -> Result<(), DwellHubError> {
    let dwelling = registry.create_dwelling(&entry.name, &entry.address);
    if entry.occupied {
        registry.set_dwelling_occupied(dwelling.id, true)?;
    }
    if entry.install_hub {
        registry.install_hub(dwelling.id)?;
    }
    Ok(())
}

fn seed_device<S: EntityStore>(
    registry: &mut HomeRegistry<S>,
    entry: &SeedDevice,
) -> Result<(), DwellHubError> {
    let device = registry.create_device(&entry.device_type, &entry.name, &entry.params)?;
    if entry.pair {
        registry.pair_device(device.id)?;
    }
    if !entry.modify.is_empty() {
        registry.modify_device(device.id, &entry.modify)?;
    }
    Ok(())
}
