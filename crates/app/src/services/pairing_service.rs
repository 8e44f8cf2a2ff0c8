//! Pairing service: the hub singleton and its relationship with devices.
//!
//! A device is either unpaired or paired to the hub. `pair` and `remove`
//! move it between the two; deletion is only allowed while unpaired.

use dwellhub_domain::device::{Device, DeviceState};
use dwellhub_domain::error::{DwellHubError, NotFoundError, StateError};
use dwellhub_domain::hub::{Hub, HubInfo};
use dwellhub_domain::id::{DeviceId, HubId};

use crate::ports::{EntityReader, EntityStore};

/// Application service for the hub and device pairing.
pub struct PairingService<R> {
    repo: R,
}

impl<R: EntityReader> PairingService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The hub, failing if it has not been created yet.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] before the hub exists.
    pub fn hub(&self) -> Result<Hub, DwellHubError> {
        self.repo
            .get_hub()
            .ok_or_else(|| NotFoundError::hub().into())
    }

    /// The hub's snapshot, including how many devices are paired to it.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] before the hub exists.
    pub fn hub_info(&self) -> Result<HubInfo, DwellHubError> {
        let hub = self.hub()?;
        Ok(self.describe(&hub))
    }

    /// The hub's id, if it has been created.
    pub fn main_hub_id(&self) -> Option<HubId> {
        self.repo.get_hub().map(|hub| hub.id)
    }

    /// Devices paired to the hub, in creation order. Empty before the hub
    /// exists.
    pub fn hub_devices(&self) -> Vec<Device> {
        let Some(hub) = self.repo.get_hub() else {
            return Vec::new();
        };
        self.repo
            .list_devices()
            .into_iter()
            .filter(|device| device.hub_id() == Some(hub.id))
            .collect()
    }

    /// Current state of a device, as reported through the hub.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist
    /// and [`DwellHubError::State`] when it is not paired to the hub.
    pub fn device_state(&self, id: DeviceId) -> Result<DeviceState, DwellHubError> {
        let device = self.device(id)?;
        let hub_id = self.main_hub_id();
        if hub_id.is_none() || device.hub_id() != hub_id {
            return Err(StateError::NotPaired(id).into());
        }
        Ok(device.state().clone())
    }

    fn device(&self, id: DeviceId) -> Result<Device, DwellHubError> {
        self.repo
            .get_device(id)
            .ok_or_else(|| NotFoundError::device(id).into())
    }

    fn describe(&self, hub: &Hub) -> HubInfo {
        let paired = self
            .repo
            .list_devices()
            .iter()
            .filter(|device| device.hub_id() == Some(hub.id))
            .count();
        hub.info(paired)
    }
}

impl<R: EntityStore> PairingService<R> {
    /// Create the hub, or return the existing one unchanged.
    #[tracing::instrument(skip(self))]
    pub fn create_hub(&mut self, name: &str) -> HubInfo {
        if let Some(existing) = self.repo.get_hub() {
            tracing::debug!(hub_id = %existing.id, "hub already exists");
            return self.describe(&existing);
        }
        let hub = self.repo.save_hub(Hub::new(name));
        tracing::info!(hub_id = %hub.id, "hub created");
        self.describe(&hub)
    }

    /// Pair a device to the hub.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device or the hub does
    /// not exist and [`DwellHubError::State`] when the device is already
    /// paired.
    #[tracing::instrument(skip(self))]
    pub fn pair_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError> {
        let mut device = self.device(id)?;
        let hub = self.hub()?;
        device.pair(hub.id)?;
        let device = self.repo.update_device(device)?;
        tracing::info!(hub_id = %hub.id, "device paired");
        Ok(device)
    }

    /// Unpair a device from the hub. Its state is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist
    /// and [`DwellHubError::State`] when it is not paired.
    #[tracing::instrument(skip(self))]
    pub fn remove_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError> {
        let mut device = self.device(id)?;
        let hub_id = device.unpair()?;
        let device = self.repo.update_device(device)?;
        tracing::info!(%hub_id, "device unpaired");
        Ok(device)
    }

    /// Delete an unpaired device from the registry.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist
    /// and [`DwellHubError::State`] while it is still paired.
    #[tracing::instrument(skip(self))]
    pub fn delete_device(&mut self, id: DeviceId) -> Result<(), DwellHubError> {
        self.device(id)?.ensure_deletable()?;
        self.repo.delete_device(id)?;
        tracing::info!("device deleted");
        Ok(())
    }
}
