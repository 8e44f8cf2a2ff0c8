//! Device service: creating, inspecting and modifying devices.
//!
//! Pairing and deletion live in the
//! [`PairingService`](crate::services::pairing_service::PairingService),
//! since both depend on the device's relationship with the hub.

use dwellhub_domain::attribute::Attributes;
use dwellhub_domain::device::{Device, DeviceDefaults, DeviceState, DeviceType};
use dwellhub_domain::error::{DwellHubError, NotFoundError};
use dwellhub_domain::id::DeviceId;

use crate::ports::{EntityReader, EntityStore};

/// Application service for device lifecycle and state changes.
pub struct DeviceService<'c, R> {
    repo: R,
    defaults: DeviceDefaults<'c>,
}

impl<'c, R: EntityReader> DeviceService<'c, R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R, defaults: DeviceDefaults<'c>) -> Self {
        Self { repo, defaults }
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no device with `id` exists.
    pub fn get_device(&self, id: DeviceId) -> Result<Device, DwellHubError> {
        self.repo
            .get_device(id)
            .ok_or_else(|| NotFoundError::device(id).into())
    }

    /// List all devices in creation order.
    pub fn list_devices(&self) -> Vec<Device> {
        self.repo.list_devices()
    }

    /// List the devices of one type, in creation order.
    pub fn devices_by_type(&self, device_type: DeviceType) -> Vec<Device> {
        self.filtered(|device| device.device_type() == device_type)
    }

    /// List the devices currently paired to the hub.
    pub fn paired_devices(&self) -> Vec<Device> {
        self.filtered(Device::is_paired)
    }

    /// List the devices not paired to any hub.
    pub fn unpaired_devices(&self) -> Vec<Device> {
        self.filtered(|device| !device.is_paired())
    }

    fn filtered(&self, keep: impl Fn(&Device) -> bool) -> Vec<Device> {
        self.repo
            .list_devices()
            .into_iter()
            .filter(|device| keep(device))
            .collect()
    }
}

impl<R: EntityStore> DeviceService<'_, R> {
    /// Create an unpaired device of the named type with its default state.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::Validation`] when `device_type` is not a
    /// known type or `params` holds a parameter the type does not take.
    #[tracing::instrument(skip(self, params))]
    pub fn create_device(
        &mut self,
        device_type: &str,
        name: &str,
        params: &Attributes,
    ) -> Result<Device, DwellHubError> {
        let device_type = DeviceType::parse(device_type)?;
        let state = DeviceState::initial(device_type, params, &self.defaults)?;
        let device = self.repo.insert_device(Device::new(name, state));
        tracing::info!(device_id = %device.id, %device_type, "device created");
        Ok(device)
    }

    /// Apply a modification request to a device, all fields or none.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist
    /// and [`DwellHubError::Validation`] when the request does not fit the
    /// device type.
    #[tracing::instrument(skip(self, request))]
    pub fn modify_device(
        &mut self,
        id: DeviceId,
        request: &Attributes,
    ) -> Result<Device, DwellHubError> {
        let mut device = self.get_device(id)?;
        device.modify(request)?;
        tracing::debug!(fields = request.len(), "device state modified");
        self.repo.update_device(device)
    }

    /// Unlock a lock after checking its pin.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist
    /// and [`DwellHubError::Validation`] when it is not a lock or the pin
    /// does not match.
    #[tracing::instrument(skip(self, pin))]
    pub fn unlock_device(&mut self, id: DeviceId, pin: &str) -> Result<Device, DwellHubError> {
        let mut device = self.get_device(id)?;
        device.unlock(pin)?;
        tracing::info!("lock opened with pin");
        self.repo.update_device(device)
    }

    /// Feed a simulated temperature reading into a thermostat.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist
    /// and [`DwellHubError::Validation`] when it is not a thermostat or the
    /// reading is not finite.
    #[tracing::instrument(skip(self))]
    pub fn report_temperature(
        &mut self,
        id: DeviceId,
        temperature: f64,
    ) -> Result<Device, DwellHubError> {
        let mut device = self.get_device(id)?;
        device.report_temperature(temperature)?;
        self.repo.update_device(device)
    }
}
