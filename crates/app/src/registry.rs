//! The registry facade: the one entry point callers use.
//!
//! Each operation is routed to the service responsible for the entity it
//! touches. Every operation either applies completely or fails without
//! changing anything, and every value it returns is a detached snapshot.

use serde::Serialize;

use dwellhub_domain::attribute::Attributes;
use dwellhub_domain::device::{Device, DeviceState, DeviceType};
use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::DwellHubError;
use dwellhub_domain::hub::HubInfo;
use dwellhub_domain::id::{DeviceId, DwellingId, HubId};

use crate::config::RegistryConfig;
use crate::ports::EntityStore;
use crate::services::device_service::DeviceService;
use crate::services::dwelling_service::DwellingService;
use crate::services::pairing_service::PairingService;

/// Everything the registry holds, in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub hub: Option<HubInfo>,
    pub dwellings: Vec<Dwelling>,
    pub devices: Vec<Device>,
}

/// Facade over devices, the hub and dwellings, backed by one store.
pub struct HomeRegistry<S> {
    store: S,
    config: RegistryConfig,
}

impl<S: EntityStore> HomeRegistry<S> {
    #[must_use]
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self { store, config }
    }

    fn devices(&self) -> DeviceService<'_, &S> {
        DeviceService::new(&self.store, self.config.device_defaults())
    }

    fn devices_mut(&mut self) -> DeviceService<'_, &mut S> {
        DeviceService::new(&mut self.store, self.config.device_defaults())
    }

    fn pairing(&self) -> PairingService<&S> {
        PairingService::new(&self.store)
    }

    fn pairing_mut(&mut self) -> PairingService<&mut S> {
        PairingService::new(&mut self.store)
    }

    fn dwellings(&self) -> DwellingService<&S> {
        DwellingService::new(&self.store)
    }

    fn dwellings_mut(&mut self) -> DwellingService<&mut S> {
        DwellingService::new(&mut self.store)
    }

    // Devices

    /// Create an unpaired device of the named type (`"switch"`, `"dimmer"`,
    /// `"lock"` or `"thermostat"`).
    ///
    /// # Errors
    ///
    /// See [`DeviceService::create_device`].
    pub fn create_device(
        &mut self,
        device_type: &str,
        name: &str,
        params: &Attributes,
    ) -> Result<Device, DwellHubError> {
        self.devices_mut().create_device(device_type, name, params)
    }

    /// Delete an unpaired device.
    ///
    /// # Errors
    ///
    /// See [`PairingService::delete_device`].
    pub fn delete_device(&mut self, id: DeviceId) -> Result<(), DwellHubError> {
        self.pairing_mut().delete_device(id)
    }

    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist.
    pub fn device_info(&self, id: DeviceId) -> Result<Device, DwellHubError> {
        self.devices().get_device(id)
    }

    /// # Errors
    ///
    /// See [`DeviceService::modify_device`].
    pub fn modify_device(
        &mut self,
        id: DeviceId,
        request: &Attributes,
    ) -> Result<Device, DwellHubError> {
        self.devices_mut().modify_device(id, request)
    }

    /// # Errors
    ///
    /// See [`DeviceService::unlock_device`].
    pub fn unlock_device(&mut self, id: DeviceId, pin: &str) -> Result<Device, DwellHubError> {
        self.devices_mut().unlock_device(id, pin)
    }

    /// # Errors
    ///
    /// See [`DeviceService::report_temperature`].
    pub fn report_temperature(
        &mut self,
        id: DeviceId,
        temperature: f64,
    ) -> Result<Device, DwellHubError> {
        self.devices_mut().report_temperature(id, temperature)
    }

    #[must_use]
    pub fn list_devices(&self) -> Vec<Device> {
        self.devices().list_devices()
    }

    /// Devices of the named type (`"switch"`, `"dimmer"`, …), in creation
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::Validation`] when `device_type` is not a
    /// known type.
    pub fn devices_by_type(&self, device_type: &str) -> Result<Vec<Device>, DwellHubError> {
        let device_type = DeviceType::parse(device_type)?;
        Ok(self.devices().devices_by_type(device_type))
    }

    #[must_use]
    pub fn paired_devices(&self) -> Vec<Device> {
        self.devices().paired_devices()
    }

    #[must_use]
    pub fn unpaired_devices(&self) -> Vec<Device> {
        self.devices().unpaired_devices()
    }

    // Hub

    /// Create the hub, or return the existing one unchanged. Without a name
    /// the configured default is used.
    pub fn create_hub(&mut self, name: Option<&str>) -> HubInfo {
        let name = name.unwrap_or(&self.config.default_hub_name).to_string();
        self.pairing_mut().create_hub(&name)
    }

    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] before the hub exists.
    pub fn hub_info(&self) -> Result<HubInfo, DwellHubError> {
        self.pairing().hub_info()
    }

    #[must_use]
    pub fn main_hub_id(&self) -> Option<HubId> {
        self.pairing().main_hub_id()
    }

    /// # Errors
    ///
    /// See [`PairingService::pair_device`].
    pub fn pair_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError> {
        self.pairing_mut().pair_device(id)
    }

    /// # Errors
    ///
    /// See [`PairingService::device_state`].
    pub fn device_state(&self, id: DeviceId) -> Result<DeviceState, DwellHubError> {
        self.pairing().device_state(id)
    }

    #[must_use]
    pub fn hub_devices(&self) -> Vec<Device> {
        self.pairing().hub_devices()
    }

    /// Unpair a device from the hub.
    ///
    /// # Errors
    ///
    /// See [`PairingService::remove_device`].
    pub fn remove_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError> {
        self.pairing_mut().remove_device(id)
    }

    // Dwellings

    pub fn create_dwelling(&mut self, name: &str, address: &str) -> Dwelling {
        self.dwellings_mut().create_dwelling(name, address)
    }

    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the dwelling does not exist.
    pub fn dwelling_info(&self, id: DwellingId) -> Result<Dwelling, DwellHubError> {
        self.dwellings().get_dwelling(id)
    }

    #[must_use]
    pub fn list_dwellings(&self) -> Vec<Dwelling> {
        self.dwellings().list_dwellings()
    }

    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the dwelling does not exist.
    pub fn set_dwelling_occupied(
        &mut self,
        id: DwellingId,
        occupied: bool,
    ) -> Result<Dwelling, DwellHubError> {
        self.dwellings_mut().set_occupied(id, occupied)
    }

    /// # Errors
    ///
    /// See [`DwellingService::install_hub`].
    pub fn install_hub(&mut self, id: DwellingId) -> Result<Dwelling, DwellHubError> {
        self.dwellings_mut().install_hub(id)
    }

    /// # Errors
    ///
    /// See [`DwellingService::uninstall_hub`].
    pub fn uninstall_hub(&mut self, id: DwellingId) -> Result<Dwelling, DwellHubError> {
        self.dwellings_mut().uninstall_hub(id)
    }

    /// Snapshot of the whole registry.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            hub: self.pairing().hub_info().ok(),
            dwellings: self.list_dwellings(),
            devices: self.list_devices(),
        }
    }
}
