//! Minimal [`EntityStore`] used by the service tests.

use dwellhub_domain::device::Device;
use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::{DwellHubError, NotFoundError};
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DeviceId, DwellingId};

use crate::ports::{EntityReader, EntityStore};

#[derive(Default)]
pub struct VecStore {
    devices: Vec<Device>,
    hub: Option<Hub>,
    dwellings: Vec<Dwelling>,
}

impl EntityReader for VecStore {
    fn get_device(&self, id: DeviceId) -> Option<Device> {
        self.devices.iter().find(|d| d.id == id).cloned()
    }

    fn list_devices(&self) -> Vec<Device> {
        self.devices.clone()
    }

    fn get_hub(&self) -> Option<Hub> {
        self.hub.clone()
    }

    fn get_dwelling(&self, id: DwellingId) -> Option<Dwelling> {
        self.dwellings.iter().find(|d| d.id == id).cloned()
    }

    fn list_dwellings(&self) -> Vec<Dwelling> {
        self.dwellings.clone()
    }
}

impl EntityStore for VecStore {
    fn insert_device(&mut self, device: Device) -> Device {
        self.devices.push(device.clone());
        device
    }

    fn update_device(&mut self, device: Device) -> Result<Device, DwellHubError> {
        let slot = self
            .devices
            .iter_mut()
            .find(|d| d.id == device.id)
            .ok_or_else(|| NotFoundError::device(device.id))?;
        *slot = device.clone();
        Ok(device)
    }

    fn delete_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError> {
        let index = self
            .devices
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| NotFoundError::device(id))?;
        Ok(self.devices.remove(index))
    }

    fn save_hub(&mut self, hub: Hub) -> Hub {
        self.hub = Some(hub.clone());
        hub
    }

    fn insert_dwelling(&mut self, dwelling: Dwelling) -> Dwelling {
        self.dwellings.push(dwelling.clone());
        dwelling
    }

    fn update_dwelling(&mut self, dwelling: Dwelling) -> Result<Dwelling, DwellHubError> {
        let slot = self
            .dwellings
            .iter_mut()
            .find(|d| d.id == dwelling.id)
            .ok_or_else(|| NotFoundError::dwelling(dwelling.id))?;
        *slot = dwelling.clone();
        Ok(dwelling)
    }
}
