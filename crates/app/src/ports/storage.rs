//! Storage port: the authoritative record of devices, the hub and dwellings.
//!
//! Reads and writes are split so that read-only use-cases can run over a
//! shared borrow. Every read hands back an owned snapshot; callers change
//! a snapshot and write it back whole.

use dwellhub_domain::device::Device;
use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::DwellHubError;
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DeviceId, DwellingId};

/// Read access to stored entities.
pub trait EntityReader {
    fn get_device(&self, id: DeviceId) -> Option<Device>;

    /// All devices, in creation order.
    fn list_devices(&self) -> Vec<Device>;

    /// The hub, once it has been created.
    fn get_hub(&self) -> Option<Hub>;

    fn get_dwelling(&self, id: DwellingId) -> Option<Dwelling>;

    /// All dwellings, in creation order.
    fn list_dwellings(&self) -> Vec<Dwelling>;
}

/// Write access to stored entities.
///
/// Implementations hold a single hub slot; the application layer makes
/// sure only one hub is ever saved into it.
pub trait EntityStore: EntityReader {
    fn insert_device(&mut self, device: Device) -> Device;

    /// Replace a stored device with `device` (matched by id).
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] if no such device is stored.
    fn update_device(&mut self, device: Device) -> Result<Device, DwellHubError>;

    /// Remove a device, returning its last snapshot. Precondition checks
    /// are the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] if no such device is stored.
    fn delete_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError>;

    fn save_hub(&mut self, hub: Hub) -> Hub;

    fn insert_dwelling(&mut self, dwelling: Dwelling) -> Dwelling;

    /// Replace a stored dwelling with `dwelling` (matched by id).
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] if no such dwelling is stored.
    fn update_dwelling(&mut self, dwelling: Dwelling) -> Result<Dwelling, DwellHubError>;
}

impl<T: EntityReader + ?Sized> EntityReader for &T {
    fn get_device(&self, id: DeviceId) -> Option<Device> {
        (**self).get_device(id)
    }

    fn list_devices(&self) -> Vec<Device> {
        (**self).list_devices()
    }

    fn get_hub(&self) -> Option<Hub> {
        (**self).get_hub()
    }

    fn get_dwelling(&self, id: DwellingId) -> Option<Dwelling> {
        (**self).get_dwelling(id)
    }

    fn list_dwellings(&self) -> Vec<Dwelling> {
        (**self).list_dwellings()
    }
}

impl<T: EntityReader + ?Sized> EntityReader for &mut T {
    fn get_device(&self, id: DeviceId) -> Option<Device> {
        (**self).get_device(id)
    }

    fn list_devices(&self) -> Vec<Device> {
        (**self).list_devices()
    }

    fn get_hub(&self) -> Option<Hub> {
        (**self).get_hub()
    }

    fn get_dwelling(&self, id: DwellingId) -> Option<Dwelling> {
        (**self).get_dwelling(id)
    }

    fn list_dwellings(&self) -> Vec<Dwelling> {
        (**self).list_dwellings()
    }
}

impl<T: EntityStore + ?Sized> EntityStore for &mut T {
    fn insert_device(&mut self, device: Device) -> Device {
        (**self).insert_device(device)
    }

    fn update_device(&mut self, device: Device) -> Result<Device, DwellHubError> {
        (**self).update_device(device)
    }

    fn delete_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError> {
        (**self).delete_device(id)
    }

    fn save_hub(&mut self, hub: Hub) -> Hub {
        (**self).save_hub(hub)
    }

    fn insert_dwelling(&mut self, dwelling: Dwelling) -> Dwelling {
        (**self).insert_dwelling(dwelling)
    }

    fn update_dwelling(&mut self, dwelling: Dwelling) -> Result<Dwelling, DwellHubError> {
        (**self).update_dwelling(dwelling)
    }
}
