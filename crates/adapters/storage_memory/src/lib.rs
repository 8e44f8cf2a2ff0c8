//! # dwellhub-adapter-storage-memory
//!
//! In-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `dwellhub-app::ports::storage`
//! - Keep devices and dwellings in creation order
//! - Hold the single hub slot
//!
//! ## Dependency rule
//! Depends on `dwellhub-app` (for port traits) and `dwellhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

use std::collections::HashMap;
use std::hash::Hash;

use dwellhub_app::ports::{EntityReader, EntityStore};
use dwellhub_domain::device::Device;
use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::{DwellHubError, NotFoundError};
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DeviceId, DwellingId};

/// Records keyed by id, iterated in insertion order.
#[derive(Debug)]
struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, V: Clone> Table<K, V> {
    fn get(&self, key: K) -> Option<V> {
        self.rows.get(&key).cloned()
    }

    fn all(&self) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|key| self.rows.get(key))
            .cloned()
            .collect()
    }

    fn insert(&mut self, key: K, value: V) {
        if self.rows.insert(key, value).is_none() {
            self.order.push(key);
        }
    }

    /// Replace an existing row, handing `value` back when there is none.
    fn replace(&mut self, key: K, value: V) -> Result<(), V> {
        match self.rows.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(value),
        }
    }

    fn remove(&mut self, key: K) -> Option<V> {
        let value = self.rows.remove(&key)?;
        self.order.retain(|existing| *existing != key);
        Some(value)
    }
}

/// Volatile store for every entity of a registry.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    devices: Table<DeviceId, Device>,
    hub: Option<Hub>,
    dwellings: Table<DwellingId, Dwelling>,
}

impl InMemoryEntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityReader for InMemoryEntityStore {
    fn get_device(&self, id: DeviceId) -> Option<Device> {
        self.devices.get(id)
    }

    fn list_devices(&self) -> Vec<Device> {
        self.devices.all()
    }

    fn get_hub(&self) -> Option<Hub> {
        self.hub.clone()
    }

    fn get_dwelling(&self, id: DwellingId) -> Option<Dwelling> {
        self.dwellings.get(id)
    }

    fn list_dwellings(&self) -> Vec<Dwelling> {
        self.dwellings.all()
    }
}

impl EntityStore for InMemoryEntityStore {
    fn insert_device(&mut self, device: Device) -> Device {
        self.devices.insert(device.id, device.clone());
        device
    }

    fn update_device(&mut self, device: Device) -> Result<Device, DwellHubError> {
        self.devices
            .replace(device.id, device.clone())
            .map_err(|missing| NotFoundError::device(missing.id))?;
        Ok(device)
    }

    fn delete_device(&mut self, id: DeviceId) -> Result<Device, DwellHubError> {
        self.devices
            .remove(id)
            .ok_or_else(|| NotFoundError::device(id).into())
    }

    fn save_hub(&mut self, hub: Hub) -> Hub {
        self.hub = Some(hub.clone());
        hub
    }

    fn insert_dwelling(&mut self, dwelling: Dwelling) -> Dwelling {
        self.dwellings.insert(dwelling.id, dwelling.clone());
        dwelling
    }

    fn update_dwelling(&mut self, dwelling: Dwelling) -> Result<Dwelling, DwellHubError> {
        self.dwellings
            .replace(dwelling.id, dwelling.clone())
            .map_err(|missing| NotFoundError::dwelling(missing.id))?;
        Ok(dwelling)
    }
}
