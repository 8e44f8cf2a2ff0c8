//! Device: one controllable smart-home unit.
//!
//! A device is created unpaired with the default state of its type. Its
//! type never changes, since it is read from the variant of its state
//! record. Pairing is tracked only through `hub_id`, so `is_paired` can
//! never disagree with it.

mod behavior;
mod state;

pub use behavior::DeviceDefaults;
pub use state::{
    DeviceState, DimmerState, LockPosition, LockState, Power, SwitchState, ThermostatMode,
    ThermostatState,
};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::attribute::Attributes;
use crate::error::{StateError, ValidationError};
use crate::id::{DeviceId, HubId};
use crate::keyword::keyword_enum;
use crate::time::{Timestamp, now};

keyword_enum!(
    /// The closed set of device kinds.
    DeviceType {
        Switch => "switch",
        Dimmer => "dimmer",
        Lock => "lock",
        Thermostat => "thermostat",
    }
);

impl DeviceType {
    /// Parse a caller-supplied type name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidType`] for anything but the four
    /// known kinds.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        name.parse()
            .map_err(|_| ValidationError::InvalidType(name.to_string()))
    }
}

/// A controllable smart-home unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub created_at: Timestamp,
    hub_id: Option<HubId>,
    state: DeviceState,
}

impl Device {
    /// A fresh, unpaired device holding `state`.
    #[must_use]
    pub fn new(name: impl Into<String>, state: DeviceState) -> Self {
        Self {
            id: DeviceId::new(),
            name: name.into(),
            created_at: now(),
            hub_id: None,
            state,
        }
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.state.device_type()
    }

    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    #[must_use]
    pub fn hub_id(&self) -> Option<HubId> {
        self.hub_id
    }

    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.hub_id.is_some()
    }

    /// Attach the device to `hub`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::AlreadyPaired`] if the device already has a hub.
    pub fn pair(&mut self, hub: HubId) -> Result<(), StateError> {
        if let Some(current) = self.hub_id {
            return Err(StateError::AlreadyPaired {
                device: self.id,
                hub: current,
            });
        }
        self.hub_id = Some(hub);
        Ok(())
    }

    /// Detach the device from its hub, returning the hub it left. The state
    /// record is kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotPaired`] if the device has no hub.
    pub fn unpair(&mut self) -> Result<HubId, StateError> {
        self.hub_id.take().ok_or(StateError::NotPaired(self.id))
    }

    /// Check that the device may be removed from the registry.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DeviceInUse`] while the device is paired.
    pub fn ensure_deletable(&self) -> Result<(), StateError> {
        if self.is_paired() {
            return Err(StateError::DeviceInUse(self.id));
        }
        Ok(())
    }

    /// Apply a modification request, all fields or none.
    ///
    /// # Errors
    ///
    /// See [`DeviceState::apply`].
    pub fn modify(&mut self, request: &Attributes) -> Result<(), ValidationError> {
        self.state = self.state.apply(request)?;
        Ok(())
    }

    /// Unlock a lock after checking `pin`.
    ///
    /// # Errors
    ///
    /// See [`DeviceState::unlock`].
    pub fn unlock(&mut self, pin: &str) -> Result<(), ValidationError> {
        self.state = self.state.unlock(pin)?;
        Ok(())
    }

    /// Record a simulated thermostat reading.
    ///
    /// # Errors
    ///
    /// See [`DeviceState::with_reading`].
    pub fn report_temperature(&mut self, temperature: f64) -> Result<(), ValidationError> {
        self.state = self.state.with_reading(temperature)?;
        Ok(())
    }
}

impl Serialize for Device {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Device", 7)?;
        record.serialize_field("id", &self.id)?;
        record.serialize_field("name", &self.name)?;
        record.serialize_field("device_type", &self.device_type())?;
        record.serialize_field("created_at", &self.created_at)?;
        record.serialize_field("is_paired", &self.is_paired())?;
        record.serialize_field("hub_id", &self.hub_id)?;
        record.serialize_field("state", &self.state)?;
        record.end()
    }
}
