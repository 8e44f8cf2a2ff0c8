//! Type-specific state records.
//!
//! Derived flags (`is_armed`, `is_running`) are computed from the
//! canonical fields when read or serialized and never stored.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::device::DeviceType;
use crate::keyword::keyword_enum;

keyword_enum!(
    /// On/off power state for switches and dimmers.
    #[derive(Default)]
    Power {
        On => "on",
        #[default]
        Off => "off",
    }
);

keyword_enum!(
    /// Bolt position of a lock.
    #[derive(Default)]
    LockPosition {
        #[default]
        Locked => "locked",
        Unlocked => "unlocked",
    }
);

keyword_enum!(
    /// Operating mode of a thermostat.
    #[derive(Default)]
    ThermostatMode {
        Heat => "heat",
        Cool => "cool",
        Auto => "auto",
        #[default]
        Off => "off",
    }
);

/// State of a [`DeviceType::Switch`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SwitchState {
    pub power: Power,
}

/// State of a [`DeviceType::Dimmer`]. `brightness` is a percentage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DimmerState {
    pub power: Power,
    pub brightness: u8,
}

/// State of a [`DeviceType::Lock`].
///
/// The pin is write-only from the outside: it can be replaced or checked,
/// never read back or serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockState {
    pub position: LockPosition,
    pin: String,
}

impl LockState {
    /// A locked (and therefore armed) lock guarded by `pin`.
    #[must_use]
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            position: LockPosition::Locked,
            pin: pin.into(),
        }
    }

    /// A lock is armed exactly when it is locked.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.position == LockPosition::Locked
    }

    #[must_use]
    pub fn pin_matches(&self, candidate: &str) -> bool {
        self.pin == candidate
    }

    pub(crate) fn set_pin(&mut self, pin: String) {
        self.pin = pin;
    }
}

impl Serialize for LockState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("LockState", 2)?;
        record.serialize_field("state", &self.position)?;
        record.serialize_field("is_armed", &self.is_armed())?;
        record.end()
    }
}

/// State of a [`DeviceType::Thermostat`].
///
/// `current_temperature` is a simulated reading; requests can only move
/// the target and the mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermostatState {
    pub current_temperature: f64,
    pub target_temperature: f64,
    pub mode: ThermostatMode,
}

impl ThermostatState {
    /// An idle thermostat whose reading and target both sit at `ambient`.
    #[must_use]
    pub fn new(ambient: f64) -> Self {
        Self {
            current_temperature: ambient,
            target_temperature: ambient,
            mode: ThermostatMode::Off,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.mode != ThermostatMode::Off
    }
}

impl Serialize for ThermostatState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("ThermostatState", 4)?;
        record.serialize_field("current_temperature", &self.current_temperature)?;
        record.serialize_field("target_temperature", &self.target_temperature)?;
        record.serialize_field("mode", &self.mode)?;
        record.serialize_field("is_running", &self.is_running())?;
        record.end()
    }
}

/// The state record of a device. The variant fixes the device type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceState {
    Switch(SwitchState),
    Dimmer(DimmerState),
    Lock(LockState),
    Thermostat(ThermostatState),
}

impl DeviceState {
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Switch(_) => DeviceType::Switch,
            Self::Dimmer(_) => DeviceType::Dimmer,
            Self::Lock(_) => DeviceType::Lock,
            Self::Thermostat(_) => DeviceType::Thermostat,
        }
    }
}
