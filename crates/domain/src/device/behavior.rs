//! Per-type behavior: default construction, request validation and state
//! transitions.
//!
//! Every transition works on a copy of the current record and only hands
//! it back once the whole request validated, so a rejected request never
//! leaves a partially applied state behind.

use std::str::FromStr;

use crate::attribute::{AttributeValue, Attributes};
use crate::device::DeviceType;
use crate::device::state::{
    DeviceState, DimmerState, LockPosition, LockState, SwitchState, ThermostatState,
};
use crate::error::ValidationError;

/// Values used when a new device does not specify them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceDefaults<'a> {
    /// Pin given to locks created without a `pin` parameter.
    pub lock_pin: &'a str,
    /// Simulated reading (and initial target) of new thermostats.
    pub ambient_temperature: f64,
}

impl Default for DeviceDefaults<'static> {
    fn default() -> Self {
        Self {
            lock_pin: "0000",
            ambient_temperature: 70.0,
        }
    }
}

impl DeviceState {
    /// Build the initial state of a new device.
    ///
    /// Only locks take a creation parameter (`pin`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedAttribute`] for any other
    /// parameter and [`ValidationError::InvalidValue`] for an empty or
    /// non-string pin.
    pub fn initial(
        device_type: DeviceType,
        params: &Attributes,
        defaults: &DeviceDefaults<'_>,
    ) -> Result<Self, ValidationError> {
        let mut pin = None;
        for (name, value) in params {
            match (device_type, name.as_str()) {
                (DeviceType::Lock, "pin") => pin = Some(parse_pin(name, value)?),
                _ => return Err(unsupported(device_type, name)),
            }
        }

        Ok(match device_type {
            DeviceType::Switch => Self::Switch(SwitchState::default()),
            DeviceType::Dimmer => Self::Dimmer(DimmerState::default()),
            DeviceType::Lock => Self::Lock(LockState::new(
                pin.unwrap_or_else(|| defaults.lock_pin.to_string()),
            )),
            DeviceType::Thermostat => {
                Self::Thermostat(ThermostatState::new(defaults.ambient_temperature))
            }
        })
    }

    /// Validate `request` against this device type and return the state it
    /// produces. `self` is left untouched.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyModification`] when `request` has no fields
    /// - [`ValidationError::UnsupportedAttribute`] for a field the type does
    ///   not have or does not allow setting
    /// - [`ValidationError::InvalidValue`] for a value outside its domain
    pub fn apply(&self, request: &Attributes) -> Result<Self, ValidationError> {
        if request.is_empty() {
            return Err(ValidationError::EmptyModification);
        }
        Ok(match self {
            Self::Switch(state) => Self::Switch(state.apply(request)?),
            Self::Dimmer(state) => Self::Dimmer(state.apply(request)?),
            Self::Lock(state) => Self::Lock(state.apply(request)?),
            Self::Thermostat(state) => Self::Thermostat(state.apply(request)?),
        })
    }

    /// Unlock a lock after checking `pin`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedOperation`] for non-locks and
    /// [`ValidationError::IncorrectPin`] when `pin` does not match.
    pub fn unlock(&self, pin: &str) -> Result<Self, ValidationError> {
        match self {
            Self::Lock(state) if state.pin_matches(pin) => {
                let mut next = state.clone();
                next.position = LockPosition::Unlocked;
                Ok(Self::Lock(next))
            }
            Self::Lock(_) => Err(ValidationError::IncorrectPin),
            other => Err(ValidationError::UnsupportedOperation {
                device_type: other.device_type(),
                operation: "unlock",
            }),
        }
    }

    /// Feed a new simulated reading into a thermostat.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedOperation`] for non-thermostats
    /// and [`ValidationError::InvalidValue`] for a non-finite reading.
    pub fn with_reading(&self, temperature: f64) -> Result<Self, ValidationError> {
        match self {
            Self::Thermostat(state) => {
                if !temperature.is_finite() {
                    return Err(ValidationError::invalid_value(
                        "current_temperature",
                        FINITE_NUMBER,
                    ));
                }
                Ok(Self::Thermostat(ThermostatState {
                    current_temperature: temperature,
                    ..state.clone()
                }))
            }
            other => Err(ValidationError::UnsupportedOperation {
                device_type: other.device_type(),
                operation: "temperature reports",
            }),
        }
    }
}

const POWER: &str = "expected \"on\" or \"off\"";
const BRIGHTNESS: &str = "expected an integer between 0 and 100";
const LOCK_POSITION: &str = "expected \"locked\" or \"unlocked\"";
const PIN: &str = "expected a non-empty string";
const MODE: &str = "expected \"heat\", \"cool\", \"auto\" or \"off\"";
const FINITE_NUMBER: &str = "expected a finite number";

impl SwitchState {
    fn apply(&self, request: &Attributes) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        for (name, value) in request {
            match name.as_str() {
                "power" => next.power = parse_keyword(name, value, POWER)?,
                _ => return Err(unsupported(DeviceType::Switch, name)),
            }
        }
        Ok(next)
    }
}

impl DimmerState {
    fn apply(&self, request: &Attributes) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        for (name, value) in request {
            match name.as_str() {
                "power" => next.power = parse_keyword(name, value, POWER)?,
                "brightness" => {
                    next.brightness = value
                        .as_i64()
                        .and_then(|level| u8::try_from(level).ok())
                        .filter(|level| *level <= 100)
                        .ok_or_else(|| ValidationError::invalid_value(name, BRIGHTNESS))?;
                }
                _ => return Err(unsupported(DeviceType::Dimmer, name)),
            }
        }
        Ok(next)
    }
}

impl LockState {
    fn apply(&self, request: &Attributes) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        for (name, value) in request {
            match name.as_str() {
                "state" => next.position = parse_keyword(name, value, LOCK_POSITION)?,
                "pin" => next.set_pin(parse_pin(name, value)?),
                _ => return Err(unsupported(DeviceType::Lock, name)),
            }
        }
        Ok(next)
    }
}

impl ThermostatState {
    fn apply(&self, request: &Attributes) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        for (name, value) in request {
            match name.as_str() {
                "target_temperature" => {
                    next.target_temperature = value
                        .as_f64()
                        .filter(|temperature| temperature.is_finite())
                        .ok_or_else(|| ValidationError::invalid_value(name, FINITE_NUMBER))?;
                }
                "mode" => next.mode = parse_keyword(name, value, MODE)?,
                _ => return Err(unsupported(DeviceType::Thermostat, name)),
            }
        }
        Ok(next)
    }
}

fn parse_keyword<T: FromStr>(
    name: &str,
    value: &AttributeValue,
    reason: &'static str,
) -> Result<T, ValidationError> {
    value
        .as_str()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| ValidationError::invalid_value(name, reason))
}

fn parse_pin(name: &str, value: &AttributeValue) -> Result<String, ValidationError> {
    value
        .as_str()
        .filter(|pin| !pin.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::invalid_value(name, PIN))
}

fn unsupported(device_type: DeviceType, attribute: &str) -> ValidationError {
    ValidationError::UnsupportedAttribute {
        device_type,
        attribute: attribute.to_string(),
    }
}
