//! Registry-wide defaults.

use serde::Deserialize;

use dwellhub_domain::device::DeviceDefaults;

/// Defaults applied by the registry when a request leaves them out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name given to the hub when it is created without one.
    pub default_hub_name: String,
    /// Pin given to locks created without a `pin` parameter.
    pub default_lock_pin: String,
    /// Simulated reading (and initial target) of new thermostats.
    pub ambient_temperature: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_hub_name: "Main Hub".to_string(),
            default_lock_pin: "0000".to_string(),
            ambient_temperature: 70.0,
        }
    }
}

impl RegistryConfig {
    /// Borrow the device-creation defaults.
    #[must_use]
    pub fn device_defaults(&self) -> DeviceDefaults<'_> {
        DeviceDefaults {
            lock_pin: &self.default_lock_pin,
            ambient_temperature: self.ambient_temperature,
        }
    }
}
