//! Hub: the single coordinating gateway that devices pair with.

use serde::Serialize;

use crate::id::{DwellingId, HubId};
use crate::time::{Timestamp, now};

/// The coordinating gateway. At most one exists per registry.
///
/// The set of paired devices is not stored here: each device's `hub_id` is
/// the source of truth, and [`HubInfo::paired_devices_count`] is computed
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hub {
    pub id: HubId,
    pub name: String,
    pub created_at: Timestamp,
    dwelling_id: Option<DwellingId>,
}

impl Hub {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: HubId::new(),
            name: name.into(),
            created_at: now(),
            dwelling_id: None,
        }
    }

    /// The dwelling this hub is installed in, if any.
    #[must_use]
    pub fn dwelling_id(&self) -> Option<DwellingId> {
        self.dwelling_id
    }

    pub(crate) fn set_dwelling(&mut self, dwelling: Option<DwellingId>) {
        self.dwelling_id = dwelling;
    }

    /// Snapshot of the hub together with its derived device count.
    #[must_use]
    pub fn info(&self, paired_devices_count: usize) -> HubInfo {
        HubInfo {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            dwelling_id: self.dwelling_id,
            paired_devices_count,
        }
    }
}

/// Serializable view of the [`Hub`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubInfo {
    pub id: HubId,
    pub name: String,
    pub created_at: Timestamp,
    pub dwelling_id: Option<DwellingId>,
    pub paired_devices_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_uninstalled() {
        let hub = Hub::new("Main Hub");
        assert_eq!(hub.name, "Main Hub");
        assert!(hub.dwelling_id().is_none());
    }

    #[test]
    fn should_carry_paired_count_into_info() {
        let hub = Hub::new("Main Hub");
        let info = hub.info(3);
        assert_eq!(info.id, hub.id);
        assert_eq!(info.paired_devices_count, 3);
        assert!(info.dwelling_id.is_none());
    }

    #[test]
    fn should_serialize_info_with_exact_fields() {
        let info = Hub::new("Main Hub").info(0);
        let value = serde_json::to_value(&info).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["created_at", "dwelling_id", "id", "name", "paired_devices_count"]
        );
        assert_eq!(value["dwelling_id"], serde_json::Value::Null);
    }

    #[test]
    fn should_serialize_paired_count_as_integer() {
        let hub = Hub::new("Gateway");
        let value = serde_json::to_value(hub.info(2)).unwrap();
        assert_eq!(value["paired_devices_count"], serde_json::json!(2));
        assert_eq!(value["name"], "Gateway");
        assert_eq!(value["id"], hub.id.to_string());
    }
}
