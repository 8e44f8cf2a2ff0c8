//! Typed identifier newtypes backed by UUIDs.
//!
//! Each id type names the entity it identifies, so lookups and parse
//! failures can be reported without the caller spelling the kind out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An identifier of one kind of registry entity.
pub trait EntityId: Copy + fmt::Display {
    /// Human-readable entity kind, e.g. `"Device"`.
    const ENTITY: &'static str;
}

/// Text that is not a valid identifier.
#[derive(Debug, thiserror::Error)]
#[error("invalid {entity} id {input:?}")]
pub struct ParseIdError {
    pub entity: &'static str,
    pub input: String,
    #[source]
    source: uuid::Error,
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident => $entity:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl EntityId for $name {
            const ENTITY: &'static str = $entity;
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|source| ParseIdError {
                        entity: $entity,
                        input: s.to_string(),
                        source,
                    })
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId => "Device"
);

define_id!(
    /// Unique identifier for the [`Hub`](crate::hub::Hub).
    HubId => "Hub"
);

define_id!(
    /// Unique identifier for a [`Dwelling`](crate::dwelling::Dwelling).
    DwellingId => "Dwelling"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = DeviceId::new();
        let b = DeviceId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_parse_displayed_id() {
        let id = HubId::new();
        let parsed: HubId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = DwellingId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn should_name_entity_when_parsing_invalid_uuid() {
        let err = DeviceId::from_str("not-a-uuid").unwrap_err();
        assert_eq!(err.entity, "Device");
        assert_eq!(err.to_string(), "invalid Device id \"not-a-uuid\"");
    }

    #[test]
    fn should_carry_entity_name_per_id_type() {
        assert_eq!(DeviceId::ENTITY, "Device");
        assert_eq!(HubId::ENTITY, "Hub");
        assert_eq!(DwellingId::ENTITY, "Dwelling");
    }
}
