//! Common error types used across the workspace.
//!
//! Every fallible operation returns [`DwellHubError`]. Each family of
//! failure has its own typed error that converts into it via `#[from]`,
//! and [`DwellHubError::kind`] flattens the whole taxonomy for callers
//! that only care about the category.

use crate::device::DeviceType;
use crate::id::{DeviceId, DwellingId, EntityId, HubId};

/// Top-level error for every registry operation.
#[derive(Debug, thiserror::Error)]
pub enum DwellHubError {
    /// A referenced identifier is unknown.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A request was malformed for the targeted entity.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The entity is not in a state that allows the operation.
    #[error(transparent)]
    State(#[from] StateError),
}

/// The referenced entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of entity that was looked up (`"Device"`, `"Hub"`, `"Dwelling"`).
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

impl NotFoundError {
    /// No entity with `id` exists.
    #[must_use]
    pub fn missing<I: EntityId>(id: I) -> Self {
        Self {
            entity: I::ENTITY,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn device(id: DeviceId) -> Self {
        Self::missing(id)
    }

    #[must_use]
    pub fn dwelling(id: DwellingId) -> Self {
        Self::missing(id)
    }

    /// The hub has not been created yet.
    #[must_use]
    pub fn hub() -> Self {
        Self {
            entity: HubId::ENTITY,
            id: "main".to_string(),
        }
    }
}

/// A request that can never succeed as written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown device type {0:?}")]
    InvalidType(String),

    #[error("{device_type} does not support attribute {attribute:?}")]
    UnsupportedAttribute {
        device_type: DeviceType,
        attribute: String,
    },

    #[error("invalid value for {attribute:?}: {reason}")]
    InvalidValue {
        attribute: String,
        reason: &'static str,
    },

    #[error("modification request has no fields")]
    EmptyModification,

    #[error("{device_type} does not support {operation}")]
    UnsupportedOperation {
        device_type: DeviceType,
        operation: &'static str,
    },

    #[error("incorrect pin")]
    IncorrectPin,
}

impl ValidationError {
    pub(crate) fn invalid_value(attribute: &str, reason: &'static str) -> Self {
        Self::InvalidValue {
            attribute: attribute.to_string(),
            reason,
        }
    }
}

/// A pairing or installation precondition was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("device {device} is already paired to hub {hub}")]
    AlreadyPaired { device: DeviceId, hub: HubId },

    #[error("device {0} is not paired")]
    NotPaired(DeviceId),

    #[error("device {0} is paired and cannot be deleted")]
    DeviceInUse(DeviceId),

    #[error("hub {hub} is already installed in dwelling {dwelling}")]
    AlreadyInstalled { hub: HubId, dwelling: DwellingId },

    #[error("dwelling {0} has no hub installed")]
    NotInstalled(DwellingId),
}

/// Flat view of the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidType,
    UnsupportedAttribute,
    InvalidValue,
    EmptyModification,
    UnsupportedOperation,
    IncorrectPin,
    AlreadyPaired,
    NotPaired,
    DeviceInUse,
    AlreadyInstalled,
    NotInstalled,
}

impl DwellHubError {
    /// Category of this error, independent of the identifiers it carries.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(err) => match err {
                ValidationError::InvalidType(_) => ErrorKind::InvalidType,
                ValidationError::UnsupportedAttribute { .. } => ErrorKind::UnsupportedAttribute,
                ValidationError::InvalidValue { .. } => ErrorKind::InvalidValue,
                ValidationError::EmptyModification => ErrorKind::EmptyModification,
                ValidationError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
                ValidationError::IncorrectPin => ErrorKind::IncorrectPin,
            },
            Self::State(err) => match err {
                StateError::AlreadyPaired { .. } => ErrorKind::AlreadyPaired,
                StateError::NotPaired(_) => ErrorKind::NotPaired,
                StateError::DeviceInUse(_) => ErrorKind::DeviceInUse,
                StateError::AlreadyInstalled { .. } => ErrorKind::AlreadyInstalled,
                StateError::NotInstalled(_) => ErrorKind::NotInstalled,
            },
        }
    }
}
