//! Dwelling: a physical living space that may host the hub.
//!
//! The hub/dwelling link is stored on both sides. [`install`] and
//! [`uninstall`] check both sides before touching either, so the two can
//! never disagree.

use serde::Serialize;

use crate::error::StateError;
use crate::hub::Hub;
use crate::id::{DwellingId, HubId};

/// A physical location with an occupancy flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dwelling {
    pub id: DwellingId,
    pub name: String,
    pub address: String,
    pub is_occupied: bool,
    hub_id: Option<HubId>,
}

impl Dwelling {
    /// A vacant dwelling with no hub.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: DwellingId::new(),
            name: name.into(),
            address: address.into(),
            is_occupied: false,
            hub_id: None,
        }
    }

    /// The hub installed here, if any.
    #[must_use]
    pub fn hub_id(&self) -> Option<HubId> {
        self.hub_id
    }
}

/// Install `hub` into `dwelling`, setting both sides of the link.
///
/// # Errors
///
/// Returns [`StateError::AlreadyInstalled`] if the hub is already installed
/// in any dwelling (this one included) or the dwelling already hosts a hub.
pub fn install(hub: &mut Hub, dwelling: &mut Dwelling) -> Result<(), StateError> {
    if let Some(current) = hub.dwelling_id() {
        return Err(StateError::AlreadyInstalled {
            hub: hub.id,
            dwelling: current,
        });
    }
    if let Some(current) = dwelling.hub_id {
        return Err(StateError::AlreadyInstalled {
            hub: current,
            dwelling: dwelling.id,
        });
    }
    hub.set_dwelling(Some(dwelling.id));
    dwelling.hub_id = Some(hub.id);
    Ok(())
}

/// Remove `hub` from `dwelling`, clearing both sides of the link.
///
/// # Errors
///
/// Returns [`StateError::NotInstalled`] unless `hub` is the hub installed
/// in `dwelling`.
pub fn uninstall(hub: &mut Hub, dwelling: &mut Dwelling) -> Result<(), StateError> {
    if dwelling.hub_id != Some(hub.id) || hub.dwelling_id() != Some(dwelling.id) {
        return Err(StateError::NotInstalled(dwelling.id));
    }
    hub.set_dwelling(None);
    dwelling.hub_id = None;
    Ok(())
}
