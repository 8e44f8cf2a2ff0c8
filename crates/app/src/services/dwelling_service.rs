//! Dwelling service: dwellings, their occupancy and the hub installed in them.

use dwellhub_domain::dwelling::{Dwelling, install, uninstall};
use dwellhub_domain::error::{DwellHubError, NotFoundError, StateError};
use dwellhub_domain::id::DwellingId;

use crate::ports::{EntityReader, EntityStore};

/// Application service for dwellings.
pub struct DwellingService<R> {
    repo: R,
}

impl<R: EntityReader> DwellingService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Look up a dwelling by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no dwelling with `id` exists.
    pub fn get_dwelling(&self, id: DwellingId) -> Result<Dwelling, DwellHubError> {
        self.repo
            .get_dwelling(id)
            .ok_or_else(|| NotFoundError::dwelling(id).into())
    }

    /// List all dwellings in creation order.
    pub fn list_dwellings(&self) -> Vec<Dwelling> {
        self.repo.list_dwellings()
    }
}

impl<R: EntityStore> DwellingService<R> {
    /// Create a new, vacant dwelling. Names and addresses need not be unique.
    #[tracing::instrument(skip(self))]
    pub fn create_dwelling(&mut self, name: &str, address: &str) -> Dwelling {
        let dwelling = self.repo.insert_dwelling(Dwelling::new(name, address));
        tracing::info!(dwelling_id = %dwelling.id, "dwelling created");
        dwelling
    }

    /// Mark a dwelling as occupied or vacant.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the dwelling does not exist.
    #[tracing::instrument(skip(self))]
    pub fn set_occupied(
        &mut self,
        id: DwellingId,
        occupied: bool,
    ) -> Result<Dwelling, DwellHubError> {
        let mut dwelling = self.get_dwelling(id)?;
        dwelling.is_occupied = occupied;
        self.repo.update_dwelling(dwelling)
    }

    /// Install the hub into a dwelling.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the dwelling or the hub does
    /// not exist and [`DwellHubError::State`] when the hub is already
    /// installed or the dwelling already hosts a hub.
    #[tracing::instrument(skip(self))]
    pub fn install_hub(&mut self, id: DwellingId) -> Result<Dwelling, DwellHubError> {
        let mut dwelling = self.get_dwelling(id)?;
        let mut hub = self.repo.get_hub().ok_or_else(NotFoundError::hub)?;
        install(&mut hub, &mut dwelling)?;
        let dwelling = self.repo.update_dwelling(dwelling)?;
        let hub = self.repo.save_hub(hub);
        tracing::info!(hub_id = %hub.id, "hub installed");
        Ok(dwelling)
    }

    /// Take the hub out of a dwelling.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the dwelling does not exist
    /// and [`DwellHubError::State`] when it hosts no hub.
    #[tracing::instrument(skip(self))]
    pub fn uninstall_hub(&mut self, id: DwellingId) -> Result<Dwelling, DwellHubError> {
        let mut dwelling = self.get_dwelling(id)?;
        let mut hub = self.repo.get_hub().ok_or(StateError::NotInstalled(id))?;
        uninstall(&mut hub, &mut dwelling)?;
        let dwelling = self.repo.update_dwelling(dwelling)?;
        let hub = self.repo.save_hub(hub);
        tracing::info!(hub_id = %hub.id, "hub uninstalled");
        Ok(dwelling)
    }
}
