use std::sync::Arc;

use profile_directory_sdk::{NewProfile, Profile, ProfileId, ProfilePatch};

use crate::domain::error::DomainError;
use crate::domain::repo::ProfileStore;

/// Domain service for profiles.
///
/// Translates store absences into [`DomainError::ProfileNotFound`] so that the
/// REST layer only deals with one error type.
#[derive(Clone)]
pub struct ProfilesService {
    store: Arc<dyn ProfileStore>,
}

impl ProfilesService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// # Errors
    /// Storage faults.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        tracing::debug!("Listing profiles");
        let profiles = self.store.list_profiles().await?;
        tracing::debug!("Listed {} profiles", profiles.len());
        Ok(profiles)
    }

    /// # Errors
    /// [`DomainError::ProfileNotFound`] for an unknown id, or storage faults.
    pub async fn get_profile(&self, id: ProfileId) -> Result<Profile, DomainError> {
        tracing::debug!(profile.id = id, "Getting profile");
        self.store
            .get_profile(id)
            .await?
            .ok_or_else(|| DomainError::profile_not_found(id))
    }

    /// # Errors
    /// Storage faults.
    pub async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile, DomainError> {
        tracing::info!("Creating new profile");
        let profile = self.store.create_profile(new_profile).await?;
        tracing::info!(profile.id = profile.id, "Successfully created profile");
        Ok(profile)
    }

    /// # Errors
    /// [`DomainError::ProfileNotFound`] for an unknown id, or storage faults.
    pub async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Profile, DomainError> {
        tracing::info!(profile.id = id, "Updating profile");
        let profile = self
            .store
            .update_profile(id, patch)
            .await?
            .ok_or_else(|| DomainError::profile_not_found(id))?;
        tracing::info!(profile.id = id, "Successfully updated profile");
        Ok(profile)
    }

    /// # Errors
    /// [`DomainError::ProfileNotFound`] if nothing was removed, or storage faults.
    pub async fn delete_profile(&self, id: ProfileId) -> Result<(), DomainError> {
        tracing::info!(profile.id = id, "Deleting profile");
        if !self.store.delete_profile(id).await? {
            return Err(DomainError::profile_not_found(id));
        }
        tracing::info!(profile.id = id, "Successfully deleted profile");
        Ok(())
    }

    /// A missing query behaves like an empty one and returns every profile.
    ///
    /// # Errors
    /// Storage faults.
    pub async fn search_profiles(&self, query: Option<&str>) -> Result<Vec<Profile>, DomainError> {
        let query = query.unwrap_or_default();
        tracing::debug!(query, "Searching profiles");
        self.store.search_profiles(query).await
    }

    /// A missing location behaves like an empty one and returns every profile.
    ///
    /// # Errors
    /// Storage faults.
    pub async fn filter_profiles_by_location(
        &self,
        location: Option<&str>,
    ) -> Result<Vec<Profile>, DomainError> {
        let location = location.unwrap_or_default();
        tracing::debug!(location, "Filtering profiles by location");
        self.store.filter_profiles_by_location(location).await
    }

    /// # Errors
    /// Storage faults.
    pub async fn list_locations(&self) -> Result<Vec<String>, DomainError> {
        self.store.list_locations().await
    }
}
