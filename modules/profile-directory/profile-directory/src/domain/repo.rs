use async_trait::async_trait;
use profile_directory_sdk::{NewProfile, NewUser, Profile, ProfileId, ProfilePatch, User, UserId};

use crate::domain::error::DomainError;
use crate::domain::query;

/// Authoritative keeper of profile and user records.
///
/// Expected conditions are values, not errors: a missing id is `None`, a delete
/// that removed nothing is `false`, no matches is an empty `Vec`. The error arm
/// is reserved for storage faults.
///
/// Listing order is ascending id, which is insertion order because ids are
/// allocated monotonically and never reused.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All profiles currently held.
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError>;

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>, DomainError>;

    /// Store a validated profile under the next unused id.
    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile, DomainError>;

    /// Merge the supplied fields onto an existing record.
    async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>, DomainError>;

    /// Returns whether a record was actually removed.
    async fn delete_profile(&self, id: ProfileId) -> Result<bool, DomainError>;

    /// Case-insensitive substring match over name, location, company, title
    /// and description. An empty query returns the full list.
    async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, DomainError> {
        let profiles = self.list_profiles().await?;
        Ok(query::search(profiles, query))
    }

    /// Case-insensitive exact match on location. An empty location returns
    /// the full list.
    async fn filter_profiles_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Profile>, DomainError> {
        let profiles = self.list_profiles().await?;
        Ok(query::filter_by_location(profiles, location))
    }

    /// Distinct location values, sorted.
    async fn list_locations(&self) -> Result<Vec<String>, DomainError> {
        let profiles = self.list_profiles().await?;
        Ok(query::distinct_locations(&profiles))
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// First user whose username equals `username` exactly.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Fails with [`DomainError::UsernameTaken`] if the username is in use.
    async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError>;
}
