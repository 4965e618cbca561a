use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use profile_directory_sdk::{NewProfile, NewUser, Profile, ProfileId, ProfilePatch, User, UserId};

use crate::domain::error::DomainError;
use crate::domain::repo::ProfileStore;

/// Process-local profile store.
///
/// All state sits behind one mutex so that id allocation and insertion happen
/// as a single step. Contents are lost when the process exits.
pub struct InMemoryProfileStore {
    state: Mutex<State>,
}

struct State {
    profiles: BTreeMap<ProfileId, Profile>,
    users: BTreeMap<UserId, User>,
    next_profile_id: ProfileId,
    next_user_id: UserId,
}

impl State {
    fn allocate_profile_id(&mut self) -> Result<ProfileId, DomainError> {
        let id = self.next_profile_id;
        self.next_profile_id = id
            .checked_add(1)
            .ok_or_else(|| DomainError::internal("profile id space exhausted"))?;
        Ok(id)
    }

    fn allocate_user_id(&mut self) -> Result<UserId, DomainError> {
        let id = self.next_user_id;
        self.next_user_id = id
            .checked_add(1)
            .ok_or_else(|| DomainError::internal("user id space exhausted"))?;
        Ok(id)
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                profiles: BTreeMap::new(),
                users: BTreeMap::new(),
                next_profile_id: 1,
                next_user_id: 1,
            }),
        }
    }

    /// Store pre-populated with `profiles`, numbered from 1 in iteration order.
    ///
    /// # Errors
    /// `Internal` if the profile id space runs out.
    pub fn with_profiles(
        profiles: impl IntoIterator<Item = NewProfile>,
    ) -> Result<Self, DomainError> {
        let store = Self::new();
        store.insert_all(profiles)?;
        Ok(store)
    }

    fn insert_all(&self, profiles: impl IntoIterator<Item = NewProfile>) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        for new_profile in profiles {
            let id = state.allocate_profile_id()?;
            state.profiles.insert(id, new_profile.with_id(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        Ok(self.state.lock().profiles.values().cloned().collect())
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>, DomainError> {
        Ok(self.state.lock().profiles.get(&id).cloned())
    }

    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile, DomainError> {
        let mut state = self.state.lock();
        let id = state.allocate_profile_id()?;
        let profile = new_profile.with_id(id);
        state.profiles.insert(id, profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>, DomainError> {
        let mut state = self.state.lock();
        let Some(profile) = state.profiles.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(profile);
        Ok(Some(profile.clone()))
    }

    async fn delete_profile(&self, id: ProfileId) -> Result<bool, DomainError> {
        Ok(self.state.lock().profiles.remove(&id).is_some())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.lock();
        if state.users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::username_taken(new_user.username));
        }
        let id = state.allocate_user_id()?;
        let user = new_user.with_id(id);
        state.users.insert(id, user.clone());
        Ok(user)
    }
}
