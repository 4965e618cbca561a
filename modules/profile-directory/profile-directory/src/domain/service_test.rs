use std::sync::Arc;

use async_trait::async_trait;
use profile_directory_sdk::{NewProfile, NewUser, Profile, ProfileId, ProfilePatch, User, UserId};

use crate::domain::error::DomainError;
use crate::domain::repo::ProfileStore;
use crate::domain::service::ProfilesService;
use crate::test_support::{new_profile, seeded_service};

/// Store whose backing storage is unreachable.
struct BrokenStore;

fn offline() -> DomainError {
    DomainError::database("connection refused")
}

#[async_trait]
impl ProfileStore for BrokenStore {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        Err(offline())
    }

    async fn get_profile(&self, _id: ProfileId) -> Result<Option<Profile>, DomainError> {
        Err(offline())
    }

    async fn create_profile(&self, _new_profile: NewProfile) -> Result<Profile, DomainError> {
        Err(offline())
    }

    async fn update_profile(
        &self,
        _id: ProfileId,
        _patch: ProfilePatch,
    ) -> Result<Option<Profile>, DomainError> {
        Err(offline())
    }

    async fn delete_profile(&self, _id: ProfileId) -> Result<bool, DomainError> {
        Err(offline())
    }

    async fn get_user(&self, _id: UserId) -> Result<Option<User>, DomainError> {
        Err(offline())
    }

    async fn get_user_by_username(&self, _username: &str) -> Result<Option<User>, DomainError> {
        Err(offline())
    }

    async fn create_user(&self, _new_user: NewUser) -> Result<User, DomainError> {
        Err(offline())
    }
}

#[tokio::test]
async fn get_unknown_profile_is_not_found() {
    let svc = seeded_service();
    let err = svc.get_profile(999).await.unwrap_err();
    assert!(matches!(err, DomainError::ProfileNotFound { id: 999 }));
}

#[tokio::test]
async fn get_after_create_returns_input_plus_id() {
    let svc = seeded_service();
    let input = new_profile("Linus", "Helsinki");

    let created = svc.create_profile(input.clone()).await.unwrap();
    let fetched = svc.get_profile(created.id).await.unwrap();

    assert_eq!(fetched, input.with_id(created.id));
}

#[tokio::test]
async fn update_unknown_profile_is_not_found_and_changes_nothing() {
    let svc = seeded_service();
    let before = svc.list_profiles().await.unwrap();

    let patch = ProfilePatch {
        name: Some("X".to_owned()),
        ..ProfilePatch::default()
    };
    let err = svc.update_profile(999, patch).await.unwrap_err();

    assert!(matches!(err, DomainError::ProfileNotFound { id: 999 }));
    assert_eq!(svc.list_profiles().await.unwrap(), before);
}

#[tokio::test]
async fn update_changes_only_supplied_field() {
    let svc = seeded_service();
    let before = svc.get_profile(1).await.unwrap();

    let patch = ProfilePatch {
        company: Some("Initech".to_owned()),
        ..ProfilePatch::default()
    };
    let after = svc.update_profile(1, patch).await.unwrap();

    let mut expected = before;
    expected.company = "Initech".to_owned();
    assert_eq!(after, expected);
}

#[tokio::test]
async fn delete_twice_reports_not_found_second_time() {
    let svc = seeded_service();

    svc.delete_profile(2).await.unwrap();
    let err = svc.delete_profile(2).await.unwrap_err();

    assert!(matches!(err, DomainError::ProfileNotFound { id: 2 }));
    assert!(matches!(
        svc.get_profile(2).await,
        Err(DomainError::ProfileNotFound { .. })
    ));
}

#[tokio::test]
async fn missing_query_and_empty_query_list_everything() {
    let svc = seeded_service();
    let all = svc.list_profiles().await.unwrap();

    assert_eq!(svc.search_profiles(None).await.unwrap(), all);
    assert_eq!(svc.search_profiles(Some("")).await.unwrap(), all);
    assert_eq!(svc.filter_profiles_by_location(None).await.unwrap(), all);
}

#[tokio::test]
async fn seed_scenario() {
    let svc = seeded_service();

    // "data" hits Sarah's title and the "data-driven" in Michael's description.
    let data = svc.search_profiles(Some("data")).await.unwrap();
    let names: Vec<_> = data.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Michael Chang", "Sarah Martinez"]);
    assert_eq!(data[1].title, "Data Scientist");

    let london = svc.filter_profiles_by_location(Some("london")).await.unwrap();
    assert_eq!(london.len(), 1);
    assert_eq!(london[0].name, "Michael Chang");

    let count = svc.list_profiles().await.unwrap().len();
    let created = svc
        .create_profile(new_profile("Temp", "Oslo"))
        .await
        .unwrap();
    svc.delete_profile(created.id).await.unwrap();
    assert_eq!(svc.list_profiles().await.unwrap().len(), count);
}

#[tokio::test]
async fn storage_faults_propagate() {
    let svc = ProfilesService::new(Arc::new(BrokenStore));

    assert!(matches!(
        svc.list_profiles().await,
        Err(DomainError::Database { .. })
    ));
    assert!(matches!(
        svc.get_profile(1).await,
        Err(DomainError::Database { .. })
    ));
    assert!(matches!(
        svc.search_profiles(Some("x")).await,
        Err(DomainError::Database { .. })
    ));
    assert!(matches!(
        svc.list_locations().await,
        Err(DomainError::Database { .. })
    ));
}
