#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use profile_directory_sdk::NewProfile;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes;
use crate::domain::seed::sample_profiles;
use crate::domain::service::ProfilesService;
use crate::infra::storage::InMemoryProfileStore;
use crate::infra::storage::migrations::Migrator;

#[must_use]
pub fn new_profile(name: &str, location: &str) -> NewProfile {
    NewProfile {
        name: name.to_owned(),
        title: "Engineer".to_owned(),
        company: "Example Corp".to_owned(),
        location: location.to_owned(),
        description: format!("{name} works in {location}"),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        website: None,
        linkedin: None,
        experience: Some("3 years".to_owned()),
        latitude: 10.0,
        longitude: 20.0,
        image_url: "https://example.com/avatar.jpg".to_owned(),
    }
}

/// In-memory store holding the four sample profiles with ids 1..=4.
#[must_use]
pub fn seeded_store() -> InMemoryProfileStore {
    InMemoryProfileStore::with_profiles(sample_profiles()).unwrap()
}

#[must_use]
pub fn seeded_service() -> ProfilesService {
    ProfilesService::new(Arc::new(seeded_store()))
}

#[must_use]
pub fn seeded_router() -> Router {
    routes::router(Arc::new(seeded_service()))
}

pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
