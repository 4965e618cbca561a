use std::sync::Arc;

use axum::Router;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::{ProfileDirectoryConfig, StorageBackend};
use crate::domain::repo::ProfileStore;
use crate::domain::seed;
use crate::domain::service::ProfilesService;
use crate::infra::storage::{InMemoryProfileStore, SeaOrmProfileStore};

/// Composition root: owns the configured store and the service on top of it.
#[derive(Clone)]
pub struct ProfileDirectory {
    service: Arc<ProfilesService>,
}

impl ProfileDirectory {
    /// Build the store selected by `cfg`, run migrations for the database
    /// backend and seed an empty collection when asked to.
    ///
    /// # Errors
    /// Fails when the database backend has no DSN, cannot be reached or
    /// cannot be migrated, or when seeding fails.
    pub async fn init(cfg: &ProfileDirectoryConfig) -> anyhow::Result<Self> {
        info!(backend = ?cfg.backend, "Initializing profile_directory module");

        let store: Arc<dyn ProfileStore> = match cfg.backend {
            StorageBackend::Memory => Arc::new(InMemoryProfileStore::new()),
            StorageBackend::Database => {
                let dsn = cfg.dsn.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("storage.dsn is required for the database backend")
                })?;
                debug!("Connecting profile store to database");
                Arc::new(SeaOrmProfileStore::connect(dsn).await?)
            }
        };

        if cfg.seed {
            let inserted = seed::seed_if_empty(store.as_ref()).await?;
            debug!(inserted, "Seed step finished");
        }

        Ok(Self::with_store(store))
    }

    /// Wrap an already built store.
    #[must_use]
    pub fn with_store(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            service: Arc::new(ProfilesService::new(store)),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<ProfilesService> {
        Arc::clone(&self.service)
    }

    /// REST routes under `/api`.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.service())
    }
}
