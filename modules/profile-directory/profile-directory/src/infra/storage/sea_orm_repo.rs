use async_trait::async_trait;
use profile_directory_sdk::{NewProfile, NewUser, Profile, ProfileId, ProfilePatch, User, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use sea_orm_migration::MigratorTrait;

use crate::domain::error::DomainError;
use crate::domain::repo::ProfileStore;
use crate::infra::storage::entity::{profile, user};
use crate::infra::storage::mapper;
use crate::infra::storage::migrations::Migrator;

/// SQL-backed profile store.
///
/// Ids come from the database's auto-increment column, so they are never
/// reused once allocated.
#[derive(Clone)]
pub struct SeaOrmProfileStore {
    db: DatabaseConnection,
}

impl SeaOrmProfileStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connect to `dsn` and bring the schema up to date.
    ///
    /// # Errors
    /// Connection or migration failures.
    pub async fn connect(dsn: &str) -> Result<Self, DomainError> {
        let db = Database::connect(dsn).await?;
        Migrator::up(&db, None).await?;
        tracing::info!("Profile database ready");
        Ok(Self::new(db))
    }

    /// Full-row write of an already merged profile. `None` when the row is gone.
    async fn write_profile(&self, profile: Profile) -> Result<Option<Profile>, DomainError> {
        match mapper::profile_update_model(profile).update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // Deleted between the read and the write.
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn user_err(e: DbErr, username: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::username_taken(username),
        _ => e.into(),
    }
}

#[async_trait]
impl ProfileStore for SeaOrmProfileStore {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let rows = profile::Entity::find()
            .order_by_asc(profile::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>, DomainError> {
        let found = profile::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Into::into))
    }

    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile, DomainError> {
        let model = mapper::new_profile_model(new_profile)
            .insert(&self.db)
            .await?;
        Ok(model.into())
    }

    async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Option<Profile>, DomainError> {
        let Some(existing) = profile::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut merged: Profile = existing.into();
        if patch.is_empty() {
            return Ok(Some(merged));
        }
        patch.apply_to(&mut merged);
        self.write_profile(merged).await
    }

    async fn delete_profile(&self, id: ProfileId) -> Result<bool, DomainError> {
        let result = profile::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let found = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Into::into))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let found = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        if self.get_user_by_username(&new_user.username).await?.is_some() {
            return Err(DomainError::username_taken(new_user.username));
        }
        let username = new_user.username.clone();
        let model = mapper::new_user_model(new_user)
            .insert(&self.db)
            .await
            .map_err(|e| user_err(e, &username))?;
        Ok(model.into())
    }
}
