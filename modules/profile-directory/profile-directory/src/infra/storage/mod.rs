//! Infrastructure storage layer - the profile store backends.
//!
//! - `memory` - process-local store guarded by a single mutex
//! - `sea_orm_repo` - SQL store on top of SeaORM (`SQLite` / `PostgreSQL`)
//! - `entity/` - SeaORM entity definitions (`profiles`, `users`)
//! - `mapper` - conversions between SeaORM models and SDK contract types
//! - `migrations/` - database schema migrations
//!
//! Both backends implement [`crate::domain::repo::ProfileStore`] and share the
//! read filters from [`crate::domain::query`].

pub mod entity;
pub mod mapper;
pub mod memory;
pub mod migrations;
pub mod sea_orm_repo;

pub use memory::InMemoryProfileStore;
pub use sea_orm_repo::SeaOrmProfileStore;
