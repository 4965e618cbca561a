use serde::{Deserialize, Serialize};

/// Which store keeps the profile collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local collection; contents are lost on restart.
    #[default]
    Memory,
    /// SQL database reached through `dsn` (`SQLite` or `PostgreSQL`).
    Database,
}

/// Configuration for the profile directory module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileDirectoryConfig {
    pub backend: StorageBackend,
    /// Connection string for the `database` backend, e.g.
    /// `sqlite://profiles.db?mode=rwc` or `postgres://app@localhost/profiles`.
    pub dsn: Option<String>,
    /// Insert the sample profiles when the collection starts out empty.
    pub seed: bool,
}

impl Default for ProfileDirectoryConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            dsn: None,
            seed: true,
        }
    }
}
