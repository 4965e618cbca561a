//! Profile Directory Module
//!
//! Keeps the authoritative collection of people profiles and exposes it over
//! a JSON REST API: listing, lookup, substring search, exact location filter,
//! and CRUD with partial-update semantics.
//!
//! ## Public API
//!
//! Contract types live in `profile-directory-sdk` and are re-exported here.
//! [`ProfileDirectory`] is the composition root: it builds the configured
//! store, seeds it, and hands out the REST router.

pub use profile_directory_sdk::{
    NewProfile, NewUser, Profile, ProfileId, ProfilePatch, User, UserId,
};

pub mod config;
pub use config::{ProfileDirectoryConfig, StorageBackend};

pub mod module;
pub use module::ProfileDirectory;

// Internal modules are public for integration testing; prefer the SDK types.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
pub(crate) mod test_support;
