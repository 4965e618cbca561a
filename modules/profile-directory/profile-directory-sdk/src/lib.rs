//! Profile Directory SDK
//!
//! Transport-agnostic contract types for the profile directory:
//! - `Profile`, `NewProfile`, `ProfilePatch` - directory records and their write models
//! - `User`, `NewUser` - account records kept alongside profiles
//!
//! The implementation crate (`profile-directory`) owns storage and the REST surface;
//! consumers only depend on these types.

pub mod models;

pub use models::{NewProfile, NewUser, Profile, ProfileId, ProfilePatch, User, UserId};
